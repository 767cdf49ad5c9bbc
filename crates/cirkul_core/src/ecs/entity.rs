//! Entity handles and id allocation
//!
//! Entities are plain 32-bit ids. Fresh ids come from a monotonic counter;
//! ids released by `kill_entity` are queued in a bounded ring and handed out
//! again before the counter advances.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use tracing::warn;

/// Entity handle.
///
/// Transparent over `u32` so an archetype's entity array can be viewed as a
/// typed column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues entity ids, preferring recycled ones.
#[derive(Debug, Clone)]
pub(crate) struct EntityAllocator {
    next: u32,
    max: u32,
    queue: Box<[u32]>,
    head: u64,
    tail: u64,
}

impl EntityAllocator {
    pub fn new(max_entities: u32, max_free_ids: usize) -> Self {
        Self {
            next: 0,
            max: max_entities,
            queue: vec![0; max_free_ids].into_boxed_slice(),
            head: 0,
            tail: 0,
        }
    }

    /// Next id, or `None` once `max_entities` ids are in use and nothing has
    /// been recycled.
    pub fn allocate(&mut self) -> Option<Entity> {
        if self.head == self.tail {
            if self.next >= self.max {
                return None;
            }
            let id = self.next;
            self.next += 1;
            return Some(Entity(id));
        }

        let slot = (self.tail % self.queue.len() as u64) as usize;
        self.tail += 1;
        Some(Entity(self.queue[slot]))
    }

    /// Queue `entity` for reissue. Returns false when the ring is full; the
    /// id is then retired for the lifetime of the scene.
    pub fn recycle(&mut self, entity: Entity) -> bool {
        if self.pending() == self.queue.len() {
            warn!(%entity, capacity = self.queue.len(), "free-id queue full, retiring id");
            return false;
        }

        let slot = (self.head % self.queue.len() as u64) as usize;
        self.queue[slot] = entity.0;
        self.head += 1;
        true
    }

    /// Ids waiting in the recycle queue.
    pub fn pending(&self) -> usize {
        (self.head - self.tail) as usize
    }

    /// Ids ever issued from the counter.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
