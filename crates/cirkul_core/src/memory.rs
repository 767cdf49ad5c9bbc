//! Memory management utilities
//!
//! A single bump arena backs every archetype column and entity array. Regions
//! are handed out by offset and are only ever released together, when the
//! arena itself is dropped.

use bytemuck::{Pod, Zeroable};
use std::mem::{align_of, size_of};
use std::ops::Range;
use thiserror::Error;

/// Largest alignment the arena can satisfy (alignment of the block start).
pub const ARENA_ALIGN: usize = 16;

#[derive(Clone, Copy)]
#[repr(C, align(16))]
struct Chunk([u8; ARENA_ALIGN]);

// SAFETY: `Chunk` is a byte array whose size equals its alignment, so it has
// no padding and every bit pattern is valid.
unsafe impl Zeroable for Chunk {}
unsafe impl Pod for Chunk {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },

    #[error("unsupported alignment {align} (arena guarantees at most {})", ARENA_ALIGN)]
    UnsupportedAlignment { align: usize },
}

/// A region of the arena, addressed by byte offset from the block start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaBlock {
    offset: usize,
    len: usize,
}

impl ArenaBlock {
    /// Placeholder for storage that has not been allocated yet.
    pub const EMPTY: Self = Self { offset: 0, len: 0 };

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Snapshot of arena usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    pub capacity: usize,
    pub used: usize,
    pub remaining: usize,
    pub allocations: usize,
}

/// Linear allocator over one fixed-size, zero-initialised block.
pub struct Arena {
    chunks: Vec<Chunk>,
    capacity: usize,
    head: usize,
    allocations: usize,
}

impl Arena {
    /// Reserve `capacity` bytes up front.
    pub fn new(capacity: usize) -> Self {
        let chunk_count = capacity.div_ceil(ARENA_ALIGN);
        Self {
            chunks: vec![Chunk::zeroed(); chunk_count],
            capacity,
            head: 0,
            allocations: 0,
        }
    }

    /// Carve `size` bytes aligned to `align` off the head of the arena.
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<ArenaBlock, ArenaError> {
        let align = align.max(1);
        if !align.is_power_of_two() || align > ARENA_ALIGN {
            return Err(ArenaError::UnsupportedAlignment { align });
        }

        let start = (self.head + align - 1) & !(align - 1);
        let end = start
            .checked_add(size)
            .filter(|&end| end <= self.capacity)
            .ok_or(ArenaError::Exhausted {
                requested: size,
                remaining: self.remaining(),
            })?;

        self.head = end;
        self.allocations += 1;
        Ok(ArenaBlock {
            offset: start,
            len: size,
        })
    }

    /// Allocate room for `count` values of `T`.
    pub fn alloc_array<T: Pod>(&mut self, count: usize) -> Result<ArenaBlock, ArenaError> {
        let size = size_of::<T>()
            .checked_mul(count)
            .ok_or(ArenaError::Exhausted {
                requested: usize::MAX,
                remaining: self.remaining(),
            })?;
        self.alloc(size, align_of::<T>())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.head
    }

    #[inline]
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            capacity: self.capacity,
            used: self.used(),
            remaining: self.remaining(),
            allocations: self.allocations,
        }
    }

    /// The whole block as bytes.
    #[inline]
    pub fn memory(&self) -> &[u8] {
        &bytemuck::cast_slice::<Chunk, u8>(self.chunks.as_slice())[..self.capacity]
    }

    /// The whole block as mutable bytes.
    #[inline]
    pub fn memory_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut::<Chunk, u8>(self.chunks.as_mut_slice())[..self.capacity]
    }

    #[inline]
    pub fn bytes(&self, range: Range<usize>) -> &[u8] {
        &self.memory()[range]
    }

    #[inline]
    pub fn bytes_mut(&mut self, range: Range<usize>) -> &mut [u8] {
        &mut self.memory_mut()[range]
    }

    /// View a block as a typed slice.
    pub fn slice<T: Pod>(&self, block: ArenaBlock) -> &[T] {
        bytemuck::cast_slice(self.bytes(block.range()))
    }

    /// View a block as a mutable typed slice.
    pub fn slice_mut<T: Pod>(&mut self, block: ArenaBlock) -> &mut [T] {
        bytemuck::cast_slice_mut(self.bytes_mut(block.range()))
    }

    /// Copy `src` to the region starting at `dst`. Regions may not overlap
    /// partially in a way that matters; arena blocks never do.
    #[inline]
    pub fn copy(&mut self, src: Range<usize>, dst: usize) {
        self.memory_mut().copy_within(src, dst);
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.head)
            .field("allocations", &self.allocations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_advances_head() {
        let mut arena = Arena::new(64);
        let a = arena.alloc(10, 1).unwrap();
        let b = arena.alloc(4, 4).unwrap();

        assert_eq!(a.range(), 0..10);
        assert_eq!(b.offset(), 12);
        assert_eq!(arena.used(), 16);
        assert_eq!(arena.remaining(), 48);
        assert_eq!(arena.allocation_count(), 2);
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut arena = Arena::new(32);
        arena.alloc(30, 1).unwrap();
        let err = arena.alloc(8, 1).unwrap_err();
        assert_eq!(
            err,
            ArenaError::Exhausted {
                requested: 8,
                remaining: 2
            }
        );
        // A failed allocation leaves the head untouched.
        assert_eq!(arena.used(), 30);
    }

    #[test]
    fn rejects_over_alignment() {
        let mut arena = Arena::new(128);
        assert_eq!(
            arena.alloc(8, 32),
            Err(ArenaError::UnsupportedAlignment { align: 32 })
        );
        assert_eq!(
            arena.alloc(8, 3),
            Err(ArenaError::UnsupportedAlignment { align: 3 })
        );
    }

    #[test]
    fn typed_slices_round_trip_through_blocks() {
        let mut arena = Arena::new(256);
        let _pad = arena.alloc(3, 1).unwrap();
        let block = arena.alloc_array::<u64>(4).unwrap();
        assert_eq!(block.offset() % align_of::<u64>(), 0);

        arena.slice_mut::<u64>(block).copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(arena.slice::<u64>(block), &[1, 2, 3, 4]);
    }

    #[test]
    fn copy_moves_bytes_between_blocks() {
        let mut arena = Arena::new(64);
        let src = arena.alloc_array::<u32>(2).unwrap();
        let dst = arena.alloc_array::<u32>(2).unwrap();
        arena.slice_mut::<u32>(src).copy_from_slice(&[7, 9]);

        arena.copy(src.range(), dst.offset());
        assert_eq!(arena.slice::<u32>(dst), &[7, 9]);
    }

    #[test]
    fn fresh_memory_is_zeroed() {
        let mut arena = Arena::new(40);
        let block = arena.alloc_array::<u32>(10).unwrap();
        assert!(arena.slice::<u32>(block).iter().all(|&v| v == 0));
    }
}
