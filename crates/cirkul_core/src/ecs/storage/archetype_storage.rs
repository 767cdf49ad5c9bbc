// archetype_storage.rs - Arena-backed SoA storage for one archetype
//
// Rows are dense: entity i of the archetype lives at row i of every column
// and at slot i of the entity array. Removal swaps the last row into the gap.

use super::Column;
use crate::ecs::{
    ArchetypeId, ArchetypeLayout, Bitmask, Component, ComponentId, ComponentRegistry, Entity,
    WorldError,
};
use crate::memory::{Arena, ArenaBlock, ArenaError};
use std::mem::size_of;
use std::ops::Range;
use tracing::trace;

/// Storage for all entities of a single archetype.
///
/// Every column, the entity array and the entity→row index are blocks in the
/// world arena. The storage itself only records where they are, so callers
/// pass the arena into every operation.
#[derive(Debug)]
pub struct ArchetypeStorage {
    id: ArchetypeId,
    layout: ArchetypeLayout,
    columns: Vec<Column>,
    entities: ArenaBlock,
    entity_index: ArenaBlock,
    len: usize,
    capacity: usize,
    removals: usize,
}

impl ArchetypeStorage {
    /// Create storage with zero capacity. Only the entity→row index (one
    /// `u32` per possible entity id) is allocated up front.
    pub(crate) fn new(
        id: ArchetypeId,
        mask: Bitmask,
        registry: &ComponentRegistry,
        arena: &mut Arena,
        max_entities: usize,
    ) -> Result<Self, WorldError> {
        let layout = ArchetypeLayout::from_mask(mask);
        let columns = layout
            .component_ids()
            .iter()
            .map(|&cid| registry.require(cid).map(|meta| Column::new(*meta)))
            .collect::<Result<Vec<_>, _>>()?;
        let entity_index = arena.alloc_array::<u32>(max_entities)?;

        Ok(Self {
            id,
            layout,
            columns,
            entities: ArenaBlock::EMPTY,
            entity_index,
            len: 0,
            capacity: 0,
            removals: 0,
        })
    }

    #[inline]
    pub fn id(&self) -> ArchetypeId {
        self.id
    }

    #[inline]
    pub fn layout(&self) -> &ArchetypeLayout {
        &self.layout
    }

    #[inline]
    pub fn mask(&self) -> &Bitmask {
        self.layout.mask()
    }

    #[inline]
    pub fn component_ids(&self) -> &[ComponentId] {
        self.layout.component_ids()
    }

    /// Number of entities stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rows allocated in every column.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rows removed over the archetype's lifetime, moves out included.
    #[inline]
    pub fn removals(&self) -> usize {
        self.removals
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn column_index(&self, cid: ComponentId) -> Option<usize> {
        self.layout.column_index(cid)
    }

    #[inline]
    pub fn column(&self, cid: ComponentId) -> Option<&Column> {
        self.column_index(cid).map(|index| &self.columns[index])
    }

    #[inline]
    pub fn has_component(&self, cid: ComponentId) -> bool {
        self.layout.contains(cid)
    }

    /// Byte range of the first `len` entity slots.
    pub(crate) fn entities_range(&self, len: usize) -> Range<usize> {
        let start = self.entities.offset();
        start..start + len * size_of::<Entity>()
    }

    /// Entities in row order.
    pub fn entities<'a>(&self, arena: &'a Arena) -> &'a [Entity] {
        bytemuck::cast_slice(arena.bytes(self.entities_range(self.len)))
    }

    /// Entity stored at `row`.
    ///
    /// # Panics
    /// If `row >= len()`.
    pub fn entity_at(&self, arena: &Arena, row: usize) -> Entity {
        self.entities(arena)[row]
    }

    /// Row recorded for `entity`. Only meaningful when `contains` is true.
    pub fn row_of(&self, arena: &Arena, entity: Entity) -> usize {
        arena.slice::<u32>(self.entity_index)[entity.index()] as usize
    }

    /// Whether `entity` currently occupies a row here.
    pub fn contains(&self, arena: &Arena, entity: Entity) -> bool {
        let Some(&row) = arena.slice::<u32>(self.entity_index).get(entity.index()) else {
            return false;
        };
        self.entities(arena).get(row as usize) == Some(&entity)
    }

    /// Append `entity` with uninitialized component rows. Returns its row.
    ///
    /// The caller writes every component before the row is read.
    pub(crate) fn insert(&mut self, arena: &mut Arena, entity: Entity) -> Result<usize, ArenaError> {
        if self.len == self.capacity {
            self.grow(arena)?;
        }

        let row = self.len;
        arena.slice_mut::<Entity>(self.entities)[row] = entity;
        arena.slice_mut::<u32>(self.entity_index)[entity.index()] = row as u32;
        self.len += 1;
        Ok(row)
    }

    /// Double the capacity (0 → 1 → 2 → 4 …), relocating every column and
    /// the entity array to fresh arena blocks.
    fn grow(&mut self, arena: &mut Arena) -> Result<(), ArenaError> {
        let capacity = if self.capacity == 0 { 1 } else { self.capacity * 2 };

        for column in &mut self.columns {
            column.reallocate(arena, self.len, capacity)?;
        }

        let entities = arena.alloc_array::<Entity>(capacity)?;
        arena.copy(self.entities_range(self.len), entities.offset());
        self.entities = entities;
        self.capacity = capacity;

        trace!(archetype = self.id, capacity, "archetype grew");
        Ok(())
    }

    /// Remove `entity` by moving the last row into its place.
    ///
    /// Returns the entity that was relocated into the vacated row, if any.
    pub(crate) fn swap_remove(&mut self, arena: &mut Arena, entity: Entity) -> Option<Entity> {
        debug_assert!(self.contains(arena, entity), "{entity} not stored in archetype {}", self.id);

        let row = self.row_of(arena, entity);
        let last = self.len - 1;
        self.len = last;
        self.removals += 1;
        if row == last {
            return None;
        }

        for column in &self.columns {
            column.copy_row(arena, last, row);
        }

        let entities = arena.slice_mut::<Entity>(self.entities);
        let moved = entities[last];
        entities[row] = moved;
        arena.slice_mut::<u32>(self.entity_index)[moved.index()] = row as u32;
        Some(moved)
    }

    /// Relocate `entity` from `from` into `to`, copying every component the
    /// two archetypes share. Components only `to` has are left for the
    /// caller to write. Returns the entity's row in `to`.
    pub(crate) fn move_entity(
        from: &mut Self,
        to: &mut Self,
        arena: &mut Arena,
        entity: Entity,
    ) -> Result<usize, ArenaError> {
        let to_row = to.insert(arena, entity)?;
        let from_row = from.row_of(arena, entity);

        let smaller = if from.columns.len() <= to.columns.len() { &*from } else { &*to };
        for column in smaller.columns() {
            let cid = column.component_id();
            // Components only `to` has are written by the caller.
            let Some(src) = from.column(cid) else {
                continue;
            };
            let dst = to.column(cid).unwrap_or_else(|| {
                panic!(
                    "Component {} of archetype {} has no column in archetype {}",
                    column.meta().name,
                    from.id,
                    to.id
                )
            });
            arena.copy(src.row_range(from_row), dst.row_range(to_row).start);
        }

        from.swap_remove(arena, entity);
        Ok(to_row)
    }

    /// Store `value` into the `T` column at `row`.
    ///
    /// # Panics
    /// If the archetype has no `T` column.
    pub(crate) fn write<T: Component>(&self, arena: &mut Arena, row: usize, value: &T) {
        let column = self
            .column(T::ID)
            .unwrap_or_else(|| panic!("archetype {} has no {} column", self.id, T::NAME));
        column.assert_layout::<T>();
        column.write_row(arena, row, bytemuck::bytes_of(value));
    }

    /// Component `T` of `entity`, which must be stored here.
    pub fn get<'a, T: Component>(&self, arena: &'a Arena, entity: Entity) -> Option<&'a T> {
        let column = self.column(T::ID)?;
        column.assert_layout::<T>();
        let row = self.row_of(arena, entity);
        Some(bytemuck::from_bytes(column.row_bytes(arena, row)))
    }

    pub fn get_mut<'a, T: Component>(&self, arena: &'a mut Arena, entity: Entity) -> Option<&'a mut T> {
        let column = self.column(T::ID)?;
        column.assert_layout::<T>();
        let row = self.row_of(arena, entity);
        Some(bytemuck::from_bytes_mut(arena.bytes_mut(column.row_range(row))))
    }

    /// Typed view of the whole `T` column.
    pub fn column_slice<'a, T: Component>(&self, arena: &'a Arena) -> Option<&'a [T]> {
        Some(self.column(T::ID)?.as_slice(arena, self.len))
    }

    pub fn column_slice_mut<'a, T: Component>(&self, arena: &'a mut Arena) -> Option<&'a mut [T]> {
        Some(self.column(T::ID)?.as_slice_mut(arena, self.len))
    }
}
