use crate::ecs::{Component, ComponentId, ComponentMeta};
use crate::memory::{Arena, ArenaBlock, ArenaError};
use std::mem::{align_of, size_of};
use std::ops::Range;

/// A single component column: type-erased rows of `meta.size` bytes living in
/// one arena block.
///
/// Growth allocates a fresh block and copies the occupied rows across; the
/// old block is abandoned to the arena.
#[derive(Clone, Debug)]
pub struct Column {
    meta: ComponentMeta,
    block: ArenaBlock,
}

impl Column {
    pub(crate) fn new(meta: ComponentMeta) -> Self {
        Self {
            meta,
            block: ArenaBlock::EMPTY,
        }
    }

    #[inline]
    pub fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    #[inline]
    pub fn component_id(&self) -> ComponentId {
        self.meta.id
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.meta.size
    }

    #[inline]
    pub fn block(&self) -> ArenaBlock {
        self.block
    }

    /// Byte range of a single row.
    #[inline]
    pub fn row_range(&self, row: usize) -> Range<usize> {
        let start = self.block.offset() + row * self.meta.size;
        start..start + self.meta.size
    }

    /// Byte range of rows `0..len`.
    #[inline]
    pub fn rows_range(&self, len: usize) -> Range<usize> {
        let start = self.block.offset();
        start..start + len * self.meta.size
    }

    /// Move to a block of `capacity` rows, keeping the first `occupied` rows.
    pub(crate) fn reallocate(
        &mut self,
        arena: &mut Arena,
        occupied: usize,
        capacity: usize,
    ) -> Result<(), ArenaError> {
        let block = arena.alloc(self.meta.size.saturating_mul(capacity), self.meta.align)?;
        arena.copy(self.rows_range(occupied), block.offset());
        self.block = block;
        Ok(())
    }

    /// Overwrite row `to` with the contents of row `from`.
    #[inline]
    pub(crate) fn copy_row(&self, arena: &mut Arena, from: usize, to: usize) {
        arena.copy(self.row_range(from), self.row_range(to).start);
    }

    pub(crate) fn write_row(&self, arena: &mut Arena, row: usize, src: &[u8]) {
        assert_eq!(
            src.len(),
            self.meta.size,
            "Component size mismatch: expected {}, got {}",
            self.meta.size,
            src.len()
        );
        arena.bytes_mut(self.row_range(row)).copy_from_slice(src);
    }

    pub fn row_bytes<'a>(&self, arena: &'a Arena, row: usize) -> &'a [u8] {
        arena.bytes(self.row_range(row))
    }

    /// Panic unless `T` is the type this column was laid out for.
    #[inline]
    pub(crate) fn assert_layout<T: Component>(&self) {
        self.assert_meta(&T::meta());
    }

    #[inline]
    pub(crate) fn assert_meta(&self, meta: &ComponentMeta) {
        assert_eq!(
            (self.meta.size, self.meta.align),
            (meta.size, meta.align),
            "Component layout mismatch for {} (column holds {})",
            meta.name,
            self.meta.name
        );
    }

    /// Typed view of rows `0..len`.
    pub fn as_slice<'a, T: Component>(&self, arena: &'a Arena, len: usize) -> &'a [T] {
        self.assert_layout::<T>();
        debug_assert_eq!(self.block.offset() % align_of::<T>(), 0);
        debug_assert!(len * size_of::<T>() <= self.block.len());
        bytemuck::cast_slice(arena.bytes(self.rows_range(len)))
    }

    /// Mutable typed view of rows `0..len`.
    pub fn as_slice_mut<'a, T: Component>(&self, arena: &'a mut Arena, len: usize) -> &'a mut [T] {
        self.assert_layout::<T>();
        debug_assert!(len * size_of::<T>() <= self.block.len());
        bytemuck::cast_slice_mut(arena.bytes_mut(self.rows_range(len)))
    }
}
