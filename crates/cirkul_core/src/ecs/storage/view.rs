// view.rs - Borrowed access to one archetype during bulk iteration
//
// A system's step function receives one view per matching archetype. The
// view pairs the archetype's layout with mutable access to the arena so the
// step can read the entity array and write any number of distinct columns.

use super::ArchetypeStorage;
use crate::ecs::{ArchetypeId, Bitmask, Component, ComponentMeta, Entity};
use crate::memory::Arena;
use std::ops::Range;

/// One activation of a system over one archetype.
pub struct ArchetypeView<'w> {
    storage: &'w ArchetypeStorage,
    arena: &'w mut Arena,
}

impl<'w> ArchetypeView<'w> {
    pub(crate) fn new(storage: &'w ArchetypeStorage, arena: &'w mut Arena) -> Self {
        Self { storage, arena }
    }

    #[inline]
    pub fn id(&self) -> ArchetypeId {
        self.storage.id()
    }

    /// Number of entities in the archetype. May be zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn mask(&self) -> &Bitmask {
        self.storage.mask()
    }

    #[inline]
    pub fn has<T: Component>(&self) -> bool {
        self.storage.has_component(T::ID)
    }

    #[inline]
    pub fn storage(&self) -> &ArchetypeStorage {
        self.storage
    }

    /// Entities in row order; index `i` owns row `i` of every column.
    pub fn entities(&self) -> &[Entity] {
        self.storage.entities(self.arena)
    }

    pub fn column<T: Component>(&self) -> Option<&[T]> {
        self.storage.column_slice::<T>(self.arena)
    }

    pub fn column_mut<T: Component>(&mut self) -> Option<&mut [T]> {
        self.storage.column_slice_mut::<T>(self.arena)
    }

    /// Entity array plus mutable slices for every column in `S`.
    ///
    /// Returns `None` if the archetype lacks any of the requested components.
    ///
    /// # Example
    /// ```ignore
    /// if let Some((entities, (pos, vel))) = view.columns_mut::<(Position, Velocity)>() {
    ///     for i in 0..entities.len() {
    ///         pos[i].x += vel[i].dx;
    ///     }
    /// }
    /// ```
    ///
    /// # Panics
    /// If `S` names the same component twice.
    pub fn columns_mut<S: ColumnSet>(&mut self) -> Option<(&[Entity], S::Slices<'_>)> {
        let metas = S::metas();
        for (i, a) in metas.iter().enumerate() {
            for b in &metas[i + 1..] {
                assert_ne!(
                    a.id, b.id,
                    "Cannot get multiple mutable references to the same component"
                );
            }
        }

        let len = self.storage.len();
        if len == 0 {
            if metas.iter().any(|meta| !self.storage.has_component(meta.id)) {
                return None;
            }
            // Empty byte regions carry no alignment; hand out typed empties.
            return Some((&[], S::empty()));
        }

        let mut ranges = Vec::with_capacity(metas.len() + 1);
        ranges.push(self.storage.entities_range(len));
        for meta in &metas {
            let column = self.storage.column(meta.id)?;
            column.assert_meta(meta);
            ranges.push(column.rows_range(len));
        }

        let mut slices = split_disjoint_mut(self.arena.memory_mut(), &ranges).into_iter();
        let entity_bytes: &[u8] = slices.next()?;
        let entities: &[Entity] = bytemuck::cast_slice(entity_bytes);
        Some((entities, S::from_bytes(&mut slices)))
    }
}

/// A tuple of component types whose columns can be borrowed mutably at once.
pub trait ColumnSet {
    type Slices<'a>;

    fn metas() -> Vec<ComponentMeta>;

    /// Zero-length slices for an archetype with no rows.
    fn empty<'a>() -> Self::Slices<'a>;

    /// Build the typed slices from byte regions in `metas()` order.
    fn from_bytes<'a, I>(bytes: &mut I) -> Self::Slices<'a>
    where
        I: Iterator<Item = &'a mut [u8]>;
}

macro_rules! impl_column_set {
    ($($T:ident),+) => {
        impl<$($T: Component),+> ColumnSet for ($($T,)+) {
            type Slices<'a> = ($(&'a mut [$T],)+);

            fn metas() -> Vec<ComponentMeta> {
                vec![$($T::meta()),+]
            }

            fn empty<'a>() -> Self::Slices<'a> {
                ($(<&'a mut [$T]>::default(),)+)
            }

            fn from_bytes<'a, I>(bytes: &mut I) -> Self::Slices<'a>
            where
                I: Iterator<Item = &'a mut [u8]>,
            {
                ($(
                    bytemuck::cast_slice_mut::<u8, $T>(
                        bytes.next().expect("one byte region per column"),
                    ),
                )+)
            }
        }
    };
}

impl_column_set!(A);
impl_column_set!(A, B);
impl_column_set!(A, B, C);
impl_column_set!(A, B, C, D);
impl_column_set!(A, B, C, D, E);
impl_column_set!(A, B, C, D, E, F);
impl_column_set!(A, B, C, D, E, F, G);
impl_column_set!(A, B, C, D, E, F, G, H);

/// Split `memory` into one mutable slice per range, returned in the order
/// the ranges were given. Ranges must not overlap.
fn split_disjoint_mut<'a>(memory: &'a mut [u8], ranges: &[Range<usize>]) -> Vec<&'a mut [u8]> {
    let mut order: Vec<usize> = (0..ranges.len()).collect();
    order.sort_by_key(|&i| (ranges[i].start, ranges[i].end));

    let mut out: Vec<Option<&'a mut [u8]>> = (0..ranges.len()).map(|_| None).collect();
    let mut rest = memory;
    let mut consumed = 0;
    for i in order {
        let range = &ranges[i];
        if range.is_empty() {
            out[i] = Some(Default::default());
            continue;
        }
        assert!(range.start >= consumed, "overlapping column ranges");
        let (_, tail) = std::mem::take(&mut rest).split_at_mut(range.start - consumed);
        let (slice, tail) = tail.split_at_mut(range.len());
        out[i] = Some(slice);
        rest = tail;
        consumed = range.end;
    }

    out.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Bitmask, ComponentRegistry};
    use bytemuck::{Pod, Zeroable};

    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
    struct Tint {
        rgba: u32,
    }

    crate::components! { Position, Velocity, Tint }

    fn moving(arena: &mut Arena, count: u32) -> ArchetypeStorage {
        let mut registry = ComponentRegistry::new(8);
        registry.register(Position::meta()).unwrap();
        registry.register(Velocity::meta()).unwrap();
        registry.register(Tint::meta()).unwrap();

        let mut mask = Bitmask::new(8);
        mask.set(Position::ID as usize);
        mask.set(Velocity::ID as usize);
        let mut storage = ArchetypeStorage::new(0, mask, &registry, arena, 16).unwrap();
        for id in 0..count {
            let entity = Entity::from_raw(id);
            let row = storage.insert(arena, entity).unwrap();
            storage.write(arena, row, &Position { x: id as f32, y: 0.0 });
            storage.write(arena, row, &Velocity { dx: 1.0, dy: 2.0 });
        }
        storage
    }

    #[test]
    fn columns_mut_yields_disjoint_slices() {
        let mut arena = Arena::new(1 << 14);
        let storage = moving(&mut arena, 3);
        let mut view = ArchetypeView::new(&storage, &mut arena);

        let (entities, (positions, velocities)) =
            view.columns_mut::<(Position, Velocity)>().unwrap();
        assert_eq!(entities.len(), 3);
        for i in 0..entities.len() {
            positions[i].x += velocities[i].dx;
            positions[i].y += velocities[i].dy;
            velocities[i].dx = 0.0;
        }

        let positions = view.column::<Position>().unwrap();
        assert_eq!(positions[2], Position { x: 3.0, y: 2.0 });
        assert!(view.column::<Velocity>().unwrap().iter().all(|v| v.dx == 0.0));
    }

    #[test]
    fn missing_component_yields_none() {
        let mut arena = Arena::new(1 << 14);
        let storage = moving(&mut arena, 1);
        let mut view = ArchetypeView::new(&storage, &mut arena);

        assert!(!view.has::<Tint>());
        assert!(view.column::<Tint>().is_none());
        assert!(view.columns_mut::<(Position, Tint)>().is_none());
    }

    #[test]
    #[should_panic(expected = "same component")]
    fn duplicate_columns_panic() {
        let mut arena = Arena::new(1 << 14);
        let storage = moving(&mut arena, 1);
        let mut view = ArchetypeView::new(&storage, &mut arena);
        let _ = view.columns_mut::<(Position, Position)>();
    }

    #[test]
    fn empty_archetype_views_are_empty() {
        let mut arena = Arena::new(1 << 14);
        let storage = moving(&mut arena, 0);
        let mut view = ArchetypeView::new(&storage, &mut arena);

        assert!(view.is_empty());
        let (entities, (positions,)) = view.columns_mut::<(Position,)>().unwrap();
        assert!(entities.is_empty());
        assert!(positions.is_empty());
        assert!(view.columns_mut::<(Position, Tint)>().is_none());
    }

    #[test]
    fn emptied_archetype_yields_empty_columns() {
        let mut arena = Arena::new(1 << 14);
        // Leave a one-byte gap so the column blocks are not at offset zero.
        arena.alloc(1, 1).unwrap();
        let mut storage = moving(&mut arena, 2);
        storage.swap_remove(&mut arena, Entity::from_raw(0));
        storage.swap_remove(&mut arena, Entity::from_raw(1));
        let mut view = ArchetypeView::new(&storage, &mut arena);

        let (entities, (positions, velocities)) =
            view.columns_mut::<(Position, Velocity)>().unwrap();
        assert!(entities.is_empty());
        assert!(positions.is_empty());
        assert!(velocities.is_empty());
    }

    #[test]
    fn split_preserves_request_order() {
        let mut memory = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let parts = split_disjoint_mut(&mut memory, &[6..9, 0..2, 3..3]);
        assert_eq!(parts.len(), 3);
        assert_eq!(&*parts[0], &[6, 7, 8]);
        assert_eq!(&*parts[1], &[0, 1]);
        assert!(parts[2].is_empty());
    }
}
