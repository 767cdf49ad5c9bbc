// archetype.rs - Archetype identification and layout
//
// An archetype is a unique set of component types. Entities with the same
// component types share the same archetype storage.

use crate::ecs::{Bitmask, ComponentId};

/// Index of an archetype inside its scene. Archetypes are never destroyed,
/// so an id stays valid for the lifetime of the scene.
pub type ArchetypeId = u32;

const NO_COLUMN: u16 = u16::MAX;

/// Component layout of one archetype: which ids it stores and in which
/// column each one lives.
///
/// Column lookup is direct-mapped over the contiguous id range between the
/// lowest and highest component of the archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchetypeLayout {
    mask: Bitmask,
    component_ids: Vec<ComponentId>,
    lowest_component_id: ComponentId,
    column_index: Vec<u16>,
}

impl ArchetypeLayout {
    /// Build the layout for the component set in `mask`.
    pub fn from_mask(mask: Bitmask) -> Self {
        let mut component_ids = Vec::with_capacity(mask.count_ones() as usize);
        component_ids.extend(mask.iter_ones().map(|bit| bit as ComponentId));

        let (lowest, span) = match (mask.lowest_set_bit(), mask.highest_set_bit()) {
            (Some(lowest), Some(highest)) => (lowest, highest - lowest + 1),
            _ => (0, 0),
        };

        let mut column_index = vec![NO_COLUMN; span];
        for (column, &id) in component_ids.iter().enumerate() {
            column_index[id as usize - lowest] = column as u16;
        }

        Self {
            mask,
            component_ids,
            lowest_component_id: lowest as ComponentId,
            column_index,
        }
    }

    #[inline]
    pub fn mask(&self) -> &Bitmask {
        &self.mask
    }

    /// Component ids in column order (ascending).
    #[inline]
    pub fn component_ids(&self) -> &[ComponentId] {
        &self.component_ids
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.component_ids.len()
    }

    #[inline]
    pub fn lowest_component_id(&self) -> ComponentId {
        self.lowest_component_id
    }

    /// Dense column holding component `id`, if the archetype stores it.
    #[inline]
    pub fn column_index(&self, id: ComponentId) -> Option<usize> {
        let offset = id.checked_sub(self.lowest_component_id)? as usize;
        match self.column_index.get(offset) {
            Some(&NO_COLUMN) | None => None,
            Some(&column) => Some(column as usize),
        }
    }

    #[inline]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.mask.test(id as usize)
    }
}
