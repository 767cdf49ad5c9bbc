// scene.rs - Archetype registry and entity identity table
//
// A scene owns its archetypes, the mask -> archetype lookup table and the
// entity -> archetype table. Component bytes live in the world arena, which
// every structural operation borrows.

use crate::config::EcsConfig;
use crate::ecs::storage::ArchetypeStorage;
use crate::ecs::entity::EntityAllocator;
use crate::ecs::{ArchetypeId, Bitmask, Component, ComponentRegistry, Entity, WorldError};
use crate::memory::Arena;
use std::fmt;
use tracing::{debug, info};

/// Handle of a scene inside its world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an entity id currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Vacant,
    /// Alive with no components, so not in any archetype.
    Empty,
    Stored(ArchetypeId),
}

pub struct Scene {
    id: SceneId,
    archetypes: Vec<ArchetypeStorage>,
    type_table: Box<[Option<ArchetypeId>]>,
    slots: Box<[Slot]>,
    ids: EntityAllocator,
    live: usize,
    max_archetypes: usize,
    max_components: usize,
}

impl Scene {
    pub(crate) fn new(id: SceneId, config: &EcsConfig) -> Self {
        info!(scene = %id, "scene created");
        Self {
            id,
            archetypes: Vec::new(),
            type_table: vec![None; config.max_archetypes].into_boxed_slice(),
            slots: vec![Slot::Vacant; config.max_entities as usize].into_boxed_slice(),
            ids: EntityAllocator::new(config.max_entities, config.max_free_ids),
            live: 0,
            max_archetypes: config.max_archetypes,
            max_components: config.max_components,
        }
    }

    #[inline]
    pub fn id(&self) -> SceneId {
        self.id
    }

    // ---- archetypes ----

    /// Archetype storing exactly the set in `mask`, if one exists.
    pub fn find_archetype(&self, mask: &Bitmask) -> Option<ArchetypeId> {
        let table_len = self.type_table.len();
        let start = (mask.hash_seed() % table_len as u64) as usize;
        for probe in 0..table_len {
            let id = self.type_table[(start + probe) % table_len]?;
            if self.archetypes[id as usize].mask() == mask {
                return Some(id);
            }
        }
        None
    }

    /// Archetype for `mask`, created on first use.
    pub(crate) fn archetype_for(
        &mut self,
        arena: &mut Arena,
        registry: &ComponentRegistry,
        mask: Bitmask,
    ) -> Result<ArchetypeId, WorldError> {
        let table_len = self.type_table.len();
        let start = (mask.hash_seed() % table_len as u64) as usize;

        let mut vacant = None;
        for probe in 0..table_len {
            let slot = (start + probe) % table_len;
            match self.type_table[slot] {
                Some(id) if self.archetypes[id as usize].mask() == &mask => return Ok(id),
                Some(_) => continue,
                None => {
                    vacant = Some(slot);
                    break;
                }
            }
        }

        let Some(slot) = vacant else {
            return Err(WorldError::ArchetypeTableFull {
                max: self.max_archetypes,
            });
        };
        if self.archetypes.len() >= self.max_archetypes {
            return Err(WorldError::ArchetypeTableFull {
                max: self.max_archetypes,
            });
        }

        let id = self.archetypes.len() as ArchetypeId;
        debug!(scene = %self.id, archetype = id, components = %mask, "archetype created");
        let storage = ArchetypeStorage::new(id, mask, registry, arena, self.slots.len())?;
        self.archetypes.push(storage);
        self.type_table[slot] = Some(id);
        Ok(id)
    }

    /// Archetypes in creation order.
    #[inline]
    pub fn archetypes(&self) -> &[ArchetypeStorage] {
        &self.archetypes
    }

    #[inline]
    pub fn archetype(&self, id: ArchetypeId) -> Option<&ArchetypeStorage> {
        self.archetypes.get(id as usize)
    }

    #[inline]
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    // ---- entities ----

    pub(crate) fn new_entity(&mut self) -> Result<Entity, WorldError> {
        let entity = self.ids.allocate().ok_or(WorldError::EntityLimitExceeded {
            max: self.slots.len() as u32,
        })?;
        self.slots[entity.index()] = Slot::Empty;
        self.live += 1;
        Ok(entity)
    }

    pub(crate) fn kill_entity(&mut self, arena: &mut Arena, entity: Entity) -> Result<(), WorldError> {
        match self.slot(entity) {
            Slot::Vacant => return Err(WorldError::EntityNotAlive { entity }),
            Slot::Empty => {}
            Slot::Stored(archetype) => {
                self.archetypes[archetype as usize].swap_remove(arena, entity);
            }
        }

        self.slots[entity.index()] = Slot::Vacant;
        self.live -= 1;
        if self.ids.recycle(entity) {
            debug!(scene = %self.id, %entity, "entity killed, id recycled");
        } else {
            debug!(scene = %self.id, %entity, "entity killed");
        }
        Ok(())
    }

    fn slot(&self, entity: Entity) -> Slot {
        self.slots.get(entity.index()).copied().unwrap_or(Slot::Vacant)
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slot(entity) != Slot::Vacant
    }

    /// Archetype currently holding `entity`. `None` for dead entities and
    /// for live entities without components.
    pub fn archetype_of(&self, entity: Entity) -> Option<ArchetypeId> {
        match self.slot(entity) {
            Slot::Stored(archetype) => Some(archetype),
            Slot::Vacant | Slot::Empty => None,
        }
    }

    /// `(archetype, row)` of `entity`.
    pub fn locate(&self, arena: &Arena, entity: Entity) -> Option<(ArchetypeId, usize)> {
        let archetype = self.archetype_of(entity)?;
        Some((archetype, self.archetypes[archetype as usize].row_of(arena, entity)))
    }

    /// Live entities, including those without components.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.live
    }

    /// Component set of `entity`. Empty for live entities without components.
    pub fn component_mask(&self, entity: Entity) -> Option<Bitmask> {
        match self.slot(entity) {
            Slot::Vacant => None,
            Slot::Empty => Some(Bitmask::new(self.max_components)),
            Slot::Stored(archetype) => Some(self.archetypes[archetype as usize].mask().clone()),
        }
    }

    // ---- components ----

    /// Attach `value` to `entity`, relocating it to the archetype for its
    /// new component set. If the entity already has `T` the value is
    /// overwritten in place.
    pub(crate) fn add_component<T: Component>(
        &mut self,
        arena: &mut Arena,
        registry: &ComponentRegistry,
        entity: Entity,
        value: T,
    ) -> Result<(), WorldError> {
        registry.require(T::ID)?;

        let source = match self.slot(entity) {
            Slot::Vacant => return Err(WorldError::EntityNotAlive { entity }),
            Slot::Empty => None,
            Slot::Stored(archetype) => Some(archetype),
        };

        let mut mask = match source {
            Some(archetype) => {
                let storage = &self.archetypes[archetype as usize];
                if storage.has_component(T::ID) {
                    let row = storage.row_of(arena, entity);
                    storage.write(arena, row, &value);
                    return Ok(());
                }
                storage.mask().clone()
            }
            None => Bitmask::new(self.max_components),
        };
        mask.set(T::ID as usize);

        let target = self.archetype_for(arena, registry, mask)?;
        let row = match source {
            Some(source) => {
                let (from, to) = pair_mut(&mut self.archetypes, source as usize, target as usize);
                ArchetypeStorage::move_entity(from, to, arena, entity)?
            }
            None => self.archetypes[target as usize].insert(arena, entity)?,
        };

        self.slots[entity.index()] = Slot::Stored(target);
        self.archetypes[target as usize].write(arena, row, &value);
        Ok(())
    }

    /// Overwrite a component the entity already has.
    pub(crate) fn set_component<T: Component>(
        &self,
        arena: &mut Arena,
        entity: Entity,
        value: T,
    ) -> Result<(), WorldError> {
        let owner = match self.slot(entity) {
            Slot::Vacant => return Err(WorldError::EntityNotAlive { entity }),
            Slot::Empty => None,
            Slot::Stored(archetype) => Some(&self.archetypes[archetype as usize]),
        };
        let Some(storage) = owner.filter(|storage| storage.has_component(T::ID)) else {
            return Err(WorldError::MissingComponent {
                entity,
                component: T::NAME,
            });
        };

        let row = storage.row_of(arena, entity);
        storage.write(arena, row, &value);
        Ok(())
    }

    pub fn get_component<'a, T: Component>(&self, arena: &'a Arena, entity: Entity) -> Option<&'a T> {
        let archetype = self.archetype_of(entity)?;
        self.archetypes[archetype as usize].get(arena, entity)
    }

    pub fn get_component_mut<'a, T: Component>(
        &self,
        arena: &'a mut Arena,
        entity: Entity,
    ) -> Option<&'a mut T> {
        let archetype = self.archetype_of(entity)?;
        self.archetypes[archetype as usize].get_mut(arena, entity)
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.archetype_of(entity)
            .is_some_and(|archetype| self.archetypes[archetype as usize].has_component(T::ID))
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("archetypes", &self.archetypes.len())
            .field("live", &self.live)
            .field("issued", &self.ids.issued())
            .field("recyclable", &self.ids.pending())
            .finish()
    }
}

/// Two distinct elements of `items`, both mutable.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "source and target archetype must differ");
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
