// world.rs - Owning context for arena, components, scenes and systems
//
// Every entry point goes through a `World`; nothing in the crate is global.
// Entity and component operations act on the current scene.

use crate::config::EcsConfig;
use crate::ecs::storage::ArchetypeView;
use crate::ecs::system_registry::SystemRegistry;
use crate::ecs::{
    ArchetypeId, Bitmask, Component, ComponentRegistry, Entity, Query, Scene, SceneId, System,
    SystemHandle, SystemRegistrationError, WorldError,
};
use crate::memory::{Arena, ArenaStats};
use tracing::{debug, info};

#[derive(Debug)]
pub struct World {
    config: EcsConfig,
    arena: Arena,
    components: ComponentRegistry,
    scenes: Vec<Scene>,
    current: Option<SceneId>,
    systems: SystemRegistry,
}

impl World {
    /// Validate `config` and reserve the arena.
    pub fn new(config: EcsConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EcsConfig) -> Self {
        info!(
            arena_bytes = config.arena_bytes,
            max_entities = config.max_entities,
            max_archetypes = config.max_archetypes,
            max_components = config.max_components,
            "world created"
        );
        Self {
            arena: Arena::new(config.arena_bytes),
            components: ComponentRegistry::new(config.max_components),
            scenes: Vec::new(),
            current: None,
            systems: SystemRegistry::new(),
            config,
        }
    }

    /// Drop the world, releasing the arena and every block carved from it.
    pub fn teardown(self) -> ArenaStats {
        let stats = self.arena.stats();
        info!(
            used = stats.used,
            allocations = stats.allocations,
            scenes = self.scenes.len(),
            "world torn down"
        );
        stats
    }

    #[inline]
    pub fn config(&self) -> &EcsConfig {
        &self.config
    }

    #[inline]
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// The backing arena, for reading archetype storage directly.
    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Record `T`'s layout. `add_component` does this implicitly.
    pub fn register_component<T: Component>(&mut self) -> Result<(), WorldError> {
        self.components.register(T::meta())?;
        Ok(())
    }

    // ---- scenes ----

    /// Create an empty scene. The first scene created becomes current.
    pub fn create_scene(&mut self) -> SceneId {
        let id = SceneId::new(self.scenes.len() as u32);
        self.scenes.push(Scene::new(id, &self.config));
        if self.current.is_none() {
            self.current = Some(id);
        }
        id
    }

    pub fn set_current_scene(&mut self, scene: SceneId) -> Result<(), WorldError> {
        Self::scene_in(&self.scenes, scene)?;
        debug!(%scene, "current scene changed");
        self.current = Some(scene);
        Ok(())
    }

    #[inline]
    pub fn current_scene(&self) -> Option<SceneId> {
        self.current
    }

    pub fn scene(&self, scene: SceneId) -> Option<&Scene> {
        self.scenes.get(scene.index() as usize)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn scene_in(scenes: &[Scene], scene: SceneId) -> Result<&Scene, WorldError> {
        scenes
            .get(scene.index() as usize)
            .ok_or(WorldError::UnknownScene { scene })
    }

    fn current_index(&self) -> Result<usize, WorldError> {
        self.current
            .map(|scene| scene.index() as usize)
            .ok_or(WorldError::NoActiveScene)
    }

    fn active(&self) -> Option<&Scene> {
        self.scenes.get(self.current?.index() as usize)
    }

    // ---- entities and components (current scene) ----

    pub fn new_entity(&mut self) -> Result<Entity, WorldError> {
        let index = self.current_index()?;
        self.scenes[index].new_entity()
    }

    pub fn kill_entity(&mut self, entity: Entity) -> Result<(), WorldError> {
        let index = self.current_index()?;
        self.scenes[index].kill_entity(&mut self.arena, entity)
    }

    /// Attach `value` to `entity`, moving it to the archetype for its new
    /// component set. Overwrites the value if the entity already has `T`.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), WorldError> {
        self.components.register(T::meta())?;
        let index = self.current_index()?;
        self.scenes[index].add_component(&mut self.arena, &self.components, entity, value)
    }

    /// Overwrite a component `entity` already has.
    pub fn set_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), WorldError> {
        let index = self.current_index()?;
        self.scenes[index].set_component(&mut self.arena, entity, value)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.active()?.get_component(&self.arena, entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let scene = self.scenes.get(self.current?.index() as usize)?;
        scene.get_component_mut(&mut self.arena, entity)
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.active().is_some_and(|scene| scene.has_component::<T>(entity))
    }

    pub fn component_mask(&self, entity: Entity) -> Option<Bitmask> {
        self.active()?.component_mask(entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.active().is_some_and(|scene| scene.is_alive(entity))
    }

    pub fn entity_count(&self) -> usize {
        self.active().map_or(0, Scene::entity_count)
    }

    // ---- queries ----

    /// Empty query over the current scene.
    pub fn query(&self) -> Result<Query, WorldError> {
        let scene = self.current.ok_or(WorldError::NoActiveScene)?;
        Ok(Query::new(scene, self.config.max_components))
    }

    /// Empty query over `scene`.
    pub fn query_in(&self, scene: SceneId) -> Result<Query, WorldError> {
        Self::scene_in(&self.scenes, scene)?;
        Ok(Query::new(scene, self.config.max_components))
    }

    /// Every entity in an archetype matching `query`, archetype by archetype.
    pub fn query_entities(&self, query: &Query) -> Result<Vec<Entity>, WorldError> {
        let scene = Self::scene_in(&self.scenes, query.scene())?;
        Ok(query
            .matching(scene)
            .flat_map(|archetype| archetype.entities(&self.arena).iter().copied())
            .collect())
    }

    /// Call `body` for each entity matching `query`. The body gets the whole
    /// world and may add components to or kill any entity.
    ///
    /// A row is only advanced past once the entity visited there is still in
    /// place; if the body relocated or killed it, the entity swapped into
    /// that row is visited next. If the body removed some other entity from
    /// the archetype being scanned, the scan restarts at row 0 so an entity
    /// swapped behind the cursor is not missed. Each entity is visited at
    /// most once per call, even if it moves into an archetype scanned later.
    /// Returns the number of visits.
    pub fn for_each_entity<F>(&mut self, query: &Query, mut body: F) -> Result<usize, WorldError>
    where
        F: FnMut(&mut World, Entity) -> Result<(), WorldError>,
    {
        let scene_id = query.scene();
        let mut visited = Bitmask::new(self.config.max_entities as usize);
        let mut visits = 0;

        let mut archetype = 0;
        while archetype < Self::scene_in(&self.scenes, scene_id)?.archetype_count() {
            let matches = query.matches(&Self::scene_in(&self.scenes, scene_id)?.archetypes()[archetype]);
            let mut row = 0;
            while matches {
                let storage = &Self::scene_in(&self.scenes, scene_id)?.archetypes()[archetype];
                if row >= storage.len() {
                    break;
                }
                let entity = storage.entity_at(&self.arena, row);
                if visited.test(entity.index()) {
                    row += 1;
                    continue;
                }
                visited.set(entity.index());
                let removals = storage.removals();

                body(self, entity)?;
                visits += 1;

                let scene = Self::scene_in(&self.scenes, scene_id)?;
                let stayed = scene.locate(&self.arena, entity) == Some((archetype as ArchetypeId, row));
                let departed = usize::from(!stayed);
                if scene.archetypes()[archetype].removals() - removals > departed {
                    row = 0;
                } else if stayed {
                    row += 1;
                }
            }
            archetype += 1;
        }

        Ok(visits)
    }

    /// Call `step` once per archetype matching `query`, empty ones included.
    /// Returns the number of activations.
    pub fn for_each_archetype<F>(&mut self, query: &Query, mut step: F) -> Result<usize, WorldError>
    where
        F: FnMut(&mut ArchetypeView<'_>),
    {
        let scene = Self::scene_in(&self.scenes, query.scene())?;
        let mut activations = 0;
        for storage in query.matching(scene) {
            step(&mut ArchetypeView::new(storage, &mut self.arena));
            activations += 1;
        }
        Ok(activations)
    }

    // ---- systems ----

    pub fn register_system(&mut self, system: System<'static>) -> Result<SystemHandle, WorldError> {
        let scene = system.query().scene();
        if Self::scene_in(&self.scenes, scene).is_err() {
            return Err(SystemRegistrationError::UnknownScene {
                name: system.name().to_string(),
                scene,
            }
            .into());
        }

        let name = system.name().to_string();
        let handle = self.systems.register(system)?;
        debug!(system = %name, %handle, %scene, "registered system");
        Ok(handle)
    }

    pub fn system_handle(&self, name: &str) -> Option<SystemHandle> {
        self.systems.handle_of(name)
    }

    pub fn system(&self, handle: SystemHandle) -> Option<&System<'static>> {
        self.systems.get(handle)
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run one registered system. Returns its activation count.
    pub fn run_system(&mut self, handle: SystemHandle) -> Result<usize, WorldError> {
        let system = self
            .systems
            .get_mut(handle)
            .ok_or(WorldError::UnknownSystem { system: handle })?;
        let scene = Self::scene_in(&self.scenes, system.query().scene())?;
        Ok(system.run(scene, &mut self.arena))
    }

    /// Run every registered system in registration order. Returns the total
    /// activation count.
    pub fn run_systems(&mut self) -> Result<usize, WorldError> {
        let handles: Vec<SystemHandle> = self.systems.handles().collect();
        let mut activations = 0;
        for handle in handles {
            activations += self.run_system(handle)?;
        }
        Ok(activations)
    }

    /// Run a system that is not registered with the world.
    pub fn run(&mut self, system: &mut System<'_>) -> Result<usize, WorldError> {
        let scene = Self::scene_in(&self.scenes, system.query().scene())?;
        Ok(system.run(scene, &mut self.arena))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::build(EcsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ArenaError;
    use bytemuck::{Pod, Zeroable};
    use std::cell::Cell;
    use std::rc::Rc;

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
    struct Health {
        value: u32,
    }

    crate::components! { Position, Velocity, Health }

    fn small_config() -> EcsConfig {
        EcsConfig {
            arena_bytes: 1 << 20,
            max_entities: 256,
            max_archetypes: 16,
            max_components: 16,
            max_free_ids: 16,
        }
    }

    fn world() -> World {
        let mut world = World::new(small_config()).unwrap();
        world.create_scene();
        world
    }

    fn pos(x: f32, y: f32) -> Position {
        Position { x, y }
    }

    fn spawn_positions(world: &mut World, count: usize) -> Vec<Entity> {
        (0..count)
            .map(|i| {
                let entity = world.new_entity().unwrap();
                world.add_component(entity, pos(i as f32, 0.0)).unwrap();
                entity
            })
            .collect()
    }

    #[test]
    fn three_entity_scenario() {
        let mut world = world();
        let e0 = world.new_entity().unwrap();
        let e1 = world.new_entity().unwrap();
        let e2 = world.new_entity().unwrap();

        world.add_component(e0, pos(0.0, 10.0)).unwrap();
        world.add_component(e1, pos(1.0, 11.0)).unwrap();
        world.add_component(e2, pos(2.0, 12.0)).unwrap();
        world.add_component(e1, Velocity { dx: 1.0, dy: -1.0 }).unwrap();
        world.add_component(e2, Velocity { dx: 2.0, dy: -2.0 }).unwrap();

        let positioned = world.query().unwrap().with::<Position>().unwrap();
        let mut all = world.query_entities(&positioned).unwrap();
        all.sort();
        assert_eq!(all, vec![e0, e1, e2]);

        let moving = positioned.clone().with::<Velocity>().unwrap();
        let mut found = world.query_entities(&moving).unwrap();
        found.sort();
        assert_eq!(found, vec![e1, e2]);
        assert_eq!(world.get_component::<Position>(e1), Some(&pos(1.0, 11.0)));
        assert_eq!(world.get_component::<Velocity>(e1), Some(&Velocity { dx: 1.0, dy: -1.0 }));
        assert_eq!(world.get_component::<Position>(e2), Some(&pos(2.0, 12.0)));
        assert_eq!(world.get_component::<Velocity>(e2), Some(&Velocity { dx: 2.0, dy: -2.0 }));

        world.kill_entity(e1).unwrap();
        assert_eq!(world.query_entities(&moving).unwrap(), vec![e2]);
        assert_eq!(world.get_component::<Position>(e2), Some(&pos(2.0, 12.0)));
    }

    #[test]
    fn mask_is_union_of_attached_components() {
        let mut world = world();
        let e = world.new_entity().unwrap();
        world.add_component(e, Health { value: 3 }).unwrap();
        world.add_component(e, pos(1.0, 2.0)).unwrap();
        world.add_component(e, Health { value: 7 }).unwrap();

        let mask = world.component_mask(e).unwrap();
        assert_eq!(
            mask.iter_ones().collect::<Vec<_>>(),
            vec![Position::ID as usize, Health::ID as usize]
        );
        assert_eq!(world.get_component::<Health>(e), Some(&Health { value: 7 }));
        assert_eq!(world.get_component::<Position>(e), Some(&pos(1.0, 2.0)));
        assert!(!world.has_component::<Velocity>(e));
    }

    #[test]
    fn killed_row_is_revisited() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 4);
        let query = world.query().unwrap().with::<Position>().unwrap();

        let mut order = Vec::new();
        let visits = world
            .for_each_entity(&query, |world, entity| {
                order.push(entity);
                if entity == entities[0] {
                    world.kill_entity(entity)?;
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(visits, 4);
        assert_eq!(order, vec![entities[0], entities[3], entities[1], entities[2]]);
        assert_eq!(world.entity_count(), 3);
    }

    #[test]
    fn killing_a_visited_entity_rescans_the_archetype() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 3);
        let query = world.query().unwrap().with::<Position>().unwrap();

        let mut order = Vec::new();
        let visits = world
            .for_each_entity(&query, |world, entity| {
                order.push(entity);
                if entity == entities[1] {
                    world.kill_entity(entities[0])?;
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(visits, 3);
        assert_eq!(order, vec![entities[0], entities[1], entities[2]]);
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn killing_an_unvisited_entity_skips_it() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 4);
        let query = world.query().unwrap().with::<Position>().unwrap();

        let mut order = Vec::new();
        world
            .for_each_entity(&query, |world, entity| {
                order.push(entity);
                if entity == entities[0] {
                    world.kill_entity(entities[2])?;
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(order, vec![entities[0], entities[1], entities[3]]);
    }

    #[test]
    fn relocated_entities_are_visited_once() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 5);
        let query = world.query().unwrap().with::<Position>().unwrap();

        let mut order = Vec::new();
        world
            .for_each_entity(&query, |world, entity| {
                order.push(entity);
                if entity.id() % 2 == 1 {
                    world.add_component(entity, Velocity { dx: 1.0, dy: 1.0 })?;
                }
                Ok(())
            })
            .unwrap();

        order.sort();
        assert_eq!(order, entities);
        for &entity in &entities {
            assert_eq!(world.has_component::<Velocity>(entity), entity.id() % 2 == 1);
            assert_eq!(world.get_component::<Position>(entity).unwrap().x, entity.id() as f32);
        }
    }

    #[test]
    fn body_errors_stop_iteration() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 3);
        let query = world.query().unwrap().with::<Position>().unwrap();

        let mut seen = 0;
        let err = world
            .for_each_entity(&query, |world, entity| {
                seen += 1;
                world.set_component(entity, Health { value: 0 })
            })
            .unwrap_err();

        assert!(matches!(err, WorldError::MissingComponent { component: "Health", .. }));
        assert_eq!(seen, 1);
        assert!(world.is_alive(entities[0]));
    }

    #[test]
    fn bulk_iteration_activates_empty_archetypes() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 3);
        world.add_component(entities[0], Velocity { dx: 0.5, dy: 0.0 }).unwrap();
        world.kill_entity(entities[0]).unwrap();

        let query = world.query().unwrap().with::<Position>().unwrap();
        let mut sizes = Vec::new();
        let activations = world
            .for_each_archetype(&query, |view| {
                sizes.push(view.len());
                if let Some(positions) = view.column_mut::<Position>() {
                    positions.iter_mut().for_each(|p| p.y = 5.0);
                }
            })
            .unwrap();

        assert_eq!(activations, 2);
        assert_eq!(sizes, vec![2, 0]);
        assert_eq!(world.get_component::<Position>(entities[2]).unwrap().y, 5.0);
    }

    #[test]
    fn columns_of_emptied_archetypes_are_empty() {
        let mut world = world();
        let entity = world.new_entity().unwrap();
        world.add_component(entity, pos(1.0, 1.0)).unwrap();
        world.add_component(entity, Velocity { dx: 1.0, dy: 1.0 }).unwrap();
        world.kill_entity(entity).unwrap();

        let query = world.query().unwrap().with::<Position>().unwrap().with::<Velocity>().unwrap();
        let mut rows = Vec::new();
        world
            .for_each_archetype(&query, |view| {
                let (entities, (positions, velocities)) =
                    view.columns_mut::<(Position, Velocity)>().unwrap();
                rows.push((entities.len(), positions.len(), velocities.len()));
            })
            .unwrap();

        assert_eq!(rows, vec![(0, 0, 0)]);
    }

    #[test]
    fn registered_systems_run_in_order_and_begin_once() {
        let mut world = world();
        let entities = spawn_positions(&mut world, 2);
        world.add_component(entities[1], Velocity { dx: 2.0, dy: 3.0 }).unwrap();

        let begins = Rc::new(Cell::new(0));
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));

        let query = world.query().unwrap().with::<Position>().unwrap().with::<Velocity>().unwrap();
        let move_log = Rc::clone(&log);
        let begin_count = Rc::clone(&begins);
        let movement = System::new("move", query, move |view| {
            move_log.borrow_mut().push("move");
            let Some((_, (positions, velocities))) = view.columns_mut::<(Position, Velocity)>() else {
                return;
            };
            for (p, v) in positions.iter_mut().zip(velocities.iter()) {
                p.x += v.dx;
                p.y += v.dy;
            }
        })
        .with_begin(move || begin_count.set(begin_count.get() + 1));

        let tally_log = Rc::clone(&log);
        let tally = System::new("tally", world.query().unwrap(), move |_| {
            tally_log.borrow_mut().push("tally");
        });

        let move_handle = world.register_system(movement).unwrap();
        world.register_system(tally).unwrap();
        assert_eq!(world.system_handle("move"), Some(move_handle));

        assert_eq!(world.run_systems().unwrap(), 1 + 2);
        assert_eq!(world.run_systems().unwrap(), 3);

        assert_eq!(begins.get(), 1);
        assert_eq!(*log.borrow(), vec!["move", "tally", "tally", "move", "tally", "tally"]);
        assert_eq!(world.get_component::<Position>(entities[1]), Some(&pos(5.0, 6.0)));
        assert_eq!(world.get_component::<Position>(entities[0]), Some(&pos(0.0, 0.0)));
        assert!(world.system(move_handle).unwrap().has_started());
    }

    #[test]
    fn begin_runs_even_without_matches() {
        let mut world = world();
        let mut begun = false;
        let mut steps = 0;
        {
            let query = world.query().unwrap().with::<Health>().unwrap();
            let mut system = System::new("idle", query, |_| steps += 1).with_begin(|| begun = true);
            assert_eq!(world.run(&mut system).unwrap(), 0);
        }
        assert!(begun);
        assert_eq!(steps, 0);
    }

    #[test]
    fn system_registration_errors() {
        let mut world = world();
        let query = world.query().unwrap();
        world.register_system(System::new("a", query.clone(), |_| {})).unwrap();

        let err = world
            .register_system(System::new("a", query, |_| {}))
            .unwrap_err();
        assert!(matches!(
            err,
            WorldError::System(SystemRegistrationError::DuplicateName { .. })
        ));

        let foreign = Query::new(SceneId::new(9), 16);
        let err = world
            .register_system(System::new("b", foreign, |_| {}))
            .unwrap_err();
        assert!(matches!(
            err,
            WorldError::System(SystemRegistrationError::UnknownScene { .. })
        ));

        let missing = SystemHandle::new(42);
        assert!(matches!(
            world.run_system(missing),
            Err(WorldError::UnknownSystem { .. })
        ));
    }

    #[test]
    fn scenes_are_isolated() {
        let mut world = World::new(small_config()).unwrap();
        assert!(matches!(world.new_entity(), Err(WorldError::NoActiveScene)));

        let first = world.create_scene();
        let second = world.create_scene();
        assert_eq!(world.current_scene(), Some(first));

        let a = world.new_entity().unwrap();
        world.add_component(a, pos(1.0, 1.0)).unwrap();

        world.set_current_scene(second).unwrap();
        assert_eq!(world.entity_count(), 0);
        assert!(world.get_component::<Position>(a).is_none());
        let b = world.new_entity().unwrap();
        assert_eq!(a, b, "entity ids are per scene");

        let in_first = world.query_in(first).unwrap().with::<Position>().unwrap();
        assert_eq!(world.query_entities(&in_first).unwrap(), vec![a]);

        assert!(matches!(
            world.set_current_scene(SceneId::new(5)),
            Err(WorldError::UnknownScene { .. })
        ));
    }

    #[test]
    fn arena_exhaustion_is_reported() {
        let mut world = World::new(EcsConfig {
            arena_bytes: 2048,
            ..small_config()
        })
        .unwrap();
        world.create_scene();

        let mut result = Ok(());
        for _ in 0..256 {
            let entity = world.new_entity().unwrap();
            result = world.add_component(entity, pos(0.0, 0.0));
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(
            result,
            Err(WorldError::Arena(ArenaError::Exhausted { .. }))
        ));
    }

    #[test]
    fn get_component_mut_writes_through() {
        let mut world = world();
        let e = world.new_entity().unwrap();
        world.add_component(e, Health { value: 10 }).unwrap();

        world.get_component_mut::<Health>(e).unwrap().value -= 4;
        world.set_component(e, pos(3.0, 3.0)).unwrap_err();

        assert_eq!(world.get_component::<Health>(e), Some(&Health { value: 6 }));
    }

    #[test]
    fn teardown_reports_usage() {
        let mut world = world();
        spawn_positions(&mut world, 8);
        let before = world.arena_stats();
        let stats = world.teardown();
        assert_eq!(stats, before);
        assert!(stats.used > 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = World::new(EcsConfig {
            max_entities: 0,
            ..EcsConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, WorldError::Config(_)));
    }
}
