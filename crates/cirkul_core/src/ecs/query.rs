// query.rs - Required-component filters over a scene's archetypes
//
// A query is only a mask. Matching is re-evaluated against the scene's
// archetype list every time, so archetypes created after the query was built
// are picked up automatically.

use crate::ecs::storage::ArchetypeStorage;
use crate::ecs::{Bitmask, Component, ComponentError, ComponentId, Scene, SceneId};

/// Selects every archetype of one scene that stores all required components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    mask: Bitmask,
    scene: SceneId,
}

impl Query {
    /// Empty query (matches every archetype) bound to `scene`.
    pub fn new(scene: SceneId, max_components: usize) -> Self {
        Self {
            mask: Bitmask::new(max_components),
            scene,
        }
    }

    pub fn require<T: Component>(&mut self) -> Result<&mut Self, ComponentError> {
        self.require_id(T::ID)
    }

    pub fn require_id(&mut self, id: ComponentId) -> Result<&mut Self, ComponentError> {
        let max = self.mask.capacity();
        if id as usize >= max {
            return Err(ComponentError::LimitExceeded { id, max });
        }
        self.mask.set(id as usize);
        Ok(self)
    }

    /// Builder form of `require`.
    ///
    /// # Example
    /// ```ignore
    /// let moving = world.query()?.with::<Position>()?.with::<Velocity>()?;
    /// ```
    pub fn with<T: Component>(mut self) -> Result<Self, ComponentError> {
        self.require::<T>()?;
        Ok(self)
    }

    #[inline]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    #[inline]
    pub fn mask(&self) -> &Bitmask {
        &self.mask
    }

    #[inline]
    pub fn requires(&self, id: ComponentId) -> bool {
        self.mask.test(id as usize)
    }

    /// Superset test against the archetype's component set.
    #[inline]
    pub fn matches(&self, archetype: &ArchetypeStorage) -> bool {
        archetype.mask().contains_all(&self.mask)
    }

    /// Matching archetypes of `scene` in creation order, empty ones included.
    pub fn matching<'s>(&'s self, scene: &'s Scene) -> impl Iterator<Item = &'s ArchetypeStorage> + 's {
        debug_assert_eq!(scene.id(), self.scene, "query evaluated against a foreign scene");
        scene
            .archetypes()
            .iter()
            .filter(move |archetype| self.matches(archetype))
    }
}
