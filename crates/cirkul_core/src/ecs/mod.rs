//! Entity Component System core types.
//!
//! Entities are grouped into archetypes by their exact component set. Each
//! archetype stores its components column by column in the world arena, so a
//! system iterating a query touches dense, contiguous slices. A [`World`]
//! owns everything: the arena, the component registry, scenes and systems.

mod archetype;
mod bitmask;
mod component;
mod entity;
mod error;
mod query;
mod scene;
mod system;
mod system_registry;
pub mod storage;
mod world;

pub use archetype::{ArchetypeId, ArchetypeLayout};
pub use bitmask::Bitmask;
pub use component::{Component, ComponentError, ComponentId, ComponentMeta, ComponentRegistry};
pub use entity::Entity;
pub use error::WorldError;
pub use query::Query;
pub use scene::{Scene, SceneId};
pub use storage::{ArchetypeStorage, ArchetypeView, Column, ColumnSet};
pub use system::{System, SystemHandle};
pub use system_registry::SystemRegistrationError;
pub use world::World;
