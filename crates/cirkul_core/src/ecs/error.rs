use crate::config::ConfigError;
use crate::ecs::{ComponentError, Entity, SceneId, SystemHandle, SystemRegistrationError};
use crate::memory::ArenaError;
use thiserror::Error;

/// Errors surfaced by world operations.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Arena(#[from] ArenaError),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    System(#[from] SystemRegistrationError),

    #[error("archetype table is full ({max} archetypes)")]
    ArchetypeTableFull { max: usize },

    #[error("entity limit reached ({max} entities)")]
    EntityLimitExceeded { max: u32 },

    #[error("entity {entity} is not alive")]
    EntityNotAlive { entity: Entity },

    #[error("entity {entity} has no '{component}' component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("no scene is active")]
    NoActiveScene,

    #[error("scene {scene} does not exist")]
    UnknownScene { scene: SceneId },

    #[error("system {system} does not exist")]
    UnknownSystem { system: SystemHandle },
}
