//! Cirkul Core
//!
//! Archetype-based entity storage:
//! - Bump arena backing every component column
//! - Component registry, archetypes and scenes
//! - Queries, systems and the world that runs them

pub mod config;
pub mod ecs;
pub mod memory;

pub use config::{ConfigError, EcsConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
