use crate::ecs::{SceneId, System, SystemHandle};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while registering a system with the world.
#[derive(Debug, Error)]
pub enum SystemRegistrationError {
    #[error("system '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("system '{name}' queries scene {scene}, which does not exist")]
    UnknownScene { name: String, scene: SceneId },
}

/// Registered systems in registration order.
#[derive(Debug, Default)]
pub(crate) struct SystemRegistry {
    systems: Vec<System<'static>>,
    name_lookup: HashMap<String, SystemHandle>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `system`. The caller has already checked that its scene exists.
    pub fn register(&mut self, system: System<'static>) -> Result<SystemHandle, SystemRegistrationError> {
        let name_key = system.name().to_string();
        if self.name_lookup.contains_key(&name_key) {
            return Err(SystemRegistrationError::DuplicateName { name: name_key });
        }

        let handle = SystemHandle::new(self.systems.len() as u32);
        self.name_lookup.insert(name_key, handle);
        self.systems.push(system);
        Ok(handle)
    }

    pub fn get(&self, handle: SystemHandle) -> Option<&System<'static>> {
        self.systems.get(handle.index() as usize)
    }

    pub fn get_mut(&mut self, handle: SystemHandle) -> Option<&mut System<'static>> {
        self.systems.get_mut(handle.index() as usize)
    }

    pub fn handle_of(&self, name: &str) -> Option<SystemHandle> {
        self.name_lookup.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn handles(&self) -> impl Iterator<Item = SystemHandle> {
        (0..self.systems.len() as u32).map(SystemHandle::new)
    }
}
