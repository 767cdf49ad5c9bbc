// component.rs - Component layout registration
//
// Components are identified by small sequential u16 ids, not Rust TypeIds.
// The registry records each id's byte layout once; archetype columns are
// sized from it.

use crate::memory::ARENA_ALIGN;
use bytemuck::Pod;
use std::mem::{align_of, size_of};
use thiserror::Error;
use tracing::debug;

pub type ComponentId = u16;

/// Metadata describing a component's memory layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentMeta {
    pub id: ComponentId,
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("component id {id} exceeds the component limit ({max})")]
    LimitExceeded { id: ComponentId, max: usize },

    #[error("component id {id} is already registered as '{existing}', cannot reuse it for '{requested}'")]
    LayoutMismatch {
        id: ComponentId,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("component '{name}' is zero-sized")]
    ZeroSized { name: &'static str },

    #[error("component '{name}' requires alignment {align}, above the arena maximum")]
    UnsupportedAlignment { name: &'static str, align: usize },

    #[error("component id {id} is not registered")]
    NotRegistered { id: ComponentId },
}

/// Trait for plain-data components.
///
/// `Pod` guarantees the value can be relocated between archetype columns with
/// a byte copy and viewed back from raw column storage.
pub trait Component: Pod + Send + Sync {
    /// Process-wide component id, below `EcsConfig::max_components`.
    const ID: ComponentId;

    /// Human-readable name for debugging.
    const NAME: &'static str;

    fn meta() -> ComponentMeta {
        ComponentMeta {
            id: Self::ID,
            name: Self::NAME,
            size: size_of::<Self>(),
            align: align_of::<Self>(),
        }
    }
}

/// Per-world table of component layouts, indexed by id.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    metas: Vec<Option<ComponentMeta>>,
}

impl ComponentRegistry {
    pub fn new(max_components: usize) -> Self {
        Self {
            metas: vec![None; max_components],
        }
    }

    /// Record a component's layout. Registering the same layout again is a
    /// no-op; a different layout under a known id is rejected.
    pub fn register(&mut self, meta: ComponentMeta) -> Result<(), ComponentError> {
        let max = self.metas.len();
        let slot = self
            .metas
            .get_mut(meta.id as usize)
            .ok_or(ComponentError::LimitExceeded { id: meta.id, max })?;

        if let Some(prev) = slot {
            if *prev != meta {
                return Err(ComponentError::LayoutMismatch {
                    id: meta.id,
                    existing: prev.name,
                    requested: meta.name,
                });
            }
            return Ok(());
        }

        if meta.size == 0 {
            return Err(ComponentError::ZeroSized { name: meta.name });
        }
        if meta.align > ARENA_ALIGN {
            return Err(ComponentError::UnsupportedAlignment {
                name: meta.name,
                align: meta.align,
            });
        }

        debug!(id = meta.id, name = meta.name, size = meta.size, "registered component");
        *slot = Some(meta);
        Ok(())
    }

    /// Look up component metadata by id.
    pub fn meta_of(&self, id: ComponentId) -> Option<&ComponentMeta> {
        self.metas.get(id as usize)?.as_ref()
    }

    /// Like `meta_of`, but as an error for callers that require the entry.
    pub fn require(&self, id: ComponentId) -> Result<&ComponentMeta, ComponentError> {
        self.meta_of(id).ok_or(ComponentError::NotRegistered { id })
    }

    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.meta_of(id).is_some()
    }

    /// Maximum number of component ids.
    pub fn capacity(&self) -> usize {
        self.metas.len()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.metas.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentMeta> {
        self.metas.iter().flatten()
    }
}

/// Implement `Component` with an explicit id.
///
/// # Example
/// ```ignore
/// #[repr(C)]
/// #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
/// struct Position { x: f32, y: f32 }
///
/// define_component!(Position, 1, "Position");
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $id:expr, $name:expr) => {
        impl $crate::ecs::Component for $ty {
            const ID: $crate::ecs::ComponentId = $id;
            const NAME: &'static str = $name;
        }
    };
}

/// Implement `Component` for each listed type, assigning ids 0, 1, 2, …
/// in declaration order.
///
/// # Example
/// ```ignore
/// components! { Position, Velocity, Tint }
/// assert_eq!(Velocity::ID, 1);
/// ```
#[macro_export]
macro_rules! components {
    ($($ty:ident),+ $(,)?) => {
        const _: () = {
            #[allow(non_camel_case_types, dead_code)]
            #[repr(u16)]
            enum __ComponentIds {
                $($ty,)+
            }

            $(
                impl $crate::ecs::Component for $ty {
                    const ID: $crate::ecs::ComponentId =
                        __ComponentIds::$ty as $crate::ecs::ComponentId;
                    const NAME: &'static str = stringify!($ty);
                }
            )+
        };
    };
}
