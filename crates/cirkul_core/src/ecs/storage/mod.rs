// mod.rs - Storage module exports

mod archetype_storage;
mod column;
mod view;

pub use archetype_storage::ArchetypeStorage;
pub use column::Column;
pub use view::{ArchetypeView, ColumnSet};
