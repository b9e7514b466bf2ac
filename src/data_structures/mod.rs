mod signature;
mod entity_set;

pub use signature::*;
pub use entity_set::EntitySet;

pub(crate) use entity_set::IndexHasher;
