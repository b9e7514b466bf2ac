//! [Views](View) give fast access to every [entity](crate::entities::Entity) owning a given set of
//! [components](crate::components::Component).
//!
//! A view is built once, by scanning the live entities, and from then on is updated
//! incrementally whenever an entity gains or loses a component or is destroyed.

mod view_cache;

pub use view_cache::*;
