//! [Components](Component) are the plain data attached to [entities](crate::entities::Entity).
//!
//! Each component type gets one packed [ComponentStore],
//! and the [ComponentCatalog] owns the stores of every registered type.

mod component_id;
mod component_set;
mod component_type;
mod component_store;
mod component_catalog;

pub use component_id::*;
pub use component_set::*;
pub use component_type::*;
pub use component_store::*;
pub use component_catalog::*;
pub use strata_ecs_derive::Component;
