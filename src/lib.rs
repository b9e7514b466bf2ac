//! A data-oriented Entity-Component-System runtime.
//!
//! Components live in packed per-type stores, entities are tracked through capability
//! [signatures](data_structures::Signature), [views](views::View) cache the entities owning a
//! set of components, and [systems](systems::System) run in parallel stages ordered by their
//! declared read and write dependencies.

extern crate self as strata_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod systems;
pub mod views;
mod context;
mod config;
mod error;

pub use lazy_static::lazy_static;
pub use context::EcsContext;
pub use config::EcsConfig;
pub use error::*;

pub mod prelude {
	pub use crate::views::View;
	pub use crate::components::*;
	pub use crate::config::EcsConfig;
	pub use crate::EcsContext;
	pub use crate::data_structures::Signature;
	pub use crate::error::{EcsError, EcsResult};
	pub use crate::entities::{Entity, EntityMut};
	pub use crate::systems::{System, SystemContext, SystemId};
}

#[cfg(test)]
mod tests;
