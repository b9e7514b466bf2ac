//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be manually added to an [EcsContext](crate::EcsContext)
//! for it to become active during the execution of the program.
//! Once every system is added, the context orders them into stages from their declared
//! read and write dependencies; the systems of a stage run in parallel.

mod system;
mod system_graph;
mod system_context;
mod system_scheduler;

pub use system::System;
pub use system_context::SystemContext;
pub use system_scheduler::*;

pub(crate) use system::ErasedSystem;
pub(crate) use system_context::SharedWorld;
pub(crate) use system_graph::{build_stages, SystemNode};
