mod signature_tests;
mod entity_registry_tests;
mod component_store_tests;
mod view_cache_tests;

use crate::prelude::*;

// Component ids are process-wide and capped at MAX_COMPONENTS, so every test shares this small set.

#[derive(Component, Default, Copy, Clone, Debug, PartialEq)]
pub(crate) struct Position(pub f32, pub f32);

#[derive(Component, Default, Copy, Clone, Debug, PartialEq)]
pub(crate) struct Velocity(pub f32, pub f32);

#[derive(Component, Default, Copy, Clone, Debug, PartialEq)]
pub(crate) struct Transform(pub f32);

#[derive(Component, Default, Copy, Clone, Debug, PartialEq)]
pub(crate) struct RigidBody(pub f32);

#[derive(Component, Default, Copy, Clone, Debug, PartialEq)]
pub(crate) struct Health(pub i32);

#[derive(Component, Default, Clone, Debug, PartialEq)]
pub(crate) struct Name(pub String);

pub(crate) fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn context() -> EcsContext {
	init_logger();
	let mut ecs = EcsContext::new();
	ecs.register_components::<(Position, Velocity, Transform, RigidBody, Health, Name)>();
	ecs
}
