use crate::systems::SystemContext;
use std::any::Any;

/// It provides the logic for modifying the state of [Entities](crate::entities::Entity)
/// and their associated [Components](crate::components::Component).
///
/// Systems of the same stage run in parallel, so a system must be [Send].
pub trait System: Send + 'static {
	/// Initialises the [System].
	/// Called once, when the execution graph is built.
	/// **This function should not be called by user code.**
	fn setup(&mut self) {}

	/// Advance the system by one frame.
	fn update(&mut self, ctx: &SystemContext, dt: f32);
}

/// Object-safe view of a [System] that can also be downcast back to its concrete type.
pub(crate) trait ErasedSystem: Send {
	fn setup(&mut self);
	fn update(&mut self, ctx: &SystemContext, dt: f32);
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: System> ErasedSystem for S {
	fn setup(&mut self) {
		System::setup(self)
	}

	fn update(&mut self, ctx: &SystemContext, dt: f32) {
		System::update(self, ctx, dt)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
