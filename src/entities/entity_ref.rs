use crate::data_structures::Signature;
use crate::components::Component;
use crate::EcsContext;
use crate::entities::Entity;
use parking_lot::MappedRwLockReadGuard;

/// A live [entity](Entity) together with the [EcsContext] it belongs to,
/// so that its components can be edited without repeating the entity at every call.
pub struct EntityMut<'l> {
	ecs: &'l mut EcsContext,
	entity: Entity,
}

impl<'l> EntityMut<'l> {
	pub(crate) fn new(ecs: &'l mut EcsContext, entity: Entity) -> Self {
		Self { ecs, entity }
	}

	pub fn id(&self) -> Entity {
		self.entity
	}

	pub fn signature(&self) -> Signature {
		self.ecs.signature(self.entity)
	}

	/// Attach `value` and return the handle, for chained construction.
	pub fn with<T: Component>(self, value: T) -> Self {
		self.ecs.add_component(self.entity, value);
		self
	}

	pub fn add<T: Component>(&mut self, value: T) -> &mut Self {
		self.ecs.add_component(self.entity, value);
		self
	}

	pub fn remove<T: Component>(&mut self) -> T {
		self.ecs.remove_component::<T>(self.entity)
	}

	pub fn get<T: Component>(&self) -> MappedRwLockReadGuard<'_, T> {
		self.ecs.get_component::<T>(self.entity)
	}

	pub fn get_mut<T: Component>(&mut self) -> &mut T {
		self.ecs.get_component_mut::<T>(self.entity)
	}

	pub fn has<T: Component>(&self) -> bool {
		self.ecs.has_component::<T>(self.entity)
	}

	/// Mark the entity for destruction at the next [confirm_changes](EcsContext::confirm_changes).
	pub fn destroy(self) -> Entity {
		self.ecs.destroy_entity(self.entity);
		self.entity
	}
}

impl From<EntityMut<'_>> for Entity {
	fn from(value: EntityMut<'_>) -> Self {
		value.entity
	}
}
