use crate::components::{component_name, Component, ComponentCatalog, ComponentId, ComponentStore};
use parking_lot::{Mutex, RwLockReadGuard, RwLockWriteGuard};
use crate::entities::{Entity, EntityRegistry};
use crate::data_structures::Signature;

/// The world state shared by every system of a stage.
pub(crate) struct SharedWorld<'l> {
	pub catalog: &'l ComponentCatalog,
	pub registry: &'l EntityRegistry,
	pub deferred: &'l Mutex<Vec<Entity>>,
}

/// What a [System](crate::systems::System) can see and touch while it runs.
///
/// Component stores are only reachable through the access the system declared at registration:
/// [read](SystemContext::read) requires a read or write dependency,
/// [write](SystemContext::write) requires the write dependency.
/// Structural changes are limited to [destroy_entity](SystemContext::destroy_entity),
/// which is deferred until the next [confirm_changes](crate::EcsContext::confirm_changes).
pub struct SystemContext<'l> {
	pub(crate) world: &'l SharedWorld<'l>,
	pub(crate) name: &'static str,
	pub(crate) entities: &'l [Entity],
	pub(crate) reads: Signature,
	pub(crate) write: Option<ComponentId>,
}

impl<'l> SystemContext<'l> {
	/// The [entities](Entity) owning every component the system depends on.
	pub fn entities(&self) -> &'l [Entity] {
		self.entities
	}

	/// The type name of the running system.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Shared access to the store of `T`.
	///
	/// The write component is only reachable through [write](SystemContext::write),
	/// whose guard also gives read access: the store locks are not reentrant.
	///
	/// # Panics
	/// If the system declared no read dependency on `T`, or `T` is its write dependency.
	pub fn read<T: Component>(&self) -> RwLockReadGuard<'l, ComponentStore<T>> {
		let id = T::component_id();
		assert!(
			self.write != Some(id),
			"System {} writes {}: read it through its write guard",
			self.name,
			component_name::<T>()
		);
		assert!(
			self.reads.get(id.value()),
			"System {} did not declare a dependency on {}",
			self.name,
			component_name::<T>()
		);
		self.world.catalog.read::<T>()
	}

	/// Exclusive access to the store of `T`.
	///
	/// # Panics
	/// If `T` is not the system's write dependency.
	pub fn write<T: Component>(&self) -> RwLockWriteGuard<'l, ComponentStore<T>> {
		assert!(
			self.write == Some(T::component_id()),
			"System {} did not declare write access to {}",
			self.name,
			component_name::<T>()
		);
		self.world.catalog.write::<T>()
	}

	/// The current [Signature] of a live entity.
	pub fn signature(&self, entity: Entity) -> Signature {
		self.world.registry.signature(entity)
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.world.registry.is_alive(entity)
	}

	/// Queue `entity` for destruction at the next
	/// [confirm_changes](crate::EcsContext::confirm_changes).
	pub fn destroy_entity(&self, entity: Entity) {
		self.world.deferred.lock().push(entity);
	}
}
