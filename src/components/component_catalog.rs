use crate::components::{component_name, Component, ComponentSet, ComponentStore};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::data_structures::MAX_COMPONENTS;
use crate::entities::Entity;
use std::any::Any;

/// The type-erased face of a [ComponentStore], used to broadcast entity teardown
/// to every store without knowing the component types.
pub(crate) trait ErasedStore: Send + Sync {
	fn on_entity_destroyed(&mut self, entity: Entity);
	fn len(&self) -> usize;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for RwLock<ComponentStore<T>> {
	fn on_entity_destroyed(&mut self, entity: Entity) {
		self.get_mut().on_entity_destroyed(entity);
	}

	fn len(&self) -> usize {
		self.read().len()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Owns one [ComponentStore] per registered [component](Component) type,
/// indexed by [ComponentId](crate::components::ComponentId).
///
/// Every store sits behind its own lock so that systems running in parallel can
/// borrow different stores at the same time.
pub struct ComponentCatalog {
	stores: Vec<Option<Box<dyn ErasedStore>>>,
}

impl ComponentCatalog {
	pub fn new() -> Self {
		Self {
			stores: Vec::with_capacity(MAX_COMPONENTS),
		}
	}

	/// Allocate the store for `T`.
	///
	/// # Panics
	/// If `T` is already registered.
	pub fn register<T: Component>(&mut self) {
		let index = T::component_id().value();
		if self.stores.len() <= index {
			self.stores.resize_with(index + 1, || None);
		}

		assert!(
			self.stores[index].is_none(),
			"Component {} is already registered",
			component_name::<T>()
		);

		log::debug!("Registered component `{}` with id {index}", component_name::<T>());
		self.stores[index] = Some(Box::new(RwLock::new(ComponentStore::<T>::new())));
	}

	/// Register every type of the [ComponentSet] `C`.
	pub fn register_set<C: ComponentSet>(&mut self) {
		C::register(self);
	}

	pub fn is_registered<T: Component>(&self) -> bool {
		let index = T::component_id().value();
		matches!(self.stores.get(index), Some(Some(_)))
	}

	/// The locked store of `T`.
	///
	/// # Panics
	/// If `T` is not registered.
	pub fn store<T: Component>(&self) -> &RwLock<ComponentStore<T>> {
		let store = self.erased::<T>().as_any();
		match store.downcast_ref::<RwLock<ComponentStore<T>>>() {
			Some(store) => store,
			None => unreachable!("Component id collision for {}", component_name::<T>()),
		}
	}

	/// Exclusive access to the store of `T`, without locking.
	///
	/// # Panics
	/// If `T` is not registered.
	pub fn store_mut<T: Component>(&mut self) -> &mut ComponentStore<T> {
		let store = self.erased_mut::<T>().as_any_mut();
		match store.downcast_mut::<RwLock<ComponentStore<T>>>() {
			Some(store) => store.get_mut(),
			None => unreachable!("Component id collision for {}", component_name::<T>()),
		}
	}

	pub fn read<T: Component>(&self) -> RwLockReadGuard<'_, ComponentStore<T>> {
		self.store::<T>().read()
	}

	pub fn write<T: Component>(&self) -> RwLockWriteGuard<'_, ComponentStore<T>> {
		self.store::<T>().write()
	}

	/// # Panics
	/// If `T` is not registered, or if the entity already owns a `T`.
	pub fn add<T: Component>(&mut self, entity: Entity, value: T) {
		self.store_mut::<T>().insert(entity, value);
	}

	/// # Panics
	/// If `T` is not registered, or if the entity does not own a `T`.
	pub fn remove<T: Component>(&mut self, entity: Entity) -> T {
		self.store_mut::<T>().remove(entity)
	}

	/// # Panics
	/// If `T` is not registered, or if the entity does not own a `T`.
	pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
		self.store_mut::<T>().get_mut(entity)
	}

	/// # Panics
	/// If `T` is not registered.
	pub fn contains<T: Component>(&self, entity: Entity) -> bool {
		self.read::<T>().contains(entity)
	}

	/// Remove every component owned by `entity`.
	pub fn on_entity_destroyed(&mut self, entity: Entity) {
		for store in self.stores.iter_mut().flatten() {
			store.on_entity_destroyed(entity);
		}
	}

	/// The number of registered component types.
	pub fn len(&self) -> usize {
		self.stores.iter().flatten().count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The total number of stored components across every type.
	pub fn component_count(&self) -> usize {
		self.stores.iter().flatten().map(|store| store.len()).sum()
	}

	fn erased<T: Component>(&self) -> &dyn ErasedStore {
		let index = T::component_id().value();
		match self.stores.get(index) {
			Some(Some(store)) => store.as_ref(),
			_ => panic!("Component {} is not registered", component_name::<T>()),
		}
	}

	fn erased_mut<T: Component>(&mut self) -> &mut dyn ErasedStore {
		let index = T::component_id().value();
		match self.stores.get_mut(index) {
			Some(Some(store)) => store.as_mut(),
			_ => panic!("Component {} is not registered", component_name::<T>()),
		}
	}
}

impl Default for ComponentCatalog {
	fn default() -> Self {
		Self::new()
	}
}
