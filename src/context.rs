use crate::components::{Component, ComponentCatalog, ComponentFetch, ComponentSet, ComponentStore};
use crate::systems::{SharedWorld, System, SystemConfiguration, SystemScheduler};
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLockReadGuard};
use crate::entities::{assert_entity, Entity, EntityMut, EntityRegistry};
use crate::data_structures::Signature;
use crate::views::{View, ViewCache};
use crate::error::EcsResult;
use crate::config::EcsConfig;
use std::time::Duration;

/// A container for [`entities`](Entity), their [`components`](Component) and the [`systems`](System)
/// operating on them.
///
/// A frame is made of three ordered phases:
/// structural edits (creating entities, adding and removing components, marking entities for destruction),
/// then [execute](EcsContext::execute), then [confirm_changes](EcsContext::confirm_changes).
pub struct EcsContext {
	registry: EntityRegistry,
	catalog: ComponentCatalog,
	views: ViewCache,
	scheduler: SystemScheduler,
	deferred: Mutex<Vec<Entity>>,
}

impl EcsContext {
	pub fn new() -> Self {
		Self {
			registry: EntityRegistry::new(),
			catalog: ComponentCatalog::new(),
			views: ViewCache::new(),
			scheduler: SystemScheduler::new(),
			deferred: Mutex::new(Vec::new()),
		}
	}

	/// Create a context following the settings of `config`.
	pub fn with_config(config: EcsConfig) -> EcsResult<Self> {
		Ok(Self {
			registry: EntityRegistry::with_max_entities(config.max_entities),
			scheduler: SystemScheduler::with_config(&config)?,
			..Self::new()
		})
	}

	/// Creates a single [`entity`](Entity) with no [`components`](Component) attached.
	///
	/// # Panics
	/// If every entity slot is in use.
	pub fn create_entity(&mut self) -> Entity {
		let entity = self.registry.create();
		self.on_entity_created(entity);
		entity
	}

	/// Creates a single [`entity`](Entity), or fails if every entity slot is in use.
	pub fn try_create_entity(&mut self) -> EcsResult<Entity> {
		let entity = self.registry.try_create()?;
		self.on_entity_created(entity);
		Ok(entity)
	}

	/// Creates an [`entity`](Entity) and returns a handle to populate it.
	pub fn spawn(&mut self) -> EntityMut<'_> {
		let entity = self.create_entity();
		EntityMut::new(self, entity)
	}

	/// A handle to edit an existing [`entity`](Entity).
	///
	/// # Panics
	/// If the entity has been destroyed.
	pub fn entity_mut(&mut self, entity: Entity) -> EntityMut<'_> {
		self.assert_alive(entity);
		EntityMut::new(self, entity)
	}

	/// Marks an [`entity`](Entity) for destruction.
	/// The entity and its components remain accessible until [confirm_changes](EcsContext::confirm_changes).
	pub fn destroy_entity(&mut self, entity: Entity) {
		self.registry.destroy(entity);
	}

	/// Destroys every [`entity`](Entity) marked for destruction since the last call,
	/// including the ones queued by systems, and returns how many were destroyed.
	pub fn confirm_changes(&mut self) -> usize {
		for entity in self.deferred.get_mut().drain(..) {
			if self.registry.is_alive(entity) {
				self.registry.destroy(entity);
			}
		}

		let destroyed = self.registry.confirm();
		for entity in &destroyed {
			self.catalog.on_entity_destroyed(*entity);
			self.scheduler.on_entity_destroyed(*entity);
			self.views.on_entity_destroyed(*entity);
		}

		if !destroyed.is_empty() {
			log::debug!("Destroyed {} entities", destroyed.len());
		}

		destroyed.len()
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.registry.is_alive(entity)
	}

	/// The live [`entities`](Entity), in no particular order.
	pub fn active_entities(&self) -> &[Entity] {
		self.registry.active_entities()
	}

	/// The [Signature] of a live [`entity`](Entity).
	pub fn signature(&self, entity: Entity) -> Signature {
		self.registry.signature(entity)
	}

	pub fn registry(&self) -> &EntityRegistry {
		&self.registry
	}

	/// Allocate the storage for [`components`](Component) of type `T`.
	///
	/// # Panics
	/// If `T` is already registered.
	pub fn register_component<T: Component>(&mut self) {
		self.catalog.register::<T>();
	}

	/// Register every [`component`](Component) type of `C`.
	pub fn register_components<C: ComponentSet>(&mut self) {
		self.catalog.register_set::<C>();
	}

	pub fn is_component_registered<T: Component>(&self) -> bool {
		self.catalog.is_registered::<T>()
	}

	/// Attach `value` to `entity`.
	///
	/// # Panics
	/// If the entity has been destroyed, `T` is not registered, or the entity already has a `T`.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) {
		self.assert_alive(entity);
		self.catalog.add(entity, value);

		let signature = self.registry.signature(entity).with(T::component_id().value(), true);
		self.on_signature_changed(entity, signature);
	}

	/// Detach and return the `T` owned by `entity`.
	///
	/// # Panics
	/// If the entity has been destroyed, `T` is not registered, or the entity has no `T`.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> T {
		self.assert_alive(entity);
		let value = self.catalog.remove::<T>(entity);

		let signature = self.registry.signature(entity).with(T::component_id().value(), false);
		self.on_signature_changed(entity, signature);
		value
	}

	/// # Panics
	/// If the entity has been destroyed, `T` is not registered, or the entity has no `T`.
	pub fn get_component<T: Component>(&self, entity: Entity) -> MappedRwLockReadGuard<'_, T> {
		self.assert_alive(entity);
		RwLockReadGuard::map(self.catalog.read::<T>(), |store| store.get(entity))
	}

	/// # Panics
	/// If the entity has been destroyed, `T` is not registered, or the entity has no `T`.
	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
		self.assert_alive(entity);
		self.catalog.get_mut::<T>(entity)
	}

	/// # Panics
	/// If the entity has been destroyed or `T` is not registered.
	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.assert_alive(entity);
		self.catalog.contains::<T>(entity)
	}

	/// Shared access to the whole store of `T`.
	pub fn components<T: Component>(&self) -> RwLockReadGuard<'_, ComponentStore<T>> {
		self.catalog.read::<T>()
	}

	pub fn catalog(&self) -> &ComponentCatalog {
		&self.catalog
	}

	/// Add a new [system](System) to the [EcsContext] and declare its dependencies
	/// through the returned [SystemConfiguration].
	///
	/// # Panics
	/// If a system of the same type was already added, or the execution graph was already built.
	pub fn register_system<S: System>(&mut self, system: S) -> SystemConfiguration<'_> {
		self.scheduler.register_system(system)
	}

	pub fn is_system_registered<S: System>(&self) -> bool {
		self.scheduler.is_registered::<S>()
	}

	pub fn get_system<S: System>(&self) -> &S {
		self.scheduler.get::<S>()
	}

	pub fn get_system_mut<S: System>(&mut self) -> &mut S {
		self.scheduler.get_mut::<S>()
	}

	/// The entities tracked by the [system](System) `S`.
	pub fn system_entities<S: System>(&self) -> &[Entity] {
		self.scheduler.entities_of(self.scheduler.id_of::<S>())
	}

	/// Order every [system](System) into stages.
	/// Must be called once, after every system was added and before the first [execute](EcsContext::execute).
	pub fn build_execution_graph(&mut self) -> EcsResult<()> {
		let registry = &self.registry;
		self.scheduler
			.build_execution_graph(registry.active_entities(), |entity| registry.signature(entity))
	}

	/// The type names of the [systems](System) of each stage, in execution order.
	pub fn stages(&self) -> Vec<Vec<&'static str>> {
		self.scheduler.stage_names()
	}

	/// How long each [system](System) took the last time it ran.
	pub fn system_timings(&self) -> Vec<(&'static str, Duration)> {
		self.scheduler.timings()
	}

	/// Advance every [system](System) by one frame.
	///
	/// # Panics
	/// If the execution graph has not been built.
	pub fn execute(&mut self, dt: f32) {
		let world = SharedWorld {
			catalog: &self.catalog,
			registry: &self.registry,
			deferred: &self.deferred,
		};
		self.scheduler.execute(&world, dt);
	}

	/// Get the [View] over the components of `C`, building it if it doesn't exist yet.
	/// The view over `()` lists every live entity.
	pub fn create_view<C: ComponentSet>(&mut self) -> View {
		let registry = &self.registry;
		self.views
			.create_or_get_view(C::signature(), registry.active_entities(), |entity| registry.signature(entity))
	}

	/// The [`entities`](Entity) currently in `view`, in no particular order.
	pub fn view_entities(&self, view: View) -> &[Entity] {
		self.views.entities(view)
	}

	/// Call `func` with the components `C` of every entity in `view`.
	///
	/// # Panics
	/// If `view` does not include every component of `C`.
	pub fn for_each<C: ComponentFetch>(&self, view: View, func: impl FnMut(Entity, C::Refs<'_>)) {
		assert_view_includes::<C>(view);
		C::for_each(&self.catalog, self.views.entities(view), func);
	}

	/// Call `func` with mutable references to the components `C` of every entity in `view`.
	///
	/// # Panics
	/// If `view` does not include every component of `C`, or `C` names a component twice.
	pub fn for_each_mut<C: ComponentFetch>(&mut self, view: View, func: impl FnMut(Entity, C::Muts<'_>)) {
		assert_view_includes::<C>(view);
		C::for_each_mut(&self.catalog, self.views.entities(view), func);
	}

	fn on_entity_created(&mut self, entity: Entity) {
		self.scheduler.on_entity_signature_changed(entity, Signature::EMPTY);
		self.views.on_signature_changed(entity, Signature::EMPTY);
	}

	fn on_signature_changed(&mut self, entity: Entity, signature: Signature) {
		if let Err(error) = self.registry.set_signature(entity, signature) {
			unreachable!("Live entity rejected by the registry: {error}");
		}
		self.scheduler.on_entity_signature_changed(entity, signature);
		self.views.on_signature_changed(entity, signature);
	}

	#[inline(always)]
	fn assert_alive(&self, entity: Entity) {
		assert_entity(entity, self.registry.is_alive(entity));
	}
}

fn assert_view_includes<C: ComponentSet>(view: View) {
	assert!(
		C::signature().is_subset_of(&view.signature()),
		"View over {:?} does not include every component of {}",
		view.signature(),
		std::any::type_name::<C>()
	);
}

impl Default for EcsContext {
	fn default() -> Self {
		Self::new()
	}
}

