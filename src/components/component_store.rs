use crate::components::{component_name, Component};
use crate::data_structures::IndexHasher;
use std::collections::HashMap;
use crate::entities::Entity;

/// A packed array holding every [component](Component) of type `T`.
///
/// Components are stored without gaps. Each value lives in a *slot*, and two maps keep
/// slots and [entities](Entity) in sync: slot → entity through a parallel array,
/// entity → slot through a hash map keyed by entity index.
/// Removing a value moves the last one into its slot, so every operation is O(1).
pub struct ComponentStore<T: Component> {
	values: Vec<T>,
	entities: Vec<Entity>,
	slots: HashMap<u32, usize, IndexHasher>,
}

impl<T: Component> ComponentStore<T> {
	pub fn new() -> Self {
		Self {
			values: Vec::new(),
			entities: Vec::new(),
			slots: HashMap::default(),
		}
	}

	/// Attach `value` to `entity`.
	///
	/// # Panics
	/// If the entity already owns a component of type `T`.
	pub fn insert(&mut self, entity: Entity, value: T) {
		assert!(
			!self.slots.contains_key(&entity.index()),
			"Entity {entity} already has a component of type {}",
			component_name::<T>()
		);

		self.slots.insert(entity.index(), self.values.len());
		self.entities.push(entity);
		self.values.push(value);
	}

	/// Detach and return the component owned by `entity`.
	///
	/// # Panics
	/// If the entity does not own a component of type `T`.
	pub fn remove(&mut self, entity: Entity) -> T {
		match self.try_remove(entity) {
			Some(value) => value,
			None => panic!(
				"Entity {entity} does not have a component of type {}",
				component_name::<T>()
			),
		}
	}

	/// Detach and return the component owned by `entity`, if any.
	pub fn try_remove(&mut self, entity: Entity) -> Option<T> {
		let slot = self.slot_of(entity)?;
		self.slots.remove(&entity.index());

		self.entities.swap_remove(slot);
		let value = self.values.swap_remove(slot);

		if let Some(moved) = self.entities.get(slot) {
			self.slots.insert(moved.index(), slot);
		}

		Some(value)
	}

	/// # Panics
	/// If the entity does not own a component of type `T`.
	pub fn get(&self, entity: Entity) -> &T {
		match self.slot_of(entity) {
			Some(slot) => &self.values[slot],
			None => panic!(
				"Entity {entity} does not have a component of type {}",
				component_name::<T>()
			),
		}
	}

	/// # Panics
	/// If the entity does not own a component of type `T`.
	pub fn get_mut(&mut self, entity: Entity) -> &mut T {
		match self.slot_of(entity) {
			Some(slot) => &mut self.values[slot],
			None => panic!(
				"Entity {entity} does not have a component of type {}",
				component_name::<T>()
			),
		}
	}

	pub fn try_get(&self, entity: Entity) -> Option<&T> {
		self.slot_of(entity).map(|slot| &self.values[slot])
	}

	pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
		self.slot_of(entity).map(|slot| &mut self.values[slot])
	}

	pub fn contains(&self, entity: Entity) -> bool {
		self.slot_of(entity).is_some()
	}

	/// The slot holding the component of `entity`.
	/// Slots move when other components are removed; never hold on to one across a removal.
	pub fn slot_of(&self, entity: Entity) -> Option<usize> {
		let slot = *self.slots.get(&entity.index())?;
		match self.entities[slot] == entity {
			true => Some(slot),
			false => None,
		}
	}

	/// The [entity](Entity) owning the component in `slot`.
	pub fn entity_of(&self, slot: usize) -> Option<Entity> {
		self.entities.get(slot).copied()
	}

	/// Remove the component owned by `entity`, if any.
	pub fn on_entity_destroyed(&mut self, entity: Entity) {
		self.try_remove(entity);
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// The owners of the stored components, in slot order.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// The stored components, in slot order.
	pub fn values(&self) -> &[T] {
		&self.values
	}

	pub fn values_mut(&mut self) -> &mut [T] {
		&mut self.values
	}

	/// Iterate over `(owner, component)` pairs in slot order.
	pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
		self.entities.iter().copied().zip(self.values.iter())
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
		self.entities.iter().copied().zip(self.values.iter_mut())
	}
}

impl<T: Component> Default for ComponentStore<T> {
	fn default() -> Self {
		Self::new()
	}
}
