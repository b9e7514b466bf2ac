use crate::components::{ComponentCatalog, ComponentStore};
use crate::tests::{Health, Name, Position, Velocity};
use std::collections::HashMap;
use crate::entities::Entity;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn assert_packed(store: &ComponentStore<Health>, model: &HashMap<Entity, Health>) {
	assert_eq!(store.len(), model.len(), "The dense array must not contain unused slots");

	for (entity, value) in model {
		let slot = store.slot_of(*entity).unwrap();
		assert_eq!(store.entity_of(slot), Some(*entity));
		assert_eq!(store.get(*entity), value);
	}

	for (slot, entity) in store.entities().iter().enumerate() {
		assert_eq!(store.slot_of(*entity), Some(slot));
	}
}

#[test]
pub fn insert_get_remove() {
	let mut store = ComponentStore::<Position>::new();
	let a = Entity::new(0, 0);
	let b = Entity::new(1, 0);

	store.insert(a, Position(1.0, 2.0));
	store.insert(b, Position(3.0, 4.0));

	assert_eq!(*store.get(a), Position(1.0, 2.0));
	store.get_mut(b).0 = 5.0;
	assert_eq!(*store.get(b), Position(5.0, 4.0));

	assert_eq!(store.remove(a), Position(1.0, 2.0));
	assert!(!store.contains(a));
	assert_eq!(store.slot_of(b), Some(0), "The last component moves into the freed slot");
	assert_eq!(store.len(), 1);
}

#[test]
#[should_panic(expected = "already has a component")]
pub fn duplicate_insert_panics() {
	let mut store = ComponentStore::<Position>::new();
	let entity = Entity::new(0, 0);
	store.insert(entity, Position::default());
	store.insert(entity, Position::default());
}

#[test]
#[should_panic(expected = "does not have a component")]
pub fn removing_a_missing_component_panics() {
	let mut store = ComponentStore::<Position>::new();
	store.remove(Entity::new(0, 0));
}

#[test]
pub fn stale_handles_do_not_resolve() {
	let mut store = ComponentStore::<Velocity>::new();
	store.insert(Entity::new(4, 2), Velocity(1.0, 1.0));

	assert!(!store.contains(Entity::new(4, 1)));
	assert!(store.try_get(Entity::new(4, 3)).is_none());
	assert!(store.try_remove(Entity::new(4, 1)).is_none());
	assert_eq!(store.len(), 1);
}

#[test]
pub fn random_packed_array_invariant() {
	let mut rng = StdRng::seed_from_u64(42);
	let mut store = ComponentStore::<Health>::new();
	let mut model = HashMap::new();

	for step in 0..2000 {
		let entity = Entity::new(rng.gen_range(0..64), 0);
		match model.contains_key(&entity) {
			true => {
				assert_eq!(Some(store.remove(entity)), model.remove(&entity));
			},
			false => {
				store.insert(entity, Health(step));
				model.insert(entity, Health(step));
			},
		}

		if step % 100 == 0 {
			assert_packed(&store, &model);
		}
	}

	assert_packed(&store, &model);
}

#[test]
pub fn catalog_broadcasts_destruction() {
	let mut catalog = ComponentCatalog::new();
	catalog.register_set::<(Position, Health, Name)>();
	assert_eq!(catalog.len(), 3);

	let a = Entity::new(0, 0);
	let b = Entity::new(1, 0);

	catalog.add(a, Position(0.0, 0.0));
	catalog.add(a, Health(10));
	catalog.add(b, Health(20));
	catalog.add(b, Name("b".into()));
	assert_eq!(catalog.component_count(), 4);

	catalog.on_entity_destroyed(a);

	assert!(!catalog.contains::<Position>(a));
	assert!(!catalog.contains::<Health>(a));
	assert!(catalog.contains::<Health>(b));
	assert_eq!(catalog.read::<Name>().get(b).0, "b");
	assert_eq!(catalog.component_count(), 2);
}

#[test]
#[should_panic(expected = "is already registered")]
pub fn duplicate_registration_panics() {
	let mut catalog = ComponentCatalog::new();
	catalog.register::<Position>();
	catalog.register::<Position>();
}

#[test]
#[should_panic(expected = "is not registered")]
pub fn unregistered_access_panics() {
	let catalog = ComponentCatalog::new();
	catalog.contains::<Velocity>(Entity::new(0, 0));
}
