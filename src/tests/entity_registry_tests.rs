use crate::data_structures::Signature;
use crate::entities::{Entity, EntityRegistry};
use rand::prelude::SliceRandom;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use crate::EcsError;

#[test]
pub fn sequential_creation() {
	let mut registry = EntityRegistry::new();

	for i in 0..16 {
		let entity = registry.create();
		assert_eq!(entity.index(), i, "Entity index does not match the expected index");
		assert_eq!(entity.generation(), 0);
		assert!(registry.is_alive(entity));
		assert!(registry.signature(entity).is_empty());
	}

	assert_eq!(registry.len(), 16);
	assert_eq!(registry.capacity(), 16);
}

#[test]
pub fn destruction_is_deferred() {
	let mut registry = EntityRegistry::new();
	let entity = registry.create();

	registry.destroy(entity);
	registry.destroy(entity);
	assert!(registry.is_alive(entity), "Entities stay alive until confirmed");
	assert!(registry.is_pending(entity));

	assert_eq!(registry.confirm(), [entity]);
	assert!(!registry.is_alive(entity));
	assert!(registry.active_entities().is_empty());

	assert!(registry.confirm().is_empty(), "Confirming without pending entities is a no-op");
}

#[test]
pub fn recycled_slots_get_a_new_generation() {
	let mut registry = EntityRegistry::new();
	let entities = (0..8).map(|_| registry.create()).collect::<Vec<_>>();

	let old = entities[3];
	registry.destroy(old);
	registry.confirm();

	let new = registry.create();
	assert_eq!(new.index(), old.index());
	assert_eq!(new.generation(), old.generation() + 1);
	assert_ne!(new, old);
	assert!(registry.is_alive(new));
	assert!(!registry.is_alive(old), "A stale handle must not be treated as alive");
}

#[test]
#[should_panic(expected = "has already been destroyed")]
pub fn destroying_a_stale_entity_panics() {
	let mut registry = EntityRegistry::new();
	let entity = registry.create();
	registry.destroy(entity);
	registry.confirm();
	registry.destroy(entity);
}

#[test]
pub fn signature_access() {
	let mut registry = EntityRegistry::new();
	let entity = registry.create();
	let signature = Signature::from_iter([2, 7]);

	registry.set_signature(entity, signature).unwrap();
	assert_eq!(registry.get_signature(entity).unwrap(), signature);

	let outside = Entity::from_bits(100);
	assert_eq!(
		registry.get_signature(outside),
		Err(EcsError::EntityOutOfRange { index: 100, capacity: 1 })
	);
	assert!(registry.set_signature(outside, signature).is_err());

	registry.destroy(entity);
	registry.confirm();
	assert!(registry.get_signature(entity).unwrap().is_empty(), "Confirmed entities have an empty signature");
}

#[test]
pub fn capacity_exhaustion() {
	let mut registry = EntityRegistry::with_max_entities(2);
	let first = registry.create();
	registry.create();

	assert_eq!(
		registry.try_create(),
		Err(EcsError::EntityCapacityExhausted { capacity: 2 })
	);

	registry.destroy(first);
	registry.confirm();
	assert!(registry.try_create().is_ok(), "Recycled slots are available again");
}

#[test]
pub fn random_create_destroy() {
	let mut rng = StdRng::seed_from_u64(0x5eed);
	let mut registry = EntityRegistry::new();
	let mut alive = Vec::<Entity>::new();
	let mut dead = Vec::<Entity>::new();

	for _ in 0..64 {
		for _ in 0..rng.gen_range(0..32) {
			let entity = registry.create();
			registry.set_signature(entity, Signature::from_iter([rng.gen_range(0..8)])).unwrap();
			alive.push(entity);
		}

		alive.shuffle(&mut rng);
		let count = rng.gen_range(0..=alive.len());
		for entity in alive.drain(..count) {
			registry.destroy(entity);
			dead.push(entity);
		}
		registry.confirm();

		assert_eq!(registry.len(), alive.len());
		for entity in &alive {
			assert!(registry.is_alive(*entity));
			assert!(registry.active_entities().contains(entity));
		}
		for entity in &dead {
			assert!(!registry.is_alive(*entity));
			assert!(!registry.active_entities().contains(entity));
		}
	}
}
