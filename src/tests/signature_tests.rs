use crate::data_structures::{EntitySet, Signature, MAX_COMPONENTS};
use crate::entities::Entity;

#[test]
pub fn set_and_clear_bits() {
	let mut signature = Signature::new();
	assert!(signature.is_empty());

	signature.set(0, true);
	signature.set(5, true);
	signature.set(MAX_COMPONENTS - 1, true);

	assert!(signature.get(0));
	assert!(signature.get(5));
	assert!(signature.get(MAX_COMPONENTS - 1));
	assert!(!signature.get(1));
	assert_eq!(signature.count(), 3);
	assert_eq!(signature.iter().collect::<Vec<_>>(), [0, 5, MAX_COMPONENTS - 1]);

	signature.set(5, false);
	assert!(!signature.get(5));
	assert_eq!(signature.count(), 2);

	signature.clear();
	assert!(signature.is_empty());
}

#[test]
pub fn subset_relation() {
	let ab = Signature::from_iter([1, 2]);
	let abc = Signature::from_iter([1, 2, 3]);

	assert!(ab.is_subset_of(&abc));
	assert!(!abc.is_subset_of(&ab));
	assert!(ab.is_subset_of(&ab));
	assert!(abc.contains_all(&ab));
	assert!(Signature::EMPTY.is_subset_of(&ab), "The empty signature is a subset of everything");
	assert_eq!(ab | Signature::from_iter([3]), abc);
	assert_eq!(abc & Signature::from_iter([3, 4]), Signature::from_iter([3]));
}

#[test]
#[should_panic]
pub fn out_of_range_bit() {
	Signature::new().set(MAX_COMPONENTS, true);
}

#[test]
pub fn entity_set_swap_remove() {
	let entities = (0..5).map(|i| Entity::new(i, 0)).collect::<Vec<_>>();
	let mut set = EntitySet::new();

	for entity in &entities {
		assert!(set.insert(*entity));
	}
	assert!(!set.insert(entities[2]), "Inserting twice must be rejected");

	assert!(set.remove(entities[1]));
	assert!(!set.remove(entities[1]));
	assert_eq!(set.len(), 4);
	assert_eq!(set.as_slice()[1], entities[4], "The last entity fills the vacated position");

	assert!(!set.remove(Entity::new(3, 1)), "A stale handle must not remove the live entity");
	assert!(set.contains(entities[3]));

	for entity in [entities[0], entities[2], entities[3], entities[4]] {
		assert!(set.remove(entity));
	}
	assert!(set.is_empty());
}
