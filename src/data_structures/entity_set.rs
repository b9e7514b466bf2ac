use std::collections::hash_map::Entry;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use crate::entities::Entity;
use std::collections::HashMap;

pub(crate) type IndexHasher = BuildHasherDefault<NoHashHasher<u32>>;

/// An unordered set of [entities](Entity) stored contiguously.
///
/// Membership is tracked through an entity-index to position map,
/// so insertion, removal and lookup are all O(1).
/// Removal swaps the last element into the vacated position.
#[derive(Default, Clone)]
pub struct EntitySet {
	entities: Vec<Entity>,
	positions: HashMap<u32, usize, IndexHasher>,
}

impl EntitySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `entity`, returning *false* if it was already present.
	pub fn insert(&mut self, entity: Entity) -> bool {
		match self.positions.entry(entity.index()) {
			Entry::Occupied(_) => false,
			Entry::Vacant(vacant) => {
				vacant.insert(self.entities.len());
				self.entities.push(entity);
				true
			},
		}
	}

	/// Remove `entity`, returning *false* if it was not present.
	pub fn remove(&mut self, entity: Entity) -> bool {
		let position = match self.positions.get(&entity.index()) {
			Some(position) if self.entities[*position] == entity => *position,
			_ => return false,
		};

		self.positions.remove(&entity.index());
		self.entities.swap_remove(position);

		if let Some(moved) = self.entities.get(position) {
			self.positions.insert(moved.index(), position);
		}

		true
	}

	pub fn contains(&self, entity: Entity) -> bool {
		match self.positions.get(&entity.index()) {
			Some(position) => self.entities[*position] == entity,
			None => false,
		}
	}

	pub fn as_slice(&self) -> &[Entity] {
		&self.entities
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	pub fn clear(&mut self) {
		self.entities.clear();
		self.positions.clear();
	}
}
