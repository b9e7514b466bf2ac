use crate::entities::{assert_entity, Entity};
use crate::error::{EcsError, EcsResult};
use crate::data_structures::{IndexHasher, Signature};
use std::collections::{HashSet, VecDeque};

/// Issues and recycles [entity](Entity) handles and tracks the [Signature] of every live entity.
///
/// Destruction is deferred: [destroy](EntityRegistry::destroy) only marks an entity,
/// and [confirm](EntityRegistry::confirm) recycles every marked slot at once.
pub struct EntityRegistry {
	max_entities: u32,
	next_index: u32,
	available: VecDeque<u32>,

	generations: Vec<u32>,
	signatures: Vec<Signature>,

	active: Vec<Entity>,
	locations: Vec<usize>,

	pending: Vec<Entity>,
	pending_set: HashSet<u32, IndexHasher>,
}

impl EntityRegistry {
	pub fn new() -> Self {
		Self::with_max_entities(u32::MAX)
	}

	/// Create a registry that never hands out more than `max_entities` slots.
	pub fn with_max_entities(max_entities: u32) -> Self {
		Self {
			max_entities,
			next_index: 0,
			available: VecDeque::new(),
			generations: Vec::new(),
			signatures: Vec::new(),
			active: Vec::new(),
			locations: Vec::new(),
			pending: Vec::new(),
			pending_set: HashSet::default(),
		}
	}

	/// Creates a single [entity](Entity) with an empty [Signature].
	///
	/// # Panics
	/// If every entity slot is in use.
	pub fn create(&mut self) -> Entity {
		match self.try_create() {
			Ok(entity) => entity,
			Err(error) => panic!("{error}"),
		}
	}

	/// Creates a single [entity](Entity) with an empty [Signature],
	/// or fails if every entity slot is in use.
	pub fn try_create(&mut self) -> EcsResult<Entity> {
		let index = match self.available.pop_front() {
			Some(index) => index,
			None => {
				if self.next_index >= self.max_entities {
					return Err(EcsError::EntityCapacityExhausted {
						capacity: self.max_entities,
					});
				}

				let index = self.next_index;
				self.next_index += 1;
				self.generations.push(0);
				self.signatures.push(Signature::EMPTY);
				self.locations.push(usize::MAX);
				index
			},
		};

		let slot = index as usize;
		let entity = Entity::new(index, self.generations[slot]);

		self.signatures[slot].clear();
		self.locations[slot] = self.active.len();
		self.active.push(entity);

		Ok(entity)
	}

	/// Marks an [entity](Entity) for destruction.
	/// The entity stays alive until the next call to [confirm](EntityRegistry::confirm).
	/// Marking an entity more than once has no further effect.
	pub fn destroy(&mut self, entity: Entity) {
		assert_entity(entity, self.is_alive(entity));
		if self.pending_set.insert(entity.index()) {
			self.pending.push(entity);
		}
	}

	/// Recycles the slots of every [entity](Entity) marked for destruction,
	/// returning the destroyed entities so other structures can purge them.
	pub fn confirm(&mut self) -> Vec<Entity> {
		let destroyed = std::mem::take(&mut self.pending);
		self.pending_set.clear();

		for entity in &destroyed {
			let slot = entity.index() as usize;

			self.signatures[slot].clear();
			self.generations[slot] = self.generations[slot].wrapping_add(1);

			let location = self.locations[slot];
			self.active.swap_remove(location);
			if let Some(moved) = self.active.get(location) {
				self.locations[moved.index() as usize] = location;
			}
			self.locations[slot] = usize::MAX;

			self.available.push_back(entity.index());
		}

		destroyed
	}

	/// Check if `entity` refers to a live [entity](Entity).
	/// Entities marked for destruction are still alive until confirmed.
	pub fn is_alive(&self, entity: Entity) -> bool {
		let slot = entity.index() as usize;
		slot < self.generations.len()
			&& self.generations[slot] == entity.generation()
			&& self.locations[slot] != usize::MAX
	}

	pub fn is_pending(&self, entity: Entity) -> bool {
		self.is_alive(entity) && self.pending_set.contains(&entity.index())
	}

	pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> EcsResult<()> {
		let capacity = self.capacity();
		match self.signatures.get_mut(entity.index() as usize) {
			Some(slot) => {
				*slot = signature;
				Ok(())
			},
			None => Err(EcsError::EntityOutOfRange {
				index: entity.index(),
				capacity,
			}),
		}
	}

	pub fn get_signature(&self, entity: Entity) -> EcsResult<Signature> {
		match self.signatures.get(entity.index() as usize) {
			Some(signature) => Ok(*signature),
			None => Err(EcsError::EntityOutOfRange {
				index: entity.index(),
				capacity: self.capacity(),
			}),
		}
	}

	/// The [Signature] of a live [entity](Entity).
	///
	/// # Panics
	/// If the entity has been destroyed.
	pub fn signature(&self, entity: Entity) -> Signature {
		assert_entity(entity, self.is_alive(entity));
		self.signatures[entity.index() as usize]
	}

	/// The live [entities](Entity), in no particular order.
	pub fn active_entities(&self) -> &[Entity] {
		&self.active
	}

	/// The number of live [entities](Entity).
	pub fn len(&self) -> usize {
		self.active.len()
	}

	pub fn is_empty(&self) -> bool {
		self.active.is_empty()
	}

	/// The number of slots allocated so far, live or recyclable.
	pub fn capacity(&self) -> usize {
		self.generations.len()
	}

	pub fn max_entities(&self) -> u32 {
		self.max_entities
	}
}

impl Default for EntityRegistry {
	fn default() -> Self {
		Self::new()
	}
}
