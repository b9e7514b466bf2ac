use std::fmt::{Debug, Display, Formatter};

const INDEX_BITS: u64 = 32;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// A unique handle to an `Entity`.
///
/// The handle packs the index of the slot the entity occupies (low 32 bits)
/// and the generation of that slot (high 32 bits) into a single value.
/// A slot's generation is bumped each time it is recycled, so a handle to a destroyed
/// entity never compares equal to the handle of the entity that reuses its slot.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Entity {
	id: u64,
}

impl Entity {
	/// A handle that never refers to a live entity.
	pub const INVALID: Entity = Entity { id: INDEX_MASK };

	#[inline(always)]
	pub(crate) const fn new(index: u32, generation: u32) -> Self {
		Self {
			id: ((generation as u64) << INDEX_BITS) | index as u64,
		}
	}

	/// The index of the slot this entity occupies.
	#[inline(always)]
	pub const fn index(&self) -> u32 {
		(self.id & INDEX_MASK) as u32
	}

	/// How many times the slot had been recycled when this entity was created.
	#[inline(always)]
	pub const fn generation(&self) -> u32 {
		(self.id >> INDEX_BITS) as u32
	}

	/// The packed representation of the handle.
	pub const fn to_bits(&self) -> u64 {
		self.id
	}

	pub const fn from_bits(id: u64) -> Self {
		Self { id }
	}
}

impl Default for Entity {
	fn default() -> Self {
		Self::INVALID
	}
}

impl Debug for Entity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Entity({}v{})", self.index(), self.generation())
	}
}

impl Display for Entity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}v{}", self.index(), self.generation())
	}
}

#[inline(always)]
pub(crate) fn assert_entity(entity: Entity, alive: bool) {
	#[cfg(not(feature = "debug_only_assertions"))]
	assert!(alive, "Entity {entity} has already been destroyed");

	#[cfg(feature = "debug_only_assertions")]
	debug_assert!(alive, "Entity {entity} has already been destroyed");
}
