use std::fmt::{Debug, Formatter};
use std::ops::{BitAnd, BitOr};

/// The maximum number of [component](crate::components::Component) types a single
/// program may register.
pub const MAX_COMPONENTS: usize = 64;

/// A fixed-width bit-field marking which [components](crate::components::Component)
/// an [entity](crate::entities::Entity) owns, or which ones a view or system requires.
///
/// Bit `i` corresponds to the [ComponentId](crate::components::ComponentId) with value `i`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
	bits: u64,
}

impl Signature {
	/// The empty [Signature].
	pub const EMPTY: Signature = Signature { bits: 0 };

	/// Create a new, empty [Signature].
	pub const fn new() -> Self {
		Self::EMPTY
	}

	/// Create a [Signature] from its raw bit representation.
	pub const fn from_bits(bits: u64) -> Self {
		Self { bits }
	}

	/// The raw bit representation.
	pub const fn bits(&self) -> u64 {
		self.bits
	}

	/// Get the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to retrieve
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		i < MAX_COMPONENTS && self.bits & (1 << i) != 0
	}

	/// Set the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to modify
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		assert!(i < MAX_COMPONENTS, "Signature index {i} out of range");
		match value {
			true => self.bits |= 1 << i,
			false => self.bits &= !(1 << i),
		}
	}

	/// Returns a copy of the [Signature] with bit `i` set to `value`.
	pub fn with(mut self, i: usize, value: bool) -> Self {
		self.set(i, value);
		self
	}

	/// Check if every bit set in `self` is also set in `other`.
	/// The empty [Signature] is a subset of every [Signature].
	///
	/// # Arguments
	/// * `other` - The signature to check against
	#[inline(always)]
	pub fn is_subset_of(&self, other: &Signature) -> bool {
		self.bits & other.bits == self.bits
	}

	/// Check if every bit set in `other` is also set in `self`.
	#[inline(always)]
	pub fn contains_all(&self, other: &Signature) -> bool {
		other.is_subset_of(self)
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.bits = 0;
	}

	pub fn is_empty(&self) -> bool {
		self.bits == 0
	}

	/// The number of set bits.
	pub fn count(&self) -> usize {
		self.bits.count_ones() as usize
	}

	pub fn union(&self, other: &Signature) -> Signature {
		Signature { bits: self.bits | other.bits }
	}

	/// Iterate over the indices of the set bits, in ascending order.
	pub fn iter(&self) -> SignatureIterator {
		SignatureIterator { remaining: self.bits }
	}
}

impl BitOr for Signature {
	type Output = Signature;
	fn bitor(self, rhs: Self) -> Self::Output {
		self.union(&rhs)
	}
}

impl BitAnd for Signature {
	type Output = Signature;
	fn bitand(self, rhs: Self) -> Self::Output {
		Signature { bits: self.bits & rhs.bits }
	}
}

impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl FromIterator<usize> for Signature {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		let mut signature = Signature::new();
		for i in iter {
			signature.set(i, true);
		}
		signature
	}
}

/// Iterates over the set bits of a [Signature].
pub struct SignatureIterator {
	remaining: u64,
}

impl Iterator for SignatureIterator {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let bit = self.remaining.trailing_zeros() as usize;
		self.remaining &= self.remaining - 1;
		Some(bit)
	}
}
