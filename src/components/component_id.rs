//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! Ids are handed out from a process-wide counter the first time a [Component] type asks for one,
//! and are used as bit indices in [signatures](crate::data_structures::Signature).

use std::sync::atomic::Ordering::Relaxed;
use crate::data_structures::MAX_COMPONENTS;
use std::sync::atomic::AtomicUsize;
use crate::components::Component;
use std::fmt::{Debug, Formatter};
use lazy_static::lazy_static;
use parking_lot::RwLock;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

lazy_static! {
	static ref ID_TO_NAME: RwLock<Vec<&'static str>> = RwLock::new(Vec::with_capacity(MAX_COMPONENTS));
}

/// A globally unique identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentId {
		T::component_id()
	}

	/// The bit index of the component in a [Signature](crate::data_structures::Signature).
	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value
	}

	/// The type name of the component this id was issued to.
	pub fn name(&self) -> &'static str {
		ID_TO_NAME.read().get(self.value).copied().unwrap_or("<unknown component>")
	}
}

impl Debug for ComponentId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ComponentId({}: {})", self.value, self.name())
	}
}

/// Generates a new [ComponentId]. **Should not be called from user code.**
///
/// Called once per type by the code generated from #\[derive([Component])].
///
/// # Panics
/// If more than [MAX_COMPONENTS] component types are used.
#[doc(hidden)]
pub fn next_component_id(name: &'static str) -> ComponentId {
	let mut names = ID_TO_NAME.write();
	let value = NEXT_ID.fetch_add(1, Relaxed);
	assert!(
		value < MAX_COMPONENTS,
		"Component `{name}` exceeds the limit of {MAX_COMPONENTS} component types"
	);

	log::trace!("Assigned component id {value} to `{name}`");
	names.push(name);
	ComponentId { value }
}
