//! Recoverable errors reported by an [EcsContext](crate::EcsContext).
//!
//! Misuse of the API (registering a type twice, touching a destroyed entity,
//! adding a component an entity already owns, ...) is a programming error and panics
//! at the point of misuse instead. The variants below cover the conditions a caller can
//! reasonably react to: running out of entity slots and invalid system configurations.

use thiserror::Error;

pub type EcsResult<T> = Result<T, EcsError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	/// Every entity index up to the configured limit is in use.
	#[error("entity limit reached (capacity {capacity})")]
	EntityCapacityExhausted { capacity: u32 },

	/// An entity index is beyond the registry's allocated slots.
	#[error("entity index {index} out of range (capacity {capacity})")]
	EntityOutOfRange { index: u32, capacity: usize },

	/// Two systems declared a write dependency on the same component.
	#[error("systems `{first}` and `{second}` both write component `{component}`")]
	WriteConflict {
		component: &'static str,
		first: &'static str,
		second: &'static str,
	},

	/// The read/write dependencies between these systems form a cycle.
	#[error("dependency cycle between systems {systems:?}")]
	DependencyCycle { systems: Vec<&'static str> },

	/// The dedicated worker pool could not be created.
	#[error("failed to build worker pool: {0}")]
	ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for EcsError {
	fn from(error: rayon::ThreadPoolBuildError) -> Self {
		EcsError::ThreadPool(error.to_string())
	}
}
