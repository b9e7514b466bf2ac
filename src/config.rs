use std::time::Duration;

/// Runtime settings of an [EcsContext](crate::EcsContext).
#[derive(Clone, Debug)]
pub struct EcsConfig {
	/// Number of worker threads used to run the systems of a stage.
	/// `None` runs stages on rayon's global pool.
	pub worker_threads: Option<usize>,

	/// Upper bound on the number of simultaneously allocated entity slots.
	pub max_entities: u32,

	/// Systems taking longer than this in a single frame are reported with a warning.
	pub slow_system_threshold: Option<Duration>,
}

impl EcsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn worker_threads(mut self, count: usize) -> Self {
		self.worker_threads = Some(count);
		self
	}

	pub fn max_entities(mut self, count: u32) -> Self {
		self.max_entities = count;
		self
	}

	pub fn slow_system_threshold(mut self, threshold: Duration) -> Self {
		self.slow_system_threshold = Some(threshold);
		self
	}
}

impl Default for EcsConfig {
	fn default() -> Self {
		Self {
			worker_threads: None,
			// u32::MAX is reserved for Entity::INVALID.
			max_entities: u32::MAX,
			slow_system_threshold: None,
		}
	}
}
