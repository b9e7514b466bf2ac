use crate::systems::{build_stages, ErasedSystem, SharedWorld, System, SystemContext, SystemNode};
use crate::components::{component_name, Component, ComponentId, ComponentSet};
use crate::data_structures::{EntitySet, Signature};
use std::time::{Duration, Instant};
use crate::entities::Entity;
use std::collections::HashMap;
use crate::config::EcsConfig;
use crate::error::EcsResult;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::any::TypeId;

/// An opaque identifier of a registered system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SystemId {
	index: usize,
}

struct SystemEntry {
	name: &'static str,
	system: Box<dyn ErasedSystem>,
	reads: Signature,
	write: Option<ComponentId>,
	interest: Signature,
	entities: EntitySet,
	last_run: Duration,
}

#[derive(Default, Eq, PartialEq, Debug)]
enum State {
	#[default]
	Registering,
	Built,
}

/// Owns the registered systems and runs them stage by stage.
///
/// Systems declare the components they read and the (single) component they write.
/// [build_execution_graph](SystemScheduler::build_execution_graph) turns these declarations into
/// stages; [execute](SystemScheduler::execute) then runs the systems of each stage in parallel,
/// waiting for all of them before starting the next stage.
pub struct SystemScheduler {
	state: State,
	ids: HashMap<TypeId, SystemId>,
	systems: Vec<SystemEntry>,
	stages: Vec<Vec<usize>>,
	pool: Option<ThreadPool>,
	slow_system_threshold: Option<Duration>,
}

/// Chained declaration of a system's dependencies, returned by
/// [register_system](crate::EcsContext::register_system).
pub struct SystemConfiguration<'l> {
	id: SystemId,
	scheduler: &'l mut SystemScheduler,
}

impl SystemConfiguration<'_> {
	/// Declare that the system reads every component of `C`.
	pub fn with_read<C: ComponentSet>(self) -> Self {
		self.scheduler.add_read_dependencies::<C>(self.id);
		self
	}

	/// Declare that the system writes `T`.
	///
	/// # Panics
	/// If the system already declared a write dependency.
	pub fn with_write<T: Component>(self) -> Self {
		self.scheduler.add_write_dependency::<T>(self.id);
		self
	}

	pub fn id(&self) -> SystemId {
		self.id
	}
}

impl SystemScheduler {
	pub fn new() -> Self {
		Self {
			state: State::default(),
			ids: HashMap::default(),
			systems: Vec::default(),
			stages: Vec::default(),
			pool: None,
			slow_system_threshold: None,
		}
	}

	/// Create a scheduler following the threading and diagnostics settings of `config`.
	pub fn with_config(config: &EcsConfig) -> EcsResult<Self> {
		let pool = match config.worker_threads {
			None => None,
			Some(threads) => Some(
				rayon::ThreadPoolBuilder::new()
					.num_threads(threads)
					.thread_name(|i| format!("strata-worker-{i}"))
					.build()?,
			),
		};

		Ok(Self {
			pool,
			slow_system_threshold: config.slow_system_threshold,
			..Self::new()
		})
	}

	/// Add a new [system](System).
	///
	/// # Panics
	/// If a system of the same type was already added, or if the execution graph was already built.
	pub fn register_system<S: System>(&mut self, system: S) -> SystemConfiguration<'_> {
		assert_eq!(self.state, State::Registering, "Cannot add new systems after the execution graph was built");

		let id = SystemId { index: self.systems.len() };
		let name = std::any::type_name::<S>();
		let previous = self.ids.insert(TypeId::of::<S>(), id);
		assert!(previous.is_none(), "System {name} was already added to the current context");

		log::debug!("Registered system `{name}`");
		self.systems.push(SystemEntry {
			name,
			system: Box::new(system),
			reads: Signature::EMPTY,
			write: None,
			interest: Signature::EMPTY,
			entities: EntitySet::new(),
			last_run: Duration::ZERO,
		});

		SystemConfiguration { id, scheduler: self }
	}

	pub fn is_registered<S: System>(&self) -> bool {
		self.ids.contains_key(&TypeId::of::<S>())
	}

	/// # Panics
	/// If no system of type `S` was registered.
	pub fn get<S: System>(&self) -> &S {
		let entry = &self.systems[self.id_of::<S>().index];
		match entry.system.as_any().downcast_ref::<S>() {
			Some(system) => system,
			None => unreachable!("System id mismatch for {}", entry.name),
		}
	}

	/// # Panics
	/// If no system of type `S` was registered.
	pub fn get_mut<S: System>(&mut self) -> &mut S {
		let index = self.id_of::<S>().index;
		let entry = &mut self.systems[index];
		let name = entry.name;
		match entry.system.as_any_mut().downcast_mut::<S>() {
			Some(system) => system,
			None => unreachable!("System id mismatch for {name}"),
		}
	}

	/// # Panics
	/// If no system of type `S` was registered.
	pub fn id_of<S: System>(&self) -> SystemId {
		match self.ids.get(&TypeId::of::<S>()) {
			Some(id) => *id,
			None => panic!("System {} is not registered", std::any::type_name::<S>()),
		}
	}

	/// The [entities](Entity) currently tracked by a system.
	pub fn entities_of(&self, id: SystemId) -> &[Entity] {
		self.systems[id.index].entities.as_slice()
	}

	/// Order the registered systems into stages and run their setup hooks.
	///
	/// `active` and `signature_of` describe the entities that existed before the graph was built,
	/// so that every system starts with an up-to-date entity list.
	///
	/// On error the scheduler stays in the registration phase and cannot execute.
	pub fn build_execution_graph(
		&mut self, active: &[Entity], signature_of: impl Fn(Entity) -> Signature,
	) -> EcsResult<()> {
		assert_eq!(self.state, State::Registering, "The execution graph has already been built");

		let nodes = self
			.systems
			.iter()
			.map(|entry| SystemNode {
				name: entry.name,
				reads: entry.reads,
				write: entry.write,
			})
			.collect::<Vec<_>>();

		let stages = match build_stages(&nodes) {
			Ok(stages) => stages,
			Err(error) => {
				log::warn!("Failed to build the execution graph: {error}");
				return Err(error);
			},
		};

		for entry in &mut self.systems {
			entry.entities.clear();
			for entity in active {
				if entry.interest.is_subset_of(&signature_of(*entity)) {
					entry.entities.insert(*entity);
				}
			}
		}

		self.systems.iter_mut().for_each(|entry| entry.system.setup());
		self.stages = stages;
		self.state = State::Built;

		log::info!("Built execution graph: {} systems in {} stages", self.systems.len(), self.stages.len());
		for (i, stage) in self.stage_names().iter().enumerate() {
			log::debug!("Stage {i}: {stage:?}");
		}

		Ok(())
	}

	pub fn is_built(&self) -> bool {
		self.state == State::Built
	}

	/// The names of the systems of each stage, in execution order.
	pub fn stage_names(&self) -> Vec<Vec<&'static str>> {
		self.stages
			.iter()
			.map(|stage| stage.iter().map(|i| self.systems[*i].name).collect())
			.collect()
	}

	/// How long each system took the last time it ran.
	pub fn timings(&self) -> Vec<(&'static str, Duration)> {
		self.systems.iter().map(|entry| (entry.name, entry.last_run)).collect()
	}

	/// Update the entity list of every system after the [Signature] of `entity` changed.
	/// Newly created entities are reported with an empty signature, so systems without
	/// dependencies pick them up.
	pub fn on_entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
		for entry in &mut self.systems {
			match entry.interest.is_subset_of(&signature) {
				true => entry.entities.insert(entity),
				false => entry.entities.remove(entity),
			};
		}
	}

	pub fn on_entity_destroyed(&mut self, entity: Entity) {
		for entry in &mut self.systems {
			entry.entities.remove(entity);
		}
	}

	/// Run every stage in order.
	/// The systems of a stage run in parallel; a stage only starts once the previous one completed.
	///
	/// # Panics
	/// If the execution graph has not been built.
	pub(crate) fn execute(&mut self, world: &SharedWorld, dt: f32) {
		assert_eq!(self.state, State::Built, "Systems must be initialized before they can run");

		let threshold = self.slow_system_threshold;
		let mut in_stage = vec![false; self.systems.len()];

		for (i, stage) in self.stages.iter().enumerate() {
			log::trace!("Running stage {i} ({} systems)", stage.len());

			in_stage.fill(false);
			stage.iter().for_each(|system| in_stage[*system] = true);

			let entries = self
				.systems
				.iter_mut()
				.zip(in_stage.iter())
				.filter_map(|(entry, selected)| selected.then_some(entry))
				.collect::<Vec<_>>();

			let run = || {
				entries
					.into_par_iter()
					.for_each(|entry| run_system(entry, world, dt, threshold))
			};

			match &self.pool {
				Some(pool) => pool.install(run),
				None => run(),
			}
		}
	}
}

fn run_system(entry: &mut SystemEntry, world: &SharedWorld, dt: f32, threshold: Option<Duration>) {
	let ctx = SystemContext {
		world,
		name: entry.name,
		entities: entry.entities.as_slice(),
		reads: entry.reads,
		write: entry.write,
	};

	let start = Instant::now();
	entry.system.update(&ctx, dt);
	entry.last_run = start.elapsed();

	if let Some(threshold) = threshold {
		if entry.last_run > threshold {
			log::warn!(
				"System `{}` took {:?} (threshold {:?})",
				entry.name,
				entry.last_run,
				threshold
			);
		}
	}
}

impl SystemScheduler {
	fn add_read_dependencies<C: ComponentSet>(&mut self, id: SystemId) {
		let entry = &mut self.systems[id.index];
		entry.reads = entry.reads.union(&C::signature());
		entry.interest = entry.interest.union(&C::signature());
	}

	fn add_write_dependency<T: Component>(&mut self, id: SystemId) {
		let entry = &mut self.systems[id.index];
		assert!(
			entry.write.is_none(),
			"System {} cannot write {}: a system may only write a single component",
			entry.name,
			component_name::<T>()
		);

		let component = T::component_id();
		entry.write = Some(component);
		entry.interest.set(component.value(), true);
	}
}

impl Default for SystemScheduler {
	fn default() -> Self {
		Self::new()
	}
}
