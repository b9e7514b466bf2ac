use crate::components::ComponentId;
use crate::data_structures::Signature;
use crate::error::{EcsError, EcsResult};
use std::collections::VecDeque;

/// The declared dependencies of one system, as seen by the graph builder.
pub(crate) struct SystemNode {
	pub name: &'static str,
	pub reads: Signature,
	pub write: Option<ComponentId>,
}

/// Orders systems into stages.
///
/// An edge W → R is added whenever W writes a component R reads.
/// Stages are the levels of a Kahn traversal: the first stage holds every system without
/// incoming edges, each following stage the systems whose producers have all been staged.
/// Systems keep their registration order inside a stage.
///
/// Fails if two systems write the same component, or if the edges form a cycle.
pub(crate) fn build_stages(nodes: &[SystemNode]) -> EcsResult<Vec<Vec<usize>>> {
	for (first, a) in nodes.iter().enumerate() {
		let Some(write) = a.write else { continue };
		for b in &nodes[first + 1..] {
			if b.write == Some(write) {
				return Err(EcsError::WriteConflict {
					component: write.name(),
					first: a.name,
					second: b.name,
				});
			}
		}
	}

	let mut successors = vec![Vec::new(); nodes.len()];
	let mut in_degree = vec![0usize; nodes.len()];

	for (writer, w) in nodes.iter().enumerate() {
		let Some(write) = w.write else { continue };
		for (reader, r) in nodes.iter().enumerate() {
			if writer != reader && r.reads.get(write.value()) {
				successors[writer].push(reader);
				in_degree[reader] += 1;
			}
		}
	}

	let mut queue = (0..nodes.len()).filter(|i| in_degree[*i] == 0).collect::<VecDeque<_>>();
	let mut stages = Vec::new();
	let mut staged = 0;

	while !queue.is_empty() {
		let mut stage = queue.drain(..).collect::<Vec<_>>();
		stage.sort_unstable();

		for &node in &stage {
			for &next in &successors[node] {
				in_degree[next] -= 1;
				if in_degree[next] == 0 {
					queue.push_back(next);
				}
			}
		}

		staged += stage.len();
		stages.push(stage);
	}

	if staged != nodes.len() {
		let systems = (0..nodes.len())
			.filter(|i| in_degree[*i] != 0)
			.map(|i| nodes[i].name)
			.collect();
		return Err(EcsError::DependencyCycle { systems });
	}

	Ok(stages)
}
