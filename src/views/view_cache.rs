use crate::data_structures::{EntitySet, Signature};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::entities::Entity;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// A handle to a cached list of [entities](Entity) whose [Signature]
/// contains every bit of the view's signature.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct View {
	index: usize,
	signature: Signature,
}

impl View {
	/// The components an entity must own to appear in the view.
	pub fn signature(&self) -> Signature {
		self.signature
	}
}

/// Builds views on demand and keeps them up to date as signatures change.
#[derive(Default)]
pub struct ViewCache {
	views: Vec<(Signature, EntitySet)>,
	by_signature: HashMap<Signature, usize, Hasher>,
}

impl ViewCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the cached [View] over `signature`, or build one by scanning `active` once.
	/// The view over the empty signature lists every entity.
	pub fn create_or_get_view(
		&mut self, signature: Signature, active: &[Entity], signature_of: impl Fn(Entity) -> Signature,
	) -> View {
		if let Some(index) = self.by_signature.get(&signature) {
			return View { index: *index, signature };
		}

		let mut entities = EntitySet::new();
		for entity in active {
			if signature.is_subset_of(&signature_of(*entity)) {
				entities.insert(*entity);
			}
		}

		let index = self.views.len();
		log::debug!("Created view {index} over {signature:?} with {} entities", entities.len());

		self.views.push((signature, entities));
		self.by_signature.insert(signature, index);
		View { index, signature }
	}

	/// Add `entity` to the views it now satisfies and remove it from the ones it no longer does.
	pub fn on_signature_changed(&mut self, entity: Entity, signature: Signature) {
		for (required, entities) in &mut self.views {
			match required.is_subset_of(&signature) {
				true => entities.insert(entity),
				false => entities.remove(entity),
			};
		}
	}

	pub fn on_entity_destroyed(&mut self, entity: Entity) {
		for (_, entities) in &mut self.views {
			entities.remove(entity);
		}
	}

	/// The [entities](Entity) currently in `view`, in no particular order.
	///
	/// Views are identified by position and signature only, so a [View] from another cache is
	/// accepted whenever this cache holds a view over the same signature at the same position.
	///
	/// # Panics
	/// If this cache holds no view over `view`'s signature at that position.
	pub fn entities(&self, view: View) -> &[Entity] {
		match self.views.get(view.index) {
			Some((signature, entities)) if *signature == view.signature => entities.as_slice(),
			_ => panic!("View over {:?} does not belong to this context", view.signature),
		}
	}

	/// The number of cached views.
	pub fn len(&self) -> usize {
		self.views.len()
	}

	pub fn is_empty(&self) -> bool {
		self.views.is_empty()
	}
}
