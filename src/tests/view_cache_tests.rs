use crate::tests::{context, Health, Position, Velocity};
use crate::components::ComponentSet;
use crate::data_structures::Signature;
use crate::views::ViewCache;
use std::collections::HashSet;
use crate::entities::Entity;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn sorted(entities: &[Entity]) -> Vec<Entity> {
	let mut entities = entities.to_vec();
	entities.sort();
	entities
}

#[test]
pub fn views_are_cached_per_signature() {
	let mut ecs = context();
	let first = ecs.create_view::<(Position, Velocity)>();
	let second = ecs.create_view::<(Velocity, Position)>();
	let third = ecs.create_view::<(Position,)>();

	assert_eq!(first, second, "The same component set must map to the same view");
	assert_ne!(first, third);
	assert_eq!(first.signature(), <(Position, Velocity)>::signature());
}

#[test]
pub fn initial_scan_picks_up_existing_entities() {
	let mut ecs = context();
	let both = ecs.spawn().with(Position(0.0, 0.0)).with(Velocity(1.0, 0.0)).id();
	let only_position = ecs.spawn().with(Position(0.0, 0.0)).id();

	let view = ecs.create_view::<(Position, Velocity)>();
	assert_eq!(ecs.view_entities(view), [both]);

	let positions = ecs.create_view::<(Position,)>();
	assert_eq!(sorted(ecs.view_entities(positions)), sorted(&[both, only_position]));
}

#[test]
pub fn views_follow_signature_changes() {
	let mut ecs = context();
	let view = ecs.create_view::<(Position, Velocity)>();
	let entity = ecs.create_entity();

	ecs.add_component(entity, Position(0.0, 0.0));
	assert!(ecs.view_entities(view).is_empty());

	ecs.add_component(entity, Velocity(0.0, 0.0));
	assert_eq!(ecs.view_entities(view), [entity]);

	ecs.add_component(entity, Health(1));
	assert_eq!(ecs.view_entities(view), [entity], "Extra components keep the entity in the view");

	ecs.remove_component::<Position>(entity);
	assert!(ecs.view_entities(view).is_empty());

	ecs.add_component(entity, Position(0.0, 0.0));
	ecs.destroy_entity(entity);
	assert_eq!(ecs.view_entities(view), [entity], "Destruction only applies once confirmed");

	ecs.confirm_changes();
	assert!(ecs.view_entities(view).is_empty());
}

#[test]
pub fn random_view_correctness() {
	let mut rng = StdRng::seed_from_u64(7);
	let mut ecs = context();
	let view = ecs.create_view::<(Position, Velocity)>();
	let mut alive = Vec::new();

	for _ in 0..500 {
		match rng.gen_range(0..5) {
			0 => alive.push(ecs.create_entity()),
			1 if !alive.is_empty() => {
				let entity = alive[rng.gen_range(0..alive.len())];
				if !ecs.has_component::<Position>(entity) {
					ecs.add_component(entity, Position(1.0, 1.0));
				} else {
					ecs.remove_component::<Position>(entity);
				}
			},
			2 if !alive.is_empty() => {
				let entity = alive[rng.gen_range(0..alive.len())];
				if !ecs.has_component::<Velocity>(entity) {
					ecs.add_component(entity, Velocity(1.0, 1.0));
				} else {
					ecs.remove_component::<Velocity>(entity);
				}
			},
			3 if !alive.is_empty() => {
				let entity = alive.swap_remove(rng.gen_range(0..alive.len()));
				ecs.destroy_entity(entity);
				ecs.confirm_changes();
			},
			_ => {},
		}

		let required = <(Position, Velocity)>::signature();
		let expected = ecs
			.active_entities()
			.iter()
			.copied()
			.filter(|entity| required.is_subset_of(&ecs.signature(*entity)))
			.collect::<HashSet<_>>();
		let actual = ecs.view_entities(view).iter().copied().collect::<HashSet<_>>();

		assert_eq!(actual.len(), ecs.view_entities(view).len(), "A view must not list an entity twice");
		assert_eq!(actual, expected);
	}
}

#[test]
pub fn empty_view_lists_every_entity() {
	let mut ecs = context();
	let before = ecs.spawn().with(Health(1)).id();
	let view = ecs.create_view::<()>();
	let bare = ecs.create_entity();
	let after = ecs.spawn().with(Position(0.0, 0.0)).id();

	assert!(view.signature().is_empty());
	assert_eq!(sorted(ecs.view_entities(view)), sorted(&[before, bare, after]));

	ecs.remove_component::<Position>(after);
	assert_eq!(ecs.view_entities(view).len(), 3, "Losing components never removes an entity from the empty view");

	ecs.destroy_entity(bare);
	ecs.confirm_changes();
	assert_eq!(sorted(ecs.view_entities(view)), sorted(&[before, after]));
}

#[test]
#[should_panic(expected = "does not belong to this context")]
pub fn views_from_other_caches_are_checked() {
	let mut first = ViewCache::new();
	first.create_or_get_view(Signature::from_iter([1]), &[], |_| Signature::EMPTY);
	let view = first.create_or_get_view(Signature::from_iter([2]), &[], |_| Signature::EMPTY);

	let mut second = ViewCache::new();
	second.create_or_get_view(Signature::from_iter([1]), &[], |_| Signature::EMPTY);
	second.entities(view);
}

#[test]
pub fn typed_iteration() {
	let mut ecs = context();
	for i in 0..10 {
		let mut entity = ecs.spawn().with(Position(i as f32, 0.0));
		if i % 2 == 0 {
			entity.add(Velocity(1.0, 2.0));
		}
	}

	let view = ecs.create_view::<(Position, Velocity)>();
	ecs.for_each_mut::<(Position, Velocity)>(view, |_, (position, velocity)| {
		position.0 += velocity.0;
		position.1 += velocity.1;
	});

	let mut visited = 0;
	ecs.for_each::<(Position,)>(view, |entity, (position,)| {
		assert!(ecs.has_component::<Velocity>(entity));
		assert_eq!(position.1, 2.0);
		visited += 1;
	});
	assert_eq!(visited, 5);

	let untouched = ecs.create_view::<(Position,)>();
	let total = ecs.components::<Position>().values().iter().map(|p| p.1).sum::<f32>();
	assert_eq!(total, 10.0);
	assert_eq!(ecs.view_entities(untouched).len(), 10);
}

#[test]
#[should_panic(expected = "does not include every component")]
pub fn iterating_outside_the_view_panics() {
	let mut ecs = context();
	let view = ecs.create_view::<(Position,)>();
	ecs.for_each::<(Velocity,)>(view, |_, _| {});
}
