use crate::components::{Component, ComponentCatalog, ComponentId};
use crate::data_structures::Signature;
use crate::entities::Entity;

/// A tuple of [Component] types, used wherever a set of components is named at once:
/// system read dependencies, views and bulk registration.
///
/// Implemented for `()` and for tuples of up to twelve components.
pub trait ComponentSet: 'static {
	/// The [Signature] with one bit set per component of the set.
	fn signature() -> Signature;

	/// The [ids](ComponentId) of the components, in declaration order.
	fn component_ids() -> Vec<ComponentId>;

	/// Register every component of the set.
	fn register(catalog: &mut ComponentCatalog);
}

/// A [ComponentSet] whose components can be fetched together for each [entity](Entity) in a list.
pub trait ComponentFetch: ComponentSet {
	type Refs<'l>;
	type Muts<'l>;

	/// Call `func` with shared references to the components of each entity.
	///
	/// # Panics
	/// If a component is not registered, or an entity lacks one of the components.
	fn for_each(catalog: &ComponentCatalog, entities: &[Entity], func: impl FnMut(Entity, Self::Refs<'_>));

	/// Call `func` with mutable references to the components of each entity.
	///
	/// # Panics
	/// If a component is not registered, an entity lacks one of the components,
	/// or the set names the same component more than once.
	fn for_each_mut(catalog: &ComponentCatalog, entities: &[Entity], func: impl FnMut(Entity, Self::Muts<'_>));
}

impl ComponentSet for () {
	fn signature() -> Signature {
		Signature::EMPTY
	}

	fn component_ids() -> Vec<ComponentId> {
		Vec::new()
	}

	fn register(_: &mut ComponentCatalog) {}
}

/// Panics if a [ComponentSet] names the same type twice.
pub(crate) fn assert_unique<C: ComponentSet>() {
	assert_eq!(
		C::signature().count(),
		C::component_ids().len(),
		"A component set cannot include a type multiple times"
	);
}

macro_rules! impl_component_set {
    ($($t: ident $i: tt),*) => {
        impl <$($t: Component),*> ComponentSet for ($($t),*,) {
            fn signature() -> Signature {
                let mut signature = Signature::new();
                $(signature.set(<$t>::component_id().value(), true);)*
                signature
            }

            fn component_ids() -> Vec<ComponentId> {
                vec![$(<$t>::component_id()),*]
            }

            fn register(catalog: &mut ComponentCatalog) {
                $(catalog.register::<$t>();)*
            }
        }

        impl <$($t: Component),*> ComponentFetch for ($($t),*,) {
            type Refs<'l> = ($(&'l $t),*,);
            type Muts<'l> = ($(&'l mut $t),*,);

            fn for_each(catalog: &ComponentCatalog, entities: &[Entity], mut func: impl FnMut(Entity, Self::Refs<'_>)) {
                let guards = ($(catalog.read::<$t>()),*,);
                for &entity in entities {
                    func(entity, ($(guards.$i.get(entity)),*,));
                }
            }

            fn for_each_mut(catalog: &ComponentCatalog, entities: &[Entity], mut func: impl FnMut(Entity, Self::Muts<'_>)) {
                assert_unique::<Self>();
                let mut guards = ($(catalog.write::<$t>()),*,);
                for &entity in entities {
                    func(entity, ($(guards.$i.get_mut(entity)),*,));
                }
            }
        }
    };
}

impl_component_set!(T0 0);
impl_component_set!(T0 0, T1 1);
impl_component_set!(T0 0, T1 1, T2 2);
impl_component_set!(T0 0, T1 1, T2 2, T3 3);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10);
impl_component_set!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11);
