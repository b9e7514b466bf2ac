use crate::components::ComponentId;

/// A plain piece of data attached to an [entity](crate::entities::Entity).
///
/// An entity owns at most one component of each type.
/// Implement it through #\[derive([`Component`](strata_ecs_derive::Component))],
/// which assigns the type its [ComponentId] on first use.
pub trait Component
where
	Self: 'static + Send + Sync,
{
	fn component_id() -> ComponentId;
}

/// The name used to refer to `T` in logs and error messages.
#[inline]
pub(crate) fn component_name<T: Component>() -> &'static str {
	std::any::type_name::<T>()
}
