//! Component trait and component-set checks

use super::{Entity, World};

/// Marker trait for components
///
/// Any `'static` data type can become a component:
///
/// ```
/// use lumen_engine::ecs::Component;
///
/// #[derive(Default)]
/// struct Velocity {
///     units_per_second: f32,
/// }
///
/// impl Component for Velocity {}
/// ```
pub trait Component: 'static + Send + Sync {}

/// A tuple of component types, used to ask whether an entity has all of them
pub trait ComponentSet {
    /// True when `entity` owns every component type in the set
    fn contained_in(world: &World, entity: Entity) -> bool;
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn contained_in(world: &World, entity: Entity) -> bool {
                $(world.has_component::<$name>(entity))&&+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
