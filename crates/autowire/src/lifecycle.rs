use crate::{entity::Entity, host::Host};

///
/// Awake
///
/// Fired once when a behaviour instance is created; generated impls run the
/// runtime initializer.
///

pub trait Awake {
    fn awake<H: Host>(&mut self, host: &mut H, this: Entity);
}

///
/// OnValidate
///
/// Fired by editors when a behaviour's configuration changes; generated impls
/// run the design-time initializer and only exist with the `editor` feature.
///

pub trait OnValidate {
    fn on_validate<H: Host>(&mut self, host: &mut H, this: Entity);
}

/// Construct a behaviour attached to `this` and fire its `Awake` hook.
pub fn create<B, H>(host: &mut H, this: Entity) -> B
where
    B: Awake + Default,
    H: Host,
{
    let mut behaviour = B::default();
    behaviour.awake(host, this);

    behaviour
}
