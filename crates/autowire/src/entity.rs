use derive_more::Display;
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

///
/// Entity
///
/// Handle to a root object in the host hierarchy. The inner id doubles as the
/// stable instance identity used by `SortMode::InstanceId`.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("entity#{_0}")]
pub struct Entity(pub u64);

impl Entity {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

///
/// Ref
///
/// Typed reference to a component of type `C` attached to an entity.
///

pub struct Ref<C> {
    entity: Entity,
    slot: u32,
    _marker: PhantomData<fn() -> C>,
}

impl<C> Ref<C> {
    #[must_use]
    pub const fn new(entity: Entity, slot: u32) -> Self {
        Self {
            entity,
            slot,
            _marker: PhantomData,
        }
    }

    /// Entity the component is attached to.
    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }
}

// manual impls: `C` is only a marker and must not pick up bounds

impl<C> Clone for Ref<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Ref<C> {}

impl<C> PartialEq for Ref<C> {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity && self.slot == other.slot
    }
}

impl<C> Eq for Ref<C> {}

impl<C> Hash for Ref<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity.hash(state);
        self.slot.hash(state);
    }
}

impl<C> fmt::Debug for Ref<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("component", &std::any::type_name::<C>())
            .field("entity", &self.entity)
            .field("slot", &self.slot)
            .finish()
    }
}
