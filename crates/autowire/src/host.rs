//! Host object-model contract consumed by generated initializers.

use crate::entity::{Entity, Ref};
use derive_more::Display;

///
/// FindInactive
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum FindInactive {
    #[default]
    Exclude,
    Include,
}

impl FindInactive {
    #[must_use]
    pub const fn includes(self) -> bool {
        matches!(self, Self::Include)
    }
}

///
/// SortMode
///
/// `None` enumerates in whatever order the host finds cheapest; `InstanceId`
/// orders by entity identity so "first" is reproducible.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum SortMode {
    #[default]
    None,
    InstanceId,
}

///
/// Host
///
/// Scene/hierarchy primitives. Lookups on unknown entities yield nothing
/// rather than failing.
///

pub trait Host {
    /// Enumerate live root objects.
    fn entities(&self, inactive: FindInactive, sort: SortMode) -> Vec<Entity>;

    fn name_of(&self, entity: Entity) -> Option<&str>;

    /// First active root object carrying `tag`.
    fn find_with_tag(&self, tag: &str) -> Option<Entity>;

    /// Every active root object carrying `tag`.
    fn find_all_with_tag(&self, tag: &str) -> Vec<Entity>;

    fn component<C: 'static>(&self, entity: Entity) -> Option<Ref<C>>;

    fn components<C: 'static>(&self, entity: Entity) -> Vec<Ref<C>>;

    /// Attach a default-constructed `C`; `None` when the entity is unknown.
    fn add_component<C: Default + 'static>(&mut self, entity: Entity) -> Option<Ref<C>>;

    /// Components on `entity` and its descendants, `entity` first.
    fn components_in_children<C: 'static>(
        &self,
        entity: Entity,
        include_inactive: bool,
    ) -> Vec<Ref<C>>;

    /// Components on `entity` and its ancestors, `entity` first.
    fn components_in_parent<C: 'static>(
        &self,
        entity: Entity,
        include_inactive: bool,
    ) -> Vec<Ref<C>>;

    /// Design-time asset lookup by path filter.
    fn load_asset<C: 'static>(&self, filter: &str) -> Option<Ref<C>> {
        self.load_assets(filter).into_iter().next()
    }

    fn load_assets<C: 'static>(&self, filter: &str) -> Vec<Ref<C>>;
}
