//! In-memory reference host.
//!
//! `Scene` keeps a containment tree of named, tagged entities with typed
//! components, plus detached prefab-like assets addressed by path. Unordered
//! enumeration walks the hierarchy depth-first; `SortMode::InstanceId`
//! enumerates by creation id.

use crate::{
    entity::{Entity, Ref},
    host::{FindInactive, Host, SortMode},
};
use std::{any::Any, collections::BTreeMap};
use thiserror::Error as ThisError;

///
/// SceneError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SceneError {
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),

    #[error("cannot parent {child} under {parent}: would create a cycle")]
    Cycle { child: Entity, parent: Entity },

    #[error("{0} is an asset and cannot join the hierarchy")]
    AssetInHierarchy(Entity),
}

///
/// Node
///

struct Node {
    name: String,
    tag: Option<String>,
    active: bool,
    parent: Option<Entity>,
    children: Vec<Entity>,
    components: Vec<Box<dyn Any>>,
    asset_path: Option<String>,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            active: true,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            asset_path: None,
        }
    }

    fn refs<C: 'static>(&self, entity: Entity) -> impl Iterator<Item = Ref<C>> + '_ {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, component)| component.is::<C>())
            .filter_map(move |(slot, _)| u32::try_from(slot).ok().map(|s| Ref::new(entity, s)))
    }
}

///
/// Scene
///

#[derive(Default)]
pub struct Scene {
    nodes: BTreeMap<Entity, Node>,
    roots: Vec<Entity>,
    assets: Vec<Entity>,
    next_id: u64,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_entity(&mut self) -> Entity {
        self.next_id += 1;

        Entity(self.next_id)
    }

    fn node(&self, entity: Entity) -> Result<&Node, SceneError> {
        self.nodes
            .get(&entity)
            .ok_or(SceneError::UnknownEntity(entity))
    }

    fn node_mut(&mut self, entity: Entity) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(&entity)
            .ok_or(SceneError::UnknownEntity(entity))
    }

    /// Spawn a new root-level entity.
    pub fn spawn(&mut self, name: impl Into<String>) -> Entity {
        let entity = self.next_entity();
        self.nodes.insert(entity, Node::new(name));
        self.roots.push(entity);

        entity
    }

    /// Spawn a new entity as the last child of `parent`.
    pub fn spawn_child(
        &mut self,
        parent: Entity,
        name: impl Into<String>,
    ) -> Result<Entity, SceneError> {
        if self.node(parent)?.asset_path.is_some() {
            return Err(SceneError::AssetInHierarchy(parent));
        }

        let entity = self.next_entity();
        let mut node = Node::new(name);
        node.parent = Some(parent);
        self.nodes.insert(entity, node);
        self.node_mut(parent)?.children.push(entity);

        Ok(entity)
    }

    /// Register a detached asset entity reachable only through asset lookups.
    pub fn add_asset(&mut self, path: impl Into<String>) -> Entity {
        let path = path.into();
        let entity = self.next_entity();
        let mut node = Node::new(path.rsplit('/').next().unwrap_or_default());
        node.asset_path = Some(path);
        self.nodes.insert(entity, node);
        self.assets.push(entity);

        entity
    }

    /// Move `child` under `parent`, or to root level when `parent` is `None`.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> Result<(), SceneError> {
        if self.node(child)?.asset_path.is_some() {
            return Err(SceneError::AssetInHierarchy(child));
        }
        if let Some(parent) = parent {
            if self.node(parent)?.asset_path.is_some() {
                return Err(SceneError::AssetInHierarchy(parent));
            }
            if parent == child || self.ancestors(parent).any(|a| a == child) {
                return Err(SceneError::Cycle { child, parent });
            }
        }

        match self.node(child)?.parent {
            Some(old) => self.node_mut(old)?.children.retain(|c| *c != child),
            None => self.roots.retain(|r| *r != child),
        }
        match parent {
            Some(parent) => self.node_mut(parent)?.children.push(child),
            None => self.roots.push(child),
        }
        self.node_mut(child)?.parent = parent;

        Ok(())
    }

    pub fn set_tag(&mut self, entity: Entity, tag: impl Into<String>) -> Result<(), SceneError> {
        self.node_mut(entity)?.tag = Some(tag.into());

        Ok(())
    }

    pub fn set_active(&mut self, entity: Entity, active: bool) -> Result<(), SceneError> {
        self.node_mut(entity)?.active = active;

        Ok(())
    }

    /// Attach `component` to `entity`.
    pub fn insert<C: 'static>(&mut self, entity: Entity, component: C) -> Result<Ref<C>, SceneError> {
        let node = self.node_mut(entity)?;
        let slot = u32::try_from(node.components.len()).unwrap_or(u32::MAX);
        node.components.push(Box::new(component));

        Ok(Ref::new(entity, slot))
    }

    #[must_use]
    pub fn get<C: 'static>(&self, component: Ref<C>) -> Option<&C> {
        self.nodes
            .get(&component.entity())?
            .components
            .get(component.slot() as usize)?
            .downcast_ref()
    }

    pub fn get_mut<C: 'static>(&mut self, component: Ref<C>) -> Option<&mut C> {
        self.nodes
            .get_mut(&component.entity())?
            .components
            .get_mut(component.slot() as usize)?
            .downcast_mut()
    }

    #[must_use]
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.nodes.get(&entity)?.parent
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Active itself and every ancestor active.
    #[must_use]
    pub fn is_active_in_hierarchy(&self, entity: Entity) -> bool {
        self.nodes.get(&entity).is_some_and(|node| node.active)
            && self
                .ancestors(entity)
                .all(|a| self.nodes.get(&a).is_some_and(|node| node.active))
    }

    fn ancestors(&self, entity: Entity) -> impl Iterator<Item = Entity> + '_ {
        std::iter::successors(self.parent(entity), |e| self.parent(*e))
    }

    // depth-first, `entity` first
    fn subtree(&self, entity: Entity, out: &mut Vec<Entity>) {
        let Some(node) = self.nodes.get(&entity) else {
            return;
        };
        out.push(entity);
        for child in &node.children {
            self.subtree(*child, out);
        }
    }

    fn hierarchy_order(&self) -> Vec<Entity> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.subtree(*root, &mut out);
        }

        out
    }

    fn include(&self, entity: Entity, include_inactive: bool) -> bool {
        include_inactive || self.is_active_in_hierarchy(entity)
    }

    fn tagged(&self, tag: &str) -> impl Iterator<Item = Entity> + '_ {
        let tag = tag.to_string();

        self.hierarchy_order().into_iter().filter(move |e| {
            self.is_active_in_hierarchy(*e)
                && self.nodes.get(e).and_then(|n| n.tag.as_deref()) == Some(tag.as_str())
        })
    }

    fn collect_refs<C: 'static>(
        &self,
        entities: impl IntoIterator<Item = Entity>,
        include_inactive: bool,
    ) -> Vec<Ref<C>> {
        entities
            .into_iter()
            .filter(|e| self.include(*e, include_inactive))
            .filter_map(|e| self.nodes.get(&e).map(|node| node.refs::<C>(e).collect::<Vec<_>>()))
            .flatten()
            .collect()
    }
}

impl Host for Scene {
    fn entities(&self, inactive: FindInactive, sort: SortMode) -> Vec<Entity> {
        let mut entities = self.hierarchy_order();
        entities.retain(|e| self.include(*e, inactive.includes()));
        if sort == SortMode::InstanceId {
            entities.sort_unstable();
        }

        entities
    }

    fn name_of(&self, entity: Entity) -> Option<&str> {
        self.nodes.get(&entity).map(|node| node.name.as_str())
    }

    fn find_with_tag(&self, tag: &str) -> Option<Entity> {
        self.tagged(tag).next()
    }

    fn find_all_with_tag(&self, tag: &str) -> Vec<Entity> {
        self.tagged(tag).collect()
    }

    fn component<C: 'static>(&self, entity: Entity) -> Option<Ref<C>> {
        self.nodes.get(&entity)?.refs::<C>(entity).next()
    }

    fn components<C: 'static>(&self, entity: Entity) -> Vec<Ref<C>> {
        self.nodes
            .get(&entity)
            .map(|node| node.refs::<C>(entity).collect())
            .unwrap_or_default()
    }

    fn add_component<C: Default + 'static>(&mut self, entity: Entity) -> Option<Ref<C>> {
        self.insert(entity, C::default()).ok()
    }

    fn components_in_children<C: 'static>(
        &self,
        entity: Entity,
        include_inactive: bool,
    ) -> Vec<Ref<C>> {
        let mut subtree = Vec::new();
        self.subtree(entity, &mut subtree);

        self.collect_refs(subtree, include_inactive)
    }

    fn components_in_parent<C: 'static>(
        &self,
        entity: Entity,
        include_inactive: bool,
    ) -> Vec<Ref<C>> {
        if !self.nodes.contains_key(&entity) {
            return Vec::new();
        }
        let chain = std::iter::once(entity).chain(self.ancestors(entity));

        self.collect_refs(chain, include_inactive)
    }

    fn load_assets<C: 'static>(&self, filter: &str) -> Vec<Ref<C>> {
        self.assets
            .iter()
            .filter(|e| {
                self.nodes
                    .get(*e)
                    .and_then(|n| n.asset_path.as_deref())
                    .is_some_and(|path| path.contains(filter))
            })
            .filter_map(|e| self.component::<C>(*e))
            .collect()
    }
}

///
/// TESTS
///
