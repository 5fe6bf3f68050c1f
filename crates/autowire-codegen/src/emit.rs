//! Resolution IR.
//!
//! Every strategy lowers to the same shape: a [`Source`] that yields
//! candidates, a chain of [`Step`]s that narrow or map them, and a [`Sink`]
//! that produces the member's value. Renderers walk this tree; nothing here
//! knows about tokens beyond the types and arguments it carries.

use crate::{
    member::{Arity, MemberDescriptor},
    prelude::*,
    strategy::{Locator, Modifiers, Strategy},
};
use std::{collections::BTreeSet, fmt};

///
/// Container
///
/// Collection type a collecting sink produces.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Container {
    Vec,
    BoxedSlice,
}

impl Container {
    #[must_use]
    pub const fn for_arity(arity: Arity) -> Option<Self> {
        match arity {
            Arity::Scalar => None,
            Arity::Array => Some(Self::BoxedSlice),
            Arity::OrderedList => Some(Self::Vec),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vec => f.write_str("vec"),
            Self::BoxedSlice => f.write_str("boxed slice"),
        }
    }
}

///
/// Source
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Source {
    /// Every root object, per inactive/sort policy.
    Roots { inactive: bool, stable: bool },
    TaggedRoots { tag: Argument },
    /// Host-side single tag lookup; already an `Option`.
    FirstTagged { tag: Argument },
    /// First component on the owning entity; already an `Option`.
    OwnComponent { ty: Type },
    OwnComponents { ty: Type },
    Descendants { ty: Type, inactive: bool },
    Ancestors { ty: Type, inactive: bool },
    /// Single asset; already an `Option`.
    Asset { ty: Type, filter: Argument },
    Assets { ty: Type, filter: Argument },
}

impl Source {
    /// Sources that produce an `Option` rather than an iterator.
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        matches!(
            self,
            Self::FirstTagged { .. } | Self::OwnComponent { .. } | Self::Asset { .. }
        )
    }
}

///
/// Step
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Step {
    NameIs(Argument),
    /// Drop the owning entity from a root enumeration.
    ExcludeSelf,
    /// Drop components attached to the owning entity.
    ExcludeOwnedBySelf,
    /// Map each root to its first component of a type, dropping roots without one.
    ComponentOf(Type),
    /// Flatten each root into all its components of a type.
    ComponentsOf(Type),
}

///
/// Sink
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Sink {
    First,
    Collect(Container),
    /// The source already yields the member's `Option`.
    Direct,
    /// `Direct`, falling back to attaching a new component to the owner.
    FirstOrAdd(Type),
    /// `Collect`, falling back to a single newly attached component.
    CollectOrAdd(Type, Container),
}

///
/// Resolution
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub source: Source,
    pub steps: Vec<Step>,
    pub sink: Sink,
}

impl Resolution {
    const fn new(source: Source, steps: Vec<Step>, sink: Sink) -> Self {
        Self {
            source,
            steps,
            sink,
        }
    }

    /// Host enums the rendered expression names.
    #[must_use]
    pub fn imports(&self) -> BTreeSet<Import> {
        match self.source {
            Source::Roots { .. } => [Import::FindInactive, Import::SortMode].into(),
            _ => BTreeSet::new(),
        }
    }
}

///
/// Guard
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Guard {
    /// Resolve only while the scalar is `None`.
    Unset,
    /// Resolve only while the collection is empty.
    Empty,
    /// Resolve on every call.
    Always,
}

///
/// Import
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Import {
    FindInactive,
    SortMode,
}

impl Import {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FindInactive => "FindInactive",
            Self::SortMode => "SortMode",
        }
    }
}

///
/// Statement
///
/// One guarded assignment to one member.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    pub member: Ident,
    pub guard: Guard,
    pub resolution: Resolution,
}

impl Statement {
    /// Lower a classified member into a statement.
    pub fn emit(desc: &MemberDescriptor, strategy: &Strategy) -> Result<Self, SkipReason> {
        let guard = match (strategy.modifiers.skip_null_check, desc.is_collection()) {
            (true, _) => Guard::Always,
            (false, false) => Guard::Unset,
            (false, true) => Guard::Empty,
        };

        Ok(Self {
            member: desc.ident.clone(),
            guard,
            resolution: lower(desc, &strategy.locator, strategy.modifiers)?,
        })
    }

    #[must_use]
    pub fn imports(&self) -> BTreeSet<Import> {
        self.resolution.imports()
    }
}

// lower
fn lower(
    desc: &MemberDescriptor,
    locator: &Locator,
    modifiers: Modifiers,
) -> Result<Resolution, SkipReason> {
    let container = Container::for_arity(desc.arity);
    let component = || {
        desc.target
            .component()
            .cloned()
            .ok_or(SkipReason::UnsupportedCombination)
    };
    let collect = || container.map(Sink::Collect).ok_or(SkipReason::UnsupportedShape);
    let roots = Source::Roots {
        inactive: modifiers.include_inactive,
        stable: modifiers.stable_sort,
    };
    let inactive = modifiers.include_inactive;

    let resolution = match locator {
        Locator::FindOneRootByName { name } => {
            Resolution::new(roots, by_name(name, modifiers), Sink::First)
        }
        Locator::FindAllRootsByName { name } => {
            Resolution::new(roots, by_name(name, modifiers), collect()?)
        }
        Locator::FindOneThenGetComponent { name } => {
            let mut steps = by_name(name, modifiers);
            steps.push(Step::ComponentOf(component()?));
            Resolution::new(roots, steps, Sink::First)
        }
        Locator::FindAllThenGetComponents { name } => {
            let mut steps = by_name(name, modifiers);
            steps.push(Step::ComponentsOf(component()?));
            Resolution::new(roots, steps, collect()?)
        }

        Locator::GetOneComponent { add } => {
            let ty = component()?;
            let sink = if *add {
                Sink::FirstOrAdd(ty.clone())
            } else {
                Sink::Direct
            };
            Resolution::new(Source::OwnComponent { ty }, vec![], sink)
        }
        Locator::GetAllComponents { add } => {
            let ty = component()?;
            let sink = match (*add, container) {
                (true, Some(container)) => Sink::CollectOrAdd(ty.clone(), container),
                _ => collect()?,
            };
            Resolution::new(Source::OwnComponents { ty }, vec![], sink)
        }

        Locator::FindOneRootByTag { tag } => {
            Resolution::new(Source::FirstTagged { tag: tag.clone() }, vec![], Sink::Direct)
        }
        Locator::FindAllRootsByTag { tag } => {
            Resolution::new(Source::TaggedRoots { tag: tag.clone() }, vec![], collect()?)
        }
        Locator::FindOneByTagThenFirstComponent { tag } => Resolution::new(
            Source::TaggedRoots { tag: tag.clone() },
            vec![Step::ComponentOf(component()?)],
            Sink::First,
        ),
        Locator::FindAllByTagThenAllComponents { tag } => Resolution::new(
            Source::TaggedRoots { tag: tag.clone() },
            vec![Step::ComponentsOf(component()?)],
            collect()?,
        ),

        Locator::FirstComponentInDescendants => Resolution::new(
            Source::Descendants {
                ty: component()?,
                inactive,
            },
            owned_by_self(modifiers),
            Sink::First,
        ),
        Locator::AllComponentsInDescendants => Resolution::new(
            Source::Descendants {
                ty: component()?,
                inactive,
            },
            owned_by_self(modifiers),
            collect()?,
        ),
        Locator::FirstComponentInAncestors => Resolution::new(
            Source::Ancestors {
                ty: component()?,
                inactive,
            },
            owned_by_self(modifiers),
            Sink::First,
        ),
        Locator::AllComponentsInAncestors => Resolution::new(
            Source::Ancestors {
                ty: component()?,
                inactive,
            },
            owned_by_self(modifiers),
            collect()?,
        ),

        Locator::FirstAsset { filter } => Resolution::new(
            Source::Asset {
                ty: component()?,
                filter: filter.clone(),
            },
            vec![],
            Sink::Direct,
        ),
        Locator::AllAssets { filter } => Resolution::new(
            Source::Assets {
                ty: component()?,
                filter: filter.clone(),
            },
            vec![],
            collect()?,
        ),
    };

    Ok(resolution)
}

// by_name
// self-exclusion runs before the name test, as the host enumerates the owner too
fn by_name(name: &Argument, modifiers: Modifiers) -> Vec<Step> {
    let mut steps = Vec::with_capacity(2);
    if modifiers.ignore_self {
        steps.push(Step::ExcludeSelf);
    }
    steps.push(Step::NameIs(name.clone()));

    steps
}

// owned_by_self
fn owned_by_self(modifiers: Modifiers) -> Vec<Step> {
    if modifiers.ignore_self {
        vec![Step::ExcludeOwnedBySelf]
    } else {
        vec![]
    }
}

///
/// Display
///
/// Pipeline notation, e.g. `roots(active, unordered) | name == "Main" | first`.
///

fn type_text(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

fn argument_text(arg: &Argument) -> String {
    match arg {
        Argument::Literal(lit) => format!("{:?}", lit.value()),
        Argument::Const(path) => path.to_token_stream().to_string().replace(' ', ""),
    }
}

const fn inactive_text(inactive: bool) -> &'static str {
    if inactive { "all" } else { "active" }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roots { inactive, stable } => write!(
                f,
                "roots({}, {})",
                inactive_text(*inactive),
                if *stable { "stable" } else { "unordered" }
            ),
            Self::TaggedRoots { tag } => write!(f, "tagged({})", argument_text(tag)),
            Self::FirstTagged { tag } => write!(f, "first_tagged({})", argument_text(tag)),
            Self::OwnComponent { ty } => write!(f, "component<{}>(self)", type_text(ty)),
            Self::OwnComponents { ty } => write!(f, "components<{}>(self)", type_text(ty)),
            Self::Descendants { ty, inactive } => write!(
                f,
                "descendants<{}>({})",
                type_text(ty),
                inactive_text(*inactive)
            ),
            Self::Ancestors { ty, inactive } => write!(
                f,
                "ancestors<{}>({})",
                type_text(ty),
                inactive_text(*inactive)
            ),
            Self::Asset { ty, filter } => {
                write!(f, "asset<{}>({})", type_text(ty), argument_text(filter))
            }
            Self::Assets { ty, filter } => {
                write!(f, "assets<{}>({})", type_text(ty), argument_text(filter))
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameIs(name) => write!(f, "name == {}", argument_text(name)),
            Self::ExcludeSelf => f.write_str("not self"),
            Self::ExcludeOwnedBySelf => f.write_str("not on self"),
            Self::ComponentOf(ty) => write!(f, "component<{}>", type_text(ty)),
            Self::ComponentsOf(ty) => write!(f, "components<{}>", type_text(ty)),
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Collect(container) => write!(f, "collect({container})"),
            Self::Direct => f.write_str("direct"),
            Self::FirstOrAdd(ty) => write!(f, "or_add<{}>", type_text(ty)),
            Self::CollectOrAdd(ty, container) => {
                write!(f, "collect({container}) or_add<{}>", type_text(ty))
            }
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        for step in &self.steps {
            write!(f, " | {step}")?;
        }

        write!(f, " | {}", self.sink)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = match self.guard {
            Guard::Unset => " if unset",
            Guard::Empty => " if empty",
            Guard::Always => "",
        };

        write!(f, "{}{guard} <- {}", self.member, self.resolution)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MemberNode;
    use syn::{Attribute, parse_quote};

    fn emit(ty: Type, attrs: Vec<Attribute>) -> Statement {
        let node = MemberNode {
            ident: Some(format_ident!("target")),
            ty,
            attrs,
        };
        let desc = MemberDescriptor::extract(&format_ident!("Owner"), &node).unwrap();
        let strategy = Strategy::classify(&desc).unwrap();

        Statement::emit(&desc, &strategy).unwrap()
    }

    #[test]
    fn find_by_name_scans_roots_in_requested_order() {
        let stmt = emit(
            parse_quote!(Option<Entity>),
            vec![parse_quote!(#[inject(find = "Main Camera", stable_sort, ignore_self)])],
        );

        assert_eq!(
            stmt.to_string(),
            r#"target if unset <- roots(active, stable) | not self | name == "Main Camera" | first"#
        );
        assert_eq!(
            stmt.imports().into_iter().collect::<Vec<_>>(),
            vec![Import::FindInactive, Import::SortMode]
        );
    }

    #[test]
    fn find_then_get_collects_across_roots() {
        let stmt = emit(
            parse_quote!(Box<[Ref<Light>]>),
            vec![parse_quote!(#[inject(get_by_name = LAMP, include_inactive)])],
        );

        assert_eq!(
            stmt.to_string(),
            "target if empty <- roots(all, unordered) | name == LAMP | components<Light> | collect(boxed slice)"
        );
    }

    #[test]
    fn get_with_add_falls_back_to_creation() {
        let one = emit(
            parse_quote!(Option<Ref<Body>>),
            vec![parse_quote!(#[inject(get, add)])],
        );
        let all = emit(parse_quote!(Vec<Ref<Body>>), vec![parse_quote!(#[inject(add)])]);

        assert_eq!(one.resolution.sink, Sink::FirstOrAdd(parse_quote!(Body)));
        assert_eq!(
            all.resolution.sink,
            Sink::CollectOrAdd(parse_quote!(Body), Container::Vec)
        );
        assert!(one.imports().is_empty());
    }

    #[test]
    fn tag_lookups_use_host_tag_primitives() {
        let root = emit(
            parse_quote!(Option<Entity>),
            vec![parse_quote!(#[inject(find_by_tag = "Respawn")])],
        );
        let component = emit(
            parse_quote!(Option<Ref<Spawner>>),
            vec![parse_quote!(#[inject(find_by_tag("Respawn"))])],
        );

        assert_eq!(
            root.to_string(),
            r#"target if unset <- first_tagged("Respawn") | direct"#
        );
        assert_eq!(
            component.to_string(),
            r#"target if unset <- tagged("Respawn") | component<Spawner> | first"#
        );
    }

    #[test]
    fn ignore_self_filters_owned_components_in_hierarchy_walks() {
        let stmt = emit(
            parse_quote!(Vec<Ref<Collider>>),
            vec![parse_quote!(#[inject(get_in_children, ignore_self, include_inactive)])],
        );

        assert_eq!(
            stmt.to_string(),
            "target if empty <- descendants<Collider>(all) | not on self | collect(vec)"
        );
    }

    #[test]
    fn skip_null_check_drops_the_guard() {
        let stmt = emit(
            parse_quote!(Option<Ref<Health>>),
            vec![parse_quote!(#[inject(get_in_parent, skip_null_check)])],
        );

        assert_eq!(stmt.guard, Guard::Always);
        assert_eq!(stmt.to_string(), "target <- ancestors<Health>(active) | first");
    }

    #[test]
    fn assets_are_loaded_by_filter() {
        let stmt = emit(
            parse_quote!(Option<Ref<Material>>),
            vec![parse_quote!(#[inject(get_in_assets = "Materials/")])],
        );

        assert!(stmt.resolution.source.is_direct());
        assert_eq!(
            stmt.to_string(),
            r#"target if unset <- asset<Material>("Materials/") | direct"#
        );
    }
}
