//! Resolution strategy selection.
//!
//! A member's shape and locator directives reduce to a [`Signature`], which is
//! matched against [`ROWS`] in order. The first row whose shape matches and
//! whose flag constraints hold selects the [`StrategyKind`]; binding then pulls
//! the arguments that kind needs into a [`Locator`].

use crate::{member::MemberDescriptor, prelude::*};

bitflags::bitflags! {
    ///
    /// Flags
    ///
    /// Locator facts consulted by the table. `GET` is also raised by `Add` and
    /// by the `GetBy*` shorthands, `FIND` by `GetByName`, `TAG` by `GetByTag`.
    ///
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Flags: u8 {
        const FIND = 1 << 0;
        const GET = 1 << 1;
        const TAG = 1 << 2;
        const IN_CHILDREN = 1 << 3;
        const IN_PARENT = 1 << 4;
        const IN_ASSETS = 1 << 5;
    }
}

impl Flags {
    #[must_use]
    pub fn from_directives(set: &DirectiveSet) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::FIND, set.has_find());
        flags.set(Self::GET, set.has_get());
        flags.set(Self::TAG, set.has_find_by_tag());
        flags.set(Self::IN_CHILDREN, set.has(Directive::GetInChildren));
        flags.set(Self::IN_PARENT, set.has(Directive::GetInParent));
        flags.set(Self::IN_ASSETS, set.has(Directive::GetInAssets));

        flags
    }
}

///
/// Signature
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Signature {
    pub collection: bool,
    pub root: bool,
    pub flags: Flags,
}

impl Signature {
    #[must_use]
    pub fn of(desc: &MemberDescriptor) -> Self {
        Self {
            collection: desc.is_collection(),
            root: desc.target.is_root(),
            flags: Flags::from_directives(&desc.directives),
        }
    }
}

///
/// StrategyKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StrategyKind {
    FindOneRootByName,
    FindAllRootsByName,
    GetOneComponent,
    GetAllComponents,
    FindOneThenGetComponent,
    FindAllThenGetComponents,
    FindOneRootByTag,
    FindAllRootsByTag,
    FindOneByTagThenFirstComponent,
    FindAllByTagThenAllComponents,
    FirstComponentInDescendants,
    AllComponentsInDescendants,
    FirstComponentInAncestors,
    AllComponentsInAncestors,
    FirstAsset,
    AllAssets,
}

impl StrategyKind {
    /// Design-time-only strategies cannot run in the runtime phase.
    #[must_use]
    pub const fn is_editor_only(self) -> bool {
        matches!(self, Self::FirstAsset | Self::AllAssets)
    }
}

///
/// Row
///

#[derive(Clone, Copy, Debug)]
pub struct Row {
    pub collection: bool,
    pub root: bool,
    pub all: Flags,
    pub none: Flags,
    pub kind: StrategyKind,
}

impl Row {
    #[must_use]
    pub fn matches(&self, sig: Signature) -> bool {
        self.collection == sig.collection
            && self.root == sig.root
            && sig.flags.contains(self.all)
            && !sig.flags.intersects(self.none)
    }
}

const fn row(
    collection: bool,
    root: bool,
    all: Flags,
    none: Flags,
    kind: StrategyKind,
) -> Row {
    Row {
        collection,
        root,
        all,
        none,
        kind,
    }
}

/// The decision table. Order matters: the first matching row wins.
pub const ROWS: [Row; 16] = {
    use StrategyKind as K;

    const NONE: Flags = Flags::empty();
    const FIND: Flags = Flags::FIND;
    const GET: Flags = Flags::GET;
    const TAG: Flags = Flags::TAG;
    const FIND_GET: Flags = Flags::FIND.union(Flags::GET);
    const FIND_TAG: Flags = Flags::FIND.union(Flags::TAG);
    const TAG_GET: Flags = Flags::TAG.union(Flags::GET);

    [
        row(false, true, FIND, NONE, K::FindOneRootByName),
        row(true, true, FIND, NONE, K::FindAllRootsByName),
        row(false, false, GET, FIND_TAG, K::GetOneComponent),
        row(true, false, GET, FIND_TAG, K::GetAllComponents),
        row(false, false, FIND_GET, NONE, K::FindOneThenGetComponent),
        row(true, false, FIND_GET, NONE, K::FindAllThenGetComponents),
        row(false, true, TAG, NONE, K::FindOneRootByTag),
        row(true, true, TAG, NONE, K::FindAllRootsByTag),
        row(false, false, TAG, NONE, K::FindOneByTagThenFirstComponent),
        row(true, false, TAG_GET, NONE, K::FindAllByTagThenAllComponents),
        row(false, false, Flags::IN_CHILDREN, NONE, K::FirstComponentInDescendants),
        row(true, false, Flags::IN_CHILDREN, NONE, K::AllComponentsInDescendants),
        row(false, false, Flags::IN_PARENT, NONE, K::FirstComponentInAncestors),
        row(true, false, Flags::IN_PARENT, NONE, K::AllComponentsInAncestors),
        row(false, false, Flags::IN_ASSETS, NONE, K::FirstAsset),
        row(true, false, Flags::IN_ASSETS, NONE, K::AllAssets),
    ]
};

/// Select the strategy for a signature, if any row matches.
#[must_use]
pub fn select(sig: Signature) -> Option<StrategyKind> {
    ROWS.iter().find(|row| row.matches(sig)).map(|row| row.kind)
}

///
/// Locator
///
/// A selected strategy bound to its arguments.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Locator {
    FindOneRootByName { name: Argument },
    FindAllRootsByName { name: Argument },
    GetOneComponent { add: bool },
    GetAllComponents { add: bool },
    FindOneThenGetComponent { name: Argument },
    FindAllThenGetComponents { name: Argument },
    FindOneRootByTag { tag: Argument },
    FindAllRootsByTag { tag: Argument },
    FindOneByTagThenFirstComponent { tag: Argument },
    FindAllByTagThenAllComponents { tag: Argument },
    FirstComponentInDescendants,
    AllComponentsInDescendants,
    FirstComponentInAncestors,
    AllComponentsInAncestors,
    FirstAsset { filter: Argument },
    AllAssets { filter: Argument },
}

impl Locator {
    pub fn bind(kind: StrategyKind, set: &DirectiveSet) -> Result<Self, SkipReason> {
        use StrategyKind as K;

        let name = || set.find_argument().cloned().ok_or(SkipReason::UnresolvableArgument);
        let tag = || set.tag_argument().cloned().ok_or(SkipReason::UnresolvableArgument);
        let filter = || {
            set.argument(Directive::GetInAssets)
                .cloned()
                .ok_or(SkipReason::UnresolvableArgument)
        };
        let add = set.has(Directive::Add);

        Ok(match kind {
            K::FindOneRootByName => Self::FindOneRootByName { name: name()? },
            K::FindAllRootsByName => Self::FindAllRootsByName { name: name()? },
            K::GetOneComponent => Self::GetOneComponent { add },
            K::GetAllComponents => Self::GetAllComponents { add },
            K::FindOneThenGetComponent => Self::FindOneThenGetComponent { name: name()? },
            K::FindAllThenGetComponents => Self::FindAllThenGetComponents { name: name()? },
            K::FindOneRootByTag => Self::FindOneRootByTag { tag: tag()? },
            K::FindAllRootsByTag => Self::FindAllRootsByTag { tag: tag()? },
            K::FindOneByTagThenFirstComponent => {
                Self::FindOneByTagThenFirstComponent { tag: tag()? }
            }
            K::FindAllByTagThenAllComponents => Self::FindAllByTagThenAllComponents { tag: tag()? },
            K::FirstComponentInDescendants => Self::FirstComponentInDescendants,
            K::AllComponentsInDescendants => Self::AllComponentsInDescendants,
            K::FirstComponentInAncestors => Self::FirstComponentInAncestors,
            K::AllComponentsInAncestors => Self::AllComponentsInAncestors,
            K::FirstAsset => Self::FirstAsset { filter: filter()? },
            K::AllAssets => Self::AllAssets { filter: filter()? },
        })
    }

    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        use StrategyKind as K;

        match self {
            Self::FindOneRootByName { .. } => K::FindOneRootByName,
            Self::FindAllRootsByName { .. } => K::FindAllRootsByName,
            Self::GetOneComponent { .. } => K::GetOneComponent,
            Self::GetAllComponents { .. } => K::GetAllComponents,
            Self::FindOneThenGetComponent { .. } => K::FindOneThenGetComponent,
            Self::FindAllThenGetComponents { .. } => K::FindAllThenGetComponents,
            Self::FindOneRootByTag { .. } => K::FindOneRootByTag,
            Self::FindAllRootsByTag { .. } => K::FindAllRootsByTag,
            Self::FindOneByTagThenFirstComponent { .. } => K::FindOneByTagThenFirstComponent,
            Self::FindAllByTagThenAllComponents { .. } => K::FindAllByTagThenAllComponents,
            Self::FirstComponentInDescendants => K::FirstComponentInDescendants,
            Self::AllComponentsInDescendants => K::AllComponentsInDescendants,
            Self::FirstComponentInAncestors => K::FirstComponentInAncestors,
            Self::AllComponentsInAncestors => K::AllComponentsInAncestors,
            Self::FirstAsset { .. } => K::FirstAsset,
            Self::AllAssets { .. } => K::AllAssets,
        }
    }
}

///
/// Modifiers
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub ignore_self: bool,
    pub include_inactive: bool,
    pub skip_null_check: bool,
    pub stable_sort: bool,
}

impl Modifiers {
    #[must_use]
    pub fn from_directives(set: &DirectiveSet) -> Self {
        Self {
            ignore_self: set.has(Directive::IgnoreSelf),
            include_inactive: set.has(Directive::IncludeInactive),
            skip_null_check: set.has(Directive::SkipNullCheck),
            stable_sort: set.has(Directive::StableSort),
        }
    }
}

///
/// Strategy
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Strategy {
    pub locator: Locator,
    pub modifiers: Modifiers,
}

impl Strategy {
    /// Classify a member. Combinations outside the table are inert.
    pub fn classify(desc: &MemberDescriptor) -> Result<Self, SkipReason> {
        let kind = select(Signature::of(desc)).ok_or(SkipReason::UnsupportedCombination)?;

        Ok(Self {
            locator: Locator::bind(kind, &desc.directives)?,
            modifiers: Modifiers::from_directives(&desc.directives),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        self.locator.kind()
    }
}

///
/// TESTS
///
