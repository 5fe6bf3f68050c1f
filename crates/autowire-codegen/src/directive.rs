use crate::prelude::*;
use darling::ast::NestedMeta;
use derive_more::Display;
use std::collections::BTreeMap;
use syn::{Attribute, Expr, Lit, Meta, Token, punctuated::Punctuated};

/// Helper attribute carrying directives on members and classes.
pub const ATTRIBUTE: &str = "inject";

///
/// DirectiveScope
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirectiveScope {
    Class,
    Locator,
    Modifier,
}

///
/// Directive
///
/// The closed vocabulary. Names match case-insensitively with separators
/// ignored, so `FindByTag`, `find_by_tag` and `findbytag` are one directive.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum Directive {
    Add,
    Find,
    FindByTag,
    GenerateAwake,
    GenerateInitializers,
    GenerateOnValidate,
    Get,
    GetByName,
    GetByTag,
    GetInAssets,
    GetInChildren,
    GetInParent,
    IgnoreSelf,
    IncludeInactive,
    InjectInEditor,
    InjectInRuntime,
    SkipNullCheck,
    StableSort,
    TestHelpers,
}

impl Directive {
    pub const ALL: [Self; 19] = [
        Self::Add,
        Self::Find,
        Self::FindByTag,
        Self::GenerateAwake,
        Self::GenerateInitializers,
        Self::GenerateOnValidate,
        Self::Get,
        Self::GetByName,
        Self::GetByTag,
        Self::GetInAssets,
        Self::GetInChildren,
        Self::GetInParent,
        Self::IgnoreSelf,
        Self::IncludeInactive,
        Self::InjectInEditor,
        Self::InjectInRuntime,
        Self::SkipNullCheck,
        Self::StableSort,
        Self::TestHelpers,
    ];

    /// Resolve a written directive name against the vocabulary.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = flat_name(name);

        Self::ALL
            .into_iter()
            .find(|directive| flat_name(&directive.to_string()) == name)
    }

    #[must_use]
    pub const fn scope(self) -> DirectiveScope {
        match self {
            Self::Add
            | Self::Find
            | Self::FindByTag
            | Self::Get
            | Self::GetByName
            | Self::GetByTag
            | Self::GetInAssets
            | Self::GetInChildren
            | Self::GetInParent => DirectiveScope::Locator,

            Self::GenerateAwake
            | Self::GenerateInitializers
            | Self::GenerateOnValidate
            | Self::TestHelpers => DirectiveScope::Class,

            Self::IgnoreSelf
            | Self::IncludeInactive
            | Self::InjectInEditor
            | Self::InjectInRuntime
            | Self::SkipNullCheck
            | Self::StableSort => DirectiveScope::Modifier,
        }
    }

    /// Named-argument key for directives that take one.
    #[must_use]
    pub const fn argument_name(self) -> Option<&'static str> {
        match self {
            Self::Find | Self::GetByName => Some("name"),
            Self::FindByTag | Self::GetByTag => Some("tag"),
            Self::GetInAssets => Some("filter"),
            _ => None,
        }
    }
}

///
/// Argument
///
/// A directive argument. Literals are emitted as-is; constant paths are left
/// for rustc to resolve where the generated statement is compiled.
///

#[derive(Clone, Debug)]
pub enum Argument {
    Literal(LitStr),
    Const(Path),
}

impl Argument {
    /// Accepts string literals and paths; anything else is unresolvable.
    #[must_use]
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Str(s) => Some(Self::Literal(s.clone())),
                _ => None,
            },
            Expr::Path(path) if path.qself.is_none() => Some(Self::Const(path.path.clone())),
            Expr::Group(group) => Self::from_expr(&group.expr),
            Expr::Paren(paren) => Self::from_expr(&paren.expr),
            _ => None,
        }
    }

    fn from_nested(item: &NestedMeta, name: &str) -> Option<Self> {
        match item {
            NestedMeta::Lit(Lit::Str(s)) => Some(Self::Literal(s.clone())),
            NestedMeta::Meta(Meta::Path(path)) => Some(Self::Const(path.clone())),
            NestedMeta::Meta(Meta::NameValue(nv))
                if nv
                    .path
                    .get_ident()
                    .is_some_and(|ident| flat_name(&ident.to_string()) == name) =>
            {
                Self::from_expr(&nv.value)
            }
            _ => None,
        }
    }

    /// Literal text, when known at expansion time.
    #[must_use]
    pub fn literal(&self) -> Option<String> {
        match self {
            Self::Literal(s) => Some(s.value()),
            Self::Const(_) => None,
        }
    }
}

impl ToTokens for Argument {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Literal(s) => s.to_tokens(tokens),
            Self::Const(path) => {
                tokens.extend(quote!(::core::convert::AsRef::<str>::as_ref(&#path)));
            }
        }
    }
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a.value() == b.value(),
            (Self::Const(a), Self::Const(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Argument {}

///
/// DirectiveSet
///
/// Directives attached to one member or class. Presence is the key; the value
/// is the argument, `None` when absent or unresolvable.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectiveSet {
    entries: BTreeMap<Directive, Option<Argument>>,
}

impl DirectiveSet {
    /// Read every `#[inject(..)]` attribute. Unknown names and attributes that
    /// do not parse are ignored.
    #[must_use]
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut set = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)) {
            let Ok(metas) = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
            else {
                continue;
            };
            for meta in &metas {
                set.read_meta(meta);
            }
        }

        set
    }

    fn read_meta(&mut self, meta: &Meta) {
        let Some(directive) = meta
            .path()
            .get_ident()
            .and_then(|ident| Directive::lookup(&ident.to_string()))
        else {
            return;
        };

        let argument = directive.argument_name().and_then(|name| match meta {
            Meta::Path(_) => None,
            Meta::NameValue(nv) => Argument::from_expr(&nv.value),
            Meta::List(list) => NestedMeta::parse_meta_list(list.tokens.clone())
                .ok()
                .and_then(|items| {
                    items
                        .iter()
                        .find_map(|item| Argument::from_nested(item, &flat_name(name)))
                }),
        });

        // a later resolvable argument wins over an earlier unresolvable one
        let slot = self.entries.entry(directive).or_default();
        if argument.is_some() {
            *slot = argument;
        }
    }

    pub fn insert(&mut self, directive: Directive, argument: Option<Argument>) {
        self.entries.insert(directive, argument);
    }

    #[must_use]
    pub fn has(&self, directive: Directive) -> bool {
        self.entries.contains_key(&directive)
    }

    /// Argument of `directive`, if it is present and resolvable.
    #[must_use]
    pub fn argument(&self, directive: Directive) -> Option<&Argument> {
        self.entries.get(&directive).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn has_locator(&self) -> bool {
        self.iter().any(|d| d.scope() == DirectiveScope::Locator)
    }

    pub fn iter(&self) -> impl Iterator<Item = Directive> + '_ {
        self.entries.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // predicate accessors

    #[must_use]
    pub fn has_find(&self) -> bool {
        self.has(Directive::Find) || self.has(Directive::GetByName)
    }

    #[must_use]
    pub fn has_find_by_tag(&self) -> bool {
        self.has(Directive::FindByTag) || self.has(Directive::GetByTag)
    }

    /// `Add` implies `Get`, as do the `GetBy*` shorthands.
    #[must_use]
    pub fn has_get(&self) -> bool {
        self.has(Directive::Get)
            || self.has(Directive::Add)
            || self.has(Directive::GetByName)
            || self.has(Directive::GetByTag)
    }

    /// Name argument from `find`, falling back to `get_by_name`.
    #[must_use]
    pub fn find_argument(&self) -> Option<&Argument> {
        self.argument(Directive::Find)
            .or_else(|| self.argument(Directive::GetByName))
    }

    /// Tag argument from `find_by_tag`, falling back to `get_by_tag`.
    #[must_use]
    pub fn tag_argument(&self) -> Option<&Argument> {
        self.argument(Directive::FindByTag)
            .or_else(|| self.argument(Directive::GetByTag))
    }
}

impl FromIterator<Directive> for DirectiveSet {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|d| (d, None)).collect(),
        }
    }
}

///
/// ClassDirectives
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClassDirectives {
    pub generate_on_validate: bool,
    pub generate_awake: bool,
    pub test_helpers: bool,
}

impl ClassDirectives {
    #[must_use]
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        Self::from_set(&DirectiveSet::from_attrs(attrs))
    }

    /// `GenerateInitializers` is shorthand for both hooks.
    #[must_use]
    pub fn from_set(set: &DirectiveSet) -> Self {
        let both = set.has(Directive::GenerateInitializers);

        Self {
            generate_on_validate: both || set.has(Directive::GenerateOnValidate),
            generate_awake: both || set.has(Directive::GenerateAwake),
            test_helpers: set.has(Directive::TestHelpers),
        }
    }
}

///
/// TESTS
///
