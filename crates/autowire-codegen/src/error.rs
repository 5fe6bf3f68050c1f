use derive_more::Display;
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// SkipReason
///
/// Why a member or a whole class produced no generated code. Skips are
/// outcomes, not faults: the host build is never blocked by them.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum SkipReason {
    /// No directive of the locator family is attached.
    #[display("no locator directive")]
    NoLocator,

    /// Unnamed field; only named fields can be wired.
    #[display("not a named member")]
    NotAMember,

    /// Enums and unions cannot take generated inherent impls.
    #[display("owning item is not an extensible struct")]
    NotExtensible,

    /// A directive argument is missing or is not a literal / constant path.
    #[display("directive argument cannot be resolved")]
    UnresolvableArgument,

    /// Directives present, but no strategy row matches them.
    #[display("unsupported directive combination")]
    UnsupportedCombination,

    /// Declared type is not `Option<T>`, `Vec<T>` or `Box<[T]>` of `Entity` / `Ref<C>`.
    #[display("unsupported member type")]
    UnsupportedShape,
}

///
/// Error
///
/// I/O failures at the edges of a generation pass.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: syn::Error },
}
