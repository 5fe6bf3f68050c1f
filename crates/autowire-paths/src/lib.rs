use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

/// Crate that defines the host contract; generated code inside it uses `crate`.
const FACADE_CRATE: &str = "autowire";

/// Environment variable overriding the facade path emitted into generated code.
pub const FACADE_ENV: &str = "AUTOWIRE_CRATE";

fn env_path(name: &str) -> Option<TokenStream> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .and_then(|value| syn::parse_str::<Path>(&value).ok())
        .map(|path| quote!(#path))
}

///
/// CratePaths
///
/// Resolves the crate root that generated initializers reference for the
/// host contract (`Host`, `Entity`, `FindInactive`, ...). Code expanded inside
/// the facade itself uses `crate`; everyone else gets `::autowire`.
/// `AUTOWIRE_CRATE` overrides both, for consumers that re-export the facade.
///

#[derive(Clone, Debug, Default)]
pub struct CratePaths {
    pub facade: TokenStream,
}

impl CratePaths {
    #[must_use]
    /// Resolve crate paths for generated code, honoring environment overrides.
    pub fn new() -> Self {
        let pkg = std::env::var("CARGO_PKG_NAME").unwrap_or_default();

        let facade = if pkg == FACADE_CRATE {
            quote!(crate)
        } else {
            quote!(::autowire)
        };

        Self {
            facade: env_path(FACADE_ENV).unwrap_or(facade),
        }
    }

    #[must_use]
    /// Paths pinned to an explicit facade root, ignoring the environment.
    pub fn with_facade(facade: TokenStream) -> Self {
        Self { facade }
    }
}

///
/// TESTS
///
