//! Directive-resolution and code-synthesis engine behind `#[derive(Inject)]`.
//!
//! Pipeline per owning struct: `member` extracts descriptors, `directive`
//! reads the `#[inject(..)]` vocabulary, `strategy` classifies each member
//! against the decision table, `emit` lowers the chosen strategy into a
//! resolution IR, `phase` buckets statements into the design-time and
//! runtime initializers, and `class` assembles the generated impl blocks.
//! Every step is best-effort: anything unsupported is skipped, never raised.
//!
//! `pass` runs the same pipeline over whole source files for build scripts,
//! handing one named unit per struct to a `sink`.

pub mod class;
pub mod directive;
pub mod emit;
pub mod error;
pub mod member;
pub mod node;
pub mod pass;
pub mod phase;
pub mod render;
pub mod sink;
pub mod strategy;
pub mod trace;

mod helper;

pub use autowire_paths::CratePaths;
pub use error::{Error, SkipReason};
pub use pass::{GeneratedUnit, generate_file, generate_source};

use crate::{class::ClassUnit, node::ClassNode, render::TokenRenderer};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

///
/// Prelude
///

pub(crate) mod prelude {
    pub use crate::{
        directive::{Argument, Directive, DirectiveSet},
        error::SkipReason,
        helper::*,
    };
    pub use proc_macro2::TokenStream;
    pub use quote::{ToTokens, format_ident, quote};
    pub use syn::{Ident, LitStr, Path, Type};
}

/// Expand `#[derive(Inject)]`.
#[must_use]
pub fn derive_inject(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let node = match ClassNode::from_input(&input) {
        Ok(Some(node)) => node,
        Ok(None) => return quote!(),
        Err(err) => return err.write_errors(),
    };

    // a class that cannot be extended yields no fragment at all
    let Ok(unit) = ClassUnit::build(&node, &[]) else {
        return quote!();
    };

    unit.generate(&TokenRenderer::new(CratePaths::new()))
}
