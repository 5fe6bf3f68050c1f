//! Whole-file generation pass.
//!
//! Walks a parsed source file, finds every struct that carries `inject`
//! directives (on itself or its fields), and produces one named unit per
//! struct. Structs are independent: one that cannot be wired never stops
//! the rest. Structs that `#[derive(Inject)]` are expanded by the derive and
//! left alone here.
//!
//! Unit names are built from the struct's full module path: the module the
//! source file declares (see [`file_module_path`]) followed by any inline
//! `mod` blocks around the struct.

use crate::{
    class::ClassUnit,
    error::Error,
    node::ClassNode,
    prelude::*,
    render::TokenRenderer,
    trace::{TraceEvent, TraceSink},
};
use std::{
    fs,
    path::{Component, Path as FsPath},
};
use syn::{Attribute, DeriveInput, File, Item, Token, punctuated::Punctuated};

/// First line of every generated unit.
pub const HEADER: &str = "// @generated by autowire-build. Do not edit.";

///
/// GeneratedUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedUnit {
    /// File name, unique per struct within a crate: `<module path>_<struct>_wired.rs`.
    pub name: String,
    pub module_path: Vec<String>,
    pub source: String,
}

impl GeneratedUnit {
    #[must_use]
    pub fn name_for(module_path: &[String], class: &Ident) -> String {
        let mut parts: Vec<String> = module_path.iter().map(|part| snake_name(part)).collect();
        parts.push(snake_name(&class.to_string()));

        format!("{}_wired.rs", parts.join("_"))
    }
}

/// Module path a source file declares, from its path relative to the package
/// root: `src/enemy.rs` and `src/enemy/mod.rs` are both `enemy`, while
/// `src/lib.rs` is the crate root.
#[must_use]
pub fn file_module_path(relative: &FsPath) -> Vec<String> {
    let mut parts: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str().map(ToString::to_string),
            _ => None,
        })
        .collect();

    if parts.first().is_some_and(|part| part == "src") {
        parts.remove(0);
    }
    if parts
        .last()
        .is_some_and(|part| matches!(part.as_str(), "lib" | "main" | "mod"))
    {
        parts.pop();
    }

    parts
}

/// Read, parse and generate one source file. `module_path` is the module the
/// file declares; it prefixes every unit name so structs that share a name
/// across files stay distinct.
pub fn generate_source(
    path: impl AsRef<FsPath>,
    module_path: &[String],
    renderer: &TokenRenderer,
    trace: &dyn TraceSink,
) -> Result<Vec<GeneratedUnit>, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file = syn::parse_file(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(generate_file(&file, module_path, renderer, trace))
}

/// Generate units for every wired struct in a parsed file.
#[must_use]
pub fn generate_file(
    file: &File,
    module_path: &[String],
    renderer: &TokenRenderer,
    trace: &dyn TraceSink,
) -> Vec<GeneratedUnit> {
    let mut units = Vec::new();
    walk(
        &file.items,
        &mut module_path.to_vec(),
        renderer,
        trace,
        &mut units,
    );

    units
}

// walk
// inline modules extend the namespace; out-of-line `mod x;` lives in its own file
fn walk(
    items: &[Item],
    namespace: &mut Vec<String>,
    renderer: &TokenRenderer,
    trace: &dyn TraceSink,
    units: &mut Vec<GeneratedUnit>,
) {
    for item in items {
        match item {
            Item::Struct(item)
                if !derives_inject(&item.attrs)
                    && has_directives(&item.attrs, item.fields.iter().map(|f| &f.attrs)) =>
            {
                let input = DeriveInput::from(item.clone());
                if let Some(unit) = generate_class(&input, namespace, renderer, trace) {
                    units.push(unit);
                }
            }
            Item::Enum(item) if has_directives(&item.attrs, std::iter::empty()) => {
                trace.on_event(TraceEvent::ClassSkipped {
                    class: item.ident.to_string(),
                    reason: SkipReason::NotExtensible,
                });
            }
            Item::Mod(item) => {
                if let Some((_, content)) = &item.content {
                    namespace.push(item.ident.to_string());
                    walk(content, namespace, renderer, trace, units);
                    namespace.pop();
                }
            }
            _ => {}
        }
    }
}

// generate_class
fn generate_class(
    input: &DeriveInput,
    namespace: &[String],
    renderer: &TokenRenderer,
    trace: &dyn TraceSink,
) -> Option<GeneratedUnit> {
    let built = match ClassNode::from_input(input) {
        Ok(Some(node)) => ClassUnit::build(&node, namespace),
        _ => Err(SkipReason::NotExtensible),
    };

    let unit = match built {
        Ok(unit) => unit,
        Err(reason) => {
            trace.on_event(TraceEvent::ClassSkipped {
                class: input.ident.to_string(),
                reason,
            });
            return None;
        }
    };
    unit.trace(trace);

    let tokens = unit.generate(renderer);

    Some(GeneratedUnit {
        name: GeneratedUnit::name_for(namespace, &unit.ident),
        module_path: namespace.to_vec(),
        source: format!("{HEADER}\n{tokens}\n"),
    })
}

// has_directives
fn has_directives<'a>(
    item_attrs: &[Attribute],
    mut member_attrs: impl Iterator<Item = &'a Vec<Attribute>>,
) -> bool {
    let is_inject = |attr: &Attribute| attr.path().is_ident(crate::directive::ATTRIBUTE);

    item_attrs.iter().any(is_inject) || member_attrs.any(|attrs| attrs.iter().any(is_inject))
}

// derives_inject
fn derives_inject(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .any(|path| path.segments.last().is_some_and(|segment| segment.ident == "Inject"))
}

///
/// TESTS
///
