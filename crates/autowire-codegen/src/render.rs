use crate::{
    CratePaths,
    emit::{Container, Guard, Import, Resolution, Sink, Source, Statement, Step},
    prelude::*,
};
use std::collections::BTreeSet;

///
/// Render
///
/// Turns IR statements into a target surface. The table and the IR never
/// depend on which renderer runs.
///

pub trait Render {
    type Output;

    fn statement(&self, stmt: &Statement) -> Self::Output;
}

///
/// PipelineRenderer
///
/// Human-readable pipeline text; used by tests and trace output.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineRenderer;

impl Render for PipelineRenderer {
    type Output = String;

    fn statement(&self, stmt: &Statement) -> String {
        stmt.to_string()
    }
}

///
/// TokenRenderer
///
/// Rust source. Generated statements assume `self`, `host: &mut impl Host`
/// and `this: Entity` are in scope.
///

#[derive(Clone, Debug)]
pub struct TokenRenderer {
    paths: CratePaths,
}

impl TokenRenderer {
    #[must_use]
    pub const fn new(paths: CratePaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub const fn facade(&self) -> &TokenStream {
        &self.paths.facade
    }

    /// `use` for the facade items a method body names; empty when none are.
    #[must_use]
    pub fn imports(&self, imports: &BTreeSet<Import>) -> TokenStream {
        if imports.is_empty() {
            return quote!();
        }

        let facade = self.facade();
        let names = imports.iter().map(|import| format_ident!("{}", import.name()));

        quote!(use #facade::{#(#names),*};)
    }

    fn resolution(res: &Resolution) -> TokenStream {
        let source = Self::source(&res.source);
        let steps = res.steps.iter().map(Self::step);
        let chain = quote!(#source #(#steps)*);

        match &res.sink {
            Sink::First => quote!(#chain.next()),
            Sink::Direct => chain,
            Sink::Collect(container) => {
                let container = container_type(*container);
                quote!(#chain.collect::<#container>())
            }
            Sink::FirstOrAdd(ty) => {
                quote!(#chain.or_else(|| host.add_component::<#ty>(this)))
            }
            Sink::CollectOrAdd(ty, container) => {
                let finish = match container {
                    Container::Vec => quote!(found),
                    Container::BoxedSlice => quote!(found.into_boxed_slice()),
                };

                quote!({
                    let mut found = #chain.collect::<::std::vec::Vec<_>>();
                    if found.is_empty() {
                        found.extend(host.add_component::<#ty>(this));
                    }
                    #finish
                })
            }
        }
    }

    fn source(source: &Source) -> TokenStream {
        match source {
            Source::Roots { inactive, stable } => {
                let inactive = if *inactive {
                    quote!(FindInactive::Include)
                } else {
                    quote!(FindInactive::Exclude)
                };
                let sort = if *stable {
                    quote!(SortMode::InstanceId)
                } else {
                    quote!(SortMode::None)
                };

                quote!(host.entities(#inactive, #sort).into_iter())
            }
            Source::TaggedRoots { tag } => quote!(host.find_all_with_tag(#tag).into_iter()),
            Source::FirstTagged { tag } => quote!(host.find_with_tag(#tag)),
            Source::OwnComponent { ty } => quote!(host.component::<#ty>(this)),
            Source::OwnComponents { ty } => quote!(host.components::<#ty>(this).into_iter()),
            Source::Descendants { ty, inactive } => {
                quote!(host.components_in_children::<#ty>(this, #inactive).into_iter())
            }
            Source::Ancestors { ty, inactive } => {
                quote!(host.components_in_parent::<#ty>(this, #inactive).into_iter())
            }
            Source::Asset { ty, filter } => quote!(host.load_asset::<#ty>(#filter)),
            Source::Assets { ty, filter } => quote!(host.load_assets::<#ty>(#filter).into_iter()),
        }
    }

    fn step(step: &Step) -> TokenStream {
        match step {
            Step::NameIs(name) => quote! {
                .filter(|entity| host.name_of(*entity).is_some_and(|name| name == #name))
            },
            Step::ExcludeSelf => quote!(.filter(|entity| *entity != this)),
            Step::ExcludeOwnedBySelf => quote!(.filter(|component| component.entity() != this)),
            Step::ComponentOf(ty) => quote!(.filter_map(|entity| host.component::<#ty>(entity))),
            Step::ComponentsOf(ty) => quote!(.flat_map(|entity| host.components::<#ty>(entity))),
        }
    }
}

impl Render for TokenRenderer {
    type Output = TokenStream;

    fn statement(&self, stmt: &Statement) -> TokenStream {
        let member = &stmt.member;
        let value = Self::resolution(&stmt.resolution);

        match stmt.guard {
            Guard::Unset => quote! {
                if self.#member.is_none() {
                    self.#member = #value;
                }
            },
            Guard::Empty => quote! {
                if self.#member.is_empty() {
                    self.#member = #value;
                }
            },
            Guard::Always => quote! {
                self.#member = #value;
            },
        }
    }
}

// container_type
fn container_type(container: Container) -> TokenStream {
    match container {
        Container::Vec => quote!(::std::vec::Vec<_>),
        Container::BoxedSlice => quote!(::std::boxed::Box<[_]>),
    }
}

///
/// TESTS
///
