use proc_macro::TokenStream;

/// Generate `initialize_in_editor` / `initialize_in_runtime` for the struct's
/// `#[inject(..)]` members, plus any hooks requested on the struct itself.
#[proc_macro_derive(Inject, attributes(inject))]
pub fn derive_inject(input: TokenStream) -> TokenStream {
    autowire_codegen::derive_inject(input.into()).into()
}

/// Registers `#[inject(..)]` without expanding anything; the struct is wired
/// by `autowire-build` and its unit pulled in with `include_wired!`.
#[proc_macro_derive(Wired, attributes(inject))]
pub fn derive_wired(_: TokenStream) -> TokenStream {
    TokenStream::new()
}
