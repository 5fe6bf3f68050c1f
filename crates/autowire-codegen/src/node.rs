use darling::{
    FromDeriveInput, FromField,
    ast::Data,
    util::Ignored,
};
use syn::{Attribute, DeriveInput, Generics, Ident, Type, Visibility};

///
/// ClassNode
///
/// Raw owning-class declaration as darling reads it. Only `inject`
/// attributes are forwarded; everything else on the item is ignored.
///

#[derive(Debug, FromDeriveInput)]
#[darling(forward_attrs(inject))]
pub struct ClassNode {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub data: Data<Ignored, MemberNode>,
    pub attrs: Vec<Attribute>,
}

impl ClassNode {
    /// Read a derive input; unions are never extensible and read as `None`.
    pub fn from_input(input: &DeriveInput) -> darling::Result<Option<Self>> {
        if matches!(input.data, syn::Data::Union(_)) {
            return Ok(None);
        }

        Self::from_derive_input(input).map(Some)
    }

    /// Structs are open for a generated impl; enums are not wired.
    #[must_use]
    pub const fn is_extensible(&self) -> bool {
        matches!(self.data, Data::Struct(_))
    }

    /// Members in declaration order; empty for non-structs.
    #[must_use]
    pub fn members(&self) -> &[MemberNode] {
        match &self.data {
            Data::Struct(fields) => &fields.fields,
            Data::Enum(_) => &[],
        }
    }
}

///
/// MemberNode
///

#[derive(Clone, Debug, FromField)]
#[darling(forward_attrs(inject))]
pub struct MemberNode {
    pub ident: Option<Ident>,
    pub ty: Type,
    pub attrs: Vec<Attribute>,
}
