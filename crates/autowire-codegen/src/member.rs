use crate::{node::MemberNode, prelude::*};

/// Root-object handle; members of this element type address entities.
pub const ROOT_TYPE: &str = "Entity";

/// Component handle wrapper; `Ref<C>` addresses a component of type `C`.
pub const COMPONENT_REF: &str = "Ref";

///
/// Arity
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arity {
    /// `Option<T>`
    Scalar,
    /// `Box<[T]>`
    Array,
    /// `Vec<T>`
    OrderedList,
}

impl Arity {
    #[must_use]
    pub const fn is_collection(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

///
/// Target
///
/// What the element type addresses.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Target {
    Root,
    Component(Type),
}

impl Target {
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// The component type `C` of `Ref<C>`.
    #[must_use]
    pub const fn component(&self) -> Option<&Type> {
        match self {
            Self::Root => None,
            Self::Component(ty) => Some(ty),
        }
    }
}

///
/// MemberDescriptor
///
/// One wired member, read once per generation pass and never mutated.
///

#[derive(Clone, Debug)]
pub struct MemberDescriptor {
    pub owner: Ident,
    pub ident: Ident,
    pub ty: Type,
    pub element: Type,
    pub arity: Arity,
    pub target: Target,
    pub directives: DirectiveSet,
}

impl MemberDescriptor {
    /// Extract a descriptor from a declared member.
    pub fn extract(owner: &Ident, node: &MemberNode) -> Result<Self, SkipReason> {
        let ident = node.ident.clone().ok_or(SkipReason::NotAMember)?;

        let directives = DirectiveSet::from_attrs(&node.attrs);
        if !directives.has_locator() {
            return Err(SkipReason::NoLocator);
        }

        let (arity, element) = shape(&node.ty).ok_or(SkipReason::UnsupportedShape)?;
        let target = target(element).ok_or(SkipReason::UnsupportedShape)?;

        Ok(Self {
            owner: owner.clone(),
            ident,
            ty: node.ty.clone(),
            element: element.clone(),
            arity,
            target,
            directives,
        })
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.arity.is_collection()
    }
}

/// Arity and element type of a declared member type.
#[must_use]
pub fn shape(ty: &Type) -> Option<(Arity, &Type)> {
    if let Some(inner) = single_type_arg(ty, "Option") {
        return Some((Arity::Scalar, inner));
    }
    if let Some(inner) = single_type_arg(ty, "Vec") {
        return Some((Arity::OrderedList, inner));
    }
    if let Some(Type::Slice(slice)) = single_type_arg(ty, "Box") {
        return Some((Arity::Array, &slice.elem));
    }

    None
}

/// Classify an element type as a root object or a component reference.
#[must_use]
pub fn target(element: &Type) -> Option<Target> {
    if is_path_ident(element, ROOT_TYPE) {
        return Some(Target::Root);
    }

    single_type_arg(element, COMPONENT_REF).map(|component| Target::Component(component.clone()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn member(ty: Type, attrs: Vec<syn::Attribute>) -> MemberNode {
        MemberNode {
            ident: Some(format_ident!("field")),
            ty,
            attrs,
        }
    }

    fn owner() -> Ident {
        format_ident!("Owner")
    }

    #[test]
    fn arity_follows_wrapper_syntax() {
        let cases: [(Type, Arity); 3] = [
            (parse_quote!(Option<Entity>), Arity::Scalar),
            (parse_quote!(Box<[Entity]>), Arity::Array),
            (parse_quote!(Vec<Entity>), Arity::OrderedList),
        ];

        for (ty, arity) in cases {
            assert_eq!(shape(&ty).map(|(a, _)| a), Some(arity));
        }
    }

    #[test]
    fn element_type_is_the_wrapped_type() {
        let ty: Type = parse_quote!(Box<[Ref<Collider>]>);
        let (_, element) = shape(&ty).unwrap();

        assert_eq!(
            target(element),
            Some(Target::Component(parse_quote!(Collider)))
        );
    }

    #[test]
    fn qualified_paths_are_recognised() {
        let ty: Type = parse_quote!(Option<autowire::Entity>);
        let (_, element) = shape(&ty).unwrap();

        assert_eq!(target(element), Some(Target::Root));
    }

    #[test]
    fn unnamed_members_are_not_members() {
        let mut node = member(parse_quote!(Option<Entity>), vec![parse_quote!(#[inject(get)])]);
        node.ident = None;

        assert_eq!(
            MemberDescriptor::extract(&owner(), &node).unwrap_err(),
            SkipReason::NotAMember
        );
    }

    #[test]
    fn members_without_locators_are_ignored() {
        let node = member(
            parse_quote!(Option<Ref<Body>>),
            vec![parse_quote!(#[inject(skip_null_check)])],
        );

        assert_eq!(
            MemberDescriptor::extract(&owner(), &node).unwrap_err(),
            SkipReason::NoLocator
        );
    }

    #[test]
    fn bare_and_fixed_array_types_are_unsupported() {
        for ty in [
            parse_quote!(Ref<Body>),
            parse_quote!([Ref<Body>; 2]),
            parse_quote!(Option<Body>),
        ] {
            let node = member(ty, vec![parse_quote!(#[inject(get)])]);

            assert_eq!(
                MemberDescriptor::extract(&owner(), &node).unwrap_err(),
                SkipReason::UnsupportedShape
            );
        }
    }

    #[test]
    fn extract_keeps_declared_and_element_types() {
        let node = member(
            parse_quote!(Vec<Ref<Body>>),
            vec![parse_quote!(#[inject(get_in_children)])],
        );
        let desc = MemberDescriptor::extract(&owner(), &node).unwrap();

        assert_eq!(desc.arity, Arity::OrderedList);
        assert!(desc.is_collection());
        assert_eq!(desc.element, parse_quote!(Ref<Body>));
        assert_eq!(desc.target.component(), Some(&parse_quote!(Body)));
        assert_eq!(desc.owner, "Owner");
    }
}
