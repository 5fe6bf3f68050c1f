use convert_case::{Case, Casing};
use syn::{GenericArgument, PathArguments, Type};

// Type helpers

/// Last path segment of a type, when the type is a plain path.
#[must_use]
pub fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    path.path.segments.last()
}

/// True when the type's last path segment is `ident`, whatever its arguments.
#[must_use]
pub fn is_path_ident(ty: &Type, ident: &str) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == ident)
}

/// The single type argument of `Wrapper<T>` when the last segment is `wrapper`.
#[must_use]
pub fn single_type_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let segment = last_segment(ty).filter(|segment| segment.ident == wrapper)?;
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });

    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None,
    }
}

// Name helpers

/// Case- and separator-insensitive form of a directive name.
#[must_use]
pub fn flat_name(name: &str) -> String {
    name.to_case(Case::Flat)
}

/// Snake-case form, used for generated unit names.
#[must_use]
pub fn snake_name(name: &str) -> String {
    name.to_case(Case::Snake)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn single_type_arg_unwraps_known_wrappers() {
        let ty: Type = parse_quote!(std::vec::Vec<Ref<Collider>>);
        let inner = single_type_arg(&ty, "Vec").unwrap();

        assert!(is_path_ident(inner, "Ref"));
        assert!(single_type_arg(&ty, "Option").is_none());
    }

    #[test]
    fn single_type_arg_rejects_multi_arg_types() {
        let ty: Type = parse_quote!(HashMap<String, Entity>);

        assert!(single_type_arg(&ty, "HashMap").is_none());
    }

    #[test]
    fn flat_name_ignores_case_and_separators() {
        assert_eq!(flat_name("FindByTag"), flat_name("find_by_tag"));
        assert_eq!(flat_name("findbytag"), flat_name("FIND_BY_TAG"));
    }
}
