//! Utility functions for procedural macros
//!
//! Type inspection helpers used when generating record code.

use syn::{GenericArgument, PathArguments, Type};

/// Check if a type is an `Option<T>`
///
/// Matches `Option<T>` as well as the fully qualified `std::option::Option<T>`
/// and `core::option::Option<T>`.
pub fn is_option_type(ty: &Type) -> bool {
    option_inner_type(ty).is_some()
}

/// Extract `T` from an `Option<T>`
pub fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
