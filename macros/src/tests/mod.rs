//! Tests for the Record derive macro
//!
//! Expansion is checked on the token level here; the generated code itself
//! is exercised by the rowmap crate's tests.

use syn::{DeriveInput, Type, parse_quote};

use crate::record_impl::expand_record;
use crate::utils::{is_option_type, option_inner_type};

fn expand(input: DeriveInput) -> String {
    expand_record(&input)
        .expect("expansion should succeed")
        .to_string()
}

#[test]
fn test_option_detection() {
    let plain: Type = parse_quote!(Option<Address>);
    let qualified: Type = parse_quote!(std::option::Option<Address>);
    let not_option: Type = parse_quote!(Vec<Option<Address>>);
    let bare: Type = parse_quote!(Address);

    assert!(is_option_type(&plain));
    assert!(is_option_type(&qualified));
    assert!(!is_option_type(&not_option));
    assert!(!is_option_type(&bare));

    let inner: Type = parse_quote!(Address);
    assert_eq!(option_inner_type(&plain), Some(&inner));
}

#[test]
fn test_specs_use_names_and_shapes() {
    let expanded = expand(parse_quote! {
        struct Customer {
            #[record(name = "myName")]
            name: String,
            #[record(flatten)]
            address: Address,
            #[record(flatten, name = "Billing")]
            billing: Option<Address>,
        }
    });

    assert!(expanded.contains("FieldSpec :: value :: < String > (\"name\") . renamed (\"myName\")"));
    assert!(expanded.contains("FieldSpec :: flatten :: < Address > (\"address\")"));
    assert!(
        expanded.contains("FieldSpec :: flatten_optional :: < Address > (\"billing\") . renamed (\"Billing\")")
    );
    assert!(expanded.contains("fn type_name () -> & 'static str { \"Customer\" }"));
}

#[test]
fn test_skipped_fields_do_not_take_an_index() {
    let expanded = expand(parse_quote! {
        struct Row {
            #[record(skip)]
            cache: Vec<u8>,
            id: i64,
        }
    });

    assert!(!expanded.contains("\"cache\""));
    assert!(expanded.contains("0usize => :: core :: option :: Option :: Some (& self . id"));
}

#[test]
fn test_raw_identifiers_are_unrawed() {
    let expanded = expand(parse_quote! {
        #[record(name = "Item")]
        struct r#Entry {
            r#type: String,
        }
    });

    assert!(expanded.contains("(\"type\")"));
    assert!(expanded.contains("\"Item\""));
}

#[test]
fn test_conflicting_attributes_are_rejected() {
    let input: DeriveInput = parse_quote! {
        struct Row {
            #[record(flatten, skip)]
            nested: Nested,
            #[record(skip, name = "x")]
            other: u8,
        }
    };
    let err = expand_record(&input).unwrap_err();
    assert_eq!(err.len(), 2);
}

#[test]
fn test_tuple_structs_are_rejected() {
    let input: DeriveInput = parse_quote! {
        struct Pair(u8, u8);
    };
    assert!(expand_record(&input).is_err());
}
