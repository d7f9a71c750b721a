//! Record derive macro implementation
//!
//! This module contains the implementation of the Record derive macro, which
//! generates `rowmap::Record` and `rowmap::DynRecord` implementations.

use darling::{FromDeriveInput, FromField, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, parse_macro_input};

use crate::utils;

/// Receiver for the struct that derives `Record`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Generics of the struct
    generics: syn::Generics,
    /// Type name override from `#[record(name = "...")]`
    #[darling(default)]
    name: Option<String>,
    /// The struct data with parsed fields
    data: ast::Data<(), RecordFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(record))]
pub struct RecordFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
    /// External name override
    #[darling(default)]
    name: Option<String>,
    /// Whether the field is a nested record flattened into the parent
    #[darling(default)]
    flatten: bool,
    /// Whether the field is left out of conversion
    #[darling(default)]
    skip: bool,
}

/// Process the Record derive macro
pub fn process_derive_record(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    match expand_record(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

/// Generate both trait implementations for a parsed struct
pub fn expand_record(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let receiver = RecordReceiver::from_derive_input(input)?;

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let mut errors = darling::Error::accumulator();
    for field in fields.iter() {
        if field.flatten && field.skip {
            errors.push(
                darling::Error::custom("a field cannot be both `flatten` and `skip`")
                    .with_span(&field.ty),
            );
        }
        if field.skip && field.name.is_some() {
            errors.push(
                darling::Error::custom("`name` has no effect on a skipped field")
                    .with_span(&field.ty),
            );
        }
    }
    errors.finish()?;

    let converted: Vec<&RecordFieldReceiver> = fields.iter().filter(|f| !f.skip).collect();
    Ok(generate_record_impl(&receiver, &converted))
}

/// Generate the `Record` and `DynRecord` implementations
fn generate_record_impl(
    receiver: &RecordReceiver,
    fields: &[&RecordFieldReceiver],
) -> TokenStream2 {
    let struct_name = &receiver.ident;
    let type_name = receiver
        .name
        .clone()
        .unwrap_or_else(|| struct_name.unraw().to_string());
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();

    let specs = fields.iter().map(|field| generate_field_spec(field));

    let mut value_arms = Vec::new();
    let mut record_arms = Vec::new();
    let mut setter_arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;

        if field.flatten {
            record_arms.push(if utils::is_option_type(field_type) {
                quote! {
                    #index => {
                        if materialize && self.#field_name.is_none() {
                            self.#field_name = ::core::option::Option::Some(::core::default::Default::default());
                        }
                        self.#field_name
                            .as_mut()
                            .map(|record| record as &mut dyn ::rowmap::DynRecord)
                    }
                }
            } else {
                quote! {
                    #index => ::core::option::Option::Some(
                        &mut self.#field_name as &mut dyn ::rowmap::DynRecord
                    ),
                }
            });
        } else {
            value_arms.push(quote! {
                #index => ::core::option::Option::Some(&self.#field_name as &dyn ::rowmap::AnyValue),
            });
            setter_arms.push(quote! {
                #index => {
                    self.#field_name = value.downcast::<#field_type>()?;
                    ::core::result::Result::Ok(())
                }
            });
        }
    }

    quote! {
        impl #impl_generics ::rowmap::Record for #struct_name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn field_specs() -> ::std::vec::Vec<::rowmap::FieldSpec> {
                ::std::vec![#(#specs),*]
            }
        }

        impl #impl_generics ::rowmap::DynRecord for #struct_name #ty_generics #where_clause {
            fn record_type(&self) -> ::rowmap::RecordType {
                ::rowmap::RecordType::of::<Self>()
            }

            #[allow(clippy::match_single_binding)]
            fn field_value(&self, index: usize) -> ::core::option::Option<&dyn ::rowmap::AnyValue> {
                match index {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables, clippy::match_single_binding)]
            fn field_record_mut(
                &mut self,
                index: usize,
                materialize: bool,
            ) -> ::core::option::Option<&mut dyn ::rowmap::DynRecord> {
                match index {
                    #(#record_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(clippy::match_single_binding)]
            fn set_field(
                &mut self,
                index: usize,
                value: ::rowmap::Value,
            ) -> ::core::result::Result<(), ::rowmap::Value> {
                match index {
                    #(#setter_arms)*
                    _ => ::core::result::Result::Err(value),
                }
            }
        }
    }
}

/// Generate the `FieldSpec` expression for one field
fn generate_field_spec(field: &RecordFieldReceiver) -> TokenStream2 {
    let ident = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default();
    let field_type = &field.ty;

    let spec = if !field.flatten {
        quote! { ::rowmap::FieldSpec::value::<#field_type>(#ident) }
    } else if let Some(inner) = utils::option_inner_type(field_type) {
        quote! { ::rowmap::FieldSpec::flatten_optional::<#inner>(#ident) }
    } else {
        quote! { ::rowmap::FieldSpec::flatten::<#field_type>(#ident) }
    };

    match &field.name {
        Some(name) => quote! { #spec.renamed(#name) },
        None => spec,
    }
}
