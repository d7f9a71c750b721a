//! Procedural macros for the rowmap crate
//!
//! This crate provides the `Record` derive, which generates the static field
//! metadata and index-based field access that rowmap converts through.

use proc_macro::TokenStream;

// Import modules
mod record_impl;
mod utils;

// Tests
#[cfg(test)]
mod tests;

/// Derive macro for record/map conversion
///
/// Implements `rowmap::Record` and `rowmap::DynRecord` for a struct with
/// named fields. The struct must implement `Default`, and every converted
/// field that is not flattened must be `Clone + PartialEq + Debug + Send +
/// Sync + 'static`.
///
/// Field attributes:
///
/// - `#[record(name = "...")]`: key used in the map instead of the field name
/// - `#[record(flatten)]`: the field is a record (or `Option` of one) whose
///   fields are merged into the parent map under `<name>_<field>` keys
/// - `#[record(skip)]`: the field is not converted
///
/// A `#[record(name = "...")]` on the struct itself overrides the type name
/// reported in logs and diagnostics.
///
/// # Example
///
/// ```rust,ignore
/// use rowmap::Record;
///
/// #[derive(Debug, Default, Record)]
/// struct Address {
///     #[record(name = "City")]
///     city: String,
/// }
///
/// #[derive(Debug, Default, Record)]
/// struct Customer {
///     #[record(name = "myName")]
///     name: String,
///     #[record(flatten, name = "Address")]
///     address: Option<Address>,
///     #[record(skip)]
///     cached_total: u64,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record_impl::process_derive_record(input)
}
