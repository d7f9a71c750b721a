//! A Rust library for converting between typed records and flat,
//! string-keyed value maps such as database rows.
//!
//! Records implement [`Record`], normally through `#[derive(Record)]`:
//!
//! - `#[record(name = "...")]` overrides a field's key in the map
//! - `#[record(flatten)]` merges a nested record (or `Option` of one) into
//!   the parent map under `<name>_<field>` keys
//! - `#[record(skip)]` leaves a field out of conversion
//!
//! Conversion is best effort: see [`Converter`] for what is skipped silently
//! and [`ConverterConfig::strict`] for how to be told about it.

// Lets the derive macro's `::rowmap` paths resolve inside this crate
extern crate self as rowmap;

pub mod config;
pub mod convert;
pub mod error;
mod macros;
pub mod schema;
pub mod value;

// Re-export the most common types for easier use
pub use config::ConverterConfig;
pub use convert::Converter;
pub use error::{ConvertError, Result, SkipReason, Skipped};
pub use schema::{
    CatalogEntry, DynRecord, FieldCatalog, FieldDescriptor, FieldShape, FieldSpec, Record,
    RecordType, ValueType,
};
pub use value::{AnyValue, RecordMap, Value};

// Derive macro
pub use rowmap_macros::Record;
