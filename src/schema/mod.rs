//! Record schema metadata.
//!
//! Declared field metadata comes from `#[derive(Record)]`; the
//! [`FieldCatalog`] resolves it into cached descriptors and flattened name
//! lookups.

pub mod catalog;
pub mod field;
pub mod flat;
pub mod record;

pub use catalog::{CatalogEntry, FieldCatalog, FieldDescriptor, FieldPath};
pub use field::{FieldShape, FieldSpec, ValueType};
pub use flat::{FlatField, FlatIndex, PREFIX_SEPARATOR};
pub use record::{DynRecord, Record, RecordType};

pub(crate) use record::walk_path_mut;
