//! Field catalog
//!
//! The catalog resolves a record type's declared fields into descriptors once
//! and caches them by type identity. Entries are immutable after construction
//! and shared through `Arc`, so concurrent conversions of the same type read
//! the same descriptors without copying.

use std::any::TypeId;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};

use super::field::{FieldShape, ValueType};
use super::flat::FlatIndex;
use super::record::{Record, RecordType};

/// Structural route to a field: one position per record level
pub type FieldPath = SmallVec<[usize; 4]>;

/// Resolved metadata for one record field
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Position of the field in its owning record
    pub path: FieldPath,
    /// External name: the override if declared, else the identifier
    pub name: String,
    /// Whether the field is a nested record flattened into the parent map
    pub flatten: bool,
    /// Identifier as declared in the struct
    pub ident: &'static str,
    /// Declared type of the field
    pub value_type: ValueType,
    /// Value or (optional) nested record
    pub shape: FieldShape,
}

impl FieldDescriptor {
    /// The nested record type, for flattened fields
    #[must_use]
    pub fn nested(&self) -> Option<RecordType> {
        self.shape.nested()
    }
}

/// Cached field metadata for one record type
#[derive(Debug)]
pub struct CatalogEntry {
    record_type: RecordType,
    fields: Vec<FieldDescriptor>,
    flat: OnceLock<FlatIndex>,
}

impl CatalogEntry {
    fn build(record_type: RecordType) -> Self {
        let fields: Vec<FieldDescriptor> = record_type
            .field_specs()
            .into_iter()
            .enumerate()
            .map(|(index, spec)| FieldDescriptor {
                path: smallvec![index],
                name: spec.external_name().to_string(),
                flatten: spec.shape.nested().is_some(),
                ident: spec.ident,
                value_type: spec.value_type,
                shape: spec.shape,
            })
            .collect();

        Self {
            record_type,
            fields,
            flat: OnceLock::new(),
        }
    }

    /// The record type this entry describes
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Field descriptors in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a descriptor by external name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().rev().find(|field| field.name == name)
    }

    /// The flattened name lookup for this type, built on first use
    ///
    /// Nested record types are resolved through `catalog`.
    pub fn flat_index(&self, catalog: &FieldCatalog) -> &FlatIndex {
        self.flat.get_or_init(|| {
            let index = FlatIndex::build(catalog, self);
            log::debug!(
                "Built flat index for {} with {} entries",
                self.record_type.name(),
                index.len()
            );
            index
        })
    }
}

/// Per-type cache of resolved field descriptors
///
/// Hold one catalog per process (or per test) and share it by `Arc` between
/// converters.
#[derive(Debug, Default)]
pub struct FieldCatalog {
    /// Resolved entries by record type identity
    entries: RwLock<FxHashMap<TypeId, Arc<CatalogEntry>>>,
    /// Record types by the identity of the record type and of its `Option`
    shapes: RwLock<FxHashMap<TypeId, RecordType>>,
}

impl FieldCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the fields of `R`
    pub fn resolve<R: Record>(&self) -> Arc<CatalogEntry> {
        self.resolve_type(RecordType::of::<R>())
    }

    /// Resolve the fields of a type-erased record type
    ///
    /// The first call for a type builds and caches its entry; later calls
    /// return the cached entry. Concurrent first calls are serialized so the
    /// entry is built exactly once.
    pub fn resolve_type(&self, record_type: RecordType) -> Arc<CatalogEntry> {
        if let Some(entry) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&record_type.type_id())
        {
            return Arc::clone(entry);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have resolved it while we waited for the lock
        if let Some(entry) = entries.get(&record_type.type_id()) {
            return Arc::clone(entry);
        }

        let entry = Arc::new(CatalogEntry::build(record_type));
        log::debug!(
            "Resolved {} fields for record {}",
            entry.fields.len(),
            record_type.name()
        );
        entries.insert(record_type.type_id(), Arc::clone(&entry));

        let mut shapes = self.shapes.write().unwrap_or_else(PoisonError::into_inner);
        shapes.insert(record_type.type_id(), record_type);
        shapes.insert(record_type.optional_type_id(), record_type);

        entry
    }

    /// The record type registered for a value type identity, if any
    ///
    /// Both a record type and its `Option` wrapper map to the record type once
    /// it has been resolved.
    #[must_use]
    pub fn record_type_of(&self, type_id: TypeId) -> Option<RecordType> {
        self.shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    /// Whether `R` has been resolved
    #[must_use]
    pub fn contains<R: Record>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<R>())
    }

    /// Number of resolved record types
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no record type has been resolved yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry
    ///
    /// Entries already handed out stay valid; the next resolution of a type
    /// builds a fresh entry.
    pub fn reset(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut shapes = self.shapes.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("Resetting field catalog ({} entries)", entries.len());
        entries.clear();
        shapes.clear();
    }
}
