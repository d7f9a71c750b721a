//! Flattened name lookup
//!
//! Map-to-record conversion needs to reach every leaf of a record, nested
//! ones included, by its flattened name. A [`FlatIndex`] lists those leaves
//! with their full paths from the root record, so assignment never has to
//! recurse.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::catalog::{CatalogEntry, FieldCatalog, FieldPath};
use super::field::ValueType;

/// Separator between a flattened record's name and its fields' names
pub const PREFIX_SEPARATOR: &str = "_";

/// A leaf field reachable by its flattened name
#[derive(Debug, Clone)]
pub struct FlatField {
    /// Flattened name, e.g. `Address_City`
    pub name: String,
    /// Path from the root record to the field
    pub path: FieldPath,
    /// Declared type of the field
    pub value_type: ValueType,
}

/// Flattened name lookup for one record type
#[derive(Debug, Default)]
pub struct FlatIndex {
    fields: Vec<FlatField>,
    exact: FxHashMap<String, usize>,
    folded: FxHashMap<String, SmallVec<[usize; 2]>>,
}

impl FlatIndex {
    /// Build the lookup for `entry`, resolving nested record types through `catalog`
    pub(crate) fn build(catalog: &FieldCatalog, entry: &CatalogEntry) -> Self {
        let mut index = Self::default();
        index.collect(catalog, entry, "", &[]);

        for (position, field) in index.fields.iter().enumerate() {
            index
                .folded
                .entry(fold_case(&field.name))
                .or_default()
                .push(position);
        }
        index
    }

    fn collect(
        &mut self,
        catalog: &FieldCatalog,
        entry: &CatalogEntry,
        name_prefix: &str,
        path_prefix: &[usize],
    ) {
        for descriptor in entry.fields() {
            let name = format!("{name_prefix}{}", descriptor.name);
            let path: FieldPath = path_prefix
                .iter()
                .chain(descriptor.path.iter())
                .copied()
                .collect();

            if let Some(nested) = descriptor.nested() {
                let nested_entry = catalog.resolve_type(nested);
                let nested_prefix = format!("{name}{PREFIX_SEPARATOR}");
                self.collect(catalog, &nested_entry, &nested_prefix, &path);
                continue;
            }

            self.insert(FlatField {
                name,
                path,
                value_type: descriptor.value_type,
            });
        }
    }

    fn insert(&mut self, field: FlatField) {
        if let Some(&position) = self.exact.get(&field.name) {
            log::warn!(
                "Flattened name '{}' is produced by more than one field; the later one wins",
                field.name
            );
            self.fields[position] = field;
            return;
        }
        self.exact.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
    }

    /// The field whose flattened name is exactly `key`
    #[must_use]
    pub fn exact(&self, key: &str) -> Option<&FlatField> {
        self.exact.get(key).map(|&position| &self.fields[position])
    }

    /// Every field whose flattened name equals `key` ignoring case
    ///
    /// Includes the exact match, if there is one.
    pub fn case_insensitive(&self, key: &str) -> impl Iterator<Item = &FlatField> {
        self.folded
            .get(&fold_case(key))
            .into_iter()
            .flatten()
            .map(|&position| &self.fields[position])
    }

    /// All fields, in declaration order (nested fields in place of their parent)
    pub fn iter(&self) -> impl Iterator<Item = &FlatField> {
        self.fields.iter()
    }

    /// Number of reachable leaf fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no reachable leaf fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[derive(Debug, Clone, Default, PartialEq, Record)]
    struct Geo {
        lat: f64,
        lon: f64,
    }

    #[derive(Debug, Default, Record)]
    struct Address {
        #[record(name = "City")]
        city: String,
        #[record(flatten)]
        geo: Option<Geo>,
    }

    #[derive(Debug, Default, Record)]
    struct Customer {
        #[record(name = "Name")]
        name: String,
        #[record(name = "NAME")]
        display_name: String,
        #[record(flatten, name = "Address")]
        address: Address,
    }

    #[test]
    fn test_nested_paths_are_rebased() {
        let catalog = FieldCatalog::new();
        let entry = catalog.resolve::<Customer>();
        let index = entry.flat_index(&catalog);

        let names: Vec<_> = index.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["Name", "NAME", "Address_City", "Address_geo_lat", "Address_geo_lon"]
        );

        assert_eq!(index.exact("Address_City").unwrap().path.as_slice(), &[2, 0]);
        assert_eq!(index.exact("Address_geo_lon").unwrap().path.as_slice(), &[2, 1, 1]);
        assert_eq!(
            index.exact("Address_geo_lat").unwrap().value_type,
            ValueType::of::<f64>()
        );
    }

    #[test]
    fn test_case_insensitive_lookup_finds_all_variants() {
        let catalog = FieldCatalog::new();
        let entry = catalog.resolve::<Customer>();
        let index = entry.flat_index(&catalog);

        assert!(index.exact("name").is_none());
        let matched: Vec<_> = index.case_insensitive("name").map(|f| f.path[0]).collect();
        assert_eq!(matched, [0, 1]);
        assert_eq!(index.case_insensitive("ADDRESS_CITY").count(), 1);
        assert_eq!(index.case_insensitive("missing").count(), 0);
    }

    #[test]
    fn test_nested_types_are_resolved_into_the_catalog() {
        let catalog = FieldCatalog::new();
        let entry = catalog.resolve::<Customer>();
        assert_eq!(catalog.len(), 1);

        let first = entry.flat_index(&catalog) as *const FlatIndex;
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains::<Geo>());

        let second = entry.flat_index(&catalog) as *const FlatIndex;
        assert_eq!(first, second);
    }

    #[derive(Debug, Default, Record)]
    struct Duplicated {
        #[record(name = "id")]
        legacy_id: i64,
        #[record(name = "id")]
        id: String,
    }

    #[test]
    fn test_duplicate_top_level_name_keeps_the_later_field() {
        let catalog = FieldCatalog::new();
        let entry = catalog.resolve::<Duplicated>();
        let index = entry.flat_index(&catalog);

        assert_eq!(entry.fields().len(), 2);
        assert_eq!(entry.field("id").unwrap().ident, "id");

        assert_eq!(index.len(), 1);
        let field = index.exact("id").unwrap();
        assert_eq!(field.path.as_slice(), &[1]);
        assert_eq!(field.value_type, ValueType::of::<String>());
        assert_eq!(index.case_insensitive("ID").count(), 1);
    }
}
