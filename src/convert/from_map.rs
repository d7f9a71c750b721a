//! Map to record conversion

use super::{Converter, Skips};
use crate::error::{Result, SkipReason};
use crate::schema::{DynRecord, FlatField, Record, walk_path_mut};
use crate::value::{RecordMap, Value};

impl Converter {
    /// Populate a record from a flat map
    ///
    /// Each key is looked up among the record's flattened field names, nested
    /// fields included (`Address_City` reaches `address.city`). A field is
    /// assigned only if the value's runtime type is exactly the field's
    /// declared type; there is no coercion. Optional nested records on the
    /// way to an assigned field are allocated as needed.
    ///
    /// Besides the exact match, every field whose name equals the key
    /// ignoring case is assigned too, so `name` fills both `Name` and `NAME`.
    /// Set [`exclusive_exact_match`](crate::ConverterConfig::exclusive_exact_match)
    /// to scan case-insensitively only when there is no exact match. When
    /// several keys reach the same field, which one wins depends on map
    /// iteration order.
    ///
    /// Returns the number of assignments made. In lenient mode this never
    /// fails: unmatched keys and mismatched values are skipped and the record
    /// keeps its previous values for those fields.
    ///
    /// # Errors
    ///
    /// In strict mode, [`ConvertError::Incomplete`](crate::ConvertError::Incomplete)
    /// if any key was skipped. A key counts as skipped when it matches no
    /// field, or when none of the fields it matches accepts its value's type;
    /// a key assigned to at least one field is not reported for the others.
    /// Fields that could be assigned are assigned regardless.
    pub fn map_to_record<R: Record>(&self, map: &RecordMap, record: &mut R) -> Result<usize> {
        self.map_to_dyn_record(map, record)
    }

    pub(crate) fn map_to_dyn_record(
        &self,
        map: &RecordMap,
        record: &mut dyn DynRecord,
    ) -> Result<usize> {
        let entry = self.catalog.resolve_type(record.record_type());
        let index = entry.flat_index(&self.catalog);
        let mut skips = Skips::new(&self.config);
        let mut assigned = 0;

        for (key, value) in map {
            let exact = index.exact(key);
            let fallback = !(exact.is_some() && self.config.exclusive_exact_match);
            // The exact match is part of the case-insensitive set
            let folded = index
                .case_insensitive(key)
                .filter(|field| fallback && field.name != *key);

            let mut matched = false;
            let mut key_assigned = 0;
            let mut mismatch = None;
            for field in exact.into_iter().chain(folded) {
                matched = true;
                match assign(record, field, value) {
                    Ok(true) => key_assigned += 1,
                    Ok(false) => {}
                    Err(reason) => {
                        mismatch.get_or_insert(reason);
                    }
                }
            }
            assigned += key_assigned;

            if !matched {
                skips.push(key, SkipReason::Unmatched);
            } else if let Some(reason) = mismatch.filter(|_| key_assigned == 0) {
                skips.push(key, reason);
            }
        }

        skips.finish(assigned)
    }
}

/// Assign `value` to `field`, or say why its type does not fit
fn assign(
    record: &mut dyn DynRecord,
    field: &FlatField,
    value: &Value,
) -> std::result::Result<bool, SkipReason> {
    if value.value_type_id() != field.value_type.id {
        return Err(SkipReason::TypeMismatch {
            expected: field.value_type.name,
            found: value.type_name(),
        });
    }

    let Some((owner, index)) = walk_path_mut(record, &field.path, true) else {
        return Ok(false);
    };
    Ok(owner.set_field(index, value.clone()).is_ok())
}
