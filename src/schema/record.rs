//! Record traits
//!
//! [`Record`] carries the static metadata of a record type and [`DynRecord`]
//! is the object-safe, index-based field access the converter drives. Both
//! are normally generated by `#[derive(Record)]`; field indices are positions
//! in the list returned by [`Record::field_specs`].

use std::any::{Any, TypeId};
use std::fmt;

use super::field::FieldSpec;
use crate::value::{AnyValue, Value};

/// Index-based field access on a record of any type
pub trait DynRecord: Any {
    /// Type-erased handle to this record's type
    fn record_type(&self) -> RecordType;

    /// Borrow a value field
    ///
    /// Returns `None` for flattened record fields and out-of-range indices.
    fn field_value(&self, index: usize) -> Option<&dyn AnyValue>;

    /// Mutably borrow a flattened nested record field
    ///
    /// For an optional nested record that is `None`, a default record is
    /// allocated first when `materialize` is set; otherwise `None` is
    /// returned. Returns `None` for value fields.
    fn field_record_mut(&mut self, index: usize, materialize: bool) -> Option<&mut dyn DynRecord>;

    /// Assign a value field
    ///
    /// The value is handed back if its type is not the field's declared type,
    /// or if the field is not a value field.
    fn set_field(&mut self, index: usize, value: Value) -> std::result::Result<(), Value>;
}

/// A record type with statically known fields
///
/// # Example
///
/// ```rust
/// use rowmap::Record;
///
/// #[derive(Debug, Default, Record)]
/// struct Address {
///     #[record(name = "city")]
///     city: String,
///     zip: Option<String>,
/// }
///
/// let specs = Address::field_specs();
/// assert_eq!(specs[0].external_name(), "city");
/// assert_eq!(specs[1].external_name(), "zip");
/// ```
pub trait Record: DynRecord + Default + Sized {
    /// Name of the record type
    fn type_name() -> &'static str;

    /// Declared fields, in declaration order
    fn field_specs() -> Vec<FieldSpec>;
}

type CastFn = fn(&mut dyn Any) -> Option<&mut dyn DynRecord>;

/// Type-erased handle to a [`Record`] type
///
/// Lets the catalog resolve nested record types and recognize record-shaped
/// values without knowing their static type.
#[derive(Clone, Copy)]
pub struct RecordType {
    type_id: TypeId,
    optional_type_id: TypeId,
    name: &'static str,
    field_specs: fn() -> Vec<FieldSpec>,
    cast: CastFn,
}

impl RecordType {
    /// Handle for `R`
    #[must_use]
    pub fn of<R: Record>() -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            optional_type_id: TypeId::of::<Option<R>>(),
            name: R::type_name(),
            field_specs: R::field_specs,
            cast: cast_record::<R>,
        }
    }

    /// Identity of the record type
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Identity of `Option<R>`, the optional wrapper of the record type
    #[must_use]
    pub fn optional_type_id(&self) -> TypeId {
        self.optional_type_id
    }

    /// Name of the record type
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields of the record type
    #[must_use]
    pub fn field_specs(&self) -> Vec<FieldSpec> {
        (self.field_specs)()
    }

    /// View a value of this type, or a `Some` of its optional wrapper, as a record
    pub fn cast<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn DynRecord> {
        (self.cast)(value)
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType").field("name", &self.name).finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RecordType {}

fn cast_record<R: Record>(value: &mut dyn Any) -> Option<&mut dyn DynRecord> {
    if value.is::<R>() {
        return value.downcast_mut::<R>().map(|record| record as &mut dyn DynRecord);
    }
    value
        .downcast_mut::<Option<R>>()
        .and_then(Option::as_mut)
        .map(|record| record as &mut dyn DynRecord)
}

/// Walk `path` from `record`, descending through flattened record fields
///
/// Returns the record owning the last path element together with that
/// element's index. Optional records along the way are materialized when
/// `materialize` is set; otherwise an absent one ends the walk with `None`.
pub(crate) fn walk_path_mut<'a>(
    record: &'a mut dyn DynRecord,
    path: &[usize],
    materialize: bool,
) -> Option<(&'a mut dyn DynRecord, usize)> {
    let (&last, parents) = path.split_last()?;
    let mut current = record;
    for &index in parents {
        current = current.field_record_mut(index, materialize)?;
    }
    Some((current, last))
}
