//! Record to map conversion

use std::any::Any;

use super::{Converter, Skips};
use crate::error::{ConvertError, Result, SkipReason};
use crate::schema::{DynRecord, FieldShape, PREFIX_SEPARATOR, Record};
use crate::value::{RecordMap, Value};

impl Converter {
    /// Convert a record into a flat map
    ///
    /// Every value field is cloned into the map under its external name.
    /// Flattened nested records contribute their own fields under
    /// `<name>_<field>`, recursively.
    ///
    /// With [`materialize_optional`](crate::ConverterConfig::materialize_optional)
    /// set (the default), an absent flattened `Option` record is replaced by
    /// its default in `record` before being read. This is why the record is
    /// borrowed mutably.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rowmap::{Converter, Record};
    ///
    /// #[derive(Debug, Default, Record)]
    /// struct Address {
    ///     #[record(name = "City")]
    ///     city: String,
    /// }
    ///
    /// #[derive(Debug, Default, Record)]
    /// struct Person {
    ///     #[record(name = "myName")]
    ///     name: String,
    ///     #[record(flatten, name = "Address")]
    ///     address: Address,
    /// }
    ///
    /// let converter = Converter::new();
    /// let mut person = Person {
    ///     name: "Ada".into(),
    ///     address: Address { city: "London".into() },
    /// };
    /// let map = converter.record_to_map(&mut person).unwrap();
    /// assert_eq!(map["myName"].downcast_ref::<String>().unwrap(), "Ada");
    /// assert_eq!(map["Address_City"].downcast_ref::<String>().unwrap(), "London");
    /// ```
    pub fn record_to_map<R: Record>(&self, record: &mut R) -> Result<RecordMap> {
        self.dyn_record_to_map(record)
    }

    /// Convert an optional record into a flat map
    ///
    /// `Some` is converted like [`Converter::record_to_map`]. The record type
    /// does not need to be registered first.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotARecord`] if `record` is `None`.
    pub fn optional_record_to_map<R: Record>(&self, record: &mut Option<R>) -> Result<RecordMap> {
        match record {
            Some(record) => self.record_to_map(record),
            None => Err(ConvertError::NotARecord {
                type_name: std::any::type_name::<Option<R>>(),
            }),
        }
    }

    /// Convert any value into a flat map if it is a record
    ///
    /// Accepts a registered record type, an `Option` of one, or a [`Value`]
    /// holding either. Record types become known to the converter through
    /// [`Converter::register`] or any earlier conversion of that type. When
    /// the type is known statically, prefer [`Converter::record_to_map`] or
    /// [`Converter::optional_record_to_map`], which need no registration.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotARecord`] for anything else, including `None` and
    /// record types the catalog has not seen yet.
    pub fn value_to_map<T: Any>(&self, value: &mut T) -> Result<RecordMap> {
        let type_name = std::any::type_name::<T>();
        let value: &mut dyn Any = value;
        if let Some(inner) = value.downcast_mut::<Value>() {
            let inner_name = inner.type_name();
            return self.any_to_map(inner.as_any_mut(), inner_name);
        }
        self.any_to_map(value, type_name)
    }

    fn any_to_map(&self, value: &mut dyn Any, type_name: &'static str) -> Result<RecordMap> {
        let not_a_record = || ConvertError::NotARecord { type_name };
        let record_type = self
            .catalog
            .record_type_of((*value).type_id())
            .ok_or_else(not_a_record)?;
        let record = record_type.cast(value).ok_or_else(not_a_record)?;
        self.dyn_record_to_map(record)
    }

    fn dyn_record_to_map(&self, record: &mut dyn DynRecord) -> Result<RecordMap> {
        let mut skips = Skips::new(&self.config);
        let mut map = RecordMap::new();
        self.flatten_into(record, "", &mut map, &mut skips);
        skips.finish(map)
    }

    fn flatten_into(
        &self,
        record: &mut dyn DynRecord,
        prefix: &str,
        map: &mut RecordMap,
        skips: &mut Skips<'_>,
    ) {
        let entry = self.catalog.resolve_type(record.record_type());
        map.reserve(entry.fields().len());

        for field in entry.fields() {
            // Catalog descriptors sit at the top of their own record
            let index = field.path[0];
            let key = format!("{prefix}{}", field.name);

            match field.shape {
                FieldShape::Value => {
                    if let Some(value) = record.field_value(index) {
                        map.insert(key, Value::from_boxed(value.clone_box()));
                    }
                }
                FieldShape::Record(_) | FieldShape::OptionalRecord(_) => {
                    match record.field_record_mut(index, self.config.materialize_optional) {
                        Some(nested) => {
                            let nested_prefix = format!("{key}{PREFIX_SEPARATOR}");
                            self.flatten_into(nested, &nested_prefix, map, skips);
                        }
                        None => skips.push(&key, SkipReason::Absent),
                    }
                }
            }
        }
    }
}
