//! Declared field metadata
//!
//! A [`FieldSpec`] is what `#[derive(Record)]` emits for each field: the
//! declared identifier, an optional name override, the field's type and its
//! shape. The catalog turns specs into resolved descriptors.

use std::any::{Any, TypeId};
use std::fmt;

use super::record::{Record, RecordType};

/// Runtime identity of a field or value type
#[derive(Debug, Clone, Copy)]
pub struct ValueType {
    /// Type identity used for the same-type check before assignment
    pub id: TypeId,
    /// Human-readable type name for diagnostics
    pub name: &'static str,
}

impl ValueType {
    /// The value type of `T`
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How a field participates in conversion
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    /// Stored in the map as a single value, whatever its type
    Value,
    /// A nested record flattened into the parent map
    Record(RecordType),
    /// An optional nested record flattened into the parent map
    OptionalRecord(RecordType),
}

impl FieldShape {
    /// The nested record type, for flattened fields
    #[must_use]
    pub fn nested(&self) -> Option<RecordType> {
        match self {
            Self::Value => None,
            Self::Record(record_type) | Self::OptionalRecord(record_type) => Some(*record_type),
        }
    }
}

/// Declared metadata for one record field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Identifier as declared in the struct
    pub ident: &'static str,
    /// Explicit external name, if any
    pub rename: Option<&'static str>,
    /// Declared type of the field
    pub value_type: ValueType,
    /// Value or flattened nested record
    pub shape: FieldShape,
}

impl FieldSpec {
    /// A field stored as a single map entry
    #[must_use]
    pub fn value<T: Any>(ident: &'static str) -> Self {
        Self {
            ident,
            rename: None,
            value_type: ValueType::of::<T>(),
            shape: FieldShape::Value,
        }
    }

    /// A nested record field whose fields are flattened into the parent
    #[must_use]
    pub fn flatten<R: Record>(ident: &'static str) -> Self {
        Self {
            ident,
            rename: None,
            value_type: ValueType::of::<R>(),
            shape: FieldShape::Record(RecordType::of::<R>()),
        }
    }

    /// An `Option<R>` field whose record fields are flattened into the parent
    #[must_use]
    pub fn flatten_optional<R: Record>(ident: &'static str) -> Self {
        Self {
            ident,
            rename: None,
            value_type: ValueType::of::<Option<R>>(),
            shape: FieldShape::OptionalRecord(RecordType::of::<R>()),
        }
    }

    /// Override the external name of this field
    #[must_use]
    pub fn renamed(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// The name this field is known by in a map: the override if present, else the identifier
    #[must_use]
    pub fn external_name(&self) -> &'static str {
        self.rename.unwrap_or(self.ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_takes_precedence() {
        let spec = FieldSpec::value::<String>("field");
        assert_eq!(spec.external_name(), "field");
        assert_eq!(spec.renamed("myName").external_name(), "myName");
    }

    #[test]
    fn test_value_type_identity() {
        assert_eq!(ValueType::of::<i32>(), ValueType::of::<i32>());
        assert_ne!(ValueType::of::<i32>(), ValueType::of::<Option<i32>>());
        assert_eq!(ValueType::of::<u8>().to_string(), "u8");
    }
}
