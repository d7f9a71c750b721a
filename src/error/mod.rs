//! Error handling for record conversion.
//!
//! Conversion is best effort by default: a field that cannot be converted is
//! skipped and the call still succeeds. The only failure a lenient converter
//! reports is [`ConvertError::NotARecord`]. A strict converter additionally
//! fails with [`ConvertError::Incomplete`], listing every skipped field.

use std::fmt;

/// Why a field or map entry was not converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No field of the record matches the map key
    Unmatched,
    /// The map value's type differs from the field's declared type
    TypeMismatch {
        /// Declared type of the field
        expected: &'static str,
        /// Runtime type of the map value
        found: &'static str,
    },
    /// An optional nested record is `None` and materialization is disabled
    Absent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmatched => write!(f, "no matching field"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected a value of type {expected}, found {found}")
            }
            Self::Absent => write!(f, "optional record is absent"),
        }
    }
}

/// A field or map entry left out of a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Map key, or field name for record-to-map conversion
    pub key: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl Skipped {
    pub(crate) fn new(key: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            key: key.into(),
            reason,
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

/// Errors that can occur during conversion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The value is not a record, nor an `Option` holding one
    #[error("value of type {type_name} is not a record")]
    NotARecord {
        /// Type name of the rejected value
        type_name: &'static str,
    },

    /// Strict mode: some fields or entries were skipped
    #[error("conversion skipped {} field(s), first: {}", .skipped.len(), first_skipped(.skipped))]
    Incomplete {
        /// Every skipped field or entry
        skipped: Vec<Skipped>,
    },
}

fn first_skipped(skipped: &[Skipped]) -> String {
    skipped
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
