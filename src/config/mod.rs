//! Configuration for the `Converter`.

/// Configuration for the `Converter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Fail with a list of skipped fields instead of skipping silently
    pub strict: bool,
    /// Allocate absent optional nested records while reading a record
    ///
    /// When set, record-to-map conversion writes a default record into every
    /// `None` flattened optional field it encounters, so the input record is
    /// modified and the map contains the default's keys. When unset, an
    /// absent record contributes no keys and the input is left untouched.
    pub materialize_optional: bool,
    /// Only fall back to case-insensitive matching when the exact match failed
    ///
    /// By default the case-insensitive scan always runs, so one key can
    /// assign several fields whose names differ only in case.
    pub exclusive_exact_match: bool,
    /// Log every skipped field at trace level
    pub log_skips: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            strict: false,
            materialize_optional: true,
            exclusive_exact_match: false,
            log_skips: false,
        }
    }
}

impl ConverterConfig {
    /// Enable or disable strict mode
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable materialization of absent optional records
    #[must_use]
    pub fn with_materialize_optional(mut self, materialize: bool) -> Self {
        self.materialize_optional = materialize;
        self
    }

    /// Enable or disable exclusive exact matching
    #[must_use]
    pub fn with_exclusive_exact_match(mut self, exclusive: bool) -> Self {
        self.exclusive_exact_match = exclusive;
        self
    }

    /// Enable or disable trace logging of skipped fields
    #[must_use]
    pub fn with_log_skips(mut self, log_skips: bool) -> Self {
        self.log_skips = log_skips;
        self
    }

    /// Whether skips need to be recorded at all
    pub(crate) fn tracks_skips(&self) -> bool {
        self.strict || self.log_skips
    }
}
