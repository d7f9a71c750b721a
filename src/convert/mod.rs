//! Record/map conversion
//!
//! The [`Converter`] drives both directions of conversion over the field
//! catalog it holds:
//!
//! - record to map: [`Converter::record_to_map`], [`Converter::value_to_map`]
//! - map to record: [`Converter::map_to_record`]
//! - many maps to records: [`Converter::maps_to_records`]
//!
//! Conversion is best effort. A clean return does not mean every field was
//! converted: unmatched keys, mismatched value types and absent optional
//! records are skipped silently unless the converter runs in strict mode.

mod bulk;
mod from_map;
mod to_map;

use std::sync::Arc;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result, SkipReason, Skipped};
use crate::schema::{FieldCatalog, Record};

/// Converts between records and flat maps
///
/// Cloning a converter is cheap and shares its catalog.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    catalog: Arc<FieldCatalog>,
    config: ConverterConfig,
}

impl Converter {
    /// Create a lenient converter with its own catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with its own catalog and the given configuration
    #[must_use]
    pub fn with_config(config: ConverterConfig) -> Self {
        Self::with_catalog(Arc::new(FieldCatalog::new()), config)
    }

    /// Create a converter sharing an existing catalog
    #[must_use]
    pub fn with_catalog(catalog: Arc<FieldCatalog>, config: ConverterConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog this converter resolves record types through
    #[must_use]
    pub fn catalog(&self) -> &Arc<FieldCatalog> {
        &self.catalog
    }

    /// The converter configuration
    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Resolve `R` and the record types nested in it ahead of time
    ///
    /// Registration makes `R` and `Option<R>` recognizable by
    /// [`Converter::value_to_map`]. Typed conversions register on first use.
    pub fn register<R: Record>(&self) {
        let entry = self.catalog.resolve::<R>();
        entry.flat_index(&self.catalog);
    }
}

/// Collects skipped fields for strict mode and skip logging
struct Skips<'c> {
    config: &'c ConverterConfig,
    skipped: Vec<Skipped>,
}

impl<'c> Skips<'c> {
    fn new(config: &'c ConverterConfig) -> Self {
        Self {
            config,
            skipped: Vec::new(),
        }
    }

    fn push(&mut self, key: &str, reason: SkipReason) {
        if !self.config.tracks_skips() {
            return;
        }
        let skipped = Skipped::new(key, reason);
        if self.config.log_skips {
            log::trace!("Skipped {skipped}");
        }
        if self.config.strict {
            self.skipped.push(skipped);
        }
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.skipped.is_empty() {
            Ok(value)
        } else {
            Err(ConvertError::Incomplete {
                skipped: self.skipped,
            })
        }
    }
}
