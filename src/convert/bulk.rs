//! Conversion of map sequences

use super::Converter;
use crate::error::Result;
use crate::schema::Record;
use crate::value::RecordMap;

/// Smallest capacity the destination grows to
const MIN_GROWN_CAPACITY: usize = 4;

impl Converter {
    /// Decode a sequence of maps into `records`, one record per map, in order
    ///
    /// Slots already present in `records` are reset to `R::default()` before
    /// being decoded into. The vector grows by half its capacity (at least
    /// to four slots) whenever it runs out of room, and ends up holding
    /// exactly `maps.len()` records.
    ///
    /// # Errors
    ///
    /// Stops at the first map that fails to convert, which only happens in
    /// strict mode. `records` then ends with the record that failed.
    pub fn maps_to_records<R: Record>(
        &self,
        maps: &[RecordMap],
        records: &mut Vec<R>,
    ) -> Result<()> {
        let existing = records.len();
        records.clear();
        records.resize_with(existing, R::default);

        for (position, map) in maps.iter().enumerate() {
            if position >= records.capacity() {
                let grown = (records.capacity() + records.capacity() / 2).max(MIN_GROWN_CAPACITY);
                records.reserve_exact(grown - records.len());
            }
            if position >= records.len() {
                records.push(R::default());
            }
            self.map_to_record(map, &mut records[position])?;
        }

        records.truncate(maps.len());
        log::debug!("Decoded {} maps into {} records", maps.len(), R::type_name());
        Ok(())
    }
}
