use std::path::Path;

use crate::aggregate::ProjectionRecord;
use crate::error::SimError;

/// Write the full per-team statistics table to a CSV file: header row, one
/// row per team. For offline inspection only; nothing reads it back.
pub fn write_csv(path: &Path, records: &[ProjectionRecord]) -> Result<(), SimError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
