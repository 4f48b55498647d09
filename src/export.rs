//! CSV Export
//!
//! Flat export of every stored submission, one line per row, with a header
//! matching the `participations` table columns.

use std::io;

use crate::db::SUBMISSION_COLUMNS;
use crate::store::StoredSubmission;

/// File name offered to the browser
pub const EXPORT_FILE_NAME: &str = "participations.csv";

/// Write rows as CSV, header first
pub fn write_csv<W: io::Write>(rows: &[StoredSubmission], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SUBMISSION_COLUMNS)?;

    for row in rows {
        wtr.write_record([
            row.id.to_string(),
            row.mode.clone(),
            row.distance.to_string(),
            row.extra_passengers.to_string(),
            row.impact.to_string(),
            row.reason.clone().unwrap_or_default(),
            row.created_at.to_rfc3339(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render rows as UTF-8 CSV bytes
pub fn to_csv_bytes(rows: &[StoredSubmission]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(buf)
}
