// LogSift - core/export.rs
//
// CSV and JSON export of filtered log records.
// Core layer: writes to any Write trait object; `path` is only used for
// error context.

use crate::core::model::LogRecord;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

fn check_size(count: usize) -> Result<(), ExportError> {
    if count > constants::MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count,
            max: constants::MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}

/// Export records to CSV format.
///
/// Writes: timestamp, level, message
pub fn export_csv<W: Write>(
    records: &[&LogRecord],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    check_size(records.len())?;
    let csv_err = |e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["timestamp", "level", "message"])
        .map_err(csv_err)?;

    for record in records {
        csv_writer
            .write_record([
                record.timestamp.to_rfc3339().as_str(),
                record.level.label(),
                record.message.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(count = records.len(), path = %path.display(), "CSV export complete");
    Ok(records.len())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[&LogRecord],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    check_size(records.len())?;
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(count = records.len(), path = %path.display(), "JSON export complete");
    Ok(records.len())
}
