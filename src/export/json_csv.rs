use crate::errors::{AppError, AppResult};
use crate::export::RecordExport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Spreadsheet applications need the BOM to detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(crate) fn export_json(rows: &[RecordExport], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

pub(crate) fn export_csv(rows: &[RecordExport], path: &Path) -> AppResult<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut wtr = csv::Writer::from_writer(file);
    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.flush()?;
    Ok(())
}
