use crate::db::pool::DbPool;
use crate::db::records::{self, RecordFilter};
use crate::db::settings;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportFormat, notify_export_success};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::pdf_export::export_pdf;
use crate::export::performance_pdf::SheetHeader;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export visit records.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"`, or `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
    ///   and the `start:end` forms of those
    ///
    /// Returns the number of exported rows; nothing is written when the
    /// selection is empty.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        client_id: Option<i64>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let rows = Self::load(pool, bounds, client_id)?;

        if rows.is_empty() {
            warning("No records found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        info(format!(
            "Exporting {} visit(s) to {}: {}",
            rows.len(),
            format.label(),
            path.display()
        ));

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
            ExportFormat::Pdf => export_pdf(&rows, path, &SheetHeader::from_settings(pool)?)?,
        }

        notify_export_success(format.label(), path);

        Ok(rows.len())
    }

    /// Export rows in chronological order.
    pub fn load(
        pool: &DbPool,
        bounds: Option<(NaiveDate, NaiveDate)>,
        client_id: Option<i64>,
    ) -> AppResult<Vec<RecordExport>> {
        let filter = RecordFilter {
            client_id,
            from: bounds.map(|b| b.0),
            to: bounds.map(|b| b.1),
            ..RecordFilter::default()
        };

        let mut views = records::query(pool, &filter)?;
        views.sort_by(|a, b| {
            (a.record.date, a.record.start_time, a.record.id).cmp(&(
                b.record.date,
                b.record.start_time,
                b.record.id,
            ))
        });

        let labels = settings::all(pool)?;
        Ok(views
            .iter()
            .map(|v| RecordExport::from_view(v, &labels))
            .collect())
    }
}
