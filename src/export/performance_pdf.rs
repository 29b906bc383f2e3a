//! Monthly planned/actual sheet, one landscape page per client.

use crate::core::performance::ClientPerformance;
use crate::db::pool::DbPool;
use crate::db::settings::{self, COORDINATOR, OFFICE_NAME};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, notify_export_success};
use crate::export::pdf::PdfManager;
use crate::models::weekday::DayOfWeek;
use crate::ui::messages::info;
use crate::utils::date::{days_in_month, month_name};
use crate::utils::formatting::service_label;
use crate::utils::time::format_time;
use std::path::Path;

const SERVICE_W: f32 = 110.0;
const TIME_W: f32 = 38.0;
const KIND_W: f32 = 44.0;
const TOTAL_W: f32 = 34.0;

/// Office header shown on every sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetHeader {
    pub office_name: Option<String>,
    pub coordinator: Option<String>,
}

impl SheetHeader {
    /// Office name and coordinator from the settings store.
    pub fn from_settings(pool: &DbPool) -> AppResult<Self> {
        Ok(Self {
            office_name: settings::get(pool, OFFICE_NAME)?,
            coordinator: settings::get(pool, COORDINATOR)?,
        })
    }
}

fn day_headers(year: i32, month: u32, last_day: u32) -> Vec<String> {
    (1..=last_day)
        .map(|d| match DayOfWeek::of_ymd(year, month, d) {
            Some(wd) => format!("{}{}", d, &wd.short()[..1]),
            None => d.to_string(),
        })
        .collect()
}

fn grid_rows(sheet: &ClientPerformance, last_day: u32) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for g in &sheet.groups {
        for (kind, days) in [("Planned", &g.planned_days), ("Actual", &g.actual_days)] {
            let first = kind == "Planned";
            let mut row = vec![
                if first {
                    service_label(g.service_type_name.as_deref()).to_string()
                } else {
                    String::new()
                },
                if first { format_time(g.start_time) } else { String::new() },
                kind.to_string(),
            ];
            row.extend((1..=last_day).map(|d| {
                if days.contains(&d) { "x".to_string() } else { String::new() }
            }));
            row.push(days.len().to_string());
            rows.push(row);
        }
    }

    let (planned, actual) = sheet.totals();
    let mut total_p = vec!["Total".to_string(), String::new(), "Planned".to_string()];
    total_p.extend((1..=last_day).map(|_| String::new()));
    total_p.push(planned.to_string());
    let mut total_a = vec![String::new(), String::new(), "Actual".to_string()];
    total_a.extend((1..=last_day).map(|_| String::new()));
    total_a.push(actual.to_string());
    rows.push(total_p);
    rows.push(total_a);

    rows
}

pub fn export_performance_pdf(
    sheets: &[ClientPerformance],
    year: i32,
    month: u32,
    head: &SheetHeader,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting performance sheet to PDF: {}", path.display()));

    let last_day = days_in_month(year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{year:04}-{month:02}")))?;

    let mut pdf = PdfManager::landscape();

    let fixed = SERVICE_W + TIME_W + KIND_W + TOTAL_W;
    let day_w = (pdf.usable_width() - fixed) / last_day as f32;

    let mut widths = vec![SERVICE_W, TIME_W, KIND_W];
    widths.extend((1..=last_day).map(|_| day_w));
    widths.push(TOTAL_W);

    let mut headers = vec!["Service".to_string(), "Time".to_string(), String::new()];
    headers.extend(day_headers(year, month, last_day));
    headers.push("Sum".to_string());

    let mut subtitle = Vec::new();
    if let Some(office) = head.office_name.as_deref().filter(|s| !s.trim().is_empty()) {
        subtitle.push(format!("Office: {office}"));
    }
    if let Some(coord) = head.coordinator.as_deref().filter(|s| !s.trim().is_empty()) {
        subtitle.push(format!("Coordinator: {coord}"));
    }

    for sheet in sheets {
        let title = format!(
            "Service record {} {} - {}",
            month_name(month),
            year,
            sheet.client.full_name()
        );
        pdf.write_sheet(
            &title,
            &subtitle,
            &headers,
            &grid_rows(sheet, last_day),
            &widths,
            None,
        );
    }

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success(ExportFormat::Pdf.label(), path);
    Ok(())
}
