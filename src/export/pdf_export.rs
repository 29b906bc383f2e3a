//! Service record sheet: one section per client, each starting on a new page.

use crate::errors::{AppError, AppResult};
use crate::export::RecordExport;
use crate::export::pdf::PdfManager;
use crate::export::performance_pdf::SheetHeader;
use crate::utils::date::month_name;
use crate::utils::formatting::mins2readable;
use chrono::{Datelike, NaiveDate};
use std::path::Path;

const TITLE: &str = "Home-care service record";

/// Date, Service, Time, Min, Care provided, Note, Helper, Confirmed.
const COL_WIDTHS: [f32; 8] = [40.0, 70.0, 62.0, 28.0, 150.0, 70.0, 45.0, 30.0];

/// Rows grouped by client, groups in order of first appearance.
fn group_by_client(rows: &[RecordExport]) -> Vec<Vec<&RecordExport>> {
    let mut groups: Vec<Vec<&RecordExport>> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g[0].client_id == row.client_id) {
            Some(g) => g.push(row),
            None => groups.push(vec![row]),
        }
    }
    groups
}

/// `September 2025` when every visit falls in one month, else the date span.
fn service_period(group: &[&RecordExport]) -> String {
    let dates: Vec<NaiveDate> = group
        .iter()
        .filter_map(|r| NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").ok())
        .collect();

    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last))
            if (first.year(), first.month()) == (last.year(), last.month()) =>
        {
            format!("{} {}", month_name(first.month()), first.year())
        }
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => String::new(),
    }
}

/// `[Body] ...  [Life] ...`, or `-` when nothing was ticked.
fn care_provided(r: &RecordExport) -> String {
    let mut parts = Vec::new();
    if !r.body_tasks.is_empty() {
        parts.push(format!("[Body] {}", r.body_tasks));
    }
    if !r.life_tasks.is_empty() {
        parts.push(format!("[Life] {}", r.life_tasks));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("  ")
    }
}

fn sheet_row(r: &RecordExport) -> Vec<String> {
    vec![
        r.date.get(5..).unwrap_or(&r.date).to_string(),
        r.service.clone(),
        format!("{}-{}", r.start, r.end),
        r.minutes.to_string(),
        care_provided(r),
        r.note.clone(),
        r.helper.clone(),
        r.confirmed.clone(),
    ]
}

/// Visit count and total time of one client.
fn summary_line(group: &[&RecordExport]) -> String {
    let total: i64 = group.iter().map(|r| r.minutes).sum();
    format!(
        "Visits: {}   Total time: {} = {} min",
        group.len(),
        mins2readable(total, false),
        total
    )
}

pub(crate) fn export_pdf(rows: &[RecordExport], path: &Path, head: &SheetHeader) -> AppResult<()> {
    let headers: Vec<String> = [
        "Date", "Service", "Time", "Min", "Care provided", "Note", "Helper", "Conf.",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();

    let office = head.office_name.clone().unwrap_or_default();
    let coordinator = head.coordinator.clone().unwrap_or_default();

    let mut pdf = PdfManager::new();

    for group in group_by_client(rows) {
        let info = vec![
            format!("Office: {office}"),
            format!("Service month: {}", service_period(&group)),
            format!("Client: {}", group[0].client),
            format!("Coordinator: {coordinator}"),
        ];
        let table: Vec<Vec<String>> = group.iter().map(|r| sheet_row(r)).collect();

        pdf.write_sheet(
            TITLE,
            &info,
            &headers,
            &table,
            &COL_WIDTHS,
            Some(summary_line(&group).as_str()),
        );
    }

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(client_id: i64, date: &str, minutes: i64) -> RecordExport {
        RecordExport {
            date: date.to_string(),
            client: format!("client {client_id}"),
            start: "09:00".to_string(),
            end: "10:00".to_string(),
            minutes,
            service: "Body care".to_string(),
            tasks: String::new(),
            note: String::new(),
            helper: "Tanaka Yui".to_string(),
            confirmed: String::new(),
            client_id,
            body_tasks: String::new(),
            life_tasks: String::new(),
        }
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let rows = vec![
            row(2, "2025-09-01", 30),
            row(1, "2025-09-02", 40),
            row(2, "2025-09-03", 45),
        ];
        let groups = group_by_client(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0].client_id, 2);
        assert_eq!(groups[1][0].client_id, 1);
    }

    #[test]
    fn summary_counts_visits_and_minutes() {
        let rows = vec![row(1, "2025-09-01", 40), row(1, "2025-09-08", 45)];
        let group: Vec<&RecordExport> = rows.iter().collect();
        assert_eq!(summary_line(&group), "Visits: 2   Total time: 01h 25m = 85 min");
    }

    #[test]
    fn period_is_month_or_span() {
        let one = vec![row(1, "2025-09-01", 40), row(1, "2025-09-29", 40)];
        let one: Vec<&RecordExport> = one.iter().collect();
        assert_eq!(service_period(&one), "September 2025");

        let span = vec![row(1, "2025-08-25", 40), row(1, "2025-09-01", 40)];
        let span: Vec<&RecordExport> = span.iter().collect();
        assert_eq!(service_period(&span), "2025-08-25 to 2025-09-01");
    }

    #[test]
    fn care_provided_splits_categories() {
        let mut r = row(1, "2025-09-01", 40);
        assert_eq!(care_provided(&r), "-");
        r.body_tasks = "Meal assistance".to_string();
        r.life_tasks = "Cleaning".to_string();
        assert_eq!(care_provided(&r), "[Body] Meal assistance  [Life] Cleaning");
    }
}
