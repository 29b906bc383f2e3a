use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::RecordExport;
use crate::export::model::get_headers;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Columns written as plain text even when they look numeric.
const TEXT_COLUMNS: [&str; 3] = ["client", "note", "helper"];

pub(crate) fn export_xlsx(rows: &[RecordExport], path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Visits").map_err(xlsx_err)?;

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, rec) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in rec.to_row().iter().enumerate() {
            let as_text = TEXT_COLUMNS.contains(&headers[col]);
            write_cell(worksheet, row, col as u16, value, band, as_text)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_err)?;
    }

    let target = path
        .to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))?;
    workbook.save(target).map_err(xlsx_err)?;
    Ok(())
}

/// Dates and times become Excel serials, numbers stay numeric.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    as_text: bool,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if !as_text {
        if let Some((num_format, serial)) = parse_to_excel_date(s) {
            worksheet
                .write_with_format(row, col, serial, &base.set_num_format(num_format))
                .map_err(xlsx_err)?;
            return Ok(());
        }

        if let Ok(num) = s.parse::<f64>() {
            worksheet
                .write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
                .map_err(xlsx_err)?;
            return Ok(());
        }
    }

    worksheet
        .write_with_format(row, col, s, &base)
        .map_err(xlsx_err)?;
    Ok(())
}

fn xlsx_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
