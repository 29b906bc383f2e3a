use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A4 in points.
const A4_SHORT: f32 = 595.0;
const A4_LONG: f32 = 842.0;

/// Helvetica only covers printable ASCII here; anything else becomes `?`.
pub(crate) fn pdf_text(s: &str) -> String {
    s.chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { '?' })
        .collect()
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    /// Portrait A4.
    pub fn new() -> Self {
        Self::with_page(A4_SHORT, A4_LONG, 50.0)
    }

    /// Landscape A4 with narrower margins, for day grids.
    pub fn landscape() -> Self {
        let mut m = Self::with_page(A4_LONG, A4_SHORT, 30.0);
        m.row_h = 16.0;
        m.font_size = 8.0;
        m.header_font_size = 8.0;
        m
    }

    fn with_page(page_w: f32, page_h: f32, margin: f32) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w,
            page_h,
            margin,
            row_h: 20.0,

            next_id: 4,
            font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let text = pdf_text(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], size: f32) {
        let mut x = self.margin;
        for (i, w) in col_widths.iter().enumerate() {
            if let Some(text) = row.get(i) {
                self.draw_text(content, x + 3.0, y + 5.0, size, text);
            }
            self.draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    /// Title and subtitle lines; returns the y where the table starts.
    fn draw_page_header_footer(
        &self,
        content: &mut Content,
        title: &str,
        subtitle: &[String],
        page: usize,
    ) -> f32 {
        let mut y = self.page_h - self.margin + 15.0;
        self.draw_text(content, self.margin, y, self.title_font_size, title);

        for line in subtitle {
            y -= self.font_size + 6.0;
            self.draw_text(content, self.margin, y, self.font_size, line);
        }

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 20.0,
            self.font_size,
            &pg,
        );

        y - 15.0 - self.row_h
    }

    /// Multi-page table with fixed column widths, subtitle lines under the
    /// title and an optional `summary` line under the last row.
    pub fn write_sheet(
        &mut self,
        title: &str,
        subtitle: &[String],
        headers: &[String],
        rows: &[Vec<String>],
        col_widths: &[f32],
        summary: Option<&str>,
    ) {
        self.render_table(title, subtitle, headers, rows, col_widths, summary);
    }

    fn render_table(
        &mut self,
        title: &str,
        subtitle: &[String],
        header_row: &[String],
        rows: &[Vec<String>],
        col_widths: &[f32],
        summary: Option<&str>,
    ) {
        let table_w: f32 = col_widths.iter().sum();
        // The summary line takes one row height on the last page.
        let reserve = if summary.is_some() { self.row_h } else { 0.0 };
        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            let mut y = self.draw_page_header_footer(&mut content, title, subtitle, page_idx);

            self.fill_band(&mut content, y, table_w, (0.85, 0.87, 0.90));
            self.draw_row(&mut content, y, col_widths, header_row, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin + reserve {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, (0.96, 0.96, 0.96));
                }
                self.draw_row(&mut content, y, col_widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }

            remaining = &remaining[consumed..];

            if remaining.is_empty()
                && let Some(line) = summary
            {
                self.draw_text(&mut content, self.margin, y + 5.0, self.header_font_size, line);
            }

            self.finalize_page(content);
            page_idx += 1;

            // An empty table still gets one page with its header.
            if remaining.is_empty() || consumed == 0 {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_text_replaces_non_ascii() {
        assert_eq!(pdf_text("Sato ●"), "Sato ?");
        assert_eq!(pdf_text("山田"), "??");
        assert_eq!(pdf_text("09:00-10:00"), "09:00-10:00");
    }
}
