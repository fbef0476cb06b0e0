//! Paginated PDF table of tracking rows.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use peptrack_core::util::date::DateRange;
use peptrack_db::model::tracking::DailyTracking;

use super::{EXPORT_COLUMNS, row_cells};

const FONT_NAME: Name<'static> = Name(b"F1");

/// Table layout over A4 portrait pages with a single Helvetica font.
struct TableDocument {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl TableDocument {
    fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,

            page_w: 595.0,
            page_h: 842.0,
            margin: 36.0,
            row_h: 16.0,

            font_size: 6.0,
            header_font_size: 6.5,
            title_font_size: 12.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a page and returns the id its content stream must use.
    fn add_page(&mut self) -> Ref {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        page.resources().fonts().pair(FONT_NAME, self.font_id);

        content_id
    }

    fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(FONT_NAME, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(latin1(text).as_slice()));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray + 0.02);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, widths: &[f32], cells: &[String], size: f32) {
        let mut x = self.margin;
        for (cell, width) in cells.iter().zip(widths) {
            Self::draw_text(content, x + 2.0, y + 5.0, size, cell);
            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *width, self.row_h);
            content.stroke();
            content.restore_state();
            x += width;
        }
    }

    /// Sizes columns by their longest cell, scaled down to fit the page.
    #[expect(clippy::cast_precision_loss)]
    fn column_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 3.4).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = width.max(cell.len() as f32 * 3.2);
            }
        }

        let total: f32 = widths.iter().sum();
        let available = self.page_w - 2.0 * self.margin;
        if total > available {
            let scale = available / total;
            for width in &mut widths {
                *width *= scale;
            }
        }
        widths
    }

    fn rows_per_page(&self) -> usize {
        let body = self.page_h - 2.0 * self.margin - 30.0 - self.row_h;
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (body / self.row_h).floor().max(1.0) as usize;
        count
    }

    /// Draws the table across as many pages as needed, repeating the header
    /// on each. An empty table still produces one page with the header.
    fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let widths = self.column_widths(headers, rows);
        let table_w: f32 = widths.iter().sum();
        let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();

        let per_page = self.rows_per_page();
        let mut chunks: Vec<&[Vec<String>]> = rows.chunks(per_page).collect();
        if chunks.is_empty() {
            chunks.push(&[]);
        }

        for (index, chunk) in chunks.into_iter().enumerate() {
            let content_id = self.add_page();
            let mut content = Content::new();

            Self::draw_text(
                &mut content,
                self.margin,
                self.page_h - self.margin + 10.0,
                self.title_font_size,
                title,
            );
            Self::draw_text(
                &mut content,
                self.page_w - self.margin - 40.0,
                self.margin - 20.0,
                self.font_size + 2.0,
                &format!("Page {}", index + 1),
            );

            let mut y = self.page_h - self.margin - 30.0;
            self.fill_band(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &widths, &header_cells, self.header_font_size);
            y -= self.row_h;

            for (i, row) in chunk.iter().enumerate() {
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.96);
                }
                self.draw_row(&mut content, y, &widths, row, self.font_size);
                y -= self.row_h;
            }

            self.pdf.stream(content_id, &content.finish());
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .count(count)
            .kids(self.page_refs.iter().copied());
        self.pdf.finish()
    }
}

/// The base-14 fonts use a single-byte encoding; anything outside Latin-1
/// is replaced with `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// ## Summary
/// Renders tracking rows as a paginated A4 table titled with the range.
#[must_use]
pub fn write_tracking_pdf(rows: &[DailyTracking], range: &DateRange) -> Vec<u8> {
    let title = format!(
        "Daily tracking {} to {}",
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d")
    );
    let cells: Vec<Vec<String>> = rows.iter().map(row_cells).collect();

    let mut document = TableDocument::new();
    document.write_table(&title, &EXPORT_COLUMNS, &cells);
    document.finish()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::export::fixtures::tracking_row;

    fn range() -> DateRange {
        DateRange {
            start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        }
    }

    fn page_count(bytes: &[u8]) -> usize {
        let text = String::from_utf8_lossy(bytes);
        text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
    }

    #[test]
    fn test_empty_export_is_single_page_pdf() {
        let bytes = write_tracking_pdf(&[], &range());

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(String::from_utf8_lossy(&bytes).contains("Helvetica"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_exports_paginate() {
        let per_page = TableDocument::new().rows_per_page();
        let rows: Vec<_> = (0..=per_page)
            .map(|i| tracking_row(1 + u32::try_from(i % 28).unwrap()))
            .collect();

        let single = write_tracking_pdf(&rows[..1], &range());
        let double = write_tracking_pdf(&rows, &range());

        assert_eq!(page_count(&single), 1);
        assert_eq!(page_count(&double), 2);
    }

    #[test]
    fn test_latin1_replaces_wide_chars() {
        assert_eq!(latin1("10–15 µg"), b"10?15 \xb5g".to_vec());
    }
}
