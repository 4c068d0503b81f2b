use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::config::ExtractOptions;
use crate::error::ScheduleError;
use crate::extraction::{PageContent, PageTable, ScheduleExtractor, TableRow};

/// Reads a hardware schedule exported to a workbook.
///
/// Every worksheet becomes one page. The sheet grid is the page's single
/// table, and each non-empty row is also rendered as a layout line (cells
/// joined by two spaces) so heading detection and line fallback see it.
pub struct XlsxExtractor;

impl XlsxExtractor {
    pub fn new() -> Self {
        XlsxExtractor
    }
}

impl Default for XlsxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleExtractor for XlsxExtractor {
    fn extract_pages(
        &self,
        bytes: &[u8],
        _options: &ExtractOptions,
    ) -> Result<Vec<PageContent>, ScheduleError> {
        let cursor = Cursor::new(bytes);
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
            .map_err(|e| ScheduleError::Workbook(format!("failed to open xlsx: {e}")))?;

        let mut pages = Vec::new();
        for (i, (name, range)) in workbook.worksheets().into_iter().enumerate() {
            let page = sheet_to_page(i + 1, &range);
            log::debug!(
                "sheet '{}': {} lines, {} table row(s)",
                name,
                page.lines.len(),
                page.tables.first().map_or(0, |t| t.rows.len())
            );
            pages.push(page);
        }

        if pages.is_empty() {
            return Err(ScheduleError::Workbook("workbook has no worksheets".into()));
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}

fn sheet_to_page(page_number: usize, range: &Range<Data>) -> PageContent {
    let mut lines = Vec::new();
    let mut rows = Vec::new();

    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|c| c.is_empty()) {
            lines.push(String::new());
            continue;
        }
        let line = cells
            .iter()
            .filter(|c| !c.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("  ");
        rows.push(TableRow {
            line_index: lines.len(),
            cells,
        });
        lines.push(line);
    }

    let tables = if rows.is_empty() {
        vec![]
    } else {
        vec![PageTable { rows }]
    };

    PageContent {
        page_number,
        lines,
        tables,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}").trim().to_string(),
    }
}

/// Integral floats (quantities typed into a spreadsheet) render without ".0".
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
