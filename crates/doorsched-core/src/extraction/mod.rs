pub mod ocr;
pub mod pdftotext;
pub mod table;
pub mod xlsx;

use crate::config::ExtractOptions;
use crate::error::ScheduleError;

/// One row of a page-local table grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Approximate line position of the row on its page.
    pub line_index: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTable {
    pub rows: Vec<TableRow>,
}

/// Content extracted from a single page of a schedule.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
    pub tables: Vec<PageTable>,
}

impl PageContent {
    /// A page with text only and no detected tables.
    pub fn from_text(page_number: usize, text: &str) -> Self {
        PageContent {
            page_number,
            lines: text.lines().map(|l| l.to_string()).collect(),
            tables: vec![],
        }
    }
}

/// Build table-less pages from plain per-page text, numbered from 1.
pub fn pages_from_text<S: AsRef<str>>(texts: &[S]) -> Vec<PageContent> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| PageContent::from_text(i + 1, t.as_ref()))
        .collect()
}

/// Trait for schedule acquisition backends.
pub trait ScheduleExtractor: Send + Sync {
    /// Extract page text (and tables, where the backend finds them) from document bytes.
    fn extract_pages(
        &self,
        bytes: &[u8],
        options: &ExtractOptions,
    ) -> Result<Vec<PageContent>, ScheduleError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// True for `.xlsx` workbook bytes (a zip archive); everything else is
/// treated as PDF.
pub fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(b"PK\x03\x04")
}

/// Routes each document to the PDF or workbook backend by its leading bytes.
#[derive(Default)]
pub struct AutoExtractor {
    pdf: pdftotext::PdftotextExtractor,
    xlsx: xlsx::XlsxExtractor,
}

impl AutoExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn backend_for(&self, bytes: &[u8]) -> &dyn ScheduleExtractor {
        if is_workbook(bytes) {
            &self.xlsx
        } else {
            &self.pdf
        }
    }
}

impl ScheduleExtractor for AutoExtractor {
    fn extract_pages(
        &self,
        bytes: &[u8],
        options: &ExtractOptions,
    ) -> Result<Vec<PageContent>, ScheduleError> {
        let backend = self.backend_for(bytes);
        log::debug!("extracting with {}", backend.backend_name());
        backend.extract_pages(bytes, options)
    }

    fn backend_name(&self) -> &str {
        "auto"
    }
}
