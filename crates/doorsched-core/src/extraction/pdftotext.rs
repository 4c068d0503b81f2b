use crate::config::ExtractOptions;
use crate::error::ScheduleError;
use crate::extraction::{ocr, table, PageContent, ScheduleExtractor};
use crate::parsing::normalize::normalize_line;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment of tables.
/// Pages with too little native text are OCR'd one at a time.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleExtractor for PdftotextExtractor {
    fn extract_pages(
        &self,
        pdf_bytes: &[u8],
        options: &ExtractOptions,
    ) -> Result<Vec<PageContent>, ScheduleError> {
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| ScheduleError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ScheduleError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(&tmp_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScheduleError::PdftotextNotFound
                } else {
                    ScheduleError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ScheduleError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);

        let mut pages = Vec::new();
        for (i, native) in split_pages(&text).into_iter().enumerate() {
            let page_number = i + 1;
            let page_text = if needs_ocr(native, options) {
                log::warn!(
                    "page {}: {} chars of native text, substituting OCR",
                    page_number,
                    normalize_line(native).chars().count()
                );
                ocr::ocr_page(&tmp_path, page_number, options.ocr_dpi)?
            } else {
                native.to_string()
            };

            let lines: Vec<String> = page_text.lines().map(|l| l.to_string()).collect();
            let tables = table::detect_tables(&lines);
            log::debug!(
                "page {}: {} lines, {} table(s)",
                page_number,
                lines.len(),
                tables.len()
            );
            pages.push(PageContent {
                page_number,
                lines,
                tables,
            });
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output on form feeds. The terminator after the last page
/// leaves an empty trailing piece, which is dropped.
fn split_pages(text: &str) -> Vec<&str> {
    let mut pages: Vec<&str> = text.split('\x0c').collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

fn needs_ocr(native: &str, options: &ExtractOptions) -> bool {
    options.force_ocr || normalize_line(native).chars().count() < options.min_text_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_drops_trailing_terminator() {
        let pages = split_pages("page one\x0cpage two\x0c");
        assert_eq!(pages, vec!["page one", "page two"]);
    }

    #[test]
    fn test_split_pages_keeps_blank_scanned_page() {
        let pages = split_pages("page one\x0c\x0cpage three\x0c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1], "");
    }

    #[test]
    fn test_needs_ocr_on_short_text() {
        let options = ExtractOptions::default();
        assert!(needs_ocr("  \n  ", &options));
        assert!(needs_ocr("ED01 2", &options));
        assert!(!needs_ocr(
            "GROUND FLOOR\nED01  STAFF ENTRY  L9D11S/30  2",
            &options
        ));
    }

    #[test]
    fn test_needs_ocr_when_forced() {
        let options = ExtractOptions {
            force_ocr: true,
            ..Default::default()
        };
        assert!(needs_ocr(
            "GROUND FLOOR\nED01  STAFF ENTRY  L9D11S/30  2",
            &options
        ));
    }
}
