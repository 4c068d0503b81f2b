use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("document extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("OCR tools not found. Install tesseract and poppler (pdftoppm) to OCR scanned pages")]
    OcrNotFound,

    #[error("OCR failed on page {page}: {reason}")]
    OcrFailed { page: usize, reason: String },

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("unsupported supplier '{name}'. Available: {available}")]
    UnsupportedSupplier { name: String, available: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    /// True for failures raised while acquiring page text or tables.
    ///
    /// These are scoped to one document; a batch records them and moves on.
    pub fn is_acquisition(&self) -> bool {
        matches!(
            self,
            ScheduleError::Extraction(_)
                | ScheduleError::PdftotextNotFound
                | ScheduleError::PdftotextFailed { .. }
                | ScheduleError::OcrNotFound
                | ScheduleError::OcrFailed { .. }
                | ScheduleError::Workbook(_)
                | ScheduleError::Io(_)
        )
    }
}
