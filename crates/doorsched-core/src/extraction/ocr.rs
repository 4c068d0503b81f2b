use crate::error::ScheduleError;
use std::path::Path;
use std::process::Command;

/// Rasterize one PDF page with pdftoppm and read it back with tesseract.
pub fn ocr_page(pdf_path: &Path, page_number: usize, dpi: u32) -> Result<String, ScheduleError> {
    let workdir = tempfile::tempdir().map_err(|e| ScheduleError::Extraction(e.to_string()))?;
    let prefix = workdir.path().join("page");
    let page = page_number.to_string();
    let dpi = dpi.to_string();

    let output = Command::new("pdftoppm")
        .args(["-f", page.as_str(), "-l", page.as_str(), "-r", dpi.as_str()])
        .args(["-png", "-singlefile"])
        .arg(pdf_path)
        .arg(&prefix)
        .output()
        .map_err(|e| missing_or_failed(e, page_number))?;

    if !output.status.success() {
        return Err(ScheduleError::OcrFailed {
            page: page_number,
            reason: format!(
                "pdftoppm exited with {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let image = prefix.with_extension("png");
    let output = Command::new("tesseract")
        .arg(&image)
        .arg("stdout")
        .output()
        .map_err(|e| missing_or_failed(e, page_number))?;

    if !output.status.success() {
        return Err(ScheduleError::OcrFailed {
            page: page_number,
            reason: format!(
                "tesseract exited with {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Check if both OCR tools are on the PATH.
pub fn is_available() -> bool {
    let probe = |tool: &str| {
        Command::new(tool)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    };
    probe("pdftoppm") && probe("tesseract")
}

fn missing_or_failed(e: std::io::Error, page: usize) -> ScheduleError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ScheduleError::OcrNotFound
    } else {
        ScheduleError::OcrFailed {
            page,
            reason: e.to_string(),
        }
    }
}
