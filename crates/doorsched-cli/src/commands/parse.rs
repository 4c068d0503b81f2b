use doorsched_core::config::{load_config, PipelineConfig};
use doorsched_core::error::ScheduleError;
use doorsched_core::extraction::pdftotext::PdftotextExtractor;
use doorsched_core::extraction::{is_workbook, ocr, AutoExtractor};
use doorsched_core::supplier::registry::{SupplierRegistry, AUTO};
use doorsched_core::{parse_batch, SourceDocument};
use std::path::PathBuf;

use crate::output;

pub struct ParseArgs {
    pub input_files: Vec<PathBuf>,
    pub supplier: String,
    pub force_ocr: bool,
    pub output_format: String,
    pub output_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

pub fn run(args: ParseArgs) -> Result<(), ScheduleError> {
    let mut config = match &args.config_file {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    config.extract.force_ocr |= args.force_ocr;

    let registry = SupplierRegistry::builtin()?;
    let hint = Some(args.supplier.as_str()).filter(|s| !s.eq_ignore_ascii_case(AUTO));
    if hint.is_some() {
        // Reject an unknown supplier before touching any file.
        registry.select(hint, &[])?;
    }

    let total = args.input_files.len();
    let mut documents = Vec::new();
    let mut failed = 0;
    for path in &args.input_files {
        match std::fs::read(path) {
            Ok(bytes) => documents.push(SourceDocument {
                name: path.display().to_string(),
                bytes,
            }),
            Err(e) => {
                eprintln!("  {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    // PDFs need poppler, and forced OCR needs tesseract too.
    if documents.iter().any(|d| !is_workbook(&d.bytes)) {
        if !PdftotextExtractor::is_available() {
            return Err(ScheduleError::PdftotextNotFound);
        }
        if config.extract.force_ocr && !ocr::is_available() {
            return Err(ScheduleError::OcrNotFound);
        }
    }

    let extractor = AutoExtractor::new();
    let batch = parse_batch(&documents, &extractor, hint, &registry, &config);

    for doc in &batch.documents {
        match &doc.result {
            Ok(parsed) => {
                eprintln!(
                    "{}: {} ({} page(s)) -> {} record(s)",
                    doc.name,
                    parsed.supplier,
                    parsed.pages.len(),
                    parsed.records.len()
                );
                if !parsed.skipped_lines.is_empty() {
                    eprintln!(
                        "  {} line(s) skipped during parsing",
                        parsed.skipped_lines.len()
                    );
                }
            }
            Err(e) => {
                eprintln!("{}: failed: {}", doc.name, e);
                failed += 1;
            }
        }
    }

    if failed == total {
        return Err(ScheduleError::Extraction(format!(
            "none of {total} document(s) could be parsed"
        )));
    }

    let records = batch.records();
    let rendered = match args.output_format.as_str() {
        "json" => output::json::render(&records)?,
        "jsonl" => output::json::render_lines(&records)?,
        _ if args.output_file.is_some() => output::json::render(&records)?,
        _ => output::table::render(&records),
    };

    match args.output_file {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            eprintln!("{} record(s) written to {}", records.len(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
