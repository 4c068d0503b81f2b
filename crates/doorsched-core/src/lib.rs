pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod supplier;

use config::{ParseConfig, PipelineConfig};
use error::ScheduleError;
use extraction::{PageContent, ScheduleExtractor};
use model::{BatchResult, DocumentOutcome, ParsedSchedule};
use supplier::registry::SupplierRegistry;

/// A named document submitted to a batch.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Main API entry point: parse one document's acquired pages into records.
///
/// The supplier comes from `hint` when given (an unknown name is an error),
/// otherwise from keyword detection with the generic layout as fallback.
pub fn parse_pages(
    pages: &[PageContent],
    hint: Option<&str>,
    registry: &SupplierRegistry,
    config: &ParseConfig,
) -> Result<ParsedSchedule, ScheduleError> {
    let supplier = registry.select(hint, pages)?;
    supplier.parse(pages, config)
}

/// Acquire a document's pages with `extractor`, then parse them.
pub fn parse_document(
    bytes: &[u8],
    extractor: &dyn ScheduleExtractor,
    hint: Option<&str>,
    registry: &SupplierRegistry,
    config: &PipelineConfig,
) -> Result<ParsedSchedule, ScheduleError> {
    let pages = extractor.extract_pages(bytes, &config.extract)?;
    parse_pages(&pages, hint, registry, &config.parse)
}

/// Parse every document independently. A failing document is recorded in
/// its outcome and does not stop its siblings.
pub fn parse_batch(
    documents: &[SourceDocument],
    extractor: &dyn ScheduleExtractor,
    hint: Option<&str>,
    registry: &SupplierRegistry,
    config: &PipelineConfig,
) -> BatchResult {
    let mut batch = BatchResult::default();

    for doc in documents {
        let result = parse_document(&doc.bytes, extractor, hint, registry, config);
        if let Err(e) = &result {
            log::warn!("{}: {}", doc.name, e);
        }
        batch.documents.push(DocumentOutcome {
            name: doc.name.clone(),
            result,
        });
    }

    batch
}
