use crate::supplier::Supplier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hardware line item fitted to a door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Building zone the item belongs to. Never empty.
    pub area: String,
    /// Door/opening identifier, uppercased.
    pub door: String,
    /// Supplier product code; empty when it could not be picked out.
    pub code: String,
    /// Always at least 1.
    pub quantity: u32,
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Table,
    Lines,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Table => write!(f, "table"),
            ExtractionMethod::Lines => write!(f, "lines"),
        }
    }
}

/// A non-heading line that yielded no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub page_number: usize,
    pub line_index: usize,
    pub text: String,
    pub reason: String,
}

/// Per-page diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page_number: usize,
    pub method: ExtractionMethod,
    pub records: usize,
    pub skipped: usize,
}

/// Output of parsing one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSchedule {
    pub supplier: Supplier,
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
    pub pages: Vec<PageSummary>,
}

/// Outcome for one document of a batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub name: String,
    pub result: Result<ParsedSchedule, crate::error::ScheduleError>,
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub documents: Vec<DocumentOutcome>,
}

impl BatchResult {
    /// Records of every successfully parsed document, in input order.
    pub fn records(&self) -> Vec<Record> {
        self.documents
            .iter()
            .filter_map(|d| d.result.as_ref().ok())
            .flat_map(|p| p.records.iter().cloned())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| d.result.is_err())
    }
}
