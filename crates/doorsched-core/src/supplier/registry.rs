use crate::error::ScheduleError;
use crate::extraction::PageContent;
use crate::supplier::Supplier;
use regex::Regex;

/// Hint value that asks for auto-detection.
pub const AUTO: &str = "auto";

/// Supplier lookup for one run: explicit hints, keyword auto-detection, and
/// the generic fallback.
#[derive(Debug, Clone)]
pub struct SupplierRegistry {
    detectors: Vec<(Supplier, Regex)>,
}

impl SupplierRegistry {
    /// Registry of every built-in supplier, detected in priority order.
    pub fn builtin() -> Result<Self, ScheduleError> {
        Self::new(&Supplier::ALL)
    }

    /// Registry over the given suppliers; their order is the detection
    /// priority. The generic fallback is always available.
    pub fn new(suppliers: &[Supplier]) -> Result<Self, ScheduleError> {
        let mut detectors: Vec<(Supplier, Regex)> = Vec::new();
        for &supplier in suppliers {
            if supplier == Supplier::Generic || detectors.iter().any(|(s, _)| *s == supplier) {
                continue;
            }
            let keywords = supplier.profile().detect_keywords;
            if keywords.is_empty() {
                continue;
            }
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            detectors.push((supplier, Regex::new(&format!(r"\b(?:{alternation})\b"))?));
        }
        Ok(SupplierRegistry { detectors })
    }

    /// Registered supplier names, fallback last.
    pub fn names(&self) -> Vec<&'static str> {
        self.detectors
            .iter()
            .map(|(s, _)| s.name())
            .chain(std::iter::once(Supplier::Generic.name()))
            .collect()
    }

    /// Pick the supplier for a document.
    ///
    /// A named hint must be registered; an absent, empty or `auto` hint
    /// falls through to detection, which never fails.
    pub fn select(
        &self,
        hint: Option<&str>,
        pages: &[PageContent],
    ) -> Result<Supplier, ScheduleError> {
        match hint.map(str::trim) {
            Some(name) if !name.is_empty() && !name.eq_ignore_ascii_case(AUTO) => {
                let supplier = Supplier::from_name(name)
                    .filter(|s| self.is_registered(*s))
                    .ok_or_else(|| ScheduleError::UnsupportedSupplier {
                        name: name.to_string(),
                        available: self.names().join(", "),
                    })?;
                log::info!("using supplier '{}' from hint", supplier);
                Ok(supplier)
            }
            _ => {
                let supplier = self.detect(pages);
                log::info!("auto-detected supplier '{}'", supplier);
                Ok(supplier)
            }
        }
    }

    /// Scan the lowercased document text for supplier keywords; the first
    /// supplier in priority order with a hit wins.
    pub fn detect(&self, pages: &[PageContent]) -> Supplier {
        let text = pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        self.detectors
            .iter()
            .find(|(_, re)| re.is_match(&text))
            .map(|(s, _)| *s)
            .unwrap_or(Supplier::Generic)
    }

    fn is_registered(&self, supplier: Supplier) -> bool {
        supplier == Supplier::Generic || self.detectors.iter().any(|(s, _)| *s == supplier)
    }
}
