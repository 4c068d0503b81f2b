pub mod registry;

use crate::config::ParseConfig;
use crate::error::ScheduleError;
use crate::extraction::PageContent;
use crate::model::ParsedSchedule;
use crate::parsing::fields::ColourRule;
use crate::parsing::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern literals that tune the shared engine to one supplier's layout.
#[derive(Debug)]
pub struct SupplierProfile {
    /// Closed door-family prefixes; empty means the generic pattern only.
    pub door_families: &'static [&'static str],
    /// Digit count range after a family prefix.
    pub family_digits: (usize, usize),
    pub heading_keywords: &'static [&'static str],
    pub colour_rule: ColourRule,
    /// Attempt table extraction before line scanning.
    pub tables: bool,
    /// Whole-word markers that identify the supplier's documents.
    pub detect_keywords: &'static [&'static str],
}

const GENERIC: SupplierProfile = SupplierProfile {
    door_families: &[],
    family_digits: (2, 4),
    heading_keywords: &[
        "Level",
        "Ground",
        "First",
        "Second",
        "Third",
        "Basement",
        "Mezzanine",
        "Clubhouse",
        "Club House",
        "Floor",
        "Wing",
        "Block",
        "Area",
    ],
    colour_rule: ColourRule::None,
    tables: false,
    detect_keywords: &[],
};

const ALLEGION: SupplierProfile = SupplierProfile {
    door_families: &[],
    family_digits: (2, 4),
    heading_keywords: &["Ground", "Level", "Floor", "Basement"],
    colour_rule: ColourRule::Vocabulary,
    tables: false,
    detect_keywords: &["allegion", "schlage"],
};

const DORMAKABA: SupplierProfile = SupplierProfile {
    door_families: &[],
    family_digits: (2, 4),
    heading_keywords: &["Ground", "Level", "Floor", "Basement"],
    colour_rule: ColourRule::Vocabulary,
    tables: false,
    detect_keywords: &["dormakaba", "dorma"],
};

const ARA: SupplierProfile = SupplierProfile {
    door_families: &["ED", "IBF", "ID", "IDS", "IDW", "IFD", "IS"],
    family_digits: (2, 6),
    heading_keywords: &["Clubhouse", "Level", "Ground", "Floor", "Area", "Stage"],
    colour_rule: ColourRule::VocabularyOrShortToken,
    tables: true,
    detect_keywords: &["ara"],
};

const JK: SupplierProfile = SupplierProfile {
    door_families: &[],
    family_digits: (2, 4),
    heading_keywords: &["Ground", "First", "Second", "Level", "Floor"],
    colour_rule: ColourRule::None,
    tables: false,
    detect_keywords: &["jk"],
};

/// The closed set of supported schedule layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Supplier {
    Generic,
    Allegion,
    Dormakaba,
    Ara,
    Jk,
}

impl Supplier {
    /// Every supplier, in auto-detection priority order, with the fallback last.
    pub const ALL: [Supplier; 5] = [
        Supplier::Allegion,
        Supplier::Dormakaba,
        Supplier::Ara,
        Supplier::Jk,
        Supplier::Generic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Supplier::Generic => "generic",
            Supplier::Allegion => "allegion",
            Supplier::Dormakaba => "dormakaba",
            Supplier::Ara => "ara",
            Supplier::Jk => "jk",
        }
    }

    /// Case-insensitive exact lookup by name.
    pub fn from_name(name: &str) -> Option<Supplier> {
        let name = name.trim();
        Supplier::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn profile(&self) -> &'static SupplierProfile {
        match self {
            Supplier::Generic => &GENERIC,
            Supplier::Allegion => &ALLEGION,
            Supplier::Dormakaba => &DORMAKABA,
            Supplier::Ara => &ARA,
            Supplier::Jk => &JK,
        }
    }

    /// Parse one document's pages with this supplier's rules.
    pub fn parse(
        &self,
        pages: &[PageContent],
        config: &ParseConfig,
    ) -> Result<ParsedSchedule, ScheduleError> {
        let engine = Engine::new(self.profile(), config)?;
        let parsed = engine.parse(pages);
        log::info!(
            "{}: {} record(s) from {} page(s), {} line(s) skipped",
            self,
            parsed.records.len(),
            pages.len(),
            parsed.skipped_lines.len()
        );
        Ok(ParsedSchedule {
            supplier: *self,
            records: parsed.records,
            skipped_lines: parsed.skipped_lines,
            pages: parsed.pages,
        })
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Supplier::from_name("ARA"), Some(Supplier::Ara));
        assert_eq!(Supplier::from_name(" Dormakaba "), Some(Supplier::Dormakaba));
        assert_eq!(Supplier::from_name("unknown-brand"), None);
        assert_eq!(Supplier::from_name("allegio"), None);
    }

    #[test]
    fn test_only_ara_reads_tables() {
        for s in Supplier::ALL {
            assert_eq!(s.profile().tables, s == Supplier::Ara, "{s}");
        }
    }

    #[test]
    fn test_generic_has_no_refinements() {
        let p = Supplier::Generic.profile();
        assert!(p.door_families.is_empty());
        assert_eq!(p.colour_rule, ColourRule::None);
        assert!(p.detect_keywords.is_empty());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Supplier::Jk).unwrap(), "\"jk\"");
    }
}
