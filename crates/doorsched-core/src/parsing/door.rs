use crate::error::ScheduleError;
use regex::Regex;
use std::sync::LazyLock;

/// Letters, digits, optional letter, optional `-N`/`-NN`, optional letter.
const GENERIC_DOOR_BODY: &str = r"[A-Z]{1,4}\d{2,4}[A-Z]?(?:-\d{1,2})?[A-Z]?";

static GENERIC_DOOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({GENERIC_DOOR_BODY})\b")).expect("generic door pattern")
});

/// A door identifier found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorMatch {
    /// The matched text, uppercased.
    pub door: String,
    /// Byte offset just past the match in the searched line.
    pub end: usize,
}

/// Leftmost generic door identifier in the line.
pub fn find_generic(line: &str) -> Option<DoorMatch> {
    GENERIC_DOOR_RE.find(line).map(|m| DoorMatch {
        door: m.as_str().to_uppercase(),
        end: m.end(),
    })
}

/// Door recognizer for one supplier: an optional family-restricted pattern
/// tried first, with the generic pattern behind it.
#[derive(Debug, Clone)]
pub struct DoorRecognizer {
    specific: Option<Regex>,
}

impl DoorRecognizer {
    /// Recognizer using only the generic pattern.
    pub fn generic() -> Self {
        DoorRecognizer { specific: None }
    }

    /// Recognizer restricted to a closed family of prefixes, each followed by
    /// `min_digits..=max_digits` digits and an optional `-X` or single letter.
    pub fn with_families(
        families: &[&str],
        min_digits: usize,
        max_digits: usize,
    ) -> Result<Self, ScheduleError> {
        if families.is_empty() {
            return Ok(Self::generic());
        }
        let alternation = families
            .iter()
            .map(|f| regex::escape(f))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?i)\b(?:{alternation})\d{{{min_digits},{max_digits}}}(?:-[A-Z]|[A-Z])?\b"
        );
        Ok(DoorRecognizer {
            specific: Some(Regex::new(&pattern)?),
        })
    }

    /// Find the door in a line.
    ///
    /// With a family pattern configured, the generic pattern is only consulted
    /// when `structural` says the line is otherwise a schedule row.
    pub fn find(&self, line: &str, structural: bool) -> Option<DoorMatch> {
        match &self.specific {
            None => find_generic(line),
            Some(re) => re
                .find(line)
                .map(|m| DoorMatch {
                    door: m.as_str().to_uppercase(),
                    end: m.end(),
                })
                .or_else(|| if structural { find_generic(line) } else { None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ara() -> DoorRecognizer {
        DoorRecognizer::with_families(&["ED", "IBF", "ID", "IDS", "IDW", "IFD", "IS"], 2, 6)
            .unwrap()
    }

    #[test]
    fn test_generic_leftmost_and_uppercased() {
        let m = find_generic("ed01  staff entry  L9D11S/30  2").unwrap();
        assert_eq!(m.door, "ED01");
        assert_eq!(m.end, 4);
    }

    #[test]
    fn test_generic_suffixes() {
        assert_eq!(find_generic("door IS10B-1 fitted").unwrap().door, "IS10B-1");
        assert_eq!(find_generic("door IS10-B fitted").unwrap().door, "IS10");
        assert_eq!(find_generic("IFD01-2A lever").unwrap().door, "IFD01-2A");
        assert_eq!(find_generic("ABCD1234Z").unwrap().door, "ABCD1234Z");
    }

    #[test]
    fn test_generic_rejects_short_digit_runs() {
        assert!(find_generic("CODE1 lever").is_none());
        assert!(find_generic("GROUND FLOOR").is_none());
        assert!(find_generic("ABCDE12").is_none());
    }

    #[test]
    fn test_generic_ignores_letter_dash_suffix() {
        // -E belongs to the family pattern only
        assert_eq!(find_generic("id11-e closer").unwrap().door, "ID11");
        assert!(find_generic("L9D11S/30").is_none());
    }

    #[test]
    fn test_family_pattern_preferred() {
        let r = ara();
        let m = r.find("LEV123 ED0202 lever", false).unwrap();
        assert_eq!(m.door, "ED0202");
    }

    #[test]
    fn test_family_longest_prefix_via_backtracking() {
        assert_eq!(ara().find("IDS01 closer", false).unwrap().door, "IDS01");
        assert_eq!(ara().find("ID11-E closer", false).unwrap().door, "ID11-E");
    }

    #[test]
    fn test_generic_fallback_only_when_structural() {
        let r = ara();
        assert!(r.find("LEV123 lever handle", false).is_none());
        assert_eq!(r.find("LEV123 lever handle", true).unwrap().door, "LEV123");
    }

    #[test]
    fn test_empty_families_is_generic() {
        let r = DoorRecognizer::with_families(&[], 2, 4).unwrap();
        assert!(r.specific.is_none());
        assert_eq!(r.find("X12 thing", false).unwrap().door, "X12");
    }
}
