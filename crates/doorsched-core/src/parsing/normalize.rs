/// Collapse every whitespace run (including non-breaking spaces) to one
/// space and trim both ends. Total: garbage in, possibly-empty string out.
pub fn normalize_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a line at gaps of two or more whitespace characters (or a tab).
///
/// Returns each segment with its starting character column, so callers can
/// align segments against a header row.
pub fn gap_segments(line: &str) -> Vec<(usize, &str)> {
    let mut segments = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut end = 0;
    let mut gap = 0;

    for (col, (i, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            gap += if c == '\t' { 2 } else { 1 };
            if gap >= 2 {
                if let Some((scol, sbyte)) = start.take() {
                    segments.push((scol, &line[sbyte..end]));
                }
            }
        } else {
            if start.is_none() {
                start = Some((col, i));
            }
            gap = 0;
            end = i + c.len_utf8();
        }
    }

    if let Some((scol, sbyte)) = start {
        segments.push((scol, &line[sbyte..end]));
    }

    segments
}

/// A line laid out in columns (an interior multi-space gap or a tab).
pub fn is_columnar(line: &str) -> bool {
    gap_segments(line).len() >= 2
}

/// Render a heading line as an area name: keep letters, digits, spaces and
/// hyphens, collapse spaces, then title-case each alphabetic run.
pub fn area_title(line: &str) -> String {
    let kept: String = line
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
        .collect();
    title_case(&normalize_line(&kept))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(
            normalize_line("  ED01  STAFF\tENTRY \u{a0} L9D11S/30  2 "),
            "ED01 STAFF ENTRY L9D11S/30 2"
        );
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize_line(""), "");
        assert_eq!(normalize_line(" \u{a0}\t "), "");
    }

    #[test]
    fn test_gap_segments_with_columns() {
        let segs = gap_segments("ED01  STAFF ENTRY  L9D11S/30  2");
        assert_eq!(
            segs,
            vec![(0, "ED01"), (6, "STAFF ENTRY"), (19, "L9D11S/30"), (30, "2")]
        );
    }

    #[test]
    fn test_gap_segments_tab_splits() {
        let segs = gap_segments("ED01\tLever");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].1, "Lever");
    }

    #[test]
    fn test_is_columnar() {
        assert!(is_columnar("  ED01  STAFF ENTRY  2"));
        assert!(!is_columnar("  GROUND FLOOR  "));
    }

    #[test]
    fn test_area_title() {
        assert_eq!(area_title("GROUND FLOOR"), "Ground Floor");
        assert_eq!(area_title("LEVEL 1A - NORTH WING:"), "Level 1A - North Wing");
        assert_eq!(area_title("club   house (stage 2)"), "Club House Stage 2");
    }
}
