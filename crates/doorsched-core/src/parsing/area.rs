use crate::error::ScheduleError;
use crate::parsing::header::canonical_field;
use crate::parsing::normalize::{area_title, is_columnar, normalize_line};
use regex::Regex;
use std::collections::HashSet;

/// Decides which lines are area headings for one supplier layout.
#[derive(Debug, Clone)]
pub struct HeadingRules {
    keywords: Regex,
    min_shape_len: usize,
}

impl HeadingRules {
    pub fn new(keywords: &[&str], min_shape_len: usize) -> Result<Self, ScheduleError> {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Ok(HeadingRules {
            keywords: Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?,
            min_shape_len,
        })
    }

    /// If `raw` is an area heading, return the area name it introduces.
    ///
    /// Columnar data lines are never headings. Otherwise a zone keyword, or
    /// an all-caps digit-free line of sufficient length, makes a heading.
    /// Lines that spell out table column names are not headings.
    pub fn heading(&self, raw: &str) -> Option<String> {
        if is_columnar(raw) {
            return None;
        }
        let line = normalize_line(raw);
        if line.is_empty() || names_table_columns(&line) {
            return None;
        }

        let is_heading = self.keywords.is_match(&line) || self.is_heading_shape(&line);
        if !is_heading {
            return None;
        }

        let title = area_title(&line);
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    fn is_heading_shape(&self, line: &str) -> bool {
        line.chars().count() >= self.min_shape_len
            && line.chars().any(char::is_alphabetic)
            && !line.chars().any(char::is_lowercase)
            && !line.chars().any(|c| c.is_ascii_digit())
    }
}

fn names_table_columns(line: &str) -> bool {
    let fields: HashSet<_> = line.split(' ').filter_map(canonical_field).collect();
    fields.len() >= 2
}

/// Current-area state for one document. Never applied retroactively.
#[derive(Debug, Clone)]
pub struct AreaTracker {
    current: Option<String>,
    default_area: String,
}

impl AreaTracker {
    pub fn new(default_area: &str) -> Self {
        AreaTracker {
            current: None,
            default_area: default_area.to_string(),
        }
    }

    /// Feed one line; returns true when it was a heading and the area changed.
    pub fn observe(&mut self, rules: &HeadingRules, raw: &str) -> bool {
        match rules.heading(raw) {
            Some(area) => {
                self.current = Some(area);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, area: String) {
        self.current = Some(area);
    }

    pub fn current(&self) -> &str {
        self.current.as_deref().unwrap_or(&self.default_area)
    }
}

/// An area heading at a line position on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaAnchor {
    pub line_index: usize,
    pub area: String,
}

/// Run heading detection over a whole page, in line order.
pub fn area_anchors(rules: &HeadingRules, lines: &[String]) -> Vec<AreaAnchor> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            rules.heading(line).map(|area| AreaAnchor {
                line_index: i,
                area,
            })
        })
        .collect()
}

/// Area of the last anchor strictly before `line_index`, or `fallback`.
pub fn resolve_area<'a>(anchors: &'a [AreaAnchor], line_index: usize, fallback: &'a str) -> &'a str {
    anchors
        .iter()
        .take_while(|a| a.line_index < line_index)
        .last()
        .map(|a| a.area.as_str())
        .unwrap_or(fallback)
}
