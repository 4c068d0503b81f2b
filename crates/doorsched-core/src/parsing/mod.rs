pub mod area;
pub mod door;
pub mod fields;
pub mod header;
pub mod normalize;

use crate::config::ParseConfig;
use crate::error::ScheduleError;
use crate::extraction::{PageContent, TableRow};
use crate::model::{ExtractionMethod, PageSummary, Record, SkippedLine};
use crate::supplier::SupplierProfile;
use area::{area_anchors, resolve_area, AreaAnchor, AreaTracker, HeadingRules};
use door::{find_generic, DoorMatch, DoorRecognizer};
use fields::{
    correct_swap, quantity_from_cell, quantity_value, take_code, take_colour, take_quantity,
    ColourRule,
};
use header::ColumnMap;
use normalize::{gap_segments, normalize_line};

/// Segments a layout line needs before it counts as a schedule row.
const STRUCTURAL_SEGMENTS: usize = 3;

const NO_DOOR: &str = "no door identifier";

/// Records and diagnostics from one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentParse {
    pub records: Vec<Record>,
    pub skipped_lines: Vec<SkippedLine>,
    pub pages: Vec<PageSummary>,
}

/// The one extraction engine, parameterized by a supplier profile.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    config: &'a ParseConfig,
    doors: DoorRecognizer,
    headings: HeadingRules,
    colour: ColourRule,
    tables: bool,
}

impl<'a> Engine<'a> {
    pub fn new(profile: &SupplierProfile, config: &'a ParseConfig) -> Result<Self, ScheduleError> {
        let (min_digits, max_digits) = profile.family_digits;
        Ok(Engine {
            config,
            doors: DoorRecognizer::with_families(profile.door_families, min_digits, max_digits)?,
            headings: HeadingRules::new(profile.heading_keywords, config.min_heading_len)?,
            colour: profile.colour_rule,
            tables: profile.tables,
        })
    }

    /// Parse one document's pages in order. Area state carries across pages.
    pub fn parse(&self, pages: &[PageContent]) -> DocumentParse {
        let mut out = DocumentParse::default();
        let mut tracker = AreaTracker::new(&self.config.default_area);

        for page in pages {
            let skipped_before = out.skipped_lines.len();

            if self.tables && !page.tables.is_empty() {
                let anchors = area_anchors(&self.headings, &page.lines);
                let carried = tracker.current().to_string();
                let mut skipped = Vec::new();
                let records = self.parse_tables(page, &anchors, &carried, &mut skipped);

                if !records.is_empty() {
                    if let Some(last) = anchors.last() {
                        tracker.set(last.area.clone());
                    }
                    out.pages.push(PageSummary {
                        page_number: page.page_number,
                        method: ExtractionMethod::Table,
                        records: records.len(),
                        skipped: skipped.len(),
                    });
                    out.records.extend(records);
                    out.skipped_lines.extend(skipped);
                    continue;
                }

                log::debug!(
                    "page {}: table extraction yielded no records, falling back to line scan",
                    page.page_number
                );
            }

            let records = self.parse_lines(page, &mut tracker, &mut out.skipped_lines);
            out.pages.push(PageSummary {
                page_number: page.page_number,
                method: ExtractionMethod::Lines,
                records: records.len(),
                skipped: out.skipped_lines.len() - skipped_before,
            });
            out.records.extend(records);
        }

        out
    }

    fn parse_lines(
        &self,
        page: &PageContent,
        tracker: &mut AreaTracker,
        skipped: &mut Vec<SkippedLine>,
    ) -> Vec<Record> {
        let mut records = Vec::new();

        for (i, raw) in page.lines.iter().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            // Headings are checked before doors and never yield a record.
            if tracker.observe(&self.headings, raw) {
                continue;
            }
            match self.parse_line(raw, tracker.current()) {
                Some(record) => records.push(record),
                None => skipped.push(SkippedLine {
                    page_number: page.page_number,
                    line_index: i,
                    text: normalize_line(raw),
                    reason: NO_DOOR.into(),
                }),
            }
        }

        records
    }

    /// Try to read one text line as a hardware item.
    pub fn parse_line(&self, raw: &str, area: &str) -> Option<Record> {
        let line = normalize_line(raw);
        let structural = gap_segments(raw).len() >= STRUCTURAL_SEGMENTS;
        let found = self.doors.find(&line, structural)?;

        let tail = line[found.end..].trim_matches(|c: char| c == ' ' || c == '-' || c == ':');
        let mut tokens: Vec<&str> = tail.split_whitespace().collect();
        let quantity = take_quantity(&mut tokens);
        let colour = take_colour(&mut tokens, self.colour, self.config.colour_max_len);
        let code = take_code(&mut tokens, self.config.min_code_len, &found.door);
        let description = tokens.join(" ");

        Some(build_record(area, found.door, code, quantity, description, colour))
    }

    fn parse_tables(
        &self,
        page: &PageContent,
        anchors: &[AreaAnchor],
        carried: &str,
        skipped: &mut Vec<SkippedLine>,
    ) -> Vec<Record> {
        let mut records = Vec::new();

        for table in &page.tables {
            let Some((header_at, map)) = table
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| (i, ColumnMap::from_header(&row.cells)))
                .find(|(_, map)| map.is_usable())
            else {
                continue;
            };

            for row in &table.rows[header_at + 1..] {
                if row.cells.iter().all(|c| c.trim().is_empty()) {
                    continue;
                }
                // Heading rows set the area; they are not items.
                if anchors.iter().any(|a| a.line_index == row.line_index) {
                    continue;
                }
                let area = resolve_area(anchors, row.line_index, carried);
                match self.parse_row(row, &map, area) {
                    Some(record) => records.push(record),
                    None => skipped.push(SkippedLine {
                        page_number: page.page_number,
                        line_index: row.line_index,
                        text: normalize_line(&row.cells.join(" ")),
                        reason: NO_DOOR.into(),
                    }),
                }
            }
        }

        records
    }

    /// Try to read one table row as a hardware item.
    pub fn parse_row(&self, row: &TableRow, map: &ColumnMap, area: &str) -> Option<Record> {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.cells.get(i))
                .map(|c| normalize_line(c))
                .unwrap_or_default()
        };

        let found = self.find_door_in_row(row, map)?;

        let mut code = cell(map.code);
        let mut description = cell(map.description);
        let mut colour = Some(cell(map.colour)).filter(|c| !c.is_empty());

        if map.code.is_none() {
            let mut tokens: Vec<&str> = description.split_whitespace().collect();
            code = take_code(&mut tokens, self.config.min_code_len, &found.door);
            description = tokens.join(" ");
        }

        (code, description) = correct_swap(code, description, &found.door);

        if map.colour.is_none() {
            let mut tokens: Vec<&str> = description.split_whitespace().collect();
            colour = take_colour(&mut tokens, self.colour, self.config.colour_max_len);
            description = tokens.join(" ");
        }

        let quantity = match map.quantity {
            Some(_) => quantity_from_cell(&cell(map.quantity)),
            None => row
                .cells
                .last()
                .and_then(|c| quantity_value(c.trim()))
                .unwrap_or(1),
        };

        Some(build_record(area, found.door, code, quantity, description, colour))
    }

    /// With a door column only that cell is searched; a blank door cell
    /// means the row has no door. Without one, every cell is a candidate.
    /// The supplier's own pattern is tried across all candidates before the
    /// generic one.
    fn find_door_in_row(&self, row: &TableRow, map: &ColumnMap) -> Option<DoorMatch> {
        let candidates: Vec<String> = match map.door {
            Some(i) => row.cells.get(i).into_iter().map(|c| normalize_line(c)).collect(),
            None => row.cells.iter().map(|c| normalize_line(c)).collect(),
        };

        candidates
            .iter()
            .find_map(|c| self.doors.find(c, false))
            .or_else(|| candidates.iter().find_map(|c| find_generic(c)))
    }
}

fn build_record(
    area: &str,
    door: String,
    code: String,
    quantity: u32,
    description: String,
    colour: Option<String>,
) -> Record {
    Record {
        area: area.to_string(),
        door,
        code,
        quantity,
        product: description.clone(),
        description: Some(description).filter(|d| !d.is_empty()),
        colour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{pages_from_text, PageTable};
    use crate::supplier::Supplier;

    fn row(line_index: usize, cells: &[&str]) -> TableRow {
        TableRow {
            line_index,
            cells: cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn engine<'a>(supplier: Supplier, config: &'a ParseConfig) -> Engine<'a> {
        Engine::new(supplier.profile(), config).unwrap()
    }

    #[test]
    fn test_generic_line_item() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Generic, &config);
        let r = e
            .parse_line("ED01  STAFF ENTRY  L9D11S/30  2", "Unspecified")
            .unwrap();
        assert_eq!(r.door, "ED01");
        assert_eq!(r.code, "L9D11S/30");
        assert_eq!(r.quantity, 2);
        assert_eq!(r.product, "STAFF ENTRY");
        assert_eq!(r.colour, None);
    }

    #[test]
    fn test_line_without_door_is_none() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Generic, &config);
        assert!(e.parse_line("Hardware schedule rev B", "x").is_none());
    }

    #[test]
    fn test_ara_line_takes_colour() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let r = e.parse_line("IFD03 L9D11S/30 Lever set SSS 2", "Level 1").unwrap();
        assert_eq!(r.door, "IFD03");
        assert_eq!(r.code, "L9D11S/30");
        assert_eq!(r.colour.as_deref(), Some("SSS"));
        assert_eq!(r.description.as_deref(), Some("Lever set"));
        assert_eq!(r.area, "Level 1");
    }

    #[test]
    fn test_ara_ignores_generic_door_on_plain_line() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        assert!(e.parse_line("Ref ABC123 issued for tender", "x").is_none());
        let r = e.parse_line("LD101  Lever set  TS93  1", "x").unwrap();
        assert_eq!(r.door, "LD101");
    }

    #[test]
    fn test_area_carries_across_pages() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Generic, &config);
        let pages = pages_from_text(&["LEVEL 1\nED01 Lever X100 1", "ED02 Closer X200 2"]);
        let parsed = e.parse(&pages);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].area, "Level 1");
    }

    #[test]
    fn test_skipped_lines_are_reported() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Generic, &config);
        let pages = pages_from_text(&["Project notes\nED01 Lever X100 1\n\nIssued for tender"]);
        let parsed = e.parse(&pages);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_lines.len(), 2);
        assert_eq!(parsed.skipped_lines[0].line_index, 0);
        assert_eq!(parsed.pages[0].skipped, 2);
        assert_eq!(parsed.pages[0].method, ExtractionMethod::Lines);
    }

    #[test]
    fn test_row_swap_correction() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let map = ColumnMap::from_header(&row(0, &["Door", "Code", "Description", "Qty"]).cells);
        let r = e
            .parse_row(&row(1, &["ED01", "Door closer", "TS93", "1"]), &map, "Clubhouse")
            .unwrap();
        assert_eq!(r.code, "TS93");
        assert_eq!(r.product, "Door closer");
        assert_eq!(r.quantity, 1);
    }

    #[test]
    fn test_row_quantity_defaults_and_colour_column() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let map = ColumnMap::from_header(
            &row(0, &["Door", "Code", "Description", "Colour", "Qty"]).cells,
        );
        let r = e
            .parse_row(&row(1, &["ED02", "L9D11S/30", "Lever set", "SC", "pair"]), &map, "x")
            .unwrap();
        assert_eq!(r.quantity, 1);
        assert_eq!(r.colour.as_deref(), Some("SC"));
    }

    #[test]
    fn test_table_page_uses_anchors() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let page = PageContent {
            page_number: 1,
            lines: vec![
                "CLUBHOUSE".into(),
                "Door    Code        Qty".into(),
                "ED01    L9D11S/30     2".into(),
                "LEVEL 1".into(),
                "ED02    TS93          1".into(),
            ],
            tables: vec![PageTable {
                rows: vec![
                    row(1, &["Door", "Code", "Qty"]),
                    row(2, &["ED01", "L9D11S/30", "2"]),
                    row(3, &["LEVEL 1", "", ""]),
                    row(4, &["ED02", "TS93", "1"]),
                ],
            }],
        };
        let parsed = e.parse(&[page]);
        assert_eq!(parsed.pages[0].method, ExtractionMethod::Table);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].area, "Clubhouse");
        assert_eq!(parsed.records[0].quantity, 2);
        assert_eq!(parsed.records[1].area, "Level 1");
        // the LEVEL 1 row is a heading, not a skipped item
        assert!(parsed.skipped_lines.is_empty());
        assert_eq!(parsed.pages[0].skipped, 0);
    }

    #[test]
    fn test_table_row_without_door_is_skipped() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let page = PageContent {
            page_number: 1,
            lines: vec![
                "Door    Code    Qty".into(),
                "ED01    TS93    1".into(),
                "        note    1".into(),
            ],
            tables: vec![PageTable {
                rows: vec![
                    row(0, &["Door", "Code", "Qty"]),
                    row(1, &["ED01", "TS93", "1"]),
                    row(2, &["", "note", "1"]),
                ],
            }],
        };
        let parsed = e.parse(&[page]);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_lines.len(), 1);
        assert_eq!(parsed.skipped_lines[0].line_index, 2);
    }

    #[test]
    fn test_blank_door_cell_does_not_borrow_door_from_code() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let map =
            ColumnMap::from_header(&row(0, &["Door", "Code", "Description", "Qty"]).cells);
        assert!(e
            .parse_row(&row(2, &["", "TS93", "Door closer", "1"]), &map, "x")
            .is_none());
    }

    #[test]
    fn test_door_found_anywhere_without_door_column() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let map = ColumnMap::from_header(&row(0, &["Code", "Description", "Qty"]).cells);
        let r = e
            .parse_row(&row(1, &["TS93", "ED05 closer", "1"]), &map, "x")
            .unwrap();
        assert_eq!(r.door, "ED05");
        assert_eq!(r.code, "TS93");
    }

    #[test]
    fn test_line_with_door_shaped_code() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Generic, &config);
        let r = e.parse_line("ED01  Door closer  TS93  1", "x").unwrap();
        assert_eq!(r.door, "ED01");
        assert_eq!(r.code, "TS93");
        assert_eq!(r.product, "Door closer");
        assert_eq!(r.quantity, 1);
    }

    #[test]
    fn test_empty_table_falls_back_to_lines() {
        let config = ParseConfig::default();
        let e = engine(Supplier::Ara, &config);
        let page = PageContent {
            page_number: 1,
            lines: vec!["GROUND FLOOR".into(), "ED01 Lever set L9D11S 2".into()],
            tables: vec![PageTable {
                rows: vec![row(0, &["Door", "Description"]), row(1, &["Notes", "TBC"])],
            }],
        };
        let parsed = e.parse(&[page]);
        assert_eq!(parsed.pages[0].method, ExtractionMethod::Lines);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].area, "Ground Floor");
        assert_eq!(parsed.records[0].code, "L9D11S");
    }
}
