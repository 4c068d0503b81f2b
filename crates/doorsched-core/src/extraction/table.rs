//! Reconstruct table grids from pdftotext -layout output.
//!
//! pdftotext -layout preserves column alignment using spaces. A table opens
//! at a header line, the header's segment offsets become column starts, and
//! following lines are cut into those columns until a blank line.

use crate::extraction::{PageTable, TableRow};
use crate::parsing::header::canonical_field;
use crate::parsing::normalize::gap_segments;
use std::collections::HashSet;

/// Slack (in characters) allowed when a cell starts slightly left of its header.
const COLUMN_SLACK: usize = 2;

/// Detect if a line looks like a table header row: at least two of its
/// whitespace-gap segments name distinct known columns.
pub fn is_table_header(line: &str) -> bool {
    let fields: HashSet<_> = gap_segments(line)
        .into_iter()
        .filter_map(|(_, seg)| canonical_field(seg))
        .collect();
    fields.len() >= 2
}

/// Find the tables on one page.
pub fn detect_tables(lines: &[String]) -> Vec<PageTable> {
    let mut tables = Vec::new();
    let mut current: Option<(Vec<usize>, PageTable)> = None;

    for (i, line) in lines.iter().enumerate() {
        if is_table_header(line) {
            if let Some((_, table)) = current.take() {
                push_if_rows(&mut tables, table);
            }
            let segments = gap_segments(line);
            let starts: Vec<usize> = segments.iter().map(|(col, _)| *col).collect();
            let header = TableRow {
                line_index: i,
                cells: segments.iter().map(|(_, s)| s.to_string()).collect(),
            };
            current = Some((starts, PageTable { rows: vec![header] }));
            continue;
        }

        if line.trim().is_empty() {
            if let Some((_, table)) = current.take() {
                push_if_rows(&mut tables, table);
            }
            continue;
        }

        if let Some((starts, table)) = current.as_mut() {
            table.rows.push(TableRow {
                line_index: i,
                cells: cut_into_columns(line, starts),
            });
        }
    }

    if let Some((_, table)) = current.take() {
        push_if_rows(&mut tables, table);
    }

    tables
}

/// Tables consisting of nothing but a header are not kept.
fn push_if_rows(tables: &mut Vec<PageTable>, table: PageTable) {
    if table.rows.len() > 1 {
        tables.push(table);
    }
}

fn cut_into_columns(line: &str, starts: &[usize]) -> Vec<String> {
    let mut cells = vec![String::new(); starts.len()];
    for (col, seg) in gap_segments(line) {
        let idx = starts
            .iter()
            .rposition(|&start| start <= col + COLUMN_SLACK)
            .unwrap_or(0);
        let cell = &mut cells[idx];
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(seg);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_table_header() {
        assert!(is_table_header(
            "Door    Code        Description          Colour   Qty"
        ));
        assert!(!is_table_header("ED01    L9D11S/30   STAFF ENTRY   SC   2"));
        assert!(!is_table_header("Door schedule for the clubhouse"));
    }

    #[test]
    fn test_detect_single_table() {
        let page = lines(&[
            "CLUBHOUSE",
            "Door    Code        Description          Colour   Qty",
            "ED01    L9D11S/30   Lever set            SC       2",
            "ED02    TS93        Door closer          SIL      1",
            "",
            "Page 1 of 3",
        ]);
        let tables = detect_tables(&page);
        assert_eq!(tables.len(), 1);
        let rows = &tables[0].rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].line_index, 1);
        assert_eq!(rows[1].line_index, 2);
        assert_eq!(
            rows[1].cells,
            vec!["ED01", "L9D11S/30", "Lever set", "SC", "2"]
        );
    }

    #[test]
    fn test_right_aligned_quantity_lands_in_last_column() {
        let page = lines(&[
            "Door    Code        Qty",
            "ED01    L9D11S/30     2",
        ]);
        let tables = detect_tables(&page);
        assert_eq!(tables[0].rows[1].cells, vec!["ED01", "L9D11S/30", "2"]);
    }

    #[test]
    fn test_missing_cell_left_empty() {
        let page = lines(&[
            "Door    Code        Description          Colour   Qty",
            "ED01    L9D11S/30   Lever set                     2",
        ]);
        let tables = detect_tables(&page);
        assert_eq!(
            tables[0].rows[1].cells,
            vec!["ED01", "L9D11S/30", "Lever set", "", "2"]
        );
    }

    #[test]
    fn test_header_without_rows_is_dropped() {
        let page = lines(&["Door    Code    Qty", "", "Notes"]);
        assert!(detect_tables(&page).is_empty());
    }
}
