use doorsched_core::model::Record;

const HEADERS: [&str; 7] = ["Area", "Door", "Code", "Description", "Colour", "Qty", "Product"];

/// Render records as an aligned plain-text table.
pub fn render(records: &[Record]) -> String {
    if records.is_empty() {
        return "(no records)".to_string();
    }

    let rows: Vec<[String; 7]> = records
        .iter()
        .map(|r| {
            [
                r.area.clone(),
                r.door.clone(),
                r.code.clone(),
                r.description.clone().unwrap_or_default(),
                r.colour.clone().unwrap_or_default(),
                r.quantity.to_string(),
                r.product.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(HEADERS.iter().copied(), &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        out.push('\n');
        out.push_str(&format_row(row.iter().map(|s| s.as_str()), &widths));
    }
    out
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(door: &str, code: &str, qty: u32) -> Record {
        Record {
            area: "Ground Floor".into(),
            door: door.into(),
            code: code.into(),
            quantity: qty,
            product: "Lever set".into(),
            description: Some("Lever set".into()),
            colour: None,
        }
    }

    #[test]
    fn test_render_aligns_columns() {
        let out = render(&[record("ED01", "L9D11S/30", 2), record("ED102", "TS93", 1)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Area          Door   Code"));
        assert!(lines[2].contains("ED01   L9D11S/30"));
        assert!(lines[3].contains("ED102  TS93"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "(no records)");
    }
}
