use crate::parsing::normalize::normalize_line;

/// Semantic column of a schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    Door,
    Code,
    Description,
    Colour,
    Quantity,
}

/// Map a table header cell to its canonical field via the alias vocabulary.
pub fn canonical_field(cell: &str) -> Option<HeaderField> {
    let key = normalize_line(cell)
        .to_lowercase()
        .replace(['\u{2019}', '`'], "'")
        .trim_end_matches(['.', ':'])
        .to_string();

    match key.as_str() {
        "door" | "door no" | "door number" | "door ref" | "door id" | "door mark" | "opening"
        | "mark" => Some(HeaderField::Door),
        "code" | "product code" | "item code" | "hardware code" | "part" | "part no"
        | "part number" | "sku" | "cat no" | "catalogue no" | "catalog no" | "ref" => {
            Some(HeaderField::Code)
        }
        "description" | "desc" | "product" | "item" | "hardware" | "product description" => {
            Some(HeaderField::Description)
        }
        "colour" | "color" | "finish" | "colour/finish" | "color/finish" => {
            Some(HeaderField::Colour)
        }
        "qty" | "quantity" | "q'ty" | "qnty" | "quan" => Some(HeaderField::Quantity),
        _ => None,
    }
}

/// Column positions of the canonical fields in one header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub door: Option<usize>,
    pub code: Option<usize>,
    pub description: Option<usize>,
    pub colour: Option<usize>,
    pub quantity: Option<usize>,
}

impl ColumnMap {
    /// Map a header row. The first column claiming a field wins.
    pub fn from_header(cells: &[String]) -> ColumnMap {
        let mut map = ColumnMap::default();
        for (i, cell) in cells.iter().enumerate() {
            let slot = match canonical_field(cell) {
                Some(HeaderField::Door) => &mut map.door,
                Some(HeaderField::Code) => &mut map.code,
                Some(HeaderField::Description) => &mut map.description,
                Some(HeaderField::Colour) => &mut map.colour,
                Some(HeaderField::Quantity) => &mut map.quantity,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        map
    }

    /// A usable schedule header names at least a code or a quantity column.
    pub fn is_usable(&self) -> bool {
        self.code.is_some() || self.quantity.is_some()
    }
}
