/// Finish abbreviations recognized as colours wherever a colour rule applies.
pub const COLOUR_CODES: &[&str] = &[
    "SC", "SCP", "SS", "SSS", "PSS", "SSP", "BLK", "MBLK", "PC", "CP", "SB", "PB", "SN", "AB",
    "BN", "WHT", "SIL", "SAA", "BRZ",
];

/// How a strategy peels a colour off the end of an item's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourRule {
    None,
    /// Only the closed finish vocabulary.
    Vocabulary,
    /// The vocabulary, or any short digit-free all-caps trailing token.
    VocabularyOrShortToken,
}

/// Quantity carried by a token made only of digits. Zero and overflow
/// degrade to 1; anything else is not a quantity.
pub fn quantity_value(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(token.parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1))
}

/// Pop a trailing quantity token. Only the rightmost token counts.
pub fn take_quantity(tokens: &mut Vec<&str>) -> u32 {
    match tokens.last().and_then(|t| quantity_value(t)) {
        Some(q) => {
            tokens.pop();
            q
        }
        None => 1,
    }
}

/// Quantity from a designated quantity cell such as "2" or "2 pr".
pub fn quantity_from_cell(cell: &str) -> u32 {
    cell.split_whitespace()
        .next()
        .and_then(quantity_value)
        .unwrap_or(1)
}

pub fn is_colour_code(token: &str) -> bool {
    let upper = token.to_uppercase();
    COLOUR_CODES.contains(&upper.as_str())
}

/// Pop a trailing colour token according to `rule`.
///
/// The short-token rule never consumes the only remaining token.
pub fn take_colour(tokens: &mut Vec<&str>, rule: ColourRule, max_len: usize) -> Option<String> {
    let last = *tokens.last()?;
    let matched = match rule {
        ColourRule::None => false,
        ColourRule::Vocabulary => is_colour_code(last),
        ColourRule::VocabularyOrShortToken => {
            is_colour_code(last)
                || (tokens.len() >= 2
                    && (2..=max_len).contains(&last.chars().count())
                    && last.chars().all(|c| c.is_ascii_uppercase()))
        }
    };
    if matched {
        tokens.pop();
        Some(last.to_string())
    } else {
        None
    }
}

/// A value shaped like a product code rather than prose: no spaces and
/// carries a digit or code punctuation.
pub fn looks_like_code(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !value.chars().any(char::is_whitespace)
        && value.chars().any(|c| c.is_ascii_alphanumeric())
        && value
            .chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '/' | '-' | '.' | '_'))
}

/// Code-shaped and not the door already recognized for this item.
fn is_code_for(value: &str, door: &str) -> bool {
    looks_like_code(value) && !value.trim().eq_ignore_ascii_case(door)
}

fn is_code_token(token: &str, min_len: usize, door: &str) -> bool {
    token.chars().count() >= min_len
        && token.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '.'))
        && is_code_for(token, door)
}

/// Remove and return the first code-like token other than `door`, or an
/// empty string.
pub fn take_code(tokens: &mut Vec<&str>, min_len: usize, door: &str) -> String {
    match tokens.iter().position(|t| is_code_token(t, min_len, door)) {
        Some(i) => tokens.remove(i).to_string(),
        None => String::new(),
    }
}

/// Swap code and description when the description is the one shaped like a
/// code. The item's own door never counts as a code.
pub fn correct_swap(code: String, description: String, door: &str) -> (String, String) {
    if !is_code_for(&code, door) && is_code_for(&description, door) {
        (description, code)
    } else {
        (code, description)
    }
}
