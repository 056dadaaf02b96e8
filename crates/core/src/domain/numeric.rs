// Best-effort numeric coercion
//
// Counts travel as text. The strict parser in `record` never looks at them;
// only sorting and merging read them as integers, through this module.

/// Parse a count, substituting zero when the text is not an integer.
pub fn parse_or_zero(text: &str) -> i64 {
    text.parse().unwrap_or(0)
}

/// Add two textual counts, each operand coerced with [`parse_or_zero`].
pub fn add_counts(left: &str, right: &str) -> String {
    parse_or_zero(left)
        .saturating_add(parse_or_zero(right))
        .to_string()
}
