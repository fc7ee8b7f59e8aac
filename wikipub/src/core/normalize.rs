//! Value normalization for `.env` values.

const QUOTES: [char; 2] = ['"', '\''];

/// Strip surrounding whitespace and enclosing quote characters.
///
/// Quote characters are stripped independently at each end, so `'value"`
/// normalizes to `value` just like `"value"` does. Whitespace and quotes are
/// peeled from both ends until neither remains, so the result is a fixed
/// point: normalizing it again changes nothing.
pub fn normalize_value(raw: &str) -> &str {
    let mut value = raw.trim();
    loop {
        let next = value
            .trim_start_matches(QUOTES)
            .trim_end_matches(QUOTES)
            .trim();
        if next == value {
            return value;
        }
        value = next;
    }
}
