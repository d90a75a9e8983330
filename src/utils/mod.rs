//! Project-specific utilities live here.

/// Interpret a query flag the way numeric coercion does: the value is read as a number and is
/// truthy when that number is non-zero. Empty or non-numeric input is falsy.
pub fn numeric_truthy(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed
        .parse::<f64>()
        .map(|number| number != 0.0 && !number.is_nan())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::numeric_truthy;

    #[test]
    fn ones_and_zeros() {
        assert!(numeric_truthy("1"));
        assert!(!numeric_truthy("0"));
    }

    #[test]
    fn other_numbers_follow_zero_test() {
        assert!(numeric_truthy("2"));
        assert!(numeric_truthy("-1"));
        assert!(numeric_truthy(" 1 "));
        assert!(!numeric_truthy("0.0"));
    }

    #[test]
    fn empty_and_words_are_false() {
        assert!(!numeric_truthy(""));
        assert!(!numeric_truthy("true"));
        assert!(!numeric_truthy("NaN"));
    }
}
