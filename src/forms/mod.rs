pub mod calculator;
pub mod leasers;
pub mod main;
pub mod orders;
pub mod suppliers;

/// Parses an optional select value; empty strings mean "nothing selected".
pub(crate) fn parse_optional_id(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Parses an optional money input, accepting a comma as decimal separator.
pub(crate) fn parse_optional_price(value: &str) -> Option<f64> {
    let trimmed = value.trim().replace(',', ".");
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok().filter(|price: &f64| price.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_id_handles_blank_and_garbage() {
        assert_eq!(parse_optional_id(""), None);
        assert_eq!(parse_optional_id("  "), None);
        assert_eq!(parse_optional_id("17"), Some(17));
        assert_eq!(parse_optional_id("abc"), None);
    }

    #[test]
    fn optional_price_accepts_comma_decimals() {
        assert_eq!(parse_optional_price("1800"), Some(1800.0));
        assert_eq!(parse_optional_price("73,40"), Some(73.4));
        assert_eq!(parse_optional_price(""), None);
        assert_eq!(parse_optional_price("n/a"), None);
    }
}
