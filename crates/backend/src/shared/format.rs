/// Short chart label for an amount: `bn`, `M`, `K`, or plain two decimals.
///
/// The lower bound of each band is inclusive. Negative values fall into the
/// plain band.
///
/// # Examples
/// ```
/// use backend::shared::format::format_currency_label;
/// assert_eq!(format_currency_label(1500.0, ""), "1.50 K");
/// assert_eq!(format_currency_label(3_000_000_000.0, "$"), "$3.00 bn");
/// ```
pub fn format_currency_label(value: f64, prefix: &str) -> String {
    if value >= 1e9 {
        format!("{}{:.2} bn", prefix, value / 1e9)
    } else if value >= 1e6 {
        format!("{}{:.2} M", prefix, value / 1e6)
    } else if value >= 1e3 {
        format!("{}{:.2} K", prefix, value / 1e3)
    } else {
        format!("{}{:.2}", prefix, value)
    }
}

/// Integer with comma thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_label_bands() {
        assert_eq!(format_currency_label(999.0, ""), "999.00");
        assert_eq!(format_currency_label(1500.0, ""), "1.50 K");
        assert_eq!(format_currency_label(2_500_000.0, ""), "2.50 M");
        assert_eq!(format_currency_label(3_000_000_000.0, "$"), "$3.00 bn");
    }

    #[test]
    fn test_format_currency_label_lower_bounds_inclusive() {
        assert_eq!(format_currency_label(1e3, ""), "1.00 K");
        assert_eq!(format_currency_label(1e6, ""), "1.00 M");
        assert_eq!(format_currency_label(1e9, "$"), "$1.00 bn");
        assert_eq!(format_currency_label(0.0, "$"), "$0.00");
    }

    #[test]
    fn test_format_currency_label_negative_and_rounding() {
        assert_eq!(format_currency_label(-2500.0, "$"), "$-2500.00");
        assert_eq!(format_currency_label(12.5, ""), "12.50");
        // display approximation just under a band boundary
        assert_eq!(format_currency_label(999_999.999, ""), "1000.00 K");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }
}
