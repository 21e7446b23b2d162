//! Locale-stable numeric formatting.
//!
//! Thousands grouped by a space, comma decimal separator, independent of
//! the host environment's locale: `1234567.5` renders as `1 234 567,50`.

/// Format a monetary amount with two decimals.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;
    let sign = if negative && cents > 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, group_thousands(integer), fraction)
}

/// Format a quantity: whole numbers without decimals, fractional ones with
/// two.
pub fn format_quantity(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    if cents % 100 == 0 {
        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!("{}{}", sign, group_thousands(cents / 100))
    } else {
        format_amount(value)
    }
}

/// Insert a space between every group of three digits.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_thousands_comma_decimal() {
        assert_eq!(format_amount(1234567.5), "1 234 567,50");
    }

    #[test]
    fn test_small_amounts_ungrouped() {
        assert_eq!(format_amount(0.0), "0,00");
        assert_eq!(format_amount(999.99), "999,99");
        assert_eq!(format_amount(1000.0), "1 000,00");
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(format_amount(12.345), "12,35");
        assert_eq!(format_amount(12.344), "12,34");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_amount(-4500.0), "-4 500,00");
        // -0.001 rounds to zero cents and loses the sign
        assert_eq!(format_amount(-0.001), "0,00");
    }

    #[test]
    fn test_quantity_trims_whole_numbers() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2,50");
        assert_eq!(format_quantity(1200.0), "1 200");
    }
}
