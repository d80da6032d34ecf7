// Display strings for summary values.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Rupee amount with Indian magnitude abbreviations:
/// `15000000` → `₹1.50 Cr`, `150000` → `₹1.50 L`, `500` → `₹500.00`.
pub fn format_currency(value: f64) -> String {
    if value.abs() >= CRORE {
        format!("₹{:.2} Cr", value / CRORE)
    } else if value.abs() >= LAKH {
        format!("₹{:.2} L", value / LAKH)
    } else {
        format!("₹{}", group_thousands(value))
    }
}

pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_fixed(value: f64) -> String {
    format!("{value:.2}")
}

/// Two decimals with comma-separated thousands, e.g. `-1,234.50`.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_magnitudes() {
        assert_eq!(format_currency(15_000_000.0), "₹1.50 Cr");
        assert_eq!(format_currency(150_000.0), "₹1.50 L");
        assert_eq!(format_currency(500.0), "₹500.00");
        assert_eq!(format_currency(2500.0), "₹2,500.00");
        assert_eq!(format_currency(99_999.999), "₹100,000.00");
    }

    #[test]
    fn currency_negative_and_zero() {
        assert_eq!(format_currency(-25_000_000.0), "₹-2.50 Cr");
        assert_eq!(format_currency(-1234.5), "₹-1,234.50");
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(-0.001), "₹0.00");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(99_999.0), "99,999.00");
        assert_eq!(group_thousands(100.0), "100.00");
        assert_eq!(group_thousands(1000.0), "1,000.00");
    }

    #[test]
    fn percentage_and_fixed() {
        assert_eq!(format_pct(1.5), "1.50%");
        assert_eq!(format_pct(-0.126), "-0.13%");
        assert_eq!(format_fixed(2501.456), "2501.46");
    }
}
