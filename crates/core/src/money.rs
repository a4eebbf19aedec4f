//! Display formatting for prices and taxes.

/// Render a price in thousands, e.g. `1_850_000` -> `"$1850K"`.
pub fn format_thousands(price: i64) -> String {
    let thousands = (price as f64 / 1000.0).round() as i64;
    format!("${thousands}K")
}

/// Render a dollar amount with thousands separators, e.g. `8420.0` -> `"$8,420"`.
///
/// Cents are shown only when non-zero, without trailing zeros (`"$12.5"`).
pub fn format_currency(amount: f64) -> String {
    let cents_total = (amount.abs() * 100.0).round() as i64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;
    let sign = if amount < 0.0 && cents_total != 0 { "-" } else { "" };

    let mut out = format!("{sign}${}", group_thousands(whole));
    if cents != 0 {
        let frac = format!("{cents:02}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_rounds_to_nearest() {
        assert_eq!(format_thousands(1_850_000), "$1850K");
        assert_eq!(format_thousands(999_499), "$999K");
        assert_eq!(format_thousands(999_500), "$1000K");
    }

    #[test]
    fn currency_groups_digits() {
        assert_eq!(format_currency(8420.0), "$8,420");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn currency_keeps_significant_cents() {
        assert_eq!(format_currency(12.5), "$12.5");
        assert_eq!(format_currency(12.25), "$12.25");
        assert_eq!(format_currency(-1500.75), "-$1,500.75");
    }
}
