//! Display formatting for amounts and rates
//!
//! The engine works on raw `f64`; these helpers are only used when results
//! are shown to a person.

/// Format as US dollars with two decimals and thousands separators
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }

    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(whole), fraction)
}

/// Format a decimal rate as a percentage (0.061678 -> "6.1678%")
pub fn percent(rate: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, rate * 100.0)
}

fn group_thousands(value: u64) -> String {
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
    fn test_currency() {
        assert_eq!(currency(1110.205019), "$1,110.21");
        assert_eq!(currency(33_224.602), "$33,224.60");
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(999.999), "$1,000.00");
        assert_eq!(currency(1_234_567.5), "$1,234,567.50");
        assert_eq!(currency(-1234.5), "-$1,234.50");
        assert_eq!(currency(-0.001), "$0.00");
        assert_eq!(currency(f64::NAN), "-");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.005, 3), "0.500%");
        assert_eq!(percent(0.0616778, 4), "6.1678%");
    }
}
