//! Display formatting for currency and percentages

use thousands::Separable;

/// Format dollars with thousands separators, e.g. `$1,234.56` or `-$80.00`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, dollars.separate_with_commas(), remainder)
}

/// Format a percent value with two decimals, e.g. `5.25%`
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-2_456.35), "-$2,456.35");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(-1_000_000.0), "-$1,000,000.00");
        assert_eq!(format_currency(100_000.05), "$100,000.05");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(5.254), "5.25%");
        assert_eq!(format_percentage(-1.5), "-1.50%");
    }
}
