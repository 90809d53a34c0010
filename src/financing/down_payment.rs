//! Minimum down payment rules
//!
//! Price under $500,000: 5% minimum
//! Price $500,000 - $999,999: 5% on the first $500K + 10% on the portion above
//! Price $1,000,000+: 20% minimum
//!
//! These are advisory. A down payment below the minimum still produces a
//! cashflow result; the shortfall is reported through [`DownPaymentCheck`].

use serde::{Deserialize, Serialize};
use crate::round_cents;

const FIRST_BAND_LIMIT: f64 = 500_000.0;
const INSURABLE_PRICE_LIMIT: f64 = 1_000_000.0;
const FIRST_BAND_RATE: f64 = 0.05;
const SECOND_BAND_RATE: f64 = 0.10;
const UNINSURABLE_RATE: f64 = 0.20;

/// Minimum down payment required for a purchase price
pub fn minimum_down_payment(purchase_price: f64) -> f64 {
    if purchase_price <= 0.0 {
        return 0.0;
    }

    if purchase_price < FIRST_BAND_LIMIT {
        purchase_price * FIRST_BAND_RATE
    } else if purchase_price < INSURABLE_PRICE_LIMIT {
        FIRST_BAND_LIMIT * FIRST_BAND_RATE + (purchase_price - FIRST_BAND_LIMIT) * SECOND_BAND_RATE
    } else {
        purchase_price * UNINSURABLE_RATE
    }
}

/// Down payment as a percent of price (0 when the price is not positive)
pub fn percentage_from_amount(amount: f64, purchase_price: f64) -> f64 {
    if purchase_price <= 0.0 {
        return 0.0;
    }
    amount / purchase_price * 100.0
}

/// Down payment dollars for a percent of price
pub fn amount_from_percentage(percentage: f64, purchase_price: f64) -> f64 {
    purchase_price * percentage / 100.0
}

/// Caller-facing comparison of a down payment against the minimum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownPaymentCheck {
    pub minimum: f64,
    pub minimum_pct: f64,
    pub supplied_pct: f64,
    /// Dollars short of the minimum, 0 when the minimum is met
    pub shortfall: f64,
    pub meets_minimum: bool,
}

impl DownPaymentCheck {
    pub fn evaluate(down_payment: f64, purchase_price: f64) -> Self {
        let minimum = minimum_down_payment(purchase_price);
        let shortfall = (minimum - down_payment).max(0.0);

        Self {
            minimum: round_cents(minimum),
            minimum_pct: round_cents(percentage_from_amount(minimum, purchase_price)),
            supplied_pct: round_cents(percentage_from_amount(down_payment, purchase_price)),
            shortfall: round_cents(shortfall),
            // Sub-cent shortfalls come from percent round trips, not real gaps
            meets_minimum: shortfall < 0.005,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_minimum_bands() {
        assert_abs_diff_eq!(minimum_down_payment(499_999.0), 499_999.0 * 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(minimum_down_payment(500_000.0), 25_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(minimum_down_payment(750_000.0), 50_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(minimum_down_payment(999_999.0), 74_999.9, epsilon = 1e-6);
        assert_abs_diff_eq!(minimum_down_payment(1_000_000.0), 200_000.0, epsilon = 1e-6);
        assert_eq!(minimum_down_payment(1_500_000.0), 300_000.0);
    }

    #[test]
    fn test_minimum_non_positive_price() {
        assert_eq!(minimum_down_payment(0.0), 0.0);
        assert_eq!(minimum_down_payment(-250_000.0), 0.0);
    }

    #[test]
    fn test_percent_amount_round_trip() {
        for price in [150_000.0, 500_000.0, 1_234_567.0] {
            for amount in [0.0, 7_500.0, 25_000.0, 100_000.0, 149_999.99] {
                let pct = percentage_from_amount(amount, price);
                assert_relative_eq!(
                    amount_from_percentage(pct, price),
                    amount,
                    epsilon = 1e-9,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_percentage_zero_price() {
        assert_eq!(percentage_from_amount(50_000.0, 0.0), 0.0);
        assert_eq!(amount_from_percentage(20.0, 0.0), 0.0);
    }

    #[test]
    fn test_down_payment_check() {
        let check = DownPaymentCheck::evaluate(40_000.0, 750_000.0);
        assert!(!check.meets_minimum);
        assert_abs_diff_eq!(check.shortfall, 10_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(check.minimum_pct, 6.67, epsilon = 1e-9);

        let check = DownPaymentCheck::evaluate(100_000.0, 500_000.0);
        assert!(check.meets_minimum);
        assert_eq!(check.shortfall, 0.0);
        assert_abs_diff_eq!(check.supplied_pct, 20.0, epsilon = 1e-9);
    }
}
