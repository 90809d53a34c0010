//! CMHC-style mortgage default insurance for high-ratio loans
//!
//! The premium is a one-time charge on the loan amount that is financed into
//! the mortgage principal, so the amortization must run on loan + premium.

use serde::{Deserialize, Serialize};
use crate::round_cents;

/// Highest loan-to-value (percent) that needs no insurance
pub const NO_PREMIUM_MAX_LTV: f64 = 80.0;

/// Slack on the no-premium boundary to absorb rounding in upstream percent math
pub const LTV_TOLERANCE: f64 = 0.001;

/// Outcome of a premium calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmhcResult {
    /// One-time premium in dollars, rounded to cents
    pub premium: f64,
    /// Premium rate as a percent of the loan amount
    pub rate: f64,
    /// Loan-to-value as a percent, rounded to 2 decimals
    pub loan_to_value: f64,
}

/// One band of the premium schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumTier {
    /// Inclusive upper LTV bound for this band (percent); None is unbounded
    pub max_ltv: Option<f64>,
    /// Premium rate for this band (percent of loan)
    pub rate: f64,
}

/// Premium rates by loan-to-value band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumSchedule {
    /// LTV at or below which no premium applies (before tolerance)
    no_premium_max_ltv: f64,
    /// Bands above the no-premium threshold, ascending by `max_ltv`
    tiers: Vec<PremiumTier>,
}

impl PremiumSchedule {
    /// Create from custom bands; bands are sorted by upper bound
    pub fn new(no_premium_max_ltv: f64, mut tiers: Vec<PremiumTier>) -> Self {
        tiers.sort_by(|a, b| upper_bound(a).total_cmp(&upper_bound(b)));
        Self {
            no_premium_max_ltv,
            tiers,
        }
    }

    /// Standard high-ratio schedule
    pub fn cmhc() -> Self {
        Self {
            no_premium_max_ltv: NO_PREMIUM_MAX_LTV,
            tiers: vec![
                PremiumTier { max_ltv: Some(85.0), rate: 2.80 },
                PremiumTier { max_ltv: Some(90.0), rate: 3.10 },
                PremiumTier { max_ltv: Some(95.0), rate: 4.00 },
                // Above 95% LTV, maximum premium
                PremiumTier { max_ltv: None, rate: 4.50 },
            ],
        }
    }

    /// Premium rate (percent) for a loan-to-value given as a percent
    pub fn rate_for_ltv(&self, ltv: f64) -> f64 {
        if ltv <= self.no_premium_max_ltv + LTV_TOLERANCE {
            return 0.0;
        }
        self.tiers
            .iter()
            .find(|tier| ltv <= upper_bound(tier))
            .or(self.tiers.last())
            .map(|tier| tier.rate)
            .unwrap_or(0.0)
    }

    /// Premium on `loan_amount` for a property bought at `purchase_price`
    pub fn premium(&self, loan_amount: f64, purchase_price: f64) -> CmhcResult {
        if purchase_price <= 0.0 || loan_amount <= 0.0 {
            return CmhcResult::default();
        }

        let ltv = loan_amount / purchase_price * 100.0;
        let rate = self.rate_for_ltv(ltv);
        let premium = loan_amount * rate / 100.0;

        log::debug!(
            "Mortgage insurance: loan={:.2}, price={:.2}, ltv={:.4}%, rate={:.2}%, premium={:.2}",
            loan_amount, purchase_price, ltv, rate, premium
        );

        CmhcResult {
            premium: round_cents(premium),
            rate,
            loan_to_value: round_cents(ltv),
        }
    }
}

fn upper_bound(tier: &PremiumTier) -> f64 {
    tier.max_ltv.unwrap_or(f64::INFINITY)
}

impl Default for PremiumSchedule {
    fn default() -> Self {
        Self::cmhc()
    }
}

/// Premium on `loan_amount` using the standard schedule
pub fn insurance_premium(loan_amount: f64, purchase_price: f64) -> CmhcResult {
    PremiumSchedule::cmhc().premium(loan_amount, purchase_price)
}

/// Base loan plus financed premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalMortgage {
    pub total_amount: f64,
    pub premium: f64,
    pub rate: f64,
    pub loan_to_value: f64,
}

/// Amount actually amortized: the base loan with the premium rolled in
pub fn total_mortgage_amount(base_loan: f64, purchase_price: f64) -> TotalMortgage {
    let base_loan = base_loan.max(0.0);
    let cmhc = insurance_premium(base_loan, purchase_price);
    TotalMortgage {
        total_amount: base_loan + cmhc.premium,
        premium: cmhc.premium,
        rate: cmhc.rate,
        loan_to_value: cmhc.loan_to_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_no_premium_at_or_below_80() {
        for loan in [0.0, 100_000.0, 350_000.0, 399_999.0, 400_000.0] {
            let result = insurance_premium(loan, 500_000.0);
            assert_eq!(result.premium, 0.0, "loan={}", loan);
            assert_eq!(result.rate, 0.0);
        }
        // Inside the tolerance band
        let result = insurance_premium(400_004.0, 500_000.0);
        assert_eq!(result.premium, 0.0);
        assert_abs_diff_eq!(result.loan_to_value, 80.0, epsilon = 0.01);
    }

    #[test]
    fn test_tier_rates() {
        let schedule = PremiumSchedule::cmhc();
        assert_eq!(schedule.rate_for_ltv(80.5), 2.80);
        assert_eq!(schedule.rate_for_ltv(85.0), 2.80);
        assert_eq!(schedule.rate_for_ltv(87.5), 3.10);
        assert_eq!(schedule.rate_for_ltv(90.0), 3.10);
        assert_eq!(schedule.rate_for_ltv(92.0), 4.00);
        assert_eq!(schedule.rate_for_ltv(95.0), 4.00);
        assert_eq!(schedule.rate_for_ltv(97.0), 4.50);
        assert_eq!(schedule.rate_for_ltv(100.0), 4.50);
    }

    #[test]
    fn test_ninety_percent_ltv() {
        let result = insurance_premium(450_000.0, 500_000.0);
        assert_abs_diff_eq!(result.loan_to_value, 90.0, epsilon = 1e-9);
        assert_eq!(result.rate, 3.10);
        assert_abs_diff_eq!(result.premium, 13_950.0, epsilon = 1e-9);
    }

    #[test]
    fn test_premium_monotonic_in_ltv() {
        let price = 600_000.0;
        let mut previous = 0.0;
        let mut loan = 300_000.0;
        while loan <= price {
            let premium = insurance_premium(loan, price).premium;
            assert!(premium >= previous, "premium dropped at loan={}", loan);
            previous = premium;
            loan += 1_500.0;
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(insurance_premium(100_000.0, 0.0), CmhcResult::default());
        assert_eq!(insurance_premium(-5.0, 500_000.0), CmhcResult::default());
    }

    #[test]
    fn test_total_mortgage_amount() {
        let total = total_mortgage_amount(450_000.0, 500_000.0);
        assert_abs_diff_eq!(total.total_amount, 463_950.0, epsilon = 1e-9);

        let total = total_mortgage_amount(-20_000.0, 500_000.0);
        assert_eq!(total.total_amount, 0.0);
        assert_eq!(total.premium, 0.0);
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = PremiumSchedule::new(
            75.0,
            vec![
                PremiumTier { max_ltv: None, rate: 5.0 },
                PremiumTier { max_ltv: Some(85.0), rate: 1.0 },
            ],
        );
        assert_eq!(schedule.rate_for_ltv(75.0), 0.0);
        assert_eq!(schedule.rate_for_ltv(80.0), 1.0);
        assert_eq!(schedule.rate_for_ltv(90.0), 5.0);

        let result = schedule.premium(160_000.0, 200_000.0);
        assert_abs_diff_eq!(result.premium, 1_600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_schedule_json_round_trip() {
        let schedule = PremiumSchedule::cmhc();
        let json = serde_json::to_string(&schedule).unwrap();
        assert!(json.contains("\"max_ltv\":null"));

        let back: PremiumSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
        assert_eq!(back.rate_for_ltv(99.0), 4.50);
    }
}
