//! Fixed-rate mortgage payment

/// Number of monthly payments over an amortization period
pub fn payments_per_term(term_years: u32) -> u32 {
    term_years * 12
}

/// Fixed monthly payment (principal and interest) for a fully amortizing loan.
///
/// # Arguments
/// * `principal` - Amount financed, including any financed insurance premium
/// * `annual_rate_percent` - Nominal annual rate as a percent (5.5 means 5.5%)
/// * `term_years` - Amortization period in years, must be > 0
///
/// A zero or negative principal pays nothing. A zero rate amortizes
/// straight-line so the closed-form formula never divides by zero.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }

    let num_payments = payments_per_term(term_years) as f64;

    if annual_rate_percent == 0.0 {
        return principal / num_payments;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powf(num_payments);

    principal * (monthly_rate * growth) / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_rate_is_straight_line() {
        for (principal, years) in [(240_000.0, 25), (1_000.0, 1), (87_654.32, 30)] {
            let payment = monthly_payment(principal, 0.0, years);
            assert_abs_diff_eq!(payment, principal / (years as f64 * 12.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_standard_amortization() {
        // 400k at 5.5% over 25 years
        let payment = monthly_payment(400_000.0, 5.5, 25);
        assert_abs_diff_eq!(payment, 2456.35, epsilon = 0.01);

        // 300k at 5% over 25 years
        let payment = monthly_payment(300_000.0, 5.0, 25);
        assert_abs_diff_eq!(payment, 1753.77, epsilon = 0.01);
    }

    #[test]
    fn test_interest_is_strictly_positive() {
        for rate in [0.5, 2.0, 5.5, 12.0] {
            for years in [1, 10, 25, 30] {
                let principal = 250_000.0;
                let total_paid = monthly_payment(principal, rate, years) * (years as f64 * 12.0);
                assert!(total_paid > principal, "rate={} years={}", rate, years);
            }
        }
    }

    #[test]
    fn test_non_positive_principal_pays_nothing() {
        assert_eq!(monthly_payment(0.0, 5.5, 25), 0.0);
        assert_eq!(monthly_payment(-10_000.0, 5.5, 25), 0.0);
        assert_eq!(monthly_payment(0.0, 0.0, 25), 0.0);
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let low = monthly_payment(500_000.0, 4.0, 25);
        let high = monthly_payment(500_000.0, 6.0, 25);
        assert!(high > low);
    }
}
