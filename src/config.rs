//! Financing and operating defaults applied when a listing leaves a field blank
//!
//! Defaults can be overridden through environment variables:
//!   RENTAL_DOWN_PAYMENT_PCT, RENTAL_INTEREST_RATE, RENTAL_LOAN_TERM,
//!   RENTAL_MANAGEMENT_PCT, RENTAL_MAINTENANCE_PCT, RENTAL_VACANCY_PCT,
//!   RENTAL_CAPEX_PCT

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_DOWN_PAYMENT_PCT: f64 = 20.0;
pub const DEFAULT_INTEREST_RATE: f64 = 5.5;
pub const DEFAULT_LOAN_TERM: u32 = 25;

/// Defaults used to turn a best-effort listing into complete calculation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    /// Down payment as percent of purchase price
    pub down_payment_pct: f64,
    /// Nominal annual interest rate, percent
    pub interest_rate: f64,
    /// Amortization period in years
    pub loan_term: u32,
    /// Property management, percent of rent
    pub management_pct: f64,
    /// Maintenance reserve, percent of rent
    pub maintenance_pct: f64,
    /// Vacancy allowance, percent of rent
    pub vacancy_pct: f64,
    /// Capital expenditure reserve, percent of rent
    pub capex_pct: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            down_payment_pct: DEFAULT_DOWN_PAYMENT_PCT,
            interest_rate: DEFAULT_INTEREST_RATE,
            loan_term: DEFAULT_LOAN_TERM,
            management_pct: 8.0,
            maintenance_pct: 5.0,
            vacancy_pct: 5.0,
            capex_pct: 5.0,
        }
    }
}

impl CalculatorConfig {
    /// Defaults overridden by any `RENTAL_*` environment variables that are set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&lookup, "RENTAL_DOWN_PAYMENT_PCT", &mut config.down_payment_pct);
        override_from(&lookup, "RENTAL_INTEREST_RATE", &mut config.interest_rate);
        override_from(&lookup, "RENTAL_LOAN_TERM", &mut config.loan_term);
        override_from(&lookup, "RENTAL_MANAGEMENT_PCT", &mut config.management_pct);
        override_from(&lookup, "RENTAL_MAINTENANCE_PCT", &mut config.maintenance_pct);
        override_from(&lookup, "RENTAL_VACANCY_PCT", &mut config.vacancy_pct);
        override_from(&lookup, "RENTAL_CAPEX_PCT", &mut config.capex_pct);

        // A zero term would amortize over no payments
        if config.loan_term == 0 {
            log::warn!("Ignoring RENTAL_LOAN_TERM=0: loan term must be at least one year");
            config.loan_term = DEFAULT_LOAN_TERM;
        }
        config
    }
}

fn override_from<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => log::warn!("Ignoring {}={:?}: not a valid number", key, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_overrides() {
        let config = CalculatorConfig::from_lookup(|_| None);
        assert_eq!(config, CalculatorConfig::default());
        assert_eq!(config.loan_term, 25);
    }

    #[test]
    fn test_env_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = [
            ("RENTAL_INTEREST_RATE", "4.79"),
            ("RENTAL_LOAN_TERM", "30"),
            ("RENTAL_VACANCY_PCT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = CalculatorConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.interest_rate, 4.79);
        assert_eq!(config.loan_term, 30);
        // Unparsable value keeps the default
        assert_eq!(config.vacancy_pct, 5.0);
    }

    #[test]
    fn test_zero_loan_term_keeps_default() {
        let config = CalculatorConfig::from_lookup(|key| {
            (key == "RENTAL_LOAN_TERM").then(|| "0".to_string())
        });
        assert_eq!(config.loan_term, DEFAULT_LOAN_TERM);

        let property = crate::PropertyData {
            price: 500_000.0,
            monthly_rent: Some(2_500.0),
            ..Default::default()
        };
        let inputs = crate::CashflowInputs::from_property(&property, &config);
        let result = crate::calculate_cashflow(&inputs);
        assert!(result.monthly_mortgage.is_finite());
        assert!(result.monthly_cashflow.is_finite());
        assert!(result.cash_on_cash_return.is_finite());
    }
}
