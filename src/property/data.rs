//! Property listing and cashflow input records

use serde::{Deserialize, Serialize};
use crate::config::{CalculatorConfig, DEFAULT_LOAN_TERM};
use crate::financing::amount_from_percentage;

/// Best-effort listing details produced by the extraction layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    pub price: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqft: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    // Estimates; None when the listing gave nothing to go on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
}

/// Inputs for one cashflow calculation.
///
/// Money fields are dollars; recurring costs are monthly. Fields documented
/// as percent of rent are applied to gross `monthly_rent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowInputs {
    pub purchase_price: f64,
    pub down_payment: f64,
    /// Nominal annual rate, percent
    pub interest_rate: f64,
    /// Amortization period, years
    pub loan_term: u32,
    pub monthly_rent: f64,
    /// Monthly
    pub property_taxes: f64,
    /// Monthly
    pub insurance: f64,
    /// Percent of rent
    pub property_management: f64,
    /// Percent of rent
    pub maintenance_reserve: f64,
    /// Percent of rent, charged as an expense
    pub vacancy: f64,
    /// Percent of rent
    pub cap_ex_reserve: f64,
    /// Monthly
    pub hoa_fees: f64,
    /// Monthly
    pub other_expenses: f64,
}

impl Default for CashflowInputs {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            down_payment: 0.0,
            interest_rate: 0.0,
            loan_term: DEFAULT_LOAN_TERM,
            monthly_rent: 0.0,
            property_taxes: 0.0,
            insurance: 0.0,
            property_management: 0.0,
            maintenance_reserve: 0.0,
            vacancy: 0.0,
            cap_ex_reserve: 0.0,
            hoa_fees: 0.0,
            other_expenses: 0.0,
        }
    }
}

impl CashflowInputs {
    /// Build inputs from a listing, filling gaps from `config`.
    ///
    /// Missing dollar estimates become 0; the down payment is
    /// `config.down_payment_pct` of the listing price.
    pub fn from_property(property: &PropertyData, config: &CalculatorConfig) -> Self {
        let price = property.price.max(0.0);
        Self {
            purchase_price: price,
            down_payment: amount_from_percentage(config.down_payment_pct, price),
            interest_rate: property.interest_rate.unwrap_or(config.interest_rate),
            loan_term: config.loan_term,
            monthly_rent: property.monthly_rent.unwrap_or(0.0),
            property_taxes: property.property_tax.unwrap_or(0.0),
            insurance: property.insurance.unwrap_or(0.0),
            property_management: config.management_pct,
            maintenance_reserve: config.maintenance_pct,
            vacancy: config.vacancy_pct,
            cap_ex_reserve: config.capex_pct,
            hoa_fees: property.hoa_fees.unwrap_or(0.0),
            other_expenses: 0.0,
        }
    }

    /// Amount borrowed before any insurance premium, floored at zero
    pub fn loan_amount(&self) -> f64 {
        (self.purchase_price - self.down_payment).max(0.0)
    }
}

/// Inputs with a display name, as read from a batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledInputs {
    pub name: String,
    pub inputs: CashflowInputs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_property_fills_defaults() {
        let property = PropertyData {
            price: 650_000.0,
            address: "12 Maple Ave, Hamilton ON".to_string(),
            property_type: "Townhouse".to_string(),
            monthly_rent: Some(3_100.0),
            property_tax: Some(410.0),
            ..Default::default()
        };
        let config = CalculatorConfig::default();

        let inputs = CashflowInputs::from_property(&property, &config);
        assert_eq!(inputs.purchase_price, 650_000.0);
        assert!((inputs.down_payment - 130_000.0).abs() < 1e-6);
        assert_eq!(inputs.interest_rate, config.interest_rate);
        assert_eq!(inputs.loan_term, config.loan_term);
        assert_eq!(inputs.monthly_rent, 3_100.0);
        assert_eq!(inputs.property_taxes, 410.0);
        assert_eq!(inputs.insurance, 0.0);
        assert_eq!(inputs.hoa_fees, 0.0);
        assert_eq!(inputs.vacancy, config.vacancy_pct);
    }

    #[test]
    fn test_listing_rate_overrides_default() {
        let property = PropertyData {
            price: 400_000.0,
            interest_rate: Some(4.25),
            ..Default::default()
        };
        let inputs = CashflowInputs::from_property(&property, &CalculatorConfig::default());
        assert_eq!(inputs.interest_rate, 4.25);
    }

    #[test]
    fn test_loan_amount_floors_at_zero() {
        let inputs = CashflowInputs {
            purchase_price: 300_000.0,
            down_payment: 350_000.0,
            ..Default::default()
        };
        assert_eq!(inputs.loan_amount(), 0.0);
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"{
            "purchasePrice": 500000, "downPayment": 100000, "interestRate": 5.5,
            "loanTerm": 25, "monthlyRent": 2500, "propertyTaxes": 300,
            "insurance": 120, "propertyManagement": 8, "maintenanceReserve": 7,
            "vacancy": 6, "capExReserve": 5, "hoaFees": 0, "otherExpenses": 50
        }"#;
        let inputs: CashflowInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.cap_ex_reserve, 5.0);
        assert_eq!(inputs.loan_term, 25);
        assert_eq!(inputs.other_expenses, 50.0);
    }
}
