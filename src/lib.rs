//! Rental Cashflow - investment property analysis for real-estate listings
//!
//! This library provides:
//! - Fixed-rate mortgage amortization
//! - CMHC-style mortgage insurance premiums for high-ratio loans
//! - Minimum down payment rules and percent/amount conversions
//! - Monthly/annual cashflow, cash-on-cash return and cap rate
//! - Batch and sensitivity runs, saved calculations and CSV export

pub mod config;
pub mod error;
pub mod financing;
pub mod property;
pub mod cashflow;
pub mod scenario;
pub mod saved;
pub mod format;

// Re-export commonly used types
pub use config::CalculatorConfig;
pub use error::{CashflowError, Result};
pub use financing::{
    monthly_payment, insurance_premium, minimum_down_payment,
    percentage_from_amount, amount_from_percentage, CmhcResult,
};
pub use property::{CashflowInputs, PropertyData};
pub use cashflow::{calculate_cashflow, calculate_cashflow_detailed, CashflowResult, ExpenseBreakdown};
pub use scenario::ScenarioRunner;
pub use saved::SavedCalculation;

/// Round to cent precision (2 decimal places)
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
