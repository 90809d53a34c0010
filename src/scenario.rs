//! Scenario runner for batch and sensitivity calculations
//!
//! Holds one set of base inputs and evaluates variations of it, or evaluates
//! many independent properties in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::cashflow::{calculate_cashflow, CashflowResult};
use crate::financing::amount_from_percentage;
use crate::property::{CashflowInputs, LabeledInputs};

/// One evaluated property from a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub name: String,
    pub inputs: CashflowInputs,
    pub results: CashflowResult,
}

/// Result for one value of the varied input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    /// Value of the varied input (rate or down-payment percent)
    pub value: f64,
    pub results: CashflowResult,
}

/// Runner over a set of base inputs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(inputs);
///
/// for point in runner.rate_sensitivity(&[4.5, 5.0, 5.5, 6.0]) {
///     println!("{}% -> {}", point.value, point.results.monthly_cashflow);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_inputs: CashflowInputs,
}

impl ScenarioRunner {
    pub fn new(base_inputs: CashflowInputs) -> Self {
        Self { base_inputs }
    }

    /// Evaluate the base inputs as given
    pub fn run(&self) -> CashflowResult {
        calculate_cashflow(&self.base_inputs)
    }

    /// Evaluate independent properties in parallel; output order matches input
    pub fn run_batch(properties: &[LabeledInputs]) -> Vec<BatchResult> {
        properties
            .par_iter()
            .map(|p| BatchResult {
                name: p.name.clone(),
                inputs: p.inputs.clone(),
                results: calculate_cashflow(&p.inputs),
            })
            .collect()
    }

    /// Vary the annual interest rate (percent)
    pub fn rate_sensitivity(&self, rates: &[f64]) -> Vec<SensitivityPoint> {
        self.vary(rates, |inputs, rate| inputs.interest_rate = rate)
    }

    /// Vary the down payment as a percent of purchase price
    pub fn down_payment_sensitivity(&self, percentages: &[f64]) -> Vec<SensitivityPoint> {
        self.vary(percentages, |inputs, pct| {
            inputs.down_payment = amount_from_percentage(pct, inputs.purchase_price)
        })
    }

    fn vary<F>(&self, values: &[f64], apply: F) -> Vec<SensitivityPoint>
    where
        F: Fn(&mut CashflowInputs, f64) + Sync,
    {
        values
            .par_iter()
            .map(|&value| {
                let mut inputs = self.base_inputs.clone();
                apply(&mut inputs, value);
                SensitivityPoint {
                    value,
                    results: calculate_cashflow(&inputs),
                }
            })
            .collect()
    }

    /// Get reference to base inputs
    pub fn inputs(&self) -> &CashflowInputs {
        &self.base_inputs
    }

    /// Get mutable reference to base inputs for customization
    pub fn inputs_mut(&mut self) -> &mut CashflowInputs {
        &mut self.base_inputs
    }
}
