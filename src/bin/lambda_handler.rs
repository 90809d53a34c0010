//! AWS Lambda handler for cashflow calculations
//!
//! Accepts either complete calculation inputs or a scraped listing (filled in
//! from `RENTAL_*` defaults) and returns the results with the expense
//! breakdown and the down payment check.
//!
//! Request:  `{ "inputs": { ...CashflowInputs } }` or `{ "property": { ...PropertyData } }`
//! Response: `{ "inputs", "results", "breakdown", "downPaymentCheck", "executionTimeUs" }`

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use rental_cashflow::{
    calculate_cashflow_detailed, CalculatorConfig, CashflowError, CashflowInputs, CashflowResult,
    ExpenseBreakdown, PropertyData,
};
use rental_cashflow::financing::DownPaymentCheck;
use serde::{Deserialize, Serialize};

/// Input for one calculation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Complete inputs; takes precedence over `property`
    #[serde(default)]
    pub inputs: Option<CashflowInputs>,

    /// Listing data to map through the configured defaults
    #[serde(default)]
    pub property: Option<PropertyData>,
}

/// Output for one calculation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub inputs: CashflowInputs,
    pub results: CashflowResult,
    pub breakdown: ExpenseBreakdown,
    pub down_payment_check: DownPaymentCheck,
    pub execution_time_us: u64,
}

fn resolve_inputs(request: CalculationRequest, config: &CalculatorConfig) -> Result<CashflowInputs, CashflowError> {
    let inputs = match (request.inputs, request.property) {
        (Some(inputs), _) => inputs,
        (None, Some(property)) => CashflowInputs::from_property(&property, config),
        (None, None) => {
            return Err(CashflowError::invalid("inputs", "request needs `inputs` or `property`"));
        }
    };

    if inputs.loan_term == 0 {
        return Err(CashflowError::invalid("loanTerm", "amortization period must be at least one year"));
    }
    Ok(inputs)
}

fn calculate(request: CalculationRequest, config: &CalculatorConfig) -> Result<CalculationResponse, CashflowError> {
    let start = std::time::Instant::now();
    let inputs = resolve_inputs(request, config)?;
    let (results, breakdown) = calculate_cashflow_detailed(&inputs);
    let down_payment_check = DownPaymentCheck::evaluate(inputs.down_payment, inputs.purchase_price);

    Ok(CalculationResponse {
        inputs,
        results,
        breakdown,
        down_payment_check,
        execution_time_us: start.elapsed().as_micros() as u64,
    })
}

/// Lambda handler function
async fn handler(event: LambdaEvent<CalculationRequest>) -> Result<CalculationResponse, Error> {
    let (request, _context) = event.into_parts();
    let config = CalculatorConfig::from_env();

    let response = calculate(request, &config).map_err(|e| {
        log::error!("Rejected calculation request: {}", e);
        e
    })?;

    log::info!(
        "Calculated cashflow {:.2}/month for price {:.2}",
        response.results.monthly_cashflow, response.inputs.purchase_price
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
