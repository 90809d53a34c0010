//! Rental Cashflow CLI
//!
//! Analyze a single property from command-line flags, or a batch of
//! properties from a CSV file.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rental_cashflow::{
    calculate_cashflow_detailed, CalculatorConfig, CashflowInputs, CashflowResult,
    ExpenseBreakdown, ScenarioRunner,
};
use rental_cashflow::financing::{amount_from_percentage, DownPaymentCheck};
use rental_cashflow::format::{format_currency, format_percentage};
use rental_cashflow::property::load_inputs;
use rental_cashflow::scenario::{BatchResult, SensitivityPoint};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "rental-cashflow", version, about = "Estimate rental property cashflow")]
struct Cli {
    /// CSV of properties to analyze (camelCase headers, optional `name` column)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Write per-property results to this CSV file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Purchase price
    #[arg(long)]
    price: Option<f64>,

    /// Down payment in dollars
    #[arg(long, conflicts_with = "down_payment_pct")]
    down_payment: Option<f64>,

    /// Down payment as a percent of price
    #[arg(long)]
    down_payment_pct: Option<f64>,

    /// Annual interest rate, percent
    #[arg(long)]
    rate: Option<f64>,

    /// Amortization period, years
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    term: Option<u32>,

    /// Monthly rent
    #[arg(long, default_value_t = 0.0)]
    rent: f64,

    /// Monthly property taxes
    #[arg(long, default_value_t = 0.0)]
    taxes: f64,

    /// Monthly insurance
    #[arg(long, default_value_t = 0.0)]
    insurance: f64,

    /// Monthly HOA / condo fees
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,

    /// Other monthly expenses
    #[arg(long, default_value_t = 0.0)]
    other: f64,

    /// Property management, percent of rent
    #[arg(long)]
    management: Option<f64>,

    /// Maintenance reserve, percent of rent
    #[arg(long)]
    maintenance: Option<f64>,

    /// Vacancy allowance, percent of rent
    #[arg(long)]
    vacancy: Option<f64>,

    /// Capital expenditure reserve, percent of rent
    #[arg(long)]
    capex: Option<f64>,

    /// Print cashflow at rates around the given rate
    #[arg(long)]
    sensitivity: bool,
}

impl Cli {
    fn single_inputs(&self, config: &CalculatorConfig) -> Result<CashflowInputs> {
        let Some(price) = self.price else {
            bail!("either --input or --price is required");
        };

        let down_payment = match (self.down_payment, self.down_payment_pct) {
            (Some(amount), _) => amount,
            (None, Some(pct)) => amount_from_percentage(pct, price),
            (None, None) => amount_from_percentage(config.down_payment_pct, price),
        };

        let loan_term = self.term.unwrap_or(config.loan_term);
        if loan_term == 0 {
            bail!("loan term must be at least one year");
        }

        Ok(CashflowInputs {
            purchase_price: price,
            down_payment,
            interest_rate: self.rate.unwrap_or(config.interest_rate),
            loan_term,
            monthly_rent: self.rent,
            property_taxes: self.taxes,
            insurance: self.insurance,
            property_management: self.management.unwrap_or(config.management_pct),
            maintenance_reserve: self.maintenance.unwrap_or(config.maintenance_pct),
            vacancy: self.vacancy.unwrap_or(config.vacancy_pct),
            cap_ex_reserve: self.capex.unwrap_or(config.capex_pct),
            hoa_fees: self.hoa,
            other_expenses: self.other,
        })
    }
}

/// Flat row for the results CSV
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputRow<'a> {
    name: &'a str,
    purchase_price: f64,
    down_payment: f64,
    monthly_mortgage: f64,
    monthly_expenses: f64,
    monthly_income: f64,
    monthly_cashflow: f64,
    annual_cashflow: f64,
    cash_on_cash_return: f64,
    cap_rate: f64,
    total_cash_required: f64,
    cmhc_premium: f64,
    cmhc_rate: f64,
    cmhc_ltv: f64,
    total_mortgage_amount: f64,
}

impl<'a> OutputRow<'a> {
    fn from_batch(row: &'a BatchResult) -> Self {
        let r = &row.results;
        Self {
            name: &row.name,
            purchase_price: row.inputs.purchase_price,
            down_payment: row.inputs.down_payment,
            monthly_mortgage: r.monthly_mortgage,
            monthly_expenses: r.monthly_expenses,
            monthly_income: r.monthly_income,
            monthly_cashflow: r.monthly_cashflow,
            annual_cashflow: r.annual_cashflow,
            cash_on_cash_return: r.cash_on_cash_return,
            cap_rate: r.cap_rate,
            total_cash_required: r.total_cash_required,
            cmhc_premium: r.cmhc_premium,
            cmhc_rate: r.cmhc_rate,
            cmhc_ltv: r.cmhc_ltv,
            total_mortgage_amount: r.total_mortgage_amount,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CalculatorConfig::from_env();

    match &cli.input {
        Some(path) => run_batch(&cli, path),
        None => run_single(&cli, &config),
    }
}

fn run_single(cli: &Cli, config: &CalculatorConfig) -> Result<()> {
    let inputs = cli.single_inputs(config)?;
    let (results, breakdown) = calculate_cashflow_detailed(&inputs);
    let check = DownPaymentCheck::evaluate(inputs.down_payment, inputs.purchase_price);

    if !check.meets_minimum {
        log::warn!(
            "Down payment {:.2} is below the minimum {:.2} for price {:.2}",
            inputs.down_payment, check.minimum, inputs.purchase_price
        );
    }

    if cli.json {
        let sensitivity = cli.sensitivity.then(|| sensitivity_points(&inputs));
        let body = single_json(&inputs, &results, &breakdown, &check, sensitivity.as_deref());
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_report(&inputs, &results, &breakdown, &check);
        if cli.sensitivity {
            print_sensitivity(&inputs);
        }
    }

    if let Some(path) = &cli.output {
        let batch = vec![BatchResult {
            name: "Property 1".to_string(),
            inputs,
            results,
        }];
        write_results(path, &batch)?;
    }

    Ok(())
}

fn single_json(
    inputs: &CashflowInputs,
    results: &CashflowResult,
    breakdown: &ExpenseBreakdown,
    check: &DownPaymentCheck,
    sensitivity: Option<&[SensitivityPoint]>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "inputs": inputs,
        "results": results,
        "breakdown": breakdown,
        "downPaymentCheck": check,
    });
    if let Some(points) = sensitivity {
        body["rateSensitivity"] = serde_json::json!(points);
    }
    body
}

fn run_batch(cli: &Cli, path: &Path) -> Result<()> {
    let start = Instant::now();
    let properties = load_inputs(path)
        .with_context(|| format!("Failed to load properties from {}", path.display()))?;

    let results = ScenarioRunner::run_batch(&properties);
    log::info!("Calculated {} properties in {:?}", results.len(), start.elapsed());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{:<30} {:>14} {:>14} {:>10} {:>10} {:>12}",
            "Property", "Mortgage", "Cashflow", "Cap Rate", "CoC", "CMHC");
        println!("{}", "-".repeat(95));
        for row in &results {
            println!("{:<30} {:>14} {:>14} {:>10} {:>10} {:>12}",
                truncate(&row.name, 30),
                format_currency(row.results.monthly_mortgage),
                format_currency(row.results.monthly_cashflow),
                format_percentage(row.results.cap_rate),
                format_percentage(row.results.cash_on_cash_return),
                format_currency(row.results.cmhc_premium),
            );
        }
        let positive = results.iter().filter(|r| r.results.is_positive()).count();
        println!("\n{} of {} properties cashflow positive", positive, results.len());
    }

    if let Some(out) = &cli.output {
        write_results(out, &results)?;
    }

    Ok(())
}

fn write_results(path: &Path, results: &[BatchResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;
    for row in results {
        writer.serialize(OutputRow::from_batch(row))?;
    }
    writer.flush()?;
    println!("Results written to: {}", path.display());
    Ok(())
}

fn print_report(
    inputs: &CashflowInputs,
    results: &CashflowResult,
    breakdown: &ExpenseBreakdown,
    check: &DownPaymentCheck,
) {
    println!("Investment Inputs");
    println!("  Purchase Price:   {:>14}", format_currency(inputs.purchase_price));
    println!("  Down Payment:     {:>14} ({})", format_currency(inputs.down_payment), format_percentage(check.supplied_pct));
    if !check.meets_minimum {
        println!("    below minimum {} ({}), short {}",
            format_currency(check.minimum), format_percentage(check.minimum_pct), format_currency(check.shortfall));
    }
    println!("  Interest Rate:    {:>14}", format_percentage(inputs.interest_rate));
    println!("  Loan Term:        {:>11} yrs", inputs.loan_term);
    println!();

    println!("Financing");
    println!("  Loan-to-Value:    {:>14}", format_percentage(results.cmhc_ltv));
    println!("  CMHC Premium:     {:>14} @ {}", format_currency(results.cmhc_premium), format_percentage(results.cmhc_rate));
    println!("  Total Mortgage:   {:>14}", format_currency(results.total_mortgage_amount));
    println!();

    println!("Monthly Expenses");
    for (label, amount) in [
        ("Mortgage (P&I)", breakdown.mortgage),
        ("Property Taxes", breakdown.property_taxes),
        ("Insurance", breakdown.insurance),
        ("Management", breakdown.property_management),
        ("Maintenance", breakdown.maintenance),
        ("Vacancy", breakdown.vacancy),
        ("CapEx Reserve", breakdown.cap_ex),
        ("HOA Fees", breakdown.hoa_fees),
        ("Other", breakdown.other),
    ] {
        println!("  {:<16}  {:>14}", label, format_currency(amount));
    }
    println!("  {:<16}  {:>14}", "Total", format_currency(results.monthly_expenses));
    println!();

    println!("Returns");
    println!("  Monthly Income:   {:>14}", format_currency(results.monthly_income));
    println!("  Monthly Cashflow: {:>14} {}", format_currency(results.monthly_cashflow),
        if results.is_positive() { "POSITIVE" } else { "NEGATIVE" });
    println!("  Annual Cashflow:  {:>14}", format_currency(results.annual_cashflow));
    println!("  Cash-on-Cash:     {:>14}", format_percentage(results.cash_on_cash_return));
    println!("  Cap Rate:         {:>14}", format_percentage(results.cap_rate));
    println!("  Cash Required:    {:>14}", format_currency(results.total_cash_required));
}

/// Rates in half-point steps within two points of the base rate, never negative
fn sensitivity_rates(base: f64) -> Vec<f64> {
    (-4..=4)
        .map(|step| base + step as f64 * 0.5)
        .filter(|rate| *rate >= 0.0)
        .collect()
}

fn sensitivity_points(inputs: &CashflowInputs) -> Vec<SensitivityPoint> {
    ScenarioRunner::new(inputs.clone()).rate_sensitivity(&sensitivity_rates(inputs.interest_rate))
}

fn print_sensitivity(inputs: &CashflowInputs) {
    println!("\nRate Sensitivity");
    println!("{:>8} {:>14} {:>14} {:>10}", "Rate", "Mortgage", "Cashflow", "CoC");
    for point in sensitivity_points(inputs) {
        println!("{:>8} {:>14} {:>14} {:>10}",
            format_percentage(point.value),
            format_currency(point.results.monthly_mortgage),
            format_currency(point.results.monthly_cashflow),
            format_percentage(point.results.cash_on_cash_return),
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}
