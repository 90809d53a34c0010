//! Saved calculations and spreadsheet export
//!
//! A saved calculation pairs the inputs with the results they produced so the
//! storage layer can persist and later export them unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::cashflow::{calculate_cashflow, CashflowResult};
use crate::error::{CashflowError, Result};
use crate::format::{format_currency, format_percentage};
use crate::property::CashflowInputs;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCalculation {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,
    pub inputs: CashflowInputs,
    pub results: CashflowResult,
    pub saved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SavedCalculation {
    /// Calculate results for `inputs` and stamp the record with a fresh id
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        listing_url: Option<String>,
        inputs: CashflowInputs,
        notes: Option<String>,
    ) -> Self {
        let saved_at = Utc::now();
        let results = calculate_cashflow(&inputs);
        Self {
            id: generate_id(saved_at),
            name: name.into(),
            address: address.into(),
            listing_url,
            inputs,
            results,
            saved_at,
            notes,
        }
    }
}

/// Base-36 millisecond timestamp followed by a base-36 sequence number
fn generate_id(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().max(0) as u64;
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}", to_base36(millis), to_base36(seq))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Property Name")]
    name: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Saved")]
    saved: String,
    #[serde(rename = "Purchase Price")]
    purchase_price: String,
    #[serde(rename = "Down Payment")]
    down_payment: String,
    #[serde(rename = "Monthly Cashflow")]
    monthly_cashflow: String,
    #[serde(rename = "Cap Rate")]
    cap_rate: String,
    #[serde(rename = "Cash-on-Cash Return")]
    cash_on_cash_return: String,
}

/// Write one summary row per saved calculation
pub fn export_summary_csv<W: Write>(calculations: &[SavedCalculation], writer: W) -> Result<()> {
    if calculations.is_empty() {
        return Err(CashflowError::invalid("calculations", "no saved calculations to export"));
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for calc in calculations {
        csv_writer.serialize(SummaryRow {
            name: &calc.name,
            address: &calc.address,
            saved: calc.saved_at.format("%Y-%m-%d %H:%M").to_string(),
            purchase_price: format_currency(calc.inputs.purchase_price),
            down_payment: format_currency(calc.inputs.down_payment),
            monthly_cashflow: format_currency(calc.results.monthly_cashflow),
            cap_rate: format_percentage(calc.results.cap_rate),
            cash_on_cash_return: format_percentage(calc.results.cash_on_cash_return),
        })?;
    }
    csv_writer.flush()?;

    log::info!("Exported {} saved calculations", calculations.len());
    Ok(())
}
