//! Load batches of calculation inputs from CSV
//!
//! Headers use the same camelCase names as the JSON records, plus an
//! optional `name` column used as the row label.

use super::{CashflowInputs, LabeledInputs};
use crate::error::{CashflowError, Result};
use csv::Reader;
use std::path::Path;

/// Raw CSV row; blank cells for optional columns read as zero
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    purchase_price: f64,
    down_payment: f64,
    interest_rate: f64,
    loan_term: u32,
    monthly_rent: f64,
    #[serde(default)]
    property_taxes: Option<f64>,
    #[serde(default)]
    insurance: Option<f64>,
    #[serde(default)]
    property_management: Option<f64>,
    #[serde(default)]
    maintenance_reserve: Option<f64>,
    #[serde(default)]
    vacancy: Option<f64>,
    #[serde(default)]
    cap_ex_reserve: Option<f64>,
    #[serde(default)]
    hoa_fees: Option<f64>,
    #[serde(default)]
    other_expenses: Option<f64>,
}

impl CsvRow {
    fn to_labeled(self, row_number: usize) -> Result<LabeledInputs> {
        if self.loan_term == 0 {
            return Err(CashflowError::invalid(
                "loanTerm",
                format!("row {}: amortization period must be at least one year", row_number),
            ));
        }

        let inputs = CashflowInputs {
            purchase_price: self.purchase_price,
            down_payment: self.down_payment,
            interest_rate: self.interest_rate,
            loan_term: self.loan_term,
            monthly_rent: self.monthly_rent,
            property_taxes: self.property_taxes.unwrap_or(0.0),
            insurance: self.insurance.unwrap_or(0.0),
            property_management: self.property_management.unwrap_or(0.0),
            maintenance_reserve: self.maintenance_reserve.unwrap_or(0.0),
            vacancy: self.vacancy.unwrap_or(0.0),
            cap_ex_reserve: self.cap_ex_reserve.unwrap_or(0.0),
            hoa_fees: self.hoa_fees.unwrap_or(0.0),
            other_expenses: self.other_expenses.unwrap_or(0.0),
        };

        let numbers = [
            ("purchasePrice", inputs.purchase_price),
            ("downPayment", inputs.down_payment),
            ("interestRate", inputs.interest_rate),
            ("monthlyRent", inputs.monthly_rent),
            ("propertyManagement", inputs.property_management),
            ("maintenanceReserve", inputs.maintenance_reserve),
            ("vacancy", inputs.vacancy),
            ("capExReserve", inputs.cap_ex_reserve),
            ("propertyTaxes", inputs.property_taxes),
            ("insurance", inputs.insurance),
            ("hoaFees", inputs.hoa_fees),
            ("otherExpenses", inputs.other_expenses),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(CashflowError::invalid(field, format!("row {}: not a finite number", row_number)));
            }
        }

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Property {}", row_number));

        Ok(LabeledInputs { name, inputs })
    }
}

/// Load all input rows from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledInputs>> {
    let path = path.as_ref();
    let rows = load_from_csv(Reader::from_path(path)?)?;
    log::info!("Loaded {} properties from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load input rows from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LabeledInputs>> {
    load_from_csv(Reader::from_reader(reader))
}

fn load_from_csv<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LabeledInputs>> {
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        rows.push(row.to_labeled(idx + 1)?);
    }
    Ok(rows)
}
