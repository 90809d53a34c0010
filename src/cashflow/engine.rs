//! Core cashflow calculation: financing, monthly expenses and yield measures

use serde::{Deserialize, Serialize};
use crate::financing::{insurance_premium, monthly_payment};
use crate::property::CashflowInputs;
use crate::round_cents;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Result of a cashflow calculation. Every field is rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowResult {
    /// Principal and interest on the loan including the financed premium
    pub monthly_mortgage: f64,
    pub monthly_expenses: f64,
    pub monthly_income: f64,
    pub monthly_cashflow: f64,
    pub annual_cashflow: f64,
    /// Annual cashflow over cash invested, percent
    pub cash_on_cash_return: f64,
    /// NOI over purchase price, percent
    pub cap_rate: f64,
    pub total_cash_required: f64,
    pub cmhc_premium: f64,
    pub cmhc_rate: f64,
    pub cmhc_ltv: f64,
    pub total_mortgage_amount: f64,
}

impl CashflowResult {
    /// True when the property pays for itself each month
    pub fn is_positive(&self) -> bool {
        self.monthly_cashflow >= 0.0
    }
}

/// Monthly expense line items, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub mortgage: f64,
    pub property_taxes: f64,
    pub insurance: f64,
    pub property_management: f64,
    pub maintenance: f64,
    pub vacancy: f64,
    pub cap_ex: f64,
    pub hoa_fees: f64,
    pub other: f64,
}

impl ExpenseBreakdown {
    /// Everything except debt service
    pub fn operating_total(&self) -> f64 {
        round_cents(
            self.property_taxes
                + self.insurance
                + self.property_management
                + self.maintenance
                + self.vacancy
                + self.cap_ex
                + self.hoa_fees
                + self.other,
        )
    }
}

/// Calculate cashflow, returns and financing for one property
pub fn calculate_cashflow(inputs: &CashflowInputs) -> CashflowResult {
    calculate_cashflow_detailed(inputs).0
}

/// Calculate cashflow along with the monthly expense line items
pub fn calculate_cashflow_detailed(inputs: &CashflowInputs) -> (CashflowResult, ExpenseBreakdown) {
    let rent = inputs.monthly_rent;

    // Financing: premium is rolled into the principal before amortizing
    let loan_amount = inputs.loan_amount();
    let cmhc = insurance_premium(loan_amount, inputs.purchase_price);
    let total_mortgage_amount = loan_amount + cmhc.premium;

    let monthly_mortgage = if total_mortgage_amount > 0.0 {
        monthly_payment(total_mortgage_amount, inputs.interest_rate, inputs.loan_term)
    } else {
        0.0
    };

    log::debug!(
        "Mortgage: loan={:.2}, premium={:.2}, total={:.2}, rate={}%, term={}y, payment={:.4}",
        loan_amount, cmhc.premium, total_mortgage_amount, inputs.interest_rate, inputs.loan_term, monthly_mortgage
    );

    // Percent-of-rent lines use gross rent, not post-vacancy rent
    let management = percent_of(rent, inputs.property_management);
    let maintenance = percent_of(rent, inputs.maintenance_reserve);
    let vacancy = percent_of(rent, inputs.vacancy);
    let cap_ex = percent_of(rent, inputs.cap_ex_reserve);

    let fixed_costs = inputs.property_taxes + inputs.insurance + inputs.hoa_fees + inputs.other_expenses;
    let rent_based_costs = management + maintenance + cap_ex;

    let monthly_expenses = monthly_mortgage + fixed_costs + rent_based_costs + vacancy;

    // Vacancy is already an expense line; income stays gross
    let monthly_income = rent;
    let monthly_cashflow = monthly_income - monthly_expenses;
    let annual_cashflow = monthly_cashflow * MONTHS_PER_YEAR;

    let total_cash_required = inputs.down_payment;
    let cash_on_cash_return = if total_cash_required > 0.0 {
        annual_cashflow / total_cash_required * 100.0
    } else {
        0.0
    };

    // NOI excludes debt service; vacancy comes off income instead of opex
    let annual_operating_expenses = fixed_costs * MONTHS_PER_YEAR + rent_based_costs * MONTHS_PER_YEAR;
    let gross_annual_income = rent * MONTHS_PER_YEAR;
    let effective_annual_income = gross_annual_income - vacancy * MONTHS_PER_YEAR;
    let noi = effective_annual_income - annual_operating_expenses;
    let cap_rate = if inputs.purchase_price > 0.0 {
        noi / inputs.purchase_price * 100.0
    } else {
        0.0
    };

    let result = CashflowResult {
        monthly_mortgage: round_cents(monthly_mortgage),
        monthly_expenses: round_cents(monthly_expenses),
        monthly_income: round_cents(monthly_income),
        monthly_cashflow: round_cents(monthly_cashflow),
        annual_cashflow: round_cents(annual_cashflow),
        cash_on_cash_return: round_cents(cash_on_cash_return),
        cap_rate: round_cents(cap_rate),
        total_cash_required: round_cents(total_cash_required),
        cmhc_premium: cmhc.premium,
        cmhc_rate: cmhc.rate,
        cmhc_ltv: cmhc.loan_to_value,
        total_mortgage_amount: round_cents(total_mortgage_amount),
    };

    let breakdown = ExpenseBreakdown {
        mortgage: round_cents(monthly_mortgage),
        property_taxes: round_cents(inputs.property_taxes),
        insurance: round_cents(inputs.insurance),
        property_management: round_cents(management),
        maintenance: round_cents(maintenance),
        vacancy: round_cents(vacancy),
        cap_ex: round_cents(cap_ex),
        hoa_fees: round_cents(inputs.hoa_fees),
        other: round_cents(inputs.other_expenses),
    };

    (result, breakdown)
}

fn percent_of(amount: f64, percent: f64) -> f64 {
    amount * percent / 100.0
}
