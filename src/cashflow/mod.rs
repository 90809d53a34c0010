//! Cashflow aggregation for a single property

mod engine;

pub use engine::{calculate_cashflow, calculate_cashflow_detailed, CashflowResult, ExpenseBreakdown};
