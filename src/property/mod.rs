//! Listing data and calculation inputs

mod data;
pub mod loader;

pub use data::{CashflowInputs, LabeledInputs, PropertyData};
pub use loader::{load_inputs, load_inputs_from_reader};
