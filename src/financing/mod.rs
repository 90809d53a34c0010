//! Financing rules: amortization, mortgage insurance and down payment minimums

mod amortization;
mod mortgage_insurance;
mod down_payment;

pub use amortization::{monthly_payment, payments_per_term};
pub use mortgage_insurance::{
    insurance_premium, total_mortgage_amount, CmhcResult, PremiumSchedule, PremiumTier,
    TotalMortgage, LTV_TOLERANCE, NO_PREMIUM_MAX_LTV,
};
pub use down_payment::{
    minimum_down_payment, percentage_from_amount, amount_from_percentage, DownPaymentCheck,
};
