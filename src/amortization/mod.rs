//! Loan calculation engine for amortized, deferred and bond loans

mod engine;
mod rates;
mod schedule;
mod state;

pub use engine::{
    calculate_bond, calculate_deferred, level_payment, payment_count, AmortizationConfig,
    AmortizationEngine, MAX_NUMBER_OF_PAYMENTS,
};
pub use rates::{effective_annual_rate, periodic_payment_rate, Accrual};
pub use schedule::{
    AmortizedResult, AnnualSummaryRow, BondResult, DeferredResult, LoanResult, ScheduleEntry,
};
pub use state::{AmortizationState, PaymentSplit};
