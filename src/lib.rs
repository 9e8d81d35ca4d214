//! Loan Calculator - amortization engine for consumer loan calculations
//!
//! This library provides:
//! - Amortized loans: periodic rate conversion across compounding and payback
//!   frequencies, level payment sizing and a full payment schedule
//! - Deferred loans: lump sum due at maturity
//! - Zero-coupon bonds: present value of a face amount
//! - CSV loading and parallel batch calculation
//! - Effective-rate analytics and display formatting

pub mod amortization;
pub mod batch;
pub mod error;
pub mod format;
pub mod loan;

// Re-export commonly used types
pub use amortization::{AmortizationConfig, AmortizationEngine, LoanResult, ScheduleEntry};
pub use batch::BatchRunner;
pub use error::LoanError;
pub use loan::{CompoundFrequency, LoanInput, LoanTerm, PaybackFrequency};
