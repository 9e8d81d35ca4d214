//! Loan inputs: loan types, frequencies and CSV loading

mod frequency;
mod input;
pub mod loader;

pub use frequency::{CompoundFrequency, PaybackFrequency};
pub use input::{
    validate, validate_terms, AmortizedLoanInput, BondLoanInput, DeferredLoanInput, LoanInput,
    LoanTerm, ValidatedTerms,
};
pub use loader::{load_records, load_records_from_reader, LoanRecord};
