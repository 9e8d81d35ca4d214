//! Error types for loan input validation

use thiserror::Error;

/// Reasons a loan input cannot be computed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    #[error("principal must be a positive number, got {0}")]
    InvalidPrincipal(f64),

    #[error("loan term must be greater than zero, got {0} years")]
    InvalidTerm(f64),

    #[error("loan term needs {0} payments, more than a schedule can hold")]
    TooManyPayments(f64),

    #[error("interest rate must be zero or positive, got {0}%")]
    InvalidRate(f64),

    #[error("unknown compound frequency: {0}")]
    UnknownCompoundFrequency(String),

    #[error("unknown payback frequency: {0}")]
    UnknownPaybackFrequency(String),

    #[error("unknown loan type: {0}")]
    UnknownLoanType(String),

    #[error("missing field for {loan_type} loan: {field}")]
    MissingField {
        loan_type: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LoanError::UnknownCompoundFrequency("hourly".to_string());
        assert_eq!(err.to_string(), "unknown compound frequency: hourly");

        let err = LoanError::MissingField { loan_type: "amortized", field: "PaybackFrequency" };
        assert_eq!(err.to_string(), "missing field for amortized loan: PaybackFrequency");
    }
}
