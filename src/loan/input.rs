//! Loan input model
//!
//! Each loan type carries only the fields it needs. Rates are nominal annual
//! percentages (6.0 means 6%).

use serde::{Deserialize, Serialize};

use super::frequency::{CompoundFrequency, PaybackFrequency};
use crate::error::LoanError;

/// Loan term as entered: whole years plus extra months
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerm {
    pub loan_term_years: f64,
    pub loan_term_months: f64,
}

impl LoanTerm {
    pub fn new(years: f64, months: f64) -> Self {
        Self {
            loan_term_years: years,
            loan_term_months: months,
        }
    }

    /// Term converted to fractional years
    pub fn years(&self) -> f64 {
        (self.loan_term_years * 12.0 + self.loan_term_months) / 12.0
    }

    /// Fractional years, rejecting empty or non-finite terms
    pub fn validated_years(&self) -> Result<f64, LoanError> {
        let years = self.years();
        if !years.is_finite() || years <= 0.0 {
            return Err(LoanError::InvalidTerm(years));
        }
        Ok(years)
    }
}

/// Equal periodic payments covering interest and principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizedLoanInput {
    pub loan_amount: f64,
    #[serde(flatten)]
    pub term: LoanTerm,
    pub interest_rate: f64,
    pub compound_frequency: CompoundFrequency,
    #[serde(rename = "payBackFrequency")]
    pub payback_frequency: PaybackFrequency,
}

/// Principal plus accrued interest due as one lump sum at maturity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredLoanInput {
    pub loan_amount: f64,
    #[serde(flatten)]
    pub term: LoanTerm,
    pub interest_rate: f64,
    pub compound_frequency: CompoundFrequency,
}

/// Known face value repaid at maturity, discounted back to the start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondLoanInput {
    pub predetermined_due_amount: f64,
    #[serde(flatten)]
    pub term: LoanTerm,
    pub interest_rate: f64,
    pub compound_frequency: CompoundFrequency,
}

/// Loan configuration, tagged by `loanType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "loanType", rename_all = "lowercase")]
pub enum LoanInput {
    Amortized(AmortizedLoanInput),
    Deferred(DeferredLoanInput),
    Bond(BondLoanInput),
}

impl LoanInput {
    pub fn amortized(
        loan_amount: f64,
        term: LoanTerm,
        interest_rate: f64,
        compound_frequency: CompoundFrequency,
        payback_frequency: PaybackFrequency,
    ) -> Self {
        LoanInput::Amortized(AmortizedLoanInput {
            loan_amount,
            term,
            interest_rate,
            compound_frequency,
            payback_frequency,
        })
    }

    pub fn deferred(
        loan_amount: f64,
        term: LoanTerm,
        interest_rate: f64,
        compound_frequency: CompoundFrequency,
    ) -> Self {
        LoanInput::Deferred(DeferredLoanInput {
            loan_amount,
            term,
            interest_rate,
            compound_frequency,
        })
    }

    pub fn bond(
        predetermined_due_amount: f64,
        term: LoanTerm,
        interest_rate: f64,
        compound_frequency: CompoundFrequency,
    ) -> Self {
        LoanInput::Bond(BondLoanInput {
            predetermined_due_amount,
            term,
            interest_rate,
            compound_frequency,
        })
    }

    /// Short name of the loan type
    pub fn loan_type(&self) -> &'static str {
        match self {
            LoanInput::Amortized(_) => "amortized",
            LoanInput::Deferred(_) => "deferred",
            LoanInput::Bond(_) => "bond",
        }
    }

    /// Loan amount, or face value for bonds
    pub fn principal(&self) -> f64 {
        match self {
            LoanInput::Amortized(input) => input.loan_amount,
            LoanInput::Deferred(input) => input.loan_amount,
            LoanInput::Bond(input) => input.predetermined_due_amount,
        }
    }

    pub fn term(&self) -> LoanTerm {
        match self {
            LoanInput::Amortized(input) => input.term,
            LoanInput::Deferred(input) => input.term,
            LoanInput::Bond(input) => input.term,
        }
    }

    pub fn interest_rate(&self) -> f64 {
        match self {
            LoanInput::Amortized(input) => input.interest_rate,
            LoanInput::Deferred(input) => input.interest_rate,
            LoanInput::Bond(input) => input.interest_rate,
        }
    }

    pub fn compound_frequency(&self) -> CompoundFrequency {
        match self {
            LoanInput::Amortized(input) => input.compound_frequency,
            LoanInput::Deferred(input) => input.compound_frequency,
            LoanInput::Bond(input) => input.compound_frequency,
        }
    }

    /// Parse a JSON loan configuration
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Inputs after validation: principal, term in years and annual rate as a decimal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedTerms {
    pub principal: f64,
    pub term_years: f64,
    pub annual_rate: f64,
}

/// Check the fields shared by every loan type
pub fn validate(input: &LoanInput) -> Result<ValidatedTerms, LoanError> {
    validate_terms(input.principal(), input.term(), input.interest_rate())
}

/// Principal must be positive, term non-empty and the rate non-negative
pub fn validate_terms(
    principal: f64,
    term: LoanTerm,
    interest_rate: f64,
) -> Result<ValidatedTerms, LoanError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanError::InvalidPrincipal(principal));
    }

    let term_years = term.validated_years()?;

    if !interest_rate.is_finite() || interest_rate < 0.0 {
        return Err(LoanError::InvalidRate(interest_rate));
    }

    Ok(ValidatedTerms {
        principal,
        term_years,
        annual_rate: interest_rate / 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mortgage() -> LoanInput {
        LoanInput::amortized(
            100_000.0,
            LoanTerm::new(10.0, 0.0),
            6.0,
            CompoundFrequency::Monthly,
            PaybackFrequency::Month,
        )
    }

    #[test]
    fn test_term_years() {
        assert!((LoanTerm::new(2.0, 6.0).years() - 2.5).abs() < 1e-12);
        assert!((LoanTerm::new(0.0, 18.0).years() - 1.5).abs() < 1e-12);
        assert_eq!(
            LoanTerm::new(0.0, 0.0).validated_years(),
            Err(LoanError::InvalidTerm(0.0))
        );
    }

    #[test]
    fn test_validate_converts_rate() {
        let terms = validate(&mortgage()).unwrap();
        assert_eq!(terms.principal, 100_000.0);
        assert_eq!(terms.term_years, 10.0);
        assert!((terms.annual_rate - 0.06).abs() < 1e-15);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let term = LoanTerm::new(5.0, 0.0);
        let zero = LoanInput::deferred(0.0, term, 5.0, CompoundFrequency::Annually);
        assert_eq!(validate(&zero), Err(LoanError::InvalidPrincipal(0.0)));

        let negative_rate = LoanInput::bond(1000.0, term, -1.0, CompoundFrequency::Annually);
        assert_eq!(validate(&negative_rate), Err(LoanError::InvalidRate(-1.0)));

        let nan_amount = LoanInput::deferred(f64::NAN, term, 5.0, CompoundFrequency::Annually);
        assert!(matches!(validate(&nan_amount), Err(LoanError::InvalidPrincipal(_))));
    }

    #[test]
    fn test_json_tagged_by_loan_type() {
        let json = r#"{
            "loanType": "amortized",
            "loanAmount": 100000,
            "loanTermYears": 10,
            "loanTermMonths": 0,
            "interestRate": 6,
            "compoundFrequency": "monthly",
            "payBackFrequency": "month"
        }"#;
        assert_eq!(LoanInput::from_json(json).unwrap(), mortgage());

        let bond = r#"{
            "loanType": "bond",
            "predeterminedDueAmount": 100000,
            "loanTermYears": 10,
            "loanTermMonths": 0,
            "interestRate": 6,
            "compoundFrequency": "annually"
        }"#;
        let parsed = LoanInput::from_json(bond).unwrap();
        assert_eq!(parsed.loan_type(), "bond");
        assert_eq!(parsed.principal(), 100_000.0);
    }

    #[test]
    fn test_json_rejects_unknown_frequency() {
        let json = r#"{
            "loanType": "deferred",
            "loanAmount": 1000,
            "loanTermYears": 1,
            "loanTermMonths": 0,
            "interestRate": 5,
            "compoundFrequency": "hourly"
        }"#;
        assert!(LoanInput::from_json(json).is_err());
    }
}
