//! Load loan inputs from CSV files
//!
//! Frequencies and loan types are kept as raw text in the file and resolved
//! through the frequency tables. A row that names an unknown frequency or
//! loan type loads as an error for that row only.

use std::error::Error;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use super::frequency::{CompoundFrequency, PaybackFrequency};
use super::input::{LoanInput, LoanTerm};
use crate::error::LoanError;

/// Raw CSV row as stored in a loans file
#[derive(Debug, Clone, Deserialize)]
pub struct LoanRecord {
    #[serde(rename = "LoanID")]
    pub loan_id: u32,
    #[serde(rename = "LoanType")]
    pub loan_type: String,
    /// Loan amount, or face value for bonds
    #[serde(rename = "Amount")]
    pub amount: f64,
    /// Blank cells read as zero
    #[serde(rename = "TermYears")]
    pub term_years: Option<f64>,
    #[serde(rename = "TermMonths")]
    pub term_months: Option<f64>,
    #[serde(rename = "InterestRate")]
    pub interest_rate: f64,
    #[serde(rename = "CompoundFrequency")]
    pub compound_frequency: String,
    #[serde(rename = "PaybackFrequency", default)]
    pub payback_frequency: Option<String>,
}

impl LoanRecord {
    /// Resolve the raw row into a typed loan input
    pub fn to_input(&self) -> Result<LoanInput, LoanError> {
        let term = LoanTerm::new(
            self.term_years.unwrap_or(0.0),
            self.term_months.unwrap_or(0.0),
        );
        let compound: CompoundFrequency = self.compound_frequency.parse()?;

        match self.loan_type.trim().to_ascii_lowercase().as_str() {
            "amortized" => {
                let payback: PaybackFrequency = self
                    .payback_frequency
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(LoanError::MissingField {
                        loan_type: "amortized",
                        field: "PaybackFrequency",
                    })?
                    .parse()?;
                Ok(LoanInput::amortized(self.amount, term, self.interest_rate, compound, payback))
            }
            "deferred" => Ok(LoanInput::deferred(self.amount, term, self.interest_rate, compound)),
            "bond" => Ok(LoanInput::bond(self.amount, term, self.interest_rate, compound)),
            _ => Err(LoanError::UnknownLoanType(self.loan_type.clone())),
        }
    }
}

/// Load all loan records from a CSV file
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let record: LoanRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// Load loan records from any reader (e.g., string buffer, stdin)
pub fn load_records_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: LoanRecord = result?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOANS_CSV: &str = "\
LoanID,LoanType,Amount,TermYears,TermMonths,InterestRate,CompoundFrequency,PaybackFrequency
1,Amortized,100000,10,0,6,monthly,month
2,deferred,5000,2,6,4.5,quarterly,
3,bond,100000,10,0,6,annually,
4,amortized,2000,1,0,5,hourly,month
5,amortized,2000,1,0,5,monthly,
6,lease,2000,1,0,5,monthly,month
";

    #[test]
    fn test_load_records_from_reader() {
        let records = load_records_from_reader(LOANS_CSV.as_bytes()).expect("Failed to load loans");
        assert_eq!(records.len(), 6);
        assert_eq!(records[1].loan_id, 2);
        assert_eq!(records[1].term_months, Some(6.0));
        assert!(records[2].payback_frequency.is_none());
    }

    #[test]
    fn test_records_resolve_to_inputs() {
        let records = load_records_from_reader(LOANS_CSV.as_bytes()).unwrap();

        let first = records[0].to_input().unwrap();
        assert_eq!(
            first,
            LoanInput::amortized(
                100_000.0,
                LoanTerm::new(10.0, 0.0),
                6.0,
                CompoundFrequency::Monthly,
                PaybackFrequency::Month,
            )
        );

        assert_eq!(records[1].to_input().unwrap().loan_type(), "deferred");
        assert_eq!(records[2].to_input().unwrap().loan_type(), "bond");
    }

    #[test]
    fn test_blank_term_cells_read_as_zero() {
        let csv = "\
LoanID,LoanType,Amount,TermYears,TermMonths,InterestRate,CompoundFrequency,PaybackFrequency
1,bond,1000,10,,5,annually,
2,deferred,1000,,18,5,monthly,
";
        let records = load_records_from_reader(csv.as_bytes()).expect("Failed to load loans");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].term_months, None);
        assert_eq!(records[1].term_years, None);

        let bond = records[0].to_input().unwrap();
        assert_eq!(bond.term(), LoanTerm::new(10.0, 0.0));
        assert_eq!(bond.term().years(), 10.0);

        let deferred = records[1].to_input().unwrap();
        assert_eq!(deferred.term().years(), 1.5);
    }

    #[test]
    fn test_bad_rows_become_errors() {
        let records = load_records_from_reader(LOANS_CSV.as_bytes()).unwrap();

        assert_eq!(
            records[3].to_input(),
            Err(LoanError::UnknownCompoundFrequency("hourly".to_string()))
        );
        assert!(matches!(records[4].to_input(), Err(LoanError::MissingField { .. })));
        assert_eq!(
            records[5].to_input(),
            Err(LoanError::UnknownLoanType("lease".to_string()))
        );
    }
}
