//! Result structures for loan calculations

use serde::{Deserialize, Serialize};

use super::rates::effective_annual_rate;

/// A single payment period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// 1-based payment sequence number
    pub payment_number: u32,
    pub payment_amount: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub cumulative_interest: f64,
    /// Balance after this payment, floored at zero
    pub remaining_balance: f64,
}

/// Amortized loan result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizedResult {
    /// Rate per payment period
    pub periodic_rate: f64,
    pub payments_per_year: u32,
    pub number_of_payments: u32,
    /// Payment amount per period
    pub payment: f64,
    /// Sum of all payments
    pub total_payments: f64,
    pub total_interest: f64,
    /// Per-period schedule, empty when detailed output is off
    pub schedule: Vec<ScheduleEntry>,
}

/// Deferred loan result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredResult {
    pub periodic_rate: f64,
    pub number_of_compounds: f64,
    /// Principal grown to maturity, 0 when growth overflows `f64`
    pub amount_due_at_maturity: f64,
    pub total_interest: f64,
}

/// Zero-coupon bond result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondResult {
    pub periodic_rate: f64,
    pub number_of_compounds: f64,
    pub amount_received_at_start: f64,
    pub total_interest: f64,
}

/// Loan result, tagged to match the input's loan type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "loanType", rename_all = "lowercase")]
pub enum LoanResult {
    Amortized(AmortizedResult),
    Deferred(DeferredResult),
    Bond(BondResult),
}

impl LoanResult {
    pub fn total_interest(&self) -> f64 {
        match self {
            LoanResult::Amortized(result) => result.total_interest,
            LoanResult::Deferred(result) => result.total_interest,
            LoanResult::Bond(result) => result.total_interest,
        }
    }

    pub fn as_amortized(&self) -> Option<&AmortizedResult> {
        match self {
            LoanResult::Amortized(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_deferred(&self) -> Option<&DeferredResult> {
        match self {
            LoanResult::Deferred(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_bond(&self) -> Option<&BondResult> {
        match self {
            LoanResult::Bond(result) => Some(result),
            _ => None,
        }
    }
}

/// One loan year of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSummaryRow {
    /// 1-based loan year
    pub year: u32,
    pub interest_paid: f64,
    pub principal_paid: f64,
    /// Balance after the last payment of the year
    pub ending_balance: f64,
}

impl AmortizedResult {
    /// Sum of principal repaid across the schedule
    pub fn total_principal(&self) -> f64 {
        self.schedule.iter().map(|entry| entry.principal_paid).sum()
    }

    /// Effective annual rate implied by the periodic rate
    pub fn effective_annual_rate(&self) -> f64 {
        effective_annual_rate(self.periodic_rate, self.payments_per_year)
    }

    /// Balance after the last payment (0 for an empty schedule)
    pub fn final_balance(&self) -> f64 {
        self.schedule.last().map(|entry| entry.remaining_balance).unwrap_or(0.0)
    }

    /// Schedule grouped by loan year; a trailing partial year gets its own row
    pub fn annual_summary(&self) -> Vec<AnnualSummaryRow> {
        let per_year = self.payments_per_year.max(1) as usize;

        self.schedule
            .chunks(per_year)
            .enumerate()
            .map(|(index, payments)| AnnualSummaryRow {
                year: index as u32 + 1,
                interest_paid: payments.iter().map(|e| e.interest_paid).sum(),
                principal_paid: payments.iter().map(|e| e.principal_paid).sum(),
                ending_balance: payments
                    .last()
                    .map(|e| e.remaining_balance)
                    .unwrap_or(0.0),
            })
            .collect()
    }
}
