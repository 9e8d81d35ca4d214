//! Core loan calculation engine
//!
//! Maps a `LoanInput` to a `LoanResult`. Pure and deterministic: the same
//! input always yields the same result, and nothing is kept between calls.

use log::debug;

use super::rates::{periodic_payment_rate, Accrual};
use super::schedule::{AmortizedResult, BondResult, DeferredResult, LoanResult, ScheduleEntry};
use super::state::AmortizationState;
use crate::error::LoanError;
use crate::loan::{
    validate_terms, AmortizedLoanInput, BondLoanInput, DeferredLoanInput, LoanInput,
};

/// Upper bound on payments in one schedule (100 years of daily payments)
pub const MAX_NUMBER_OF_PAYMENTS: u32 = 36_500;

/// Configuration for an engine
#[derive(Debug, Clone)]
pub struct AmortizationConfig {
    /// Whether to keep the per-period schedule (totals are always computed)
    pub detailed_schedule: bool,
}

impl Default for AmortizationConfig {
    fn default() -> Self {
        Self {
            detailed_schedule: true,
        }
    }
}

/// Main loan calculation engine
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: AmortizationConfig,
}

impl AmortizationEngine {
    pub fn new(config: AmortizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AmortizationConfig {
        &self.config
    }

    /// Compute a loan, or `None` when the input cannot be computed
    pub fn calculate(&self, input: &LoanInput) -> Option<LoanResult> {
        self.try_calculate(input).ok()
    }

    /// Compute a loan, reporting why an input was rejected
    pub fn try_calculate(&self, input: &LoanInput) -> Result<LoanResult, LoanError> {
        match input {
            LoanInput::Amortized(loan) => {
                self.calculate_amortized(loan).map(LoanResult::Amortized)
            }
            LoanInput::Deferred(loan) => calculate_deferred(loan).map(LoanResult::Deferred),
            LoanInput::Bond(loan) => calculate_bond(loan).map(LoanResult::Bond),
        }
    }

    /// Equal periodic payments with a full amortization schedule
    pub fn calculate_amortized(
        &self,
        loan: &AmortizedLoanInput,
    ) -> Result<AmortizedResult, LoanError> {
        let terms = validate_terms(loan.loan_amount, loan.term, loan.interest_rate)?;

        let payments_per_year = loan.payback_frequency.periods_per_year();
        let periodic_rate =
            periodic_payment_rate(terms.annual_rate, loan.compound_frequency, payments_per_year);
        let number_of_payments = payment_count(terms.term_years, payments_per_year)?;
        let payment = level_payment(terms.principal, periodic_rate, number_of_payments);

        debug!(
            "amortized: rate={:.10} per {} ({} compounding), {} payments of {:.2}",
            periodic_rate,
            loan.payback_frequency,
            loan.compound_frequency,
            number_of_payments,
            payment
        );

        let mut state = AmortizationState::new(terms.principal);
        let mut schedule = if self.config.detailed_schedule {
            Vec::with_capacity(number_of_payments as usize)
        } else {
            Vec::new()
        };

        for _ in 0..number_of_payments {
            let split = state.apply_payment(payment, periodic_rate);

            if self.config.detailed_schedule {
                schedule.push(ScheduleEntry {
                    payment_number: state.payment_number,
                    payment_amount: payment,
                    principal_paid: split.principal,
                    interest_paid: split.interest,
                    cumulative_interest: state.cumulative_interest,
                    remaining_balance: state.remaining_balance(),
                });
            }
        }

        Ok(AmortizedResult {
            periodic_rate,
            payments_per_year,
            number_of_payments,
            payment,
            total_payments: payment * number_of_payments as f64,
            total_interest: state.cumulative_interest,
            schedule,
        })
    }
}

/// Lump sum at maturity: principal grown at the compounding rate over the term
pub fn calculate_deferred(loan: &DeferredLoanInput) -> Result<DeferredResult, LoanError> {
    let terms = validate_terms(loan.loan_amount, loan.term, loan.interest_rate)?;

    let accrual = Accrual::over_term(terms.annual_rate, loan.compound_frequency, terms.term_years);
    // Growth past f64 range is reported as zero rather than infinity
    let amount_due_at_maturity = finite_or_zero(accrual.accumulate(terms.principal));

    debug!(
        "deferred: {:.4} compounds at {:.10} ({}), due {:.2}",
        accrual.number_of_compounds,
        accrual.periodic_rate,
        loan.compound_frequency,
        amount_due_at_maturity
    );

    Ok(DeferredResult {
        periodic_rate: accrual.periodic_rate,
        number_of_compounds: accrual.number_of_compounds,
        amount_due_at_maturity,
        total_interest: finite_or_zero(amount_due_at_maturity - terms.principal).max(0.0),
    })
}

/// Zero-coupon pricing: face value discounted back to the start of the term
pub fn calculate_bond(loan: &BondLoanInput) -> Result<BondResult, LoanError> {
    let terms = validate_terms(loan.predetermined_due_amount, loan.term, loan.interest_rate)?;

    let accrual = Accrual::over_term(terms.annual_rate, loan.compound_frequency, terms.term_years);
    let amount_received_at_start = accrual.discount(terms.principal);

    debug!(
        "bond: {:.4} compounds at {:.10} ({}), price {:.2}",
        accrual.number_of_compounds,
        accrual.periodic_rate,
        loan.compound_frequency,
        amount_received_at_start
    );

    Ok(BondResult {
        periodic_rate: accrual.periodic_rate,
        number_of_compounds: accrual.number_of_compounds,
        amount_received_at_start,
        total_interest: terms.principal - amount_received_at_start,
    })
}

/// Number of payments over the term, rejecting counts above `MAX_NUMBER_OF_PAYMENTS`
pub fn payment_count(term_years: f64, payments_per_year: u32) -> Result<u32, LoanError> {
    let count = (term_years * payments_per_year as f64).round();
    if !count.is_finite() || count > MAX_NUMBER_OF_PAYMENTS as f64 {
        return Err(LoanError::TooManyPayments(count));
    }
    Ok(count as u32)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Level annuity payment; degenerate cases fall back to `principal / n` and
/// any non-finite outcome is clamped to zero
pub fn level_payment(principal: f64, periodic_rate: f64, number_of_payments: u32) -> f64 {
    let n = number_of_payments as f64;

    let payment = if periodic_rate == 0.0 || number_of_payments == 0 {
        principal / n
    } else {
        let growth = (1.0 + periodic_rate).powf(n);
        principal * periodic_rate * growth / (growth - 1.0)
    };

    finite_or_zero(payment)
}
