//! Batch runner for many independent loan calculations
//!
//! Every input is computed on its own; results come back in input order with
//! `None` for inputs that cannot be computed.

use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::amortization::{AmortizationConfig, AmortizationEngine, LoanResult};
use crate::loan::{LoanInput, LoanRecord};

/// Outcome for one loaded loan record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub loan_id: u32,
    pub result: Option<LoanResult>,
    /// Why the record produced no result
    pub error: Option<String>,
}

/// Runs one engine configuration over many loans
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: AmortizationEngine,
}

impl BatchRunner {
    pub fn new(config: AmortizationConfig) -> Self {
        Self {
            engine: AmortizationEngine::new(config),
        }
    }

    pub fn engine(&self) -> &AmortizationEngine {
        &self.engine
    }

    /// Compute a single loan
    pub fn run(&self, input: &LoanInput) -> Option<LoanResult> {
        self.engine.calculate(input)
    }

    /// Compute many loans in parallel
    pub fn run_batch(&self, inputs: &[LoanInput]) -> Vec<Option<LoanResult>> {
        inputs.par_iter().map(|input| self.engine.calculate(input)).collect()
    }

    /// Resolve and compute loaded CSV records in parallel
    pub fn run_records(&self, records: &[LoanRecord]) -> Vec<BatchOutcome> {
        records
            .par_iter()
            .map(|record| {
                let outcome = record
                    .to_input()
                    .and_then(|input| self.engine.try_calculate(&input));

                match outcome {
                    Ok(result) => BatchOutcome {
                        loan_id: record.loan_id,
                        result: Some(result),
                        error: None,
                    },
                    Err(err) => {
                        warn!("loan {}: {}", record.loan_id, err);
                        BatchOutcome {
                            loan_id: record.loan_id,
                            result: None,
                            error: Some(err.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}
