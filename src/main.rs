//! Loan Calculator CLI
//!
//! Command-line interface for amortized, deferred and bond loan calculations

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use loan_calculator::amortization::{AmortizedResult, BondResult, DeferredResult};
use loan_calculator::batch::BatchOutcome;
use loan_calculator::format::{currency, percent};
use loan_calculator::loan::load_records;
use loan_calculator::{
    AmortizationConfig, AmortizationEngine, BatchRunner, CompoundFrequency, LoanInput, LoanResult,
    LoanTerm, PaybackFrequency,
};

#[derive(Debug, Parser)]
#[command(
    name = "loan_calculator",
    version,
    about = "Amortized, deferred and bond loan calculator"
)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Skip the per-payment schedule and report totals only
    #[arg(long, global = true)]
    summary_only: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct TermArgs {
    /// Loan term, whole years
    #[arg(long, default_value_t = 0.0)]
    years: f64,

    /// Loan term, additional months
    #[arg(long, default_value_t = 0.0)]
    months: f64,

    /// Nominal annual interest rate in percent (6 for 6%)
    #[arg(long)]
    rate: f64,

    /// Compounding: annually, semiannually, quarterly, monthly, semimonthly,
    /// biweekly, weekly, daily or continuously
    #[arg(long, default_value = "monthly")]
    compound: CompoundFrequency,
}

impl TermArgs {
    fn term(&self) -> LoanTerm {
        LoanTerm::new(self.years, self.months)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Equal periodic payments over the term
    Amortized {
        /// Loan amount
        #[arg(long)]
        amount: f64,

        #[command(flatten)]
        term: TermArgs,

        /// daily, weekly, biweekly, halfmonth, month, quarter, halfyear or year
        #[arg(long, default_value = "month")]
        payback: PaybackFrequency,

        /// Print the annual schedule instead of every payment
        #[arg(long)]
        annual: bool,

        /// Write the payment schedule to a CSV file
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },
    /// Single lump sum of principal and interest at maturity
    Deferred {
        /// Loan amount
        #[arg(long)]
        amount: f64,

        #[command(flatten)]
        term: TermArgs,
    },
    /// Amount received today for a face value repaid at maturity
    Bond {
        /// Predetermined amount due at maturity
        #[arg(long)]
        face: f64,

        #[command(flatten)]
        term: TermArgs,
    },
    /// Calculate a loan described in a JSON file
    File {
        /// Path to a JSON loan configuration tagged by loanType
        input: PathBuf,
    },
    /// Calculate every loan in a CSV file
    Batch {
        /// Loans CSV with columns LoanID, LoanType, Amount, TermYears, TermMonths,
        /// InterestRate, CompoundFrequency and PaybackFrequency
        #[arg(long)]
        input: PathBuf,

        /// Write per-loan results to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AmortizationConfig {
        detailed_schedule: !cli.summary_only,
    };

    match cli.command {
        Command::Amortized {
            amount,
            term,
            payback,
            annual,
            schedule_csv,
        } => {
            let input =
                LoanInput::amortized(amount, term.term(), term.rate, term.compound, payback);
            let result = calculate(&config, &input)?;
            if let Some(path) = schedule_csv {
                if let LoanResult::Amortized(loan) = &result {
                    write_schedule_csv(&path, loan)?;
                    println!("Schedule written to: {}", path.display());
                }
            }
            report(&input, &result, cli.json, annual)
        }
        Command::Deferred { amount, term } => {
            let input = LoanInput::deferred(amount, term.term(), term.rate, term.compound);
            let result = calculate(&config, &input)?;
            report(&input, &result, cli.json, false)
        }
        Command::Bond { face, term } => {
            let input = LoanInput::bond(face, term.term(), term.rate, term.compound);
            let result = calculate(&config, &input)?;
            report(&input, &result, cli.json, false)
        }
        Command::File { input } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("Unable to read {}", input.display()))?;
            let loan = LoanInput::from_json(&json)
                .with_context(|| format!("Invalid loan configuration in {}", input.display()))?;
            let result = calculate(&config, &loan)?;
            report(&loan, &result, cli.json, false)
        }
        Command::Batch { input, output } => run_batch(config, &input, output.as_deref(), cli.json),
    }
}

fn calculate(config: &AmortizationConfig, input: &LoanInput) -> Result<LoanResult> {
    let engine = AmortizationEngine::new(config.clone());
    match engine.try_calculate(input) {
        Ok(result) => Ok(result),
        Err(err) => bail!("Invalid input: {}", err),
    }
}

fn report(input: &LoanInput, result: &LoanResult, json: bool, annual: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match result {
        LoanResult::Amortized(loan) => print_amortized(input.principal(), loan, annual),
        LoanResult::Deferred(loan) => print_deferred(input.principal(), loan),
        LoanResult::Bond(bond) => print_bond(input.principal(), bond),
    }
    Ok(())
}

fn print_amortized(principal: f64, loan: &AmortizedResult, annual: bool) {
    println!("Amortized Loan");
    println!("==============\n");
    println!("  Loan Amount:         {}", currency(principal));
    println!("  Periodic Payment:    {}", currency(loan.payment));
    println!("  Number of Payments:  {}", loan.number_of_payments);
    println!("  Periodic Rate:       {}", percent(loan.periodic_rate, 6));
    println!("  Effective Annual:    {}", percent(loan.effective_annual_rate(), 4));
    println!("  Total Payments:      {}", currency(loan.total_payments));
    println!("  Total Interest:      {}", currency(loan.total_interest));

    if loan.schedule.is_empty() {
        return;
    }
    println!();

    if annual {
        println!("{:>5} {:>16} {:>16} {:>16}", "Year", "Interest", "Principal", "Ending Balance");
        println!("{}", "-".repeat(56));
        for row in loan.annual_summary() {
            println!(
                "{:>5} {:>16} {:>16} {:>16}",
                row.year,
                currency(row.interest_paid),
                currency(row.principal_paid),
                currency(row.ending_balance),
            );
        }
    } else {
        println!(
            "{:>6} {:>14} {:>14} {:>14} {:>16} {:>16}",
            "#", "Payment", "Principal", "Interest", "Total Interest", "Balance"
        );
        println!("{}", "-".repeat(86));
        for entry in &loan.schedule {
            println!(
                "{:>6} {:>14} {:>14} {:>14} {:>16} {:>16}",
                entry.payment_number,
                currency(entry.payment_amount),
                currency(entry.principal_paid),
                currency(entry.interest_paid),
                currency(entry.cumulative_interest),
                currency(entry.remaining_balance),
            );
        }
    }
}

fn print_deferred(principal: f64, loan: &DeferredResult) {
    println!("Deferred Payment Loan");
    println!("=====================\n");
    println!("  Loan Amount:            {}", currency(principal));
    println!("  Amount Due at Maturity: {}", currency(loan.amount_due_at_maturity));
    println!("  Total Interest:         {}", currency(loan.total_interest));
}

fn print_bond(face_value: f64, bond: &BondResult) {
    println!("Bond");
    println!("====\n");
    println!("  Predetermined Due Amount:   {}", currency(face_value));
    println!("  Amount Received at Start:   {}", currency(bond.amount_received_at_start));
    println!("  Total Interest:             {}", currency(bond.total_interest));
}

fn write_schedule_csv(path: &Path, loan: &AmortizedResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;
    for entry in &loan.schedule {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Flat per-loan row for batch output
#[derive(Debug, Serialize)]
struct BatchRow {
    #[serde(rename = "LoanID")]
    loan_id: u32,
    #[serde(rename = "LoanType")]
    loan_type: String,
    #[serde(rename = "Payment")]
    payment: Option<f64>,
    #[serde(rename = "NumberOfPayments")]
    number_of_payments: Option<u32>,
    #[serde(rename = "AmountAtMaturity")]
    amount_at_maturity: Option<f64>,
    #[serde(rename = "AmountAtStart")]
    amount_at_start: Option<f64>,
    #[serde(rename = "TotalInterest")]
    total_interest: Option<f64>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl From<&BatchOutcome> for BatchRow {
    fn from(outcome: &BatchOutcome) -> Self {
        let mut row = BatchRow {
            loan_id: outcome.loan_id,
            loan_type: String::new(),
            payment: None,
            number_of_payments: None,
            amount_at_maturity: None,
            amount_at_start: None,
            total_interest: outcome.result.as_ref().map(LoanResult::total_interest),
            error: outcome.error.clone(),
        };

        match &outcome.result {
            Some(LoanResult::Amortized(loan)) => {
                row.loan_type = "amortized".to_string();
                row.payment = Some(loan.payment);
                row.number_of_payments = Some(loan.number_of_payments);
            }
            Some(LoanResult::Deferred(loan)) => {
                row.loan_type = "deferred".to_string();
                row.amount_at_maturity = Some(loan.amount_due_at_maturity);
            }
            Some(LoanResult::Bond(bond)) => {
                row.loan_type = "bond".to_string();
                row.amount_at_start = Some(bond.amount_received_at_start);
            }
            None => {}
        }

        row
    }
}

fn run_batch(
    config: AmortizationConfig,
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let start = Instant::now();

    let records = load_records(input)
        .map_err(|err| anyhow::anyhow!("Failed to load loans from {}: {}", input.display(), err))?;
    info!("Loaded {} loans in {:?}", records.len(), start.elapsed());

    let runner = BatchRunner::new(config);
    let outcomes = runner.run_records(&records);
    let failed = outcomes.iter().filter(|o| o.result.is_none()).count();
    info!("Calculated {} loans in {:?}", outcomes.len(), start.elapsed());

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        for outcome in &outcomes {
            writer.serialize(BatchRow::from(outcome))?;
        }
        writer.flush()?;
        println!("Results written to: {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("{:>8} {:>10} {:>16} {:>16}", "LoanID", "Type", "Key Amount", "Total Interest");
        println!("{}", "-".repeat(53));
        for outcome in &outcomes {
            let row = BatchRow::from(outcome);
            match &outcome.result {
                Some(result) => {
                    let key_amount = row
                        .payment
                        .or(row.amount_at_maturity)
                        .or(row.amount_at_start)
                        .unwrap_or(0.0);
                    println!(
                        "{:>8} {:>10} {:>16} {:>16}",
                        row.loan_id,
                        row.loan_type,
                        currency(key_amount),
                        currency(result.total_interest()),
                    );
                }
                None => println!(
                    "{:>8} {:>10} {}",
                    row.loan_id,
                    "invalid",
                    row.error.as_deref().unwrap_or("")
                ),
            }
        }
        println!("\n{} loans, {} invalid", outcomes.len(), failed);
    }

    Ok(())
}
