//! Periodic rate derivation
//!
//! Converts a nominal annual rate under one compounding convention into:
//! - a rate per payment period (amortized loans, where payback and
//!   compounding frequencies are independent)
//! - a rate per compounding period plus a growth factor over the term
//!   (deferred loans and bonds)

use crate::loan::CompoundFrequency;

/// Rate per payment period for `payments_per_year` payments
///
/// `annual_rate` is a decimal (0.06 for 6%).
pub fn periodic_payment_rate(
    annual_rate: f64,
    compound: CompoundFrequency,
    payments_per_year: u32,
) -> f64 {
    if annual_rate == 0.0 {
        return 0.0;
    }

    let ppy = payments_per_year as f64;
    match compound.periods_per_year() {
        None => (annual_rate / ppy).exp() - 1.0,
        // Annual compounding treats the nominal rate as the effective annual rate
        Some(1) => (1.0 + annual_rate).powf(1.0 / ppy) - 1.0,
        Some(periods) => {
            let c = periods as f64;
            (1.0 + annual_rate / c).powf(c / ppy) - 1.0
        }
    }
}

/// Compound growth of a single amount over the loan term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    /// Rate per compounding period (the annual rate itself when continuous)
    pub periodic_rate: f64,

    /// Compounding periods over the term (term in years when continuous)
    pub number_of_compounds: f64,

    /// Amount at maturity per unit invested at the start
    pub growth_factor: f64,
}

impl Accrual {
    pub fn over_term(annual_rate: f64, compound: CompoundFrequency, term_years: f64) -> Self {
        match compound.periods_per_year() {
            None => Self {
                periodic_rate: annual_rate,
                number_of_compounds: term_years,
                growth_factor: (annual_rate * term_years).exp(),
            },
            Some(periods) => {
                let c = periods as f64;
                let periodic_rate = annual_rate / c;
                let number_of_compounds = term_years * c;
                let growth_factor = if periodic_rate == 0.0 {
                    1.0
                } else {
                    (1.0 + periodic_rate).powf(number_of_compounds)
                };
                Self {
                    periodic_rate,
                    number_of_compounds,
                    growth_factor,
                }
            }
        }
    }

    /// Value at maturity of `amount` invested at the start
    pub fn accumulate(&self, amount: f64) -> f64 {
        amount * self.growth_factor
    }

    /// Value at the start of `amount` due at maturity
    pub fn discount(&self, amount: f64) -> f64 {
        amount / self.growth_factor
    }
}

/// Effective annual rate implied by a rate per period
pub fn effective_annual_rate(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matching_frequencies() {
        // Monthly compounding, monthly payments: plain r / 12
        let rate = periodic_payment_rate(0.06, CompoundFrequency::Monthly, 12);
        assert_relative_eq!(rate, 0.005, epsilon = 1e-15);
    }

    #[test]
    fn test_annual_compounding_is_effective_rate() {
        let rate = periodic_payment_rate(0.06, CompoundFrequency::Annually, 12);
        assert_relative_eq!((1.0 + rate).powi(12), 1.06, epsilon = 1e-12);
    }

    #[test]
    fn test_continuous_compounding() {
        let rate = periodic_payment_rate(0.06, CompoundFrequency::Continuously, 4);
        assert_relative_eq!(rate, (0.015_f64).exp() - 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_decoupled_frequencies() {
        // Quarterly compounding paid monthly: three monthly periods make one quarter
        let rate = periodic_payment_rate(0.08, CompoundFrequency::Quarterly, 12);
        assert_relative_eq!((1.0 + rate).powi(3), 1.02, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_exact() {
        for compound in [
            CompoundFrequency::Annually,
            CompoundFrequency::Daily,
            CompoundFrequency::Continuously,
        ] {
            assert_eq!(periodic_payment_rate(0.0, compound, 26), 0.0);
        }
    }

    #[test]
    fn test_accrual_discrete() {
        let accrual = Accrual::over_term(0.06, CompoundFrequency::Annually, 10.0);
        assert_eq!(accrual.periodic_rate, 0.06);
        assert_eq!(accrual.number_of_compounds, 10.0);
        assert_relative_eq!(accrual.discount(100_000.0), 55_839.4776, epsilon = 1e-3);
    }

    #[test]
    fn test_accrual_continuous() {
        let accrual = Accrual::over_term(0.05, CompoundFrequency::Continuously, 2.0);
        assert_relative_eq!(accrual.accumulate(1000.0), 1000.0 * (0.1_f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_effective_annual_rate() {
        assert_relative_eq!(effective_annual_rate(0.005, 12), 0.061677812, epsilon = 1e-9);
    }
}
