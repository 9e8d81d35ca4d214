//! Running balance state for schedule generation

/// State of an amortized loan between payments
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Payments made so far (0 before the first payment)
    pub payment_number: u32,

    /// Outstanding balance, unclamped
    pub balance: f64,

    /// Interest paid to date
    pub cumulative_interest: f64,

    /// Principal repaid to date
    pub cumulative_principal: f64,
}

/// Split of a single payment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSplit {
    pub interest: f64,
    pub principal: f64,
}

impl AmortizationState {
    /// Initialize state at loan origination
    pub fn new(principal: f64) -> Self {
        Self {
            payment_number: 0,
            balance: principal,
            cumulative_interest: 0.0,
            cumulative_principal: 0.0,
        }
    }

    /// Apply one payment: interest accrues on the balance first, the rest repays principal
    pub fn apply_payment(&mut self, payment: f64, periodic_rate: f64) -> PaymentSplit {
        self.payment_number += 1;

        let interest = self.balance * periodic_rate;
        let principal = payment - interest;

        self.balance -= principal;
        self.cumulative_interest += interest;
        self.cumulative_principal += principal;

        PaymentSplit { interest, principal }
    }

    /// Balance as displayed, floored at zero
    pub fn remaining_balance(&self) -> f64 {
        self.balance.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_payment() {
        let mut state = AmortizationState::new(1000.0);
        let split = state.apply_payment(100.0, 0.01);

        assert_eq!(state.payment_number, 1);
        assert!((split.interest - 10.0).abs() < 1e-12);
        assert!((split.principal - 90.0).abs() < 1e-12);
        assert!((state.balance - 910.0).abs() < 1e-12);
        assert!((state.cumulative_interest - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_remaining_balance_floored() {
        let mut state = AmortizationState::new(50.0);
        state.apply_payment(60.0, 0.0);
        assert!(state.balance < 0.0);
        assert_eq!(state.remaining_balance(), 0.0);
    }
}
