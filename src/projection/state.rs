//! Balance state tracked through the retirement drawdown

use super::math::periods;
use super::trajectory::DataPoint;

/// State of a retirement balance at a point in the drawdown
#[derive(Debug, Clone)]
pub struct DrawdownState {
    /// Retirement years completed so far (0 at retirement)
    pub year: u32,

    /// Age at retirement
    pub retirement_age: u32,

    /// Balance at the start of the current year
    pub balance: f64,

    /// Withdrawal taken in the first retirement year
    pub first_withdrawal: f64,
}

impl DrawdownState {
    /// Initialize state with the lump sum available at retirement
    pub fn at_retirement(retirement_age: u32, balance: f64, first_withdrawal: f64) -> Self {
        Self {
            year: 0,
            retirement_age,
            balance,
            first_withdrawal,
        }
    }

    /// Withdrawal due this year, grown with inflation from the first year
    pub fn withdrawal_due(&self, inflation: f64) -> f64 {
        self.first_withdrawal * (1.0 + inflation).powi(periods(self.year))
    }

    /// Run one retirement year
    ///
    /// Withdraws at the start of the year, records the post-withdrawal balance
    /// at the year's closing age, then grows what remains. The balance never
    /// drops below zero.
    pub fn advance_year(&mut self, inflation: f64, annual_return: f64) -> DataPoint {
        let withdrawal = self.withdrawal_due(inflation);
        let after_withdrawal = (self.balance - withdrawal).max(0.0);

        self.year += 1;
        let point = DataPoint::new(self.retirement_age + self.year, after_withdrawal);

        self.balance = (after_withdrawal * (1.0 + annual_return)).max(0.0);
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_withdrawals_grow_with_inflation() {
        let mut state = DrawdownState::at_retirement(65, 100_000.0, 10_000.0);
        assert_relative_eq!(state.withdrawal_due(0.03), 10_000.0);
        state.advance_year(0.03, 0.0);
        assert_relative_eq!(state.withdrawal_due(0.03), 10_300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_advance_records_post_withdrawal_balance() {
        let mut state = DrawdownState::at_retirement(65, 100_000.0, 10_000.0);
        let point = state.advance_year(0.0, 0.10);

        assert_eq!(point.age, 66);
        assert_relative_eq!(point.value, 90_000.0);
        assert_relative_eq!(state.balance, 99_000.0, epsilon = 1e-9);
        assert_eq!(state.year, 1);
    }

    #[test]
    fn test_balance_floors_at_zero() {
        let mut state = DrawdownState::at_retirement(80, 5_000.0, 8_000.0);
        let point = state.advance_year(0.0, 0.05);
        assert_eq!(point.value, 0.0);
        assert_eq!(state.balance, 0.0);

        // Negative returns cannot push a depleted balance below zero either
        let point = state.advance_year(0.0, -0.5);
        assert_eq!(point.value, 0.0);
        assert_eq!(state.balance, 0.0);
    }
}
