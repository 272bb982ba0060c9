//! Core projection engine: accumulation, lump-sum need, drawdown and target path

use crate::assumptions::DecimalRates;
use crate::inputs::{AmountKind, Input};
use super::math::{periods, present_value_growing_annuity, project_income_at_retirement};
use super::results::{ProjectionResult, RetirementStatus};
use super::state::DrawdownState;
use super::trajectory::TrajectoryBuilder;

/// Upper bound on points reserved up front; longer horizons grow on demand
const MAX_RESERVED_POINTS: usize = 256;

/// Ages and year spans for one projection
#[derive(Debug, Clone, Copy)]
struct Horizon {
    current_age: u32,
    retirement_age: u32,
    life_expectancy: u32,
    years_to_retirement: u32,
    years_in_retirement: u32,
}

impl Horizon {
    fn from_input(input: &Input) -> Self {
        Self {
            current_age: input.current_age,
            retirement_age: input.retirement_age,
            life_expectancy: input.life_expectancy,
            years_to_retirement: input.years_to_retirement(),
            years_in_retirement: input.years_in_retirement(),
        }
    }

    /// Points to reserve for one trajectory
    fn capacity_hint(&self) -> usize {
        let span = u64::from(self.years_to_retirement) + u64::from(self.years_in_retirement) + 2;
        usize::try_from(span)
            .unwrap_or(usize::MAX)
            .min(MAX_RESERVED_POINTS)
    }
}

/// Outcome of the accumulation phase
#[derive(Debug, Clone, Copy)]
struct Accumulation {
    balance_at_retirement: f64,
    total_contributions: f64,
}

/// What the retirement budget requires
#[derive(Debug, Clone, Copy)]
struct RetirementNeed {
    income_at_retirement: f64,
    desired_annual_income: f64,
    net_annual_need: f64,
    lump_sum: f64,
}

/// Project savings and the retirement target for one household
///
/// Pure and total: the same input always yields the same result, nothing is
/// retained between calls, and no input makes it fail. Summary scalars are
/// always finite.
pub fn compute_projection(input: &Input) -> ProjectionResult {
    let horizon = Horizon::from_input(input);
    let rates = input.assumptions.decimals();

    if input.has_inconsistent_ages() {
        log::warn!(
            "Inconsistent ages (current {}, retirement {}, life expectancy {}); affected phases are empty",
            horizon.current_age,
            horizon.retirement_age,
            horizon.life_expectancy,
        );
    }
    log::debug!(
        "Projecting {} years to retirement and {} years in retirement",
        horizon.years_to_retirement,
        horizon.years_in_retirement,
    );

    let capacity = horizon.capacity_hint();
    let mut savings = TrajectoryBuilder::with_capacity(capacity);
    let accumulation = accumulate(input, &horizon, &rates, &mut savings);
    let what_you_will_have = accumulation.balance_at_retirement;

    let need = retirement_need(input, &horizon, &rates);

    drawdown(&horizon, &rates, what_you_will_have, need.net_annual_need, &mut savings);
    if horizon.years_in_retirement == 0 && horizon.retirement_age < horizon.life_expectancy {
        extend_flat(&horizon, what_you_will_have, &mut savings);
    }

    let mut target = TrajectoryBuilder::with_capacity(capacity);
    discount_target(&horizon, &rates, need.lump_sum, &mut target);
    drawdown(&horizon, &rates, need.lump_sum, need.net_annual_need, &mut target);
    if horizon.years_in_retirement == 0
        && horizon.retirement_age < horizon.life_expectancy
        && need.lump_sum > 0.0
    {
        extend_flat(&horizon, need.lump_sum, &mut target);
    }

    let what_you_will_have = finite_or_zero("whatYouWillHave", what_you_will_have);
    let what_you_will_need = finite_or_zero("whatYouWillNeed", need.lump_sum);
    let total_contributions_made =
        finite_or_zero("totalContributionsMade", accumulation.total_contributions);
    let total_investment_growth = finite_or_zero(
        "totalInvestmentGrowth",
        accumulation.balance_at_retirement
            - input.current_retirement_savings
            - accumulation.total_contributions,
    );

    let monthly_contribution_amount =
        finite_or_zero("monthlyContributionAmount", input.monthly_contribution_amount());
    let monthly_income = input.monthly_income();
    let contribution_percent_of_income = if monthly_income > 0.0 {
        finite_or_zero(
            "contributionPercentOfIncome",
            monthly_contribution_amount / monthly_income * 100.0,
        )
    } else {
        0.0
    };

    let income_at_retirement = finite_or_zero("incomeAtRetirement", need.income_at_retirement);
    let desired_annual_retirement_income =
        finite_or_zero("desiredAnnualRetirementIncome", need.desired_annual_income);
    let budget_percent_of_retirement_income = if income_at_retirement > 0.0 {
        finite_or_zero(
            "budgetPercentOfRetirementIncome",
            desired_annual_retirement_income / income_at_retirement * 100.0,
        )
    } else {
        0.0
    };

    log::debug!(
        "Projection complete: have {:.2}, need {:.2}",
        what_you_will_have,
        what_you_will_need,
    );

    ProjectionResult {
        what_you_will_have,
        what_you_will_need,
        savings_growth_trajectory: savings.consolidate(),
        target_savings_trajectory: target.consolidate(),
        income_at_retirement,
        desired_annual_retirement_income,
        total_contributions_made,
        total_investment_growth,
        years_in_retirement: horizon.years_in_retirement,
        first_year_withdrawal: finite_or_zero("firstYearWithdrawal", need.net_annual_need),
        current_age: horizon.current_age,
        retirement_age: horizon.retirement_age,
        life_expectancy: horizon.life_expectancy,
        years_until_retirement: horizon.years_to_retirement,
        initial_savings: finite_or_zero("initialSavings", input.current_retirement_savings),
        monthly_contribution_amount,
        contribution_percent_of_income,
        monthly_budget_at_retirement: desired_annual_retirement_income / 12.0,
        budget_percent_of_retirement_income,
        status: RetirementStatus::from_figures(what_you_will_have, what_you_will_need),
    }
}

/// Grow current savings with level annual contributions up to retirement
///
/// Each year records the opening balance, adds the year's contribution, then
/// applies the pre-retirement return. The balance at retirement age closes
/// the phase.
fn accumulate(
    input: &Input,
    horizon: &Horizon,
    rates: &DecimalRates,
    savings: &mut TrajectoryBuilder,
) -> Accumulation {
    let annual_contribution = input.annual_contribution();
    let mut balance = input.current_retirement_savings;

    for year in 0..horizon.years_to_retirement {
        savings.push(horizon.current_age + year, balance);
        balance += annual_contribution;
        balance *= 1.0 + rates.pre_retirement_return;
    }
    savings.push(horizon.retirement_age, balance);

    Accumulation {
        balance_at_retirement: balance,
        // Contributions stay level; raises are not passed through to savings
        total_contributions: annual_contribution * horizon.years_to_retirement as f64,
    }
}

/// Lump sum at retirement that funds the budget through life expectancy
fn retirement_need(input: &Input, horizon: &Horizon, rates: &DecimalRates) -> RetirementNeed {
    let income_at_retirement = project_income_at_retirement(
        input.annual_pre_tax_income,
        rates.income_increase,
        periods(horizon.years_to_retirement),
    );

    let budget = input.monthly_budget_in_retirement.value();
    let desired_annual_income = match input.budget_type {
        AmountKind::PercentOfIncome => income_at_retirement * (budget / 100.0),
        // Already in retirement-year dollars
        AmountKind::Amount => budget * 12.0,
    };

    let net_annual_need = (desired_annual_income - input.other_retirement_income).max(0.0);

    let lump_sum = present_value_growing_annuity(
        net_annual_need,
        rates.post_retirement_return,
        rates.inflation,
        periods(horizon.years_in_retirement),
    );

    RetirementNeed {
        income_at_retirement,
        desired_annual_income,
        net_annual_need,
        lump_sum,
    }
}

/// Draw a retirement balance down with inflation-indexed withdrawals
fn drawdown(
    horizon: &Horizon,
    rates: &DecimalRates,
    starting_balance: f64,
    first_withdrawal: f64,
    trajectory: &mut TrajectoryBuilder,
) {
    let mut state =
        DrawdownState::at_retirement(horizon.retirement_age, starting_balance, first_withdrawal);

    for _year in 0..horizon.years_in_retirement {
        let point = state.advance_year(rates.inflation, rates.post_retirement_return);
        trajectory.push(point.age, point.value);
    }

    if horizon.years_in_retirement > 0 {
        if let Some(last_age) = trajectory.last_age() {
            if last_age < horizon.life_expectancy {
                trajectory.push(horizon.life_expectancy, state.balance.max(0.0));
            }
        }
    }
}

/// Hold a balance level from the year after retirement through life expectancy
fn extend_flat(horizon: &Horizon, balance: f64, trajectory: &mut TrajectoryBuilder) {
    for age in (horizon.retirement_age + 1)..=horizon.life_expectancy {
        trajectory.push(age, balance);
    }
}

/// Required lump sum discounted back to each pre-retirement age
fn discount_target(
    horizon: &Horizon,
    rates: &DecimalRates,
    lump_sum: f64,
    trajectory: &mut TrajectoryBuilder,
) {
    // Already retired: the leg is the single point at retirement age
    let start_age = horizon.current_age.min(horizon.retirement_age);
    for year in 0..=horizon.years_to_retirement {
        let years_remaining = horizon.years_to_retirement - year;
        let value = lump_sum / (1.0 + rates.pre_retirement_return).powi(periods(years_remaining));
        trajectory.push(start_age + year, value);
    }
}

fn finite_or_zero(field: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{} evaluated to {}; reporting 0", field, value);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::RateAssumptions;
    use crate::inputs::FieldValue;
    use crate::projection::Trajectory;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn scenario_input() -> Input {
        Input {
            current_age: 45,
            annual_pre_tax_income: 150_000.0,
            current_retirement_savings: 30_000.0,
            monthly_contribution: FieldValue::Resolved(500.0),
            contribution_type: AmountKind::Amount,
            monthly_budget_in_retirement: FieldValue::Resolved(70.0),
            budget_type: AmountKind::PercentOfIncome,
            other_retirement_income: 0.0,
            retirement_age: 67,
            life_expectancy: 95,
            assumptions: RateAssumptions {
                pre_retirement_rate_of_return: 6.0,
                post_retirement_rate_of_return: 5.0,
                inflation_rate: 3.0,
                annual_income_increase: 2.0,
            },
        }
    }

    fn assert_canonical(trajectory: &Trajectory) {
        for pair in trajectory.points().windows(2) {
            assert!(pair[0].age < pair[1].age, "ages not strictly increasing: {:?}", pair);
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let result = compute_projection(&scenario_input());

        assert!(result.what_you_will_have > 0.0);
        assert!(result.what_you_will_need > 0.0);
        assert_abs_diff_eq!(result.what_you_will_have, 384_081.09, epsilon = 0.01);
        assert_abs_diff_eq!(result.what_you_will_need, 3_379_375.65, epsilon = 0.01);

        let savings = &result.savings_growth_trajectory;
        assert_eq!(*savings.first().unwrap(), crate::projection::DataPoint::new(45, 30_000.0));
        assert_relative_eq!(savings.value_at(67).unwrap(), result.what_you_will_have);
        assert_eq!(savings.last().unwrap().age, 95);

        let target = &result.target_savings_trajectory;
        assert_relative_eq!(
            target.value_at(67).unwrap(),
            result.what_you_will_need,
            max_relative = 1e-12
        );
        assert_eq!(target.first().unwrap().age, 45);
        assert_eq!(target.last().unwrap().age, 95);

        assert_canonical(savings);
        assert_canonical(target);
    }

    #[test]
    fn test_end_to_end_summary_figures() {
        let result = compute_projection(&scenario_input());

        assert_abs_diff_eq!(result.income_at_retirement, 231_896.95, epsilon = 0.01);
        assert_abs_diff_eq!(result.desired_annual_retirement_income, 162_327.87, epsilon = 0.01);
        assert_relative_eq!(result.first_year_withdrawal, result.desired_annual_retirement_income);
        assert_relative_eq!(result.total_contributions_made, 6_000.0 * 22.0);
        assert_relative_eq!(
            result.total_investment_growth,
            result.what_you_will_have - 30_000.0 - 132_000.0,
            epsilon = 1e-6
        );
        assert_eq!(result.years_in_retirement, 28);
        assert_eq!(result.years_until_retirement, 22);
        assert_relative_eq!(result.initial_savings, 30_000.0);
        assert_relative_eq!(result.monthly_contribution_amount, 500.0);
        assert_relative_eq!(result.contribution_percent_of_income, 4.0, epsilon = 1e-9);
        assert_relative_eq!(result.budget_percent_of_retirement_income, 70.0, epsilon = 1e-9);
        assert_relative_eq!(
            result.monthly_budget_at_retirement,
            result.desired_annual_retirement_income / 12.0
        );
        assert!(!result.status.is_on_track());
    }

    #[test]
    fn test_target_discounts_back_to_today() {
        let result = compute_projection(&scenario_input());
        let today = result.target_savings_trajectory.value_at(45).unwrap();
        assert_relative_eq!(
            today,
            result.what_you_will_need / 1.06_f64.powi(22),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_growth_is_constant_before_retirement() {
        let input = Input {
            monthly_contribution: FieldValue::Resolved(0.0),
            assumptions: RateAssumptions {
                pre_retirement_rate_of_return: 0.0,
                ..RateAssumptions::default_planning()
            },
            ..scenario_input()
        };
        let result = compute_projection(&input);

        for age in 45..=67 {
            assert_eq!(result.savings_growth_trajectory.value_at(age), Some(30_000.0));
        }
        assert_relative_eq!(result.total_investment_growth, 0.0);
    }

    #[test]
    fn test_accumulation_is_non_decreasing() {
        let result = compute_projection(&scenario_input());
        let accumulation: Vec<f64> = result
            .savings_growth_trajectory
            .iter()
            .filter(|p| p.age <= 67)
            .map(|p| p.value)
            .collect();
        assert_eq!(accumulation.len(), 23);
        for pair in accumulation.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_trajectories_never_negative() {
        // Large budget with weak returns depletes savings early
        let input = Input {
            monthly_budget_in_retirement: FieldValue::Resolved(20_000.0),
            budget_type: AmountKind::Amount,
            assumptions: RateAssumptions {
                post_retirement_rate_of_return: 1.0,
                inflation_rate: 4.0,
                ..RateAssumptions::default_planning()
            },
            ..scenario_input()
        };
        let result = compute_projection(&input);

        assert!(result.savings_growth_trajectory.iter().all(|p| p.value >= 0.0));
        assert!(result.target_savings_trajectory.iter().all(|p| p.value >= 0.0));
        assert_eq!(result.savings_growth_trajectory.value_at(95), Some(0.0));
    }

    #[test]
    fn test_target_is_used_up_by_life_expectancy() {
        // Drawdown withdraws at the start of each year, the lump sum assumes year end
        let result = compute_projection(&scenario_input());
        let target = &result.target_savings_trajectory;
        assert!(target.value_at(93).unwrap() > 0.0);
        assert_eq!(target.value_at(94), Some(0.0));
        assert_eq!(target.value_at(95), Some(0.0));
    }

    #[test]
    fn test_amount_budget_is_not_inflated() {
        let input = Input {
            monthly_budget_in_retirement: FieldValue::Resolved(5_000.0),
            budget_type: AmountKind::Amount,
            other_retirement_income: 24_000.0,
            ..scenario_input()
        };
        let result = compute_projection(&input);
        assert_relative_eq!(result.desired_annual_retirement_income, 60_000.0);
        assert_relative_eq!(result.first_year_withdrawal, 36_000.0);
    }

    #[test]
    fn test_other_income_covering_budget_needs_nothing() {
        let input = Input {
            other_retirement_income: 1_000_000.0,
            ..scenario_input()
        };
        let result = compute_projection(&input);
        assert_eq!(result.first_year_withdrawal, 0.0);
        assert_eq!(result.what_you_will_need, 0.0);
        assert!(result.status.is_on_track());
        assert!(result.target_savings_trajectory.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_percent_contribution_uses_current_income() {
        let input = Input {
            monthly_contribution: FieldValue::Resolved(10.0),
            contribution_type: AmountKind::PercentOfIncome,
            ..scenario_input()
        };
        let result = compute_projection(&input);
        assert_relative_eq!(result.monthly_contribution_amount, 1_250.0);
        assert_relative_eq!(result.total_contributions_made, 15_000.0 * 22.0);
        assert_relative_eq!(result.contribution_percent_of_income, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unresolved_percent_budget_counts_as_zero() {
        let input = Input {
            monthly_budget_in_retirement: FieldValue::Unresolved("7.x".to_string()),
            ..scenario_input()
        };
        let result = compute_projection(&input);
        assert_eq!(result.desired_annual_retirement_income, 0.0);
        assert_eq!(result.what_you_will_need, 0.0);
        assert!(result.what_you_will_have.is_finite());
    }

    #[test]
    fn test_retiring_at_life_expectancy() {
        let input = Input {
            life_expectancy: 67,
            ..scenario_input()
        };
        let result = compute_projection(&input);

        assert_eq!(result.years_in_retirement, 0);
        assert_eq!(result.what_you_will_need, 0.0);
        assert_eq!(result.savings_growth_trajectory.last().unwrap().age, 67);
        assert_eq!(result.savings_growth_trajectory.len(), 23);
        assert_eq!(result.target_savings_trajectory.last().unwrap().age, 67);
        assert_eq!(result.target_savings_trajectory.len(), 23);
    }

    #[test]
    fn test_already_retired_starts_at_retirement_age() {
        let input = Input {
            current_age: 70,
            retirement_age: 67,
            ..scenario_input()
        };
        let result = compute_projection(&input);

        assert_eq!(result.years_until_retirement, 0);
        assert_relative_eq!(result.what_you_will_have, 30_000.0);
        assert_relative_eq!(result.total_contributions_made, 0.0);
        let savings = &result.savings_growth_trajectory;
        assert_eq!(*savings.first().unwrap(), crate::projection::DataPoint::new(67, 30_000.0));
        assert_eq!(savings.last().unwrap().age, 95);
        assert_canonical(savings);

        let target = &result.target_savings_trajectory;
        assert!(result.what_you_will_need > 0.0);
        assert_eq!(target.first().unwrap().age, 67);
        assert_eq!(target.value_at(67), Some(result.what_you_will_need));
        assert_eq!(target.last().unwrap().age, 95);
        assert_eq!(target.value_at(70).map(|v| v < result.what_you_will_need), Some(true));
        assert_canonical(target);
    }

    #[test]
    fn test_retiring_today_starts_at_retirement_age() {
        let input = Input {
            current_age: 67,
            ..scenario_input()
        };
        let result = compute_projection(&input);
        let target = &result.target_savings_trajectory;
        assert_eq!(target.first().unwrap().age, 67);
        assert_eq!(target.value_at(67), Some(result.what_you_will_need));
    }

    #[test]
    fn test_capacity_hint_is_bounded() {
        let horizon = Horizon::from_input(&scenario_input());
        assert_eq!(horizon.capacity_hint(), 22 + 28 + 2);

        let horizon = Horizon::from_input(&Input {
            life_expectancy: u32::MAX,
            ..scenario_input()
        });
        assert_eq!(horizon.capacity_hint(), MAX_RESERVED_POINTS);
    }

    #[test]
    fn test_life_expectancy_before_retirement() {
        let input = Input {
            life_expectancy: 60,
            ..scenario_input()
        };
        let result = compute_projection(&input);

        assert_eq!(result.years_in_retirement, 0);
        assert_eq!(result.savings_growth_trajectory.last().unwrap().age, 67);
        assert_eq!(result.what_you_will_need, 0.0);
    }

    #[test]
    fn test_pathological_rates_give_finite_scalars() {
        let input = Input {
            annual_pre_tax_income: f64::NAN,
            assumptions: RateAssumptions {
                pre_retirement_rate_of_return: -100.0,
                post_retirement_rate_of_return: f64::INFINITY,
                ..RateAssumptions::default_planning()
            },
            ..scenario_input()
        };
        let result = compute_projection(&input);

        for value in [
            result.what_you_will_have,
            result.what_you_will_need,
            result.total_contributions_made,
            result.total_investment_growth,
            result.income_at_retirement,
            result.desired_annual_retirement_income,
            result.first_year_withdrawal,
            result.monthly_budget_at_retirement,
        ] {
            assert!(value.is_finite());
        }
        assert!(result.savings_growth_trajectory.iter().all(|p| p.value.is_finite()));
        assert!(result.target_savings_trajectory.iter().all(|p| p.value.is_finite()));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let input = scenario_input();
        assert_eq!(compute_projection(&input), compute_projection(&input));
    }
}
