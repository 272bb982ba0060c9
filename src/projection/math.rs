//! Time-value-of-money primitives
//!
//! All rates are decimal fractions per period (0.05 for 5%). Period counts
//! are signed so callers can pass a raw age difference; anything `<= 0`
//! takes the degenerate branch.

/// Year count as a period exponent, saturating at `i32::MAX`
pub(crate) fn periods(years: u32) -> i32 {
    i32::try_from(years).unwrap_or(i32::MAX)
}

/// Compound a single sum: `pv * (1 + rate)^periods`
///
/// Returns `pv` unchanged when `periods <= 0`.
pub fn future_value(pv: f64, rate: f64, periods: i32) -> f64 {
    if periods <= 0 {
        return pv;
    }
    pv * (1.0 + rate).powi(periods)
}

/// Future value of a level payment stream, payments at the end of each period
///
/// Zero periods accumulate nothing; a zero rate is a plain sum of payments.
pub fn future_value_annuity(payment: f64, periodic_rate: f64, periods: i32) -> f64 {
    if periods <= 0 {
        return 0.0;
    }
    if periodic_rate == 0.0 {
        return payment * periods as f64;
    }
    payment * ((1.0 + periodic_rate).powi(periods) - 1.0) / periodic_rate
}

/// Nominal income after `years` of raises at `increase_rate`
pub fn project_income_at_retirement(current_income: f64, increase_rate: f64, years: i32) -> f64 {
    if years <= 0 {
        return current_income;
    }
    current_income * (1.0 + increase_rate).powi(years)
}

/// Present value of `years` annual withdrawals growing at `growth_rate`,
/// discounted at `discount_rate`, first withdrawal `first_payment` one year out
///
/// PV = sum over i in 0..n of C1 (1+g)^i / (1+r)^(i+1)
pub fn present_value_growing_annuity(
    first_payment: f64,
    discount_rate: f64,
    growth_rate: f64,
    years: i32,
) -> f64 {
    if years <= 0 {
        return 0.0;
    }

    // r == g: every term collapses to C1 / (1 + r)
    if discount_rate == growth_rate {
        return first_payment * years as f64 / (1.0 + discount_rate);
    }

    // Returns trailing withdrawal growth: sum the stream directly
    if discount_rate < growth_rate {
        let mut needed = 0.0;
        let mut withdrawal = first_payment;
        for i in 0..years {
            needed += withdrawal / (1.0 + discount_rate).powi(i + 1);
            withdrawal *= 1.0 + growth_rate;
        }
        return needed;
    }

    let ratio = ((1.0 + growth_rate) / (1.0 + discount_rate)).powi(years);
    first_payment / (discount_rate - growth_rate) * (1.0 - ratio)
}
