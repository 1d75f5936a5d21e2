//! Internal Rate of Return (IRR) calculation
//!
//! Two solvers are available. [`IrrSolver::FixedStep`] is the reference
//! search every published figure is computed with; [`IrrSolver::Newton`]
//! finds roots the fixed-step search cannot reach, at the price of
//! different numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Starting rate for the fixed-step search
pub const DEFAULT_GUESS: f64 = 0.10;

/// Rate increment per fixed-step iteration
pub const STEP: f64 = 0.001;

/// Acceptance threshold on the discounted sum
pub const TOLERANCE: f64 = 1e-4;

/// Fixed-step iteration budget
pub const MAX_STEPS: u32 = 100;

/// Search bracket of the Newton solver and its bisection fallback
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Root-finding method used for IRR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrrSolver {
    /// Walk from the guess in +/-0.001 steps, at most 100 of them
    #[default]
    FixedStep,
    /// Newton-Raphson with a bisection fallback over [-99%, 1000%]
    Newton,
}

impl IrrSolver {
    /// Solve for the annual IRR as a decimal (0.05 for 5%)
    pub fn solve(self, cash_flows: &[f64]) -> Option<f64> {
        match self {
            Self::FixedStep => irr(cash_flows, DEFAULT_GUESS),
            Self::Newton => irr_newton(cash_flows),
        }
    }
}

impl fmt::Display for IrrSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedStep => f.write_str("fixed-step"),
            Self::Newton => f.write_str("newton"),
        }
    }
}

impl FromStr for IrrSolver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed-step" | "fixed" => Ok(Self::FixedStep),
            "newton" => Ok(Self::Newton),
            other => Err(format!("unknown IRR solver: {} (expected fixed-step or newton)", other)),
        }
    }
}

/// Discounted sum with every flow shifted one period out
///
/// `f(r) = sum_j cf[j] / (1 + r)^(j + 1)`. Equals NPV / (1 + r), so it shares
/// its roots with [`super::npv`].
fn shifted_npv(cash_flows: &[f64], rate: f64) -> f64 {
    let growth = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(j, &cf)| cf / growth.powi(j as i32 + 1))
        .sum()
}

/// Fixed-step IRR search starting from `guess`
///
/// Steps up by [`STEP`] while the discounted sum is positive and down
/// otherwise, accepting the first rate where it is within [`TOLERANCE`] of
/// zero. Returns `None` if [`MAX_STEPS`] steps do not get there, or if the
/// walk reaches a rate of -100%.
pub fn irr(cash_flows: &[f64], guess: f64) -> Option<f64> {
    if cash_flows.is_empty() {
        return None;
    }

    // Rates are derived from a step count so repeated additions do not drift
    let mut offset: i32 = 0;
    for iteration in 0..=MAX_STEPS {
        let rate = guess + f64::from(offset) * STEP;
        if rate <= -1.0 {
            return None;
        }

        let value = shifted_npv(cash_flows, rate);
        if !value.is_finite() {
            return None;
        }
        if value.abs() < TOLERANCE {
            return Some(rate);
        }
        if iteration == MAX_STEPS {
            break;
        }

        offset += if value > 0.0 { 1 } else { -1 };
    }

    None
}

/// Calculate the IRR using the Newton-Raphson method
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal, or None if no solution found
pub fn irr_newton(cash_flows: &[f64]) -> Option<f64> {
    // Handle edge cases
    if cash_flows.is_empty() {
        return None;
    }

    // Check if there's at least one sign change (required for IRR to exist)
    let has_positive = cash_flows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cash_flows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = DEFAULT_GUESS;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cash_flows, rate);

        if dnpv.abs() < 1e-20 {
            // Derivative too small, try bisection instead
            return irr_bisection(cash_flows);
        }

        // Bound the rate to reasonable values
        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < tolerance {
            // A rate pinned to a bound is not a root
            let inside = new_rate > MIN_RATE && new_rate < MAX_RATE;
            if inside && npv_and_derivative(cash_flows, new_rate).0.abs() < TOLERANCE {
                return Some(new_rate);
            }
            return irr_bisection(cash_flows);
        }

        rate = new_rate;
    }

    // Newton-Raphson didn't converge, try bisection
    irr_bisection(cash_flows)
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection method
fn irr_bisection(cash_flows: &[f64]) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    let npv_at = |rate: f64| shifted_npv(cash_flows, rate);

    // Check that we have a root in this interval
    if npv_at(low) * npv_at(high) > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at(mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_at(low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}
