//! Scalar investment metrics derived from a projection

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::projection::{ProjectionResult, YearRecord};
use super::irr::IrrSolver;
use super::npv::npv;

/// Year in which cumulative profit first covers the investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    /// Recovered by the end of this (1-indexed) year
    Year(u32),
    /// Not recovered within the projected horizon
    BeyondProjection,
}

impl Payback {
    pub fn year(self) -> Option<u32> {
        match self {
            Self::Year(year) => Some(year),
            Self::BeyondProjection => None,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(1) => f.write_str("1 year"),
            Self::Year(year) => write!(f, "{} years", year),
            Self::BeyondProjection => f.write_str("Beyond projection"),
        }
    }
}

/// Headline metrics for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub initial_investment: f64,

    /// NPV at the cost of capital; `None` if the rate is -100% or lower
    pub npv: Option<f64>,

    /// IRR as a percentage; `None` if the solver did not converge
    pub irr_pct: Option<f64>,

    /// ROI of the first projected year, as displayed
    pub year_one_roi: Option<f64>,

    pub payback: Payback,

    /// Solver the IRR was computed with
    pub solver: IrrSolver,
}

impl ValuationSummary {
    /// Value a projection, discounting at `discount_rate` (decimal)
    pub fn from_projection(result: &ProjectionResult, discount_rate: f64, solver: IrrSolver) -> Self {
        let cash_flows = result.cash_flows();

        let npv = npv(&cash_flows, discount_rate);
        let irr_pct = solver.solve(&cash_flows).map(|rate| rate * 100.0);
        if irr_pct.is_none() {
            debug!("IRR did not converge with the {} solver", solver);
        }

        Self {
            initial_investment: result.initial_investment,
            npv,
            irr_pct,
            year_one_roi: year_one_roi(&result.primary),
            payback: payback_period(&result.primary, result.initial_investment),
            solver,
        }
    }
}

/// ROI of the first record, `None` for an empty projection
pub fn year_one_roi(records: &[YearRecord]) -> Option<f64> {
    records.first().and_then(|record| record.roi)
}

/// First year whose cumulative (displayed) profit reaches the investment
pub fn payback_period(records: &[YearRecord], investment: f64) -> Payback {
    let mut cumulative = 0.0;
    for record in records {
        cumulative += record.annual_profit;
        if cumulative >= investment {
            return Payback::Year(record.year);
        }
    }
    Payback::BeyondProjection
}
