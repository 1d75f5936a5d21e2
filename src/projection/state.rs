//! Year-over-year recurrence state

use crate::assumptions::{Assumptions, Utilization, MAINTENANCE_ESCALATION, SOFTWARE_ESCALATION};
use super::cashflows::YearFigures;

/// State of the vehicle at the start of a projection year
///
/// The recurrence is a fold: [`ProjectionState::evaluate`] reads the state
/// and produces that year's figures, [`ProjectionState::advance`] returns the
/// state for the following year. Nothing is mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Remaining book value; not floored at zero
    pub vehicle_value: f64,

    /// Primary fare ($ per mile)
    pub fare_per_mile: f64,

    /// Competitor fare ($ per mile)
    pub competitor_fare_per_mile: f64,

    /// Escalating maintenance cost for the year
    pub maintenance: f64,

    /// Declining software licensing cost for the year
    pub software: f64,

    /// Next-generation replacement cost for this year's vintage
    pub replacement_cost: f64,
}

impl ProjectionState {
    /// Year-1 state straight from the assumptions
    pub fn initial(assumptions: &Assumptions) -> Self {
        let investment = assumptions.initial_investment();
        Self {
            year: 1,
            vehicle_value: investment,
            fare_per_mile: assumptions.pricing.fare_per_mile,
            competitor_fare_per_mile: assumptions.pricing.fare_per_mile,
            maintenance: assumptions.expenses.maintenance_cost,
            software: assumptions.expenses.software_licensing_cost,
            replacement_cost: assumptions.market.replacement_cost(&assumptions.investment, 0),
        }
    }

    /// Compute this year's revenue, expenses, and returns
    pub fn evaluate(&self, assumptions: &Assumptions, utilization: &Utilization) -> YearFigures {
        let investment = assumptions.initial_investment();

        let revenue = utilization.annual_miles * self.fare_per_mile;
        let depreciation = self.vehicle_value * assumptions.expenses.depreciation_rate();
        // Charged on the original investment, not the depreciated balance
        let capital_charge = investment * assumptions.investment.cost_of_capital();
        let expenses = &assumptions.expenses;
        let total_expense = depreciation
            + self.maintenance
            + expenses.insurance_cost
            + expenses.cleaning_cost
            + expenses.energy_cost
            + self.software
            + capital_charge;
        let profit = revenue - total_expense;

        let cost_factor = assumptions.competition.cost_factor();
        let competitor_revenue = utilization.annual_miles * self.competitor_fare_per_mile;
        let competitor_expense = total_expense * cost_factor;
        let competitor_profit = competitor_revenue - competitor_expense;

        YearFigures {
            year: self.year,
            replacement_cost: self.replacement_cost,
            vehicle_value: self.vehicle_value,
            depreciation,
            fare_per_mile: self.fare_per_mile,
            revenue,
            maintenance: self.maintenance,
            software: self.software,
            capital_charge,
            total_expense,
            profit,
            roi_pct: percent_of(profit, investment),
            competitor_fare_per_mile: self.competitor_fare_per_mile,
            competitor_revenue,
            competitor_expense,
            competitor_profit,
            competitor_roi_pct: percent_of(competitor_profit, investment * cost_factor),
        }
    }

    /// State for the next year, given the figures just evaluated
    pub fn advance(&self, assumptions: &Assumptions, figures: &YearFigures) -> Self {
        Self {
            year: self.year + 1,
            vehicle_value: self.vehicle_value - figures.depreciation,
            fare_per_mile: self.fare_per_mile * (1.0 - assumptions.pricing.fare_decline()),
            competitor_fare_per_mile: self.competitor_fare_per_mile
                * (1.0 - assumptions.competition.price_decline()),
            maintenance: self.maintenance * MAINTENANCE_ESCALATION,
            software: self.software * SOFTWARE_ESCALATION,
            replacement_cost: assumptions.market.replacement_cost(&assumptions.investment, self.year),
        }
    }

    /// Evaluate and advance in one go
    pub fn step(&self, assumptions: &Assumptions, utilization: &Utilization) -> (Self, YearFigures) {
        let figures = self.evaluate(assumptions, utilization);
        (self.advance(assumptions, &figures), figures)
    }
}

/// `amount / base` as a percentage, `None` when the base is zero or the
/// result is not finite
fn percent_of(amount: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let pct = amount / base * 100.0;
    pct.is_finite().then_some(pct)
}
