//! Core projection engine for annual robotaxi cash-flow projections

use log::debug;

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use super::state::ProjectionState;
use super::cashflows::ProjectionResult;

/// Main projection engine
///
/// Holds one immutable snapshot of the assumptions; every call to
/// [`ProjectionEngine::project`] recomputes from scratch.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    /// Create a new projection engine, rejecting unusable divisors and horizons
    pub fn new(assumptions: Assumptions) -> Result<Self, ProjectionError> {
        validate(&assumptions)?;
        Ok(Self { assumptions })
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run the projection for the whole horizon
    pub fn project(&self) -> ProjectionResult {
        let assumptions = &self.assumptions;
        let utilization = assumptions.utilization();
        let mut result = ProjectionResult::new(assumptions.initial_investment(), utilization);

        debug!(
            "projecting {} years: {} trips/day, {} trips/yr, {} miles/yr",
            assumptions.years, utilization.trips_per_day, utilization.annual_trips, utilization.annual_miles
        );

        let mut state = ProjectionState::initial(assumptions);
        loop {
            let figures = state.evaluate(assumptions, &utilization);
            result.add_year(figures);

            // The final year is never advanced
            if state.year >= assumptions.years {
                break;
            }
            state = state.advance(assumptions, &figures);
        }

        result
    }
}

/// Validate and project in one call
pub fn project(assumptions: &Assumptions) -> Result<ProjectionResult, ProjectionError> {
    Ok(ProjectionEngine::new(assumptions.clone())?.project())
}

fn validate(assumptions: &Assumptions) -> Result<(), ProjectionError> {
    let operations = &assumptions.operations;

    // Negated comparisons so that NaN is rejected too
    if !(operations.trip_length_minutes > 0.0) {
        return Err(ProjectionError::invalid(
            "trip_length_minutes",
            operations.trip_length_minutes,
            "trip duration must be positive",
        ));
    }
    if !(operations.hours_per_day > 0.0) {
        return Err(ProjectionError::invalid(
            "hours_per_day",
            operations.hours_per_day,
            "operating hours must be positive",
        ));
    }
    if assumptions.years < 1 {
        return Err(ProjectionError::invalid(
            "years",
            f64::from(assumptions.years),
            "horizon must be at least one year",
        ));
    }

    Ok(())
}
