//! Scenario runner for sensitivity sweeps
//!
//! Holds one base set of assumptions and evaluates variants of it. Every
//! evaluation owns its recurrence state, so variants run in parallel.

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::Assumptions;
use crate::error::{LoadError, ProjectionError};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::valuation::{IrrSolver, ValuationSummary};

/// A projection together with its valuation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub projection: ProjectionResult,
    pub valuation: ValuationSummary,
}

impl Evaluation {
    /// Project and value one set of assumptions
    pub fn run(assumptions: &Assumptions, solver: IrrSolver) -> Result<Self, ProjectionError> {
        let projection = ProjectionEngine::new(assumptions.clone())?.project();
        let valuation =
            ValuationSummary::from_projection(&projection, assumptions.investment.cost_of_capital(), solver);
        Ok(Self { projection, valuation })
    }
}

/// One point of a sensitivity sweep
#[derive(Debug, Clone)]
pub struct SweepPoint {
    /// Value the swept parameter was set to
    pub value: f64,
    pub outcome: Result<Evaluation, ProjectionError>,
}

/// Pre-loaded scenario runner for sensitivity analysis
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(Assumptions::default_robotaxi());
/// let points = runner.sweep("fare_per_mile", &[6.0, 8.0, 10.0, 11.84])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
    solver: IrrSolver,
}

impl ScenarioRunner {
    pub fn new(base_assumptions: Assumptions) -> Self {
        Self {
            base_assumptions,
            solver: IrrSolver::default(),
        }
    }

    pub fn with_solver(mut self, solver: IrrSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Evaluate the base assumptions
    pub fn run(&self) -> Result<Evaluation, ProjectionError> {
        Evaluation::run(&self.base_assumptions, self.solver)
    }

    /// Evaluate several independent scenarios, keeping input order
    pub fn run_scenarios(&self, scenarios: &[Assumptions]) -> Vec<Result<Evaluation, ProjectionError>> {
        scenarios
            .par_iter()
            .map(|assumptions| Evaluation::run(assumptions, self.solver))
            .collect()
    }

    /// Vary one named parameter over `values`
    ///
    /// Fails up front only for an unknown parameter name or an unusable value
    /// (for example a fractional horizon). Projection errors stay attached
    /// to their point.
    pub fn sweep(&self, parameter: &str, values: &[f64]) -> Result<Vec<SweepPoint>, LoadError> {
        let scenarios = values
            .iter()
            .map(|&value| {
                let mut assumptions = self.base_assumptions.clone();
                assumptions.set(parameter, value)?;
                Ok(assumptions)
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        info!("sweeping {} over {} values", parameter, values.len());
        let outcomes = self.run_scenarios(&scenarios);

        let points: Vec<SweepPoint> = values
            .iter()
            .zip(outcomes)
            .map(|(&value, outcome)| SweepPoint { value, outcome })
            .collect();

        let failed = points.iter().filter(|point| point.outcome.is_err()).count();
        if failed > 0 {
            debug!("{} of {} sweep points were rejected", failed, points.len());
        }

        Ok(points)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(Assumptions::default_robotaxi())
    }
}
