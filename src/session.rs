//! Interactive session state: current assumptions, latest evaluation, snapshots
//!
//! The engine itself is stateless. A session is what a front end keeps
//! between edits: it recomputes in full on every change and lets the user
//! pin the current headline figures as snapshots for comparison.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use crate::scenario::Evaluation;
use crate::valuation::{IrrSolver, ValuationSummary};

/// Headline figures pinned at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Position in the log, starting at 1
    pub sequence: u64,
    pub captured_at: DateTime<Utc>,
    pub label: Option<String>,
    pub initial_investment: f64,
    pub summary: ValuationSummary,
}

/// Append-only, in-memory snapshot log
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotLog {
    entries: Vec<Snapshot>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `summary` and return it
    pub fn capture(&mut self, summary: &ValuationSummary, label: Option<String>) -> &Snapshot {
        let snapshot = Snapshot {
            sequence: self.entries.len() as u64 + 1,
            captured_at: Utc::now(),
            label,
            initial_investment: summary.initial_investment,
            summary: summary.clone(),
        };
        self.entries.push(snapshot);
        &self.entries[self.entries.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One user's working session
#[derive(Debug, Clone)]
pub struct Session {
    assumptions: Assumptions,
    solver: IrrSolver,
    evaluation: Evaluation,
    snapshots: SnapshotLog,
}

impl Session {
    /// Start a session, evaluating the initial assumptions right away
    pub fn new(assumptions: Assumptions, solver: IrrSolver) -> Result<Self, ProjectionError> {
        let evaluation = Evaluation::run(&assumptions, solver)?;
        Ok(Self {
            assumptions,
            solver,
            evaluation,
            snapshots: SnapshotLog::new(),
        })
    }

    /// Replace the assumptions and recompute everything
    ///
    /// On error the previous assumptions and evaluation stay current.
    pub fn update(&mut self, assumptions: Assumptions) -> Result<&Evaluation, ProjectionError> {
        match Evaluation::run(&assumptions, self.solver) {
            Ok(evaluation) => {
                self.assumptions = assumptions;
                self.evaluation = evaluation;
                Ok(&self.evaluation)
            }
            Err(err) => {
                warn!("keeping previous evaluation: {}", err);
                Err(err)
            }
        }
    }

    /// Change a single parameter by name and recompute
    pub fn set(&mut self, parameter: &str, value: f64) -> anyhow::Result<&Evaluation> {
        let mut assumptions = self.assumptions.clone();
        assumptions.set(parameter, value)?;
        Ok(self.update(assumptions)?)
    }

    /// Pin the current valuation
    pub fn capture(&mut self, label: Option<String>) -> &Snapshot {
        let snapshot = self.snapshots.capture(&self.evaluation.valuation, label);
        info!("captured snapshot #{}", snapshot.sequence);
        snapshot
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn snapshots(&self) -> &SnapshotLog {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_recomputes_on_update() {
        let mut session = Session::new(Assumptions::default_robotaxi(), IrrSolver::FixedStep).unwrap();
        assert_eq!(session.evaluation().projection.years(), 5);

        let mut assumptions = Assumptions::default_robotaxi();
        assumptions.years = 8;
        let evaluation = session.update(assumptions).unwrap();
        assert_eq!(evaluation.projection.years(), 8);
        assert_eq!(session.assumptions().years, 8);
    }

    #[test]
    fn test_failed_update_keeps_previous_state() {
        let mut session = Session::new(Assumptions::default_robotaxi(), IrrSolver::FixedStep).unwrap();
        let before = session.evaluation().clone();

        let mut assumptions = Assumptions::default_robotaxi();
        assumptions.operations.hours_per_day = 0.0;
        assert!(session.update(assumptions).is_err());

        assert_eq!(session.evaluation(), &before);
        assert_eq!(session.assumptions().operations.hours_per_day, 12.0);
    }

    #[test]
    fn test_set_by_name() {
        let mut session = Session::new(Assumptions::default_robotaxi(), IrrSolver::FixedStep).unwrap();
        let npv_before = session.evaluation().valuation.npv.unwrap();

        session.set("insurance_cost", 50_000.0).unwrap();
        assert!(session.evaluation().valuation.npv.unwrap() < npv_before);
        assert!(session.set("fleet_size", 3.0).is_err());
    }

    #[test]
    fn test_snapshots_append_in_order() {
        let mut session = Session::new(Assumptions::default_robotaxi(), IrrSolver::FixedStep).unwrap();
        assert!(session.snapshots().is_empty());

        let first = session.capture(Some("baseline".to_string())).clone();
        session.set("fare_per_mile", 6.0).unwrap();
        let second = session.capture(None).clone();

        assert_eq!(session.snapshots().len(), 2);
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert!(second.captured_at >= first.captured_at);
        assert_eq!(first.initial_investment, 173_275.0);
        assert_ne!(first.summary, second.summary);

        // Earlier snapshots are untouched by later edits
        let stored: Vec<&Snapshot> = session.snapshots().iter().collect();
        assert_eq!(stored[0], &first);
        assert_eq!(session.snapshots().latest(), Some(&second));
    }
}
