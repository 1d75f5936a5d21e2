//! Robotaxi Investment - year-by-year projection and valuation engine
//!
//! This library provides:
//! - Annual cash-flow projections for an autonomous for-hire vehicle
//! - A parallel projection for a lower-cost competitor
//! - NPV, IRR, Year-1 ROI, and payback period
//! - Parallel sensitivity sweeps and an in-memory snapshot log

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod valuation;
pub mod scenario;
pub mod session;
pub mod report;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use assumptions::{Assumptions, Utilization};
pub use projection::{project, ProjectionEngine, ProjectionResult, YearRecord, CompetitorYearRecord};
pub use valuation::{npv, irr, IrrSolver, Payback, ValuationSummary};
pub use scenario::{Evaluation, ScenarioRunner};
pub use session::{Session, Snapshot, SnapshotLog};
