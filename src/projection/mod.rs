//! Projection engine for the primary vehicle and its competitor

mod state;
mod engine;
mod cashflows;

pub use state::ProjectionState;
pub use engine::{project, ProjectionEngine};
pub use cashflows::{
    round_currency, round_to, CompetitorYearRecord, ProjectionResult, ProjectionSummary, YearFigures,
    YearRecord,
};
