//! Valuation of a projection: NPV, IRR, Year-1 ROI, payback
//!
//! Cash flows are the negated initial investment at year 0 followed by the
//! unrounded annual profits. Payback and Year-1 ROI read the displayed
//! records so they agree with what a table of the projection shows.

mod npv;
mod irr;
mod summary;

pub use npv::npv;
pub use irr::{irr, irr_newton, IrrSolver, DEFAULT_GUESS, MAX_STEPS, STEP, TOLERANCE};
pub use summary::{payback_period, year_one_roi, Payback, ValuationSummary};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::projection::project;

    #[test]
    fn test_default_robotaxi_valuation() {
        let assumptions = Assumptions::default_robotaxi();
        let result = project(&assumptions).unwrap();
        let summary = ValuationSummary::from_projection(
            &result,
            assumptions.investment.cost_of_capital(),
            IrrSolver::FixedStep,
        );

        assert_eq!(summary.initial_investment, 173_275.0);
        assert_eq!(summary.year_one_roi, result.primary[0].roi);
        // Year 1 profit alone covers the investment
        assert_eq!(summary.payback, Payback::Year(1));
        assert!(summary.npv.unwrap() > 0.0);
        // The true IRR is several hundred percent, far outside 100 steps of 0.001
        assert_eq!(summary.irr_pct, None);
    }

    #[test]
    fn test_newton_solver_converges_on_default() {
        let assumptions = Assumptions::default_robotaxi();
        let result = project(&assumptions).unwrap();
        let summary = ValuationSummary::from_projection(&result, 0.08, IrrSolver::Newton);

        let irr_pct = summary.irr_pct.unwrap();
        let cash_flows = result.cash_flows();
        assert!(npv(&cash_flows, irr_pct / 100.0).unwrap().abs() < 1e-3);
    }

    #[test]
    fn test_newton_irr_beyond_bracket_is_undefined() {
        let mut assumptions = Assumptions::default_robotaxi();
        assumptions.pricing.fare_per_mile = 40.0;
        let result = project(&assumptions).unwrap();
        let summary = ValuationSummary::from_projection(&result, 0.08, IrrSolver::Newton);

        // Year 1 alone returns more than ten times the investment
        assert!(result.figures[0].profit > 11.0 * result.initial_investment);
        assert_eq!(summary.irr_pct, None);
    }

    #[test]
    fn test_unprofitable_vehicle_never_pays_back() {
        let mut assumptions = Assumptions::default_robotaxi();
        assumptions.pricing.fare_per_mile = 0.5;
        let result = project(&assumptions).unwrap();
        let summary = ValuationSummary::from_projection(&result, 0.08, IrrSolver::FixedStep);

        assert_eq!(summary.payback, Payback::BeyondProjection);
        assert!(summary.npv.unwrap() < 0.0);
        assert!(summary.year_one_roi.unwrap() < 0.0);
        assert!(summary.irr_pct.is_none());
    }
}
