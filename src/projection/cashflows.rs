//! Per-year output structures for projections

use serde::{Deserialize, Serialize};

use crate::assumptions::Utilization;

/// Round a currency amount to whole dollars, halves toward +infinity
pub fn round_currency(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Unrounded figures for one projected year
///
/// These are what the recurrence actually produces. Records for display are
/// derived from them with [`YearFigures::record`] and
/// [`YearFigures::competitor_record`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearFigures {
    pub year: u32,

    // Asset
    pub replacement_cost: f64,
    pub vehicle_value: f64,
    pub depreciation: f64,

    // Primary vehicle
    pub fare_per_mile: f64,
    pub revenue: f64,
    pub maintenance: f64,
    pub software: f64,
    pub capital_charge: f64,
    pub total_expense: f64,
    pub profit: f64,
    pub roi_pct: Option<f64>,

    // Competitor
    pub competitor_fare_per_mile: f64,
    pub competitor_revenue: f64,
    pub competitor_expense: f64,
    pub competitor_profit: f64,
    pub competitor_roi_pct: Option<f64>,
}

impl YearFigures {
    /// Display record for the primary vehicle
    pub fn record(&self) -> YearRecord {
        YearRecord {
            year: self.year,
            hardware_cost: round_currency(self.replacement_cost),
            vehicle_value: round_currency(self.vehicle_value),
            depreciation: round_currency(self.depreciation),
            fare_per_mile: round_to(self.fare_per_mile, 2),
            annual_revenue: round_currency(self.revenue),
            capital_cost: round_currency(self.capital_charge),
            annual_expenses: round_currency(self.total_expense),
            annual_profit: round_currency(self.profit),
            roi: self.roi_pct.map(|roi| round_to(roi, 1)),
        }
    }

    /// Display record for the competitor
    pub fn competitor_record(&self) -> CompetitorYearRecord {
        CompetitorYearRecord {
            year: self.year,
            fare_per_mile: round_to(self.competitor_fare_per_mile, 2),
            annual_revenue: round_currency(self.competitor_revenue),
            annual_expenses: round_currency(self.competitor_expense),
            annual_profit: round_currency(self.competitor_profit),
            roi: self.competitor_roi_pct.map(|roi| round_to(roi, 1)),
        }
    }
}

/// One year of the primary projection, rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,
    /// Next-generation replacement cost for this vintage
    pub hardware_cost: f64,
    /// Remaining book value at the start of the year
    pub vehicle_value: f64,
    pub depreciation: f64,
    pub fare_per_mile: f64,
    pub annual_revenue: f64,
    pub capital_cost: f64,
    pub annual_expenses: f64,
    pub annual_profit: f64,
    /// `None` when nothing was invested
    pub roi: Option<f64>,
}

impl YearRecord {
    pub fn is_profitable(&self) -> bool {
        self.annual_profit >= 0.0
    }
}

/// One year of the competitor projection, rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorYearRecord {
    pub year: u32,
    pub fare_per_mile: f64,
    pub annual_revenue: f64,
    pub annual_expenses: f64,
    pub annual_profit: f64,
    /// `None` when the competitor's effective capital is zero
    pub roi: Option<f64>,
}

impl CompetitorYearRecord {
    pub fn is_profitable(&self) -> bool {
        self.annual_profit >= 0.0
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Initial investment (vehicle + hardware)
    pub initial_investment: f64,

    /// Utilization, identical for every year
    pub utilization: Utilization,

    /// Primary vehicle, one record per year
    pub primary: Vec<YearRecord>,

    /// Competitor, parallel to `primary`
    pub competitor: Vec<CompetitorYearRecord>,

    /// Unrounded figures behind both sequences
    #[serde(skip)]
    pub figures: Vec<YearFigures>,
}

impl ProjectionResult {
    pub fn new(initial_investment: f64, utilization: Utilization) -> Self {
        Self {
            initial_investment,
            utilization,
            primary: Vec::new(),
            competitor: Vec::new(),
            figures: Vec::new(),
        }
    }

    /// Add one projected year to every sequence
    pub fn add_year(&mut self, figures: YearFigures) {
        self.primary.push(figures.record());
        self.competitor.push(figures.competitor_record());
        self.figures.push(figures);
    }

    pub fn years(&self) -> usize {
        self.primary.len()
    }

    pub fn annual_trips(&self) -> f64 {
        self.utilization.annual_trips
    }

    pub fn annual_miles(&self) -> f64 {
        self.utilization.annual_miles
    }

    /// Year-0 outlay followed by unrounded annual profits
    pub fn cash_flows(&self) -> Vec<f64> {
        std::iter::once(-self.initial_investment)
            .chain(self.figures.iter().map(|f| f.profit))
            .collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_revenue: f64 = self.figures.iter().map(|f| f.revenue).sum();
        let total_expenses: f64 = self.figures.iter().map(|f| f.total_expense).sum();
        let total_profit: f64 = self.figures.iter().map(|f| f.profit).sum();
        let total_competitor_profit: f64 = self.figures.iter().map(|f| f.competitor_profit).sum();
        let final_vehicle_value = self
            .figures
            .last()
            .map(|f| f.vehicle_value - f.depreciation)
            .unwrap_or(self.initial_investment);

        ProjectionSummary {
            total_years: self.figures.len() as u32,
            total_revenue,
            total_expenses,
            total_profit,
            total_competitor_profit,
            final_vehicle_value,
        }
    }
}

/// Totals over the projection horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub total_competitor_profit: f64,
    /// Book value left after the last year's depreciation
    pub final_vehicle_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency_halves_up() {
        assert_eq!(round_currency(2.5), 3.0);
        assert_eq!(round_currency(-2.5), -2.0);
        assert_eq!(round_currency(-2.6), -3.0);
        assert_eq!(round_currency(1234.49), 1234.0);
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to(11.843, 2), 11.84);
        assert_eq!(round_to(10.0639, 2), 10.06);
        assert_eq!(round_to(-12.34, 1), -12.3);
    }

    #[test]
    fn test_record_rounding() {
        let figures = YearFigures {
            year: 1,
            replacement_cost: 173_275.4,
            vehicle_value: 173_275.0,
            depreciation: 57_180.75,
            fare_per_mile: 10.064,
            revenue: 602_873.6,
            maintenance: 5_000.0,
            software: 20_000.0,
            capital_charge: 13_862.0,
            total_expense: 114_042.75,
            profit: 488_830.85,
            roi_pct: Some(282.113),
            competitor_fare_per_mile: 8.88,
            competitor_revenue: 531_947.52,
            competitor_expense: 79_829.925,
            competitor_profit: 452_117.595,
            competitor_roi_pct: None,
        };

        let record = figures.record();
        assert_eq!(record.hardware_cost, 173_275.0);
        assert_eq!(record.depreciation, 57_181.0);
        assert_eq!(record.fare_per_mile, 10.06);
        assert_eq!(record.annual_profit, 488_831.0);
        assert_eq!(record.roi, Some(282.1));
        assert!(record.is_profitable());

        let competitor = figures.competitor_record();
        assert_eq!(competitor.annual_expenses, 79_830.0);
        assert_eq!(competitor.roi, None);
    }

    #[test]
    fn test_cash_flows_prefix_investment() {
        let mut result = ProjectionResult::new(
            1000.0,
            Utilization { trips_per_day: 0.0, annual_trips: 0.0, annual_miles: 0.0 },
        );
        assert_eq!(result.cash_flows(), vec![-1000.0]);
        assert_eq!(result.summary().final_vehicle_value, 1000.0);

        let figures = YearFigures {
            year: 1,
            replacement_cost: 0.0,
            vehicle_value: 1000.0,
            depreciation: 100.0,
            fare_per_mile: 0.0,
            revenue: 0.0,
            maintenance: 0.0,
            software: 0.0,
            capital_charge: 0.0,
            total_expense: 100.0,
            profit: -100.25,
            roi_pct: None,
            competitor_fare_per_mile: 0.0,
            competitor_revenue: 0.0,
            competitor_expense: 0.0,
            competitor_profit: 0.0,
            competitor_roi_pct: None,
        };
        result.add_year(figures);

        assert_eq!(result.cash_flows(), vec![-1000.0, -100.25]);
        assert_eq!(result.summary().final_vehicle_value, 900.0);
        assert!(!result.primary[0].is_profitable());
    }
}
