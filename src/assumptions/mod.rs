//! Investment, utilization, pricing, expense, and market assumptions

mod utilization;
pub mod loader;

pub use utilization::Utilization;
pub use loader::{load_assumptions, load_assumptions_csv, load_assumptions_json, DEFAULT_ASSUMPTIONS_PATH};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Annual maintenance escalation (10% per year)
pub const MAINTENANCE_ESCALATION: f64 = 1.10;

/// Annual software licensing decline (10% per year)
pub const SOFTWARE_ESCALATION: f64 = 0.90;

/// Weeks of operation per year
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Names accepted by [`Assumptions::set`], in the order they are reported
pub const PARAMETERS: [&str; 20] = [
    "base_vehicle_cost",
    "autonomous_hardware_cost",
    "cost_of_capital_pct",
    "hours_per_day",
    "days_per_week",
    "trip_length_miles",
    "trip_length_minutes",
    "fare_per_mile",
    "fare_decline_pct",
    "depreciation_rate_pct",
    "maintenance_cost",
    "insurance_cost",
    "cleaning_cost",
    "energy_cost",
    "software_licensing_cost",
    "base_vehicle_decline_pct",
    "hardware_decline_pct",
    "competitor_cost_advantage_pct",
    "competitor_price_decline_pct",
    "years",
];

/// Up-front capital outlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Investment {
    /// Base vehicle purchase price ($)
    pub base_vehicle_cost: f64,
    /// Autonomous driving hardware ($)
    pub autonomous_hardware_cost: f64,
    /// Annual cost of capital (%)
    pub cost_of_capital_pct: f64,
}

impl Investment {
    /// Total amount invested at year 0
    pub fn total(&self) -> f64 {
        self.base_vehicle_cost + self.autonomous_hardware_cost
    }

    pub fn cost_of_capital(&self) -> f64 {
        self.cost_of_capital_pct / 100.0
    }
}

impl Default for Investment {
    fn default() -> Self {
        Self {
            base_vehicle_cost: 73_275.0,
            autonomous_hardware_cost: 100_000.0,
            cost_of_capital_pct: 8.0,
        }
    }
}

/// How hard the vehicle is worked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operations {
    pub hours_per_day: f64,
    pub days_per_week: f64,
    pub trip_length_miles: f64,
    pub trip_length_minutes: f64,
}

impl Default for Operations {
    fn default() -> Self {
        Self {
            hours_per_day: 12.0,
            days_per_week: 6.0,
            trip_length_miles: 4.0,
            trip_length_minutes: 15.0,
        }
    }
}

/// Fare schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    /// Year-1 fare ($ per mile)
    pub fare_per_mile: f64,
    /// Annual fare decline (%)
    pub fare_decline_pct: f64,
}

impl Pricing {
    pub fn fare_decline(&self) -> f64 {
        self.fare_decline_pct / 100.0
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            fare_per_mile: 11.84,
            fare_decline_pct: 15.0,
        }
    }
}

/// Recurring annual expenses
///
/// Maintenance and software licensing are year-1 baselines that escalate by
/// [`MAINTENANCE_ESCALATION`] and [`SOFTWARE_ESCALATION`]; the rest are flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingExpenses {
    /// Depreciation as a share of remaining book value (%)
    pub depreciation_rate_pct: f64,
    pub maintenance_cost: f64,
    pub insurance_cost: f64,
    pub cleaning_cost: f64,
    /// Charging / energy ($ per year)
    pub energy_cost: f64,
    pub software_licensing_cost: f64,
}

impl OperatingExpenses {
    pub fn depreciation_rate(&self) -> f64 {
        self.depreciation_rate_pct / 100.0
    }
}

impl Default for OperatingExpenses {
    fn default() -> Self {
        Self {
            depreciation_rate_pct: 33.0,
            maintenance_cost: 5_000.0,
            insurance_cost: 10_000.0,
            cleaning_cost: 5_000.0,
            energy_cost: 3_000.0,
            software_licensing_cost: 20_000.0,
        }
    }
}

/// Price decline of next-generation vehicles
///
/// Only feeds the replacement cost figure. The owned vehicle's book value
/// never sees these rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDecline {
    pub base_vehicle_decline_pct: f64,
    pub hardware_decline_pct: f64,
}

impl MarketDecline {
    /// Cost of a vehicle bought `years_out` years after the initial purchase
    pub fn replacement_cost(&self, investment: &Investment, years_out: u32) -> f64 {
        let base = 1.0 - self.base_vehicle_decline_pct / 100.0;
        let hardware = 1.0 - self.hardware_decline_pct / 100.0;
        investment.base_vehicle_cost * base.powi(years_out as i32)
            + investment.autonomous_hardware_cost * hardware.powi(years_out as i32)
    }
}

impl Default for MarketDecline {
    fn default() -> Self {
        Self {
            base_vehicle_decline_pct: 10.0,
            hardware_decline_pct: 20.0,
        }
    }
}

/// Lower-cost competing platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competition {
    /// Structural cost advantage over the primary vehicle (%)
    pub cost_advantage_pct: f64,
    /// Annual decline of the competitor's fare (%)
    pub price_decline_pct: f64,
}

impl Competition {
    pub fn cost_advantage(&self) -> f64 {
        self.cost_advantage_pct / 100.0
    }

    pub fn price_decline(&self) -> f64 {
        self.price_decline_pct / 100.0
    }

    /// Multiplier applied to the primary cost base to get the competitor's
    pub fn cost_factor(&self) -> f64 {
        1.0 - self.cost_advantage()
    }
}

impl Default for Competition {
    fn default() -> Self {
        Self {
            cost_advantage_pct: 30.0,
            price_decline_pct: 25.0,
        }
    }
}

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub investment: Investment,
    pub operations: Operations,
    pub pricing: Pricing,
    pub expenses: OperatingExpenses,
    pub market: MarketDecline,
    pub competition: Competition,
    /// Number of years to project
    pub years: u32,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_robotaxi()
    }
}

impl Assumptions {
    /// The reference robotaxi case: $173,275 vehicle, 12h x 6d service, 5 years
    pub fn default_robotaxi() -> Self {
        Self {
            investment: Investment::default(),
            operations: Operations::default(),
            pricing: Pricing::default(),
            expenses: OperatingExpenses::default(),
            market: MarketDecline::default(),
            competition: Competition::default(),
            years: 5,
        }
    }

    /// Initial investment (vehicle + autonomous hardware)
    pub fn initial_investment(&self) -> f64 {
        self.investment.total()
    }

    /// Utilization scalars derived from the operating schedule
    pub fn utilization(&self) -> Utilization {
        Utilization::from_operations(&self.operations)
    }

    /// Override one parameter by its flat name (see [`PARAMETERS`])
    pub fn set(&mut self, parameter: &str, value: f64) -> Result<(), LoadError> {
        let slot = match parameter {
            "base_vehicle_cost" => &mut self.investment.base_vehicle_cost,
            "autonomous_hardware_cost" => &mut self.investment.autonomous_hardware_cost,
            "cost_of_capital_pct" => &mut self.investment.cost_of_capital_pct,
            "hours_per_day" => &mut self.operations.hours_per_day,
            "days_per_week" => &mut self.operations.days_per_week,
            "trip_length_miles" => &mut self.operations.trip_length_miles,
            "trip_length_minutes" => &mut self.operations.trip_length_minutes,
            "fare_per_mile" => &mut self.pricing.fare_per_mile,
            "fare_decline_pct" => &mut self.pricing.fare_decline_pct,
            "depreciation_rate_pct" => &mut self.expenses.depreciation_rate_pct,
            "maintenance_cost" => &mut self.expenses.maintenance_cost,
            "insurance_cost" => &mut self.expenses.insurance_cost,
            "cleaning_cost" => &mut self.expenses.cleaning_cost,
            "energy_cost" => &mut self.expenses.energy_cost,
            "software_licensing_cost" => &mut self.expenses.software_licensing_cost,
            "base_vehicle_decline_pct" => &mut self.market.base_vehicle_decline_pct,
            "hardware_decline_pct" => &mut self.market.hardware_decline_pct,
            "competitor_cost_advantage_pct" => &mut self.competition.cost_advantage_pct,
            "competitor_price_decline_pct" => &mut self.competition.price_decline_pct,
            "years" => {
                self.years = whole_years(value).ok_or_else(|| LoadError::InvalidValue {
                    parameter: parameter.to_string(),
                    value: value.to_string(),
                })?;
                return Ok(());
            }
            other => return Err(LoadError::UnknownParameter(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    /// Override one parameter from its textual form (`"15"`, `"11.84"`)
    pub fn set_str(&mut self, parameter: &str, raw: &str) -> Result<(), LoadError> {
        let value: f64 = raw.trim().parse().map_err(|_| LoadError::InvalidValue {
            parameter: parameter.to_string(),
            value: raw.to_string(),
        })?;
        self.set(parameter, value)
    }

    /// Read one parameter by its flat name
    pub fn get(&self, parameter: &str) -> Option<f64> {
        let value = match parameter {
            "base_vehicle_cost" => self.investment.base_vehicle_cost,
            "autonomous_hardware_cost" => self.investment.autonomous_hardware_cost,
            "cost_of_capital_pct" => self.investment.cost_of_capital_pct,
            "hours_per_day" => self.operations.hours_per_day,
            "days_per_week" => self.operations.days_per_week,
            "trip_length_miles" => self.operations.trip_length_miles,
            "trip_length_minutes" => self.operations.trip_length_minutes,
            "fare_per_mile" => self.pricing.fare_per_mile,
            "fare_decline_pct" => self.pricing.fare_decline_pct,
            "depreciation_rate_pct" => self.expenses.depreciation_rate_pct,
            "maintenance_cost" => self.expenses.maintenance_cost,
            "insurance_cost" => self.expenses.insurance_cost,
            "cleaning_cost" => self.expenses.cleaning_cost,
            "energy_cost" => self.expenses.energy_cost,
            "software_licensing_cost" => self.expenses.software_licensing_cost,
            "base_vehicle_decline_pct" => self.market.base_vehicle_decline_pct,
            "hardware_decline_pct" => self.market.hardware_decline_pct,
            "competitor_cost_advantage_pct" => self.competition.cost_advantage_pct,
            "competitor_price_decline_pct" => self.competition.price_decline_pct,
            "years" => f64::from(self.years),
            _ => return None,
        };
        Some(value)
    }
}

fn whole_years(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_investment_total() {
        let assumptions = Assumptions::default_robotaxi();
        assert_eq!(assumptions.initial_investment(), 173_275.0);
        assert!((assumptions.investment.cost_of_capital() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_set_and_get_every_parameter() {
        let mut assumptions = Assumptions::default_robotaxi();
        for (i, name) in PARAMETERS.iter().enumerate() {
            let value = (i + 1) as f64;
            assumptions.set(name, value).unwrap();
            assert_eq!(assumptions.get(name), Some(value), "parameter {}", name);
        }
    }

    #[test]
    fn test_set_unknown_parameter() {
        let mut assumptions = Assumptions::default_robotaxi();
        let err = assumptions.set("fleet_size", 10.0).unwrap_err();
        assert!(matches!(err, LoadError::UnknownParameter(ref name) if name == "fleet_size"));
    }

    #[test]
    fn test_fractional_years_rejected() {
        let mut assumptions = Assumptions::default_robotaxi();
        assert!(assumptions.set("years", 2.5).is_err());
        assert!(assumptions.set("years", -1.0).is_err());
        assert_eq!(assumptions.years, 5);
    }

    #[test]
    fn test_set_str_parses_numbers() {
        let mut assumptions = Assumptions::default_robotaxi();
        assumptions.set_str("fare_per_mile", " 9.5 ").unwrap();
        assert_eq!(assumptions.pricing.fare_per_mile, 9.5);
        assert!(assumptions.set_str("fare_per_mile", "cheap").is_err());
    }

    #[test]
    fn test_replacement_cost_declines() {
        let assumptions = Assumptions::default_robotaxi();
        let year0 = assumptions.market.replacement_cost(&assumptions.investment, 0);
        let year1 = assumptions.market.replacement_cost(&assumptions.investment, 1);
        assert_eq!(year0, 173_275.0);
        // 73275 * 0.9 + 100000 * 0.8
        assert!((year1 - 145_947.5).abs() < 1e-6);
    }

    #[test]
    fn test_competitor_cost_factor() {
        let competition = Competition::default();
        assert!((competition.cost_factor() - 0.7).abs() < 1e-12);
    }
}
