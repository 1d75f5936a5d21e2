//! Utilization scalars derived once per projection

use serde::{Deserialize, Serialize};

use super::{Operations, WEEKS_PER_YEAR};

/// Trip volume implied by the operating schedule
///
/// Constant for every projected year: the model has no utilization growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    /// Whole trips that fit in one operating day
    pub trips_per_day: f64,
    pub annual_trips: f64,
    pub annual_miles: f64,
}

impl Utilization {
    /// Partial trips at the end of the day are dropped
    pub fn from_operations(operations: &Operations) -> Self {
        let trips_per_day = (operations.hours_per_day * 60.0 / operations.trip_length_minutes).floor();
        let annual_trips = trips_per_day * operations.days_per_week * WEEKS_PER_YEAR;
        let annual_miles = annual_trips * operations.trip_length_miles;

        Self {
            trips_per_day,
            annual_trips,
            annual_miles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let utilization = Utilization::from_operations(&Operations::default());
        assert_eq!(utilization.trips_per_day, 48.0);
        assert_eq!(utilization.annual_trips, 14_976.0);
        assert_eq!(utilization.annual_miles, 59_904.0);
    }

    #[test]
    fn test_partial_trips_dropped() {
        let operations = Operations {
            hours_per_day: 1.0,
            days_per_week: 1.0,
            trip_length_miles: 2.0,
            trip_length_minutes: 25.0,
        };
        let utilization = Utilization::from_operations(&operations);
        // 60 / 25 = 2.4 -> 2 trips
        assert_eq!(utilization.trips_per_day, 2.0);
        assert_eq!(utilization.annual_trips, 104.0);
        assert_eq!(utilization.annual_miles, 208.0);
    }
}
