use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One stored row of periodic traffic counts and metrics.
///
/// Written by the external tracker process; the dashboard only reads it.
/// `total_vehicles` is expected to equal the sum of the four counts but the
/// store does not enforce that, so nothing here assumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub id: i64,
    /// Local wall-clock time; the fetch query already applies the
    /// UTC-to-local conversion.
    pub timestamp: NaiveDateTime,
    pub car_count: i64,
    pub truck_count: i64,
    pub bus_count: i64,
    pub motorcycle_count: i64,
    pub total_vehicles: i64,
    pub avg_speed: f64,
    pub congestion_level: String,
    pub lane_occupancy: f64,
    pub vehicle_density: f64,
}
