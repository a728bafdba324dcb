use crate::models::record::AggregateRecord;
use crate::models::snapshot::Snapshot;

pub const COLUMN_COUNT: usize = 11;

/// Table headers, in the fetch query's column order.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "ID",
    "Timestamp",
    "Cars",
    "Trucks",
    "Buses",
    "Motorcycles",
    "Total",
    "Avg Speed",
    "Congestion",
    "Lane Occ",
    "Density",
];

/// The displayed row set. Replaced wholesale every cycle; no row identity
/// survives a refresh, so an on-screen row may shift position as new data
/// arrives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    rows: Vec<[String; COLUMN_COUNT]>,
}

impl TableView {
    /// Idempotent full replace: clear every displayed row, then insert the
    /// snapshot's rows in fetch order (most-recent-first). No diffing; the
    /// row cap keeps this cheap.
    pub fn replace(&mut self, snapshot: &Snapshot) {
        self.rows.clear();
        self.rows.extend(snapshot.rows().iter().map(format_row));
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[[String; COLUMN_COUNT]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn format_row(record: &AggregateRecord) -> [String; COLUMN_COUNT] {
    [
        record.id.to_string(),
        record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.car_count.to_string(),
        record.truck_count.to_string(),
        record.bus_count.to_string(),
        record.motorcycle_count.to_string(),
        record.total_vehicles.to_string(),
        format!("{:.2}", record.avg_speed),
        record.congestion_level.clone(),
        format!("{:.2}", record.lane_occupancy),
        format!("{:.2}", record.vehicle_density),
    ]
}
