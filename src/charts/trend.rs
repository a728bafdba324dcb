use crate::models::snapshot::Snapshot;

/// Time-ordered series for the trend chart.
///
/// Points ascend by timestamp for plotting, independent of the snapshot's
/// most-recent-first fetch order. Total vehicles and average speed keep
/// separate y-bounds; the speed series can additionally be mapped onto the
/// vehicle axis so both lines share one drawing area, the same effect as a
/// twin y-axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    totals: Vec<(f64, f64)>,
    speeds: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    total_bounds: [f64; 2],
    speed_bounds: [f64; 2],
    x_labels: [String; 2],
}

impl TrendSeries {
    /// Reindex the snapshot ascending by timestamp and build both series.
    /// A single-row snapshot produces a degenerate (but drawable) line; an
    /// empty snapshot produces an empty series.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        if snapshot.is_empty() {
            return Self::default();
        }

        let mut rows: Vec<_> = snapshot
            .rows()
            .iter()
            .map(|r| (r.timestamp, r.total_vehicles as f64, r.avg_speed))
            .collect();
        rows.sort_by_key(|&(ts, _, _)| ts);

        let totals: Vec<(f64, f64)> = rows
            .iter()
            .map(|&(ts, total, _)| (ts.and_utc().timestamp() as f64, total))
            .collect();
        let speeds: Vec<(f64, f64)> = rows
            .iter()
            .map(|&(ts, _, speed)| (ts.and_utc().timestamp() as f64, speed))
            .collect();

        let x_bounds = padded(series_bounds(totals.iter().map(|&(x, _)| x)), 1.0);
        let total_bounds = padded(series_bounds(totals.iter().map(|&(_, y)| y)), 1.0);
        let speed_bounds = padded(series_bounds(speeds.iter().map(|&(_, y)| y)), 1.0);

        let first = rows.first().map(|&(ts, _, _)| ts).unwrap_or_default();
        let last = rows.last().map(|&(ts, _, _)| ts).unwrap_or_default();
        let x_labels = [
            first.format("%H:%M:%S").to_string(),
            last.format("%H:%M:%S").to_string(),
        ];

        Self {
            totals,
            speeds,
            x_bounds,
            total_bounds,
            speed_bounds,
            x_labels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Total-vehicle points, ascending in time.
    pub fn totals(&self) -> &[(f64, f64)] {
        &self.totals
    }

    /// Average-speed points in their own units, ascending in time.
    pub fn speeds(&self) -> &[(f64, f64)] {
        &self.speeds
    }

    /// Speed points affinely mapped into the vehicle-count axis, so both
    /// lines can be drawn on one chart while keeping independent scales.
    pub fn speeds_scaled(&self) -> Vec<(f64, f64)> {
        let [slo, shi] = self.speed_bounds;
        let [tlo, thi] = self.total_bounds;
        let scale = (thi - tlo) / (shi - slo);
        self.speeds
            .iter()
            .map(|&(x, y)| (x, tlo + (y - slo) * scale))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub fn total_bounds(&self) -> [f64; 2] {
        self.total_bounds
    }

    pub fn speed_bounds(&self) -> [f64; 2] {
        self.speed_bounds
    }

    /// First and last timestamps, formatted for the shared x-axis.
    pub fn x_labels(&self) -> &[String; 2] {
        &self.x_labels
    }
}

fn series_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    [lo, hi]
}

/// Widen degenerate bounds so axis math never divides by zero.
fn padded(bounds: [f64; 2], pad: f64) -> [f64; 2] {
    let [lo, hi] = bounds;
    if hi - lo < f64::EPSILON {
        [lo - pad, hi + pad]
    } else {
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::AggregateRecord;
    use chrono::NaiveDate;

    fn record(minute: u32, total: i64, speed: f64) -> AggregateRecord {
        AggregateRecord {
            id: minute as i64,
            timestamp: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(8, minute, 0)
                .unwrap(),
            car_count: total,
            truck_count: 0,
            bus_count: 0,
            motorcycle_count: 0,
            total_vehicles: total,
            avg_speed: speed,
            congestion_level: "Low".to_string(),
            lane_occupancy: 0.1,
            vehicle_density: 0.5,
        }
    }

    #[test]
    fn reindexes_ascending_regardless_of_fetch_order() {
        // Fetch order is most-recent-first.
        let snapshot = Snapshot::new(vec![
            record(3, 30, 55.0),
            record(2, 20, 50.0),
            record(1, 10, 45.0),
        ]);
        let trend = TrendSeries::from_snapshot(&snapshot);

        let ys: Vec<f64> = trend.totals().iter().map(|&(_, y)| y).collect();
        assert_eq!(ys, vec![10.0, 20.0, 30.0]);
        let xs: Vec<f64> = trend.totals().iter().map(|&(x, _)| x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn speed_series_keeps_its_own_bounds() {
        let snapshot = Snapshot::new(vec![record(2, 200, 40.0), record(1, 100, 60.0)]);
        let trend = TrendSeries::from_snapshot(&snapshot);

        assert_eq!(trend.total_bounds(), [100.0, 200.0]);
        assert_eq!(trend.speed_bounds(), [40.0, 60.0]);

        // Mapped endpoints land on the vehicle axis bounds.
        let scaled = trend.speeds_scaled();
        assert!((scaled[0].1 - 200.0).abs() < 1e-9); // 60.0 is the speed max
        assert!((scaled[1].1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_row_snapshot_is_drawable() {
        let trend = TrendSeries::from_snapshot(&Snapshot::new(vec![record(1, 10, 45.0)]));

        assert_eq!(trend.totals().len(), 1);
        let [xlo, xhi] = trend.x_bounds();
        assert!(xhi > xlo);
        let [tlo, thi] = trend.total_bounds();
        assert!(thi > tlo);
        // Scaled speed must be finite despite the degenerate input range.
        assert!(trend.speeds_scaled()[0].1.is_finite());
    }

    #[test]
    fn empty_snapshot_renders_nothing() {
        let trend = TrendSeries::from_snapshot(&Snapshot::new(Vec::new()));
        assert!(trend.is_empty());
        assert!(trend.totals().is_empty());
        assert!(trend.speeds_scaled().is_empty());
    }

    #[test]
    fn x_labels_span_first_to_last() {
        let snapshot = Snapshot::new(vec![record(9, 30, 55.0), record(4, 10, 45.0)]);
        let trend = TrendSeries::from_snapshot(&snapshot);
        assert_eq!(trend.x_labels()[0], "08:04:00");
        assert_eq!(trend.x_labels()[1], "08:09:00");
    }
}
