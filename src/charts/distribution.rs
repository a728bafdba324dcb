use crate::models::snapshot::Snapshot;

/// Vehicle categories, in display order.
pub const CATEGORY_LABELS: [&str; 4] = ["Cars", "Trucks", "Buses", "Motorcycles"];

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub label: &'static str,
    pub count: i64,
    pub percent: f64,
}

/// Vehicle-type proportion summary over one snapshot. Recomputed from
/// scratch every cycle; the previous summary is simply dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleDistribution {
    slices: Vec<CategorySlice>,
}

impl VehicleDistribution {
    /// Sum the four vehicle-type counts across the snapshot and derive a
    /// percentage per category. A snapshot whose counts sum to zero yields
    /// an empty summary instead of NaN percentages.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut counts = [0i64; 4];
        for row in snapshot.rows() {
            counts[0] += row.car_count;
            counts[1] += row.truck_count;
            counts[2] += row.bus_count;
            counts[3] += row.motorcycle_count;
        }

        let total: i64 = counts.iter().sum();
        if total <= 0 {
            return Self::default();
        }

        let slices = CATEGORY_LABELS
            .iter()
            .zip(counts)
            .map(|(&label, count)| CategorySlice {
                label,
                count,
                percent: count as f64 * 100.0 / total as f64,
            })
            .collect();

        Self { slices }
    }

    pub fn slices(&self) -> &[CategorySlice] {
        &self.slices
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}
