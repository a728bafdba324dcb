use std::path::Path;

use chrono::{DateTime, Local};

use crate::charts::distribution::VehicleDistribution;
use crate::charts::trend::TrendSeries;
use crate::db;
use crate::view::TableView;

/// Outcome of the most recent refresh cycle, shown on the status line.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshStatus {
    Ready,
    Updated { at: DateTime<Local>, rows: usize },
    NoData,
    Failed(String),
    AutoStopped,
}

impl RefreshStatus {
    pub fn text(&self) -> String {
        match self {
            RefreshStatus::Ready => "Ready".to_string(),
            RefreshStatus::Updated { at, rows } => {
                format!("Last updated: {} | {} records shown", at.format("%H:%M:%S"), rows)
            }
            RefreshStatus::NoData => "No data available".to_string(),
            RefreshStatus::Failed(detail) => detail.clone(),
            RefreshStatus::AutoStopped => "Auto-refresh stopped".to_string(),
        }
    }
}

/// Everything the terminal draws: the row set, both derived charts, and the
/// status line. Rebuilt from each snapshot; the parts a failed or empty
/// cycle does not reach keep their previous content.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub table: TableView,
    pub distribution: VehicleDistribution,
    pub trend: TrendSeries,
    pub status: RefreshStatus,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            table: TableView::default(),
            distribution: VehicleDistribution::default(),
            trend: TrendSeries::default(),
            status: RefreshStatus::Ready,
        }
    }
}

/// One full cycle: fetch, then table refresh and chart recompute against the
/// same snapshot.
///
/// Failure policy is fail-fast per cycle: a store error updates the status
/// line and leaves the prior display untouched; an empty result clears the
/// table but skips the chart redraw so no empty chart replaces real data.
pub fn run_cycle(db_path: &Path, state: &mut DashboardState) {
    let snapshot = match db::fetch_snapshot(db_path, db::SNAPSHOT_LIMIT) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::warn!("refresh cycle failed: {err}");
            state.status = RefreshStatus::Failed(err.to_string());
            return;
        }
    };

    if snapshot.is_empty() {
        state.table.clear();
        state.status = RefreshStatus::NoData;
        return;
    }

    state.table.replace(&snapshot);
    state.distribution = VehicleDistribution::from_snapshot(&snapshot);
    state.trend = TrendSeries::from_snapshot(&snapshot);
    state.status = RefreshStatus::Updated {
        at: snapshot.fetched_at(),
        rows: snapshot.len(),
    };
}
