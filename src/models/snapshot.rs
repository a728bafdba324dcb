use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::record::AggregateRecord;

/// The immutable result set of one fetch cycle, most-recent-first.
///
/// Each refresh discards the prior snapshot entirely; no row identity or
/// delta is carried from one cycle to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    rows: Vec<AggregateRecord>,
    fetched_at: DateTime<Local>,
}

impl Snapshot {
    pub fn new(rows: Vec<AggregateRecord>) -> Self {
        Self {
            rows,
            fetched_at: Local::now(),
        }
    }

    pub fn rows(&self) -> &[AggregateRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Wall-clock time the fetch completed, used for the status line.
    pub fn fetched_at(&self) -> DateTime<Local> {
        self.fetched_at
    }
}
