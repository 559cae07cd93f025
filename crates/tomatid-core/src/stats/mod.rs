//! Tomato statistics: the single persisted record and its daily-rollover
//! accounting.
//!
//! One record exists per device. It carries the running daily and lifetime
//! session counts, the set of dates that collected at least one tomato, and
//! the position inside the repeating work/break sequence. Two historical
//! wire shapes exist (an early one without the sequence field); both parse.

mod store;

pub use store::{KvStatsStore, MemoryStatsStore, NullStatsStore, StatsStore, STATS_KEY};

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timer::SequencePosition;

/// The persisted statistics record.
///
/// Serialized as camelCase JSON to stay readable by records written before
/// this crate existed. Unknown fields are ignored and missing fields fall
/// back to defaults, so older and newer payloads both deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    /// Sessions completed since the last rollover.
    pub daily_count: u64,
    /// Lifetime sessions completed. Never decreases.
    pub total_count: u64,
    /// Date of the most recent mutation.
    pub last_updated: NaiveDate,
    /// Every distinct date on which at least one session completed.
    pub collected_dates: BTreeSet<NaiveDate>,
    /// Position within the repeating work/break sequence.
    pub sequence: SequencePosition,
}

impl StatsRecord {
    /// A zeroed record dated `today`.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            last_updated: today,
            ..Self::default()
        }
    }

    /// Reset the daily counters if the calendar date has advanced since the
    /// last recorded update. Lifetime counters and collected dates survive.
    pub fn apply_rollover(&mut self, today: NaiveDate) {
        if self.last_updated != today {
            self.daily_count = 0;
            self.last_updated = today;
            self.sequence = SequencePosition::default();
        }
    }

    /// Account for one completed session on `today`.
    ///
    /// The caller is expected to have loaded this record through a store,
    /// which applies rollover first; sequence advancement is a separate
    /// step on [`crate::timer::Sequence`].
    pub fn record_completion(&mut self, today: NaiveDate) {
        self.daily_count += 1;
        self.total_count += 1;
        self.collected_dates.insert(today);
        self.last_updated = today;
    }
}
