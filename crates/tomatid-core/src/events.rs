use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every observable transition of the session timer produces an Event.
/// The widget UI redraws from these; it never reaches into the machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ModeSelected {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time was set directly by the user (drag-to-set dial).
    TimerScrubbed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero while running. Carries the counters as
    /// committed, so badge displays need no second store read.
    TimerCompleted {
        duration_secs: u64,
        completed_minutes: f64,
        daily_count: u64,
        total_count: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        duration_secs: u64,
        remaining_secs: u64,
        daily_count: u64,
        total_count: u64,
        segment_index: usize,
        progress_minutes: f64,
        at: DateTime<Utc>,
    },
}
