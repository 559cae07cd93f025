//! Session timer implementation.
//!
//! The session timer is a wall-clock-anchored state machine. It does not
//! use internal threads or schedule callbacks - the caller drives it by
//! calling `tick()` at least once per second while running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Completed
//! ```
//!
//! Remaining time is always recomputed from the start anchor
//! (`remaining = duration - (now - anchor)`), never decremented per tick.
//! Dropped ticks, throttled timers, and time spent hidden therefore cannot
//! drift the countdown; a single late tick lands on the same remaining
//! value an uninterrupted stream of ticks would have.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(store, 1800);
//! timer.start();
//! // In the host's frame loop:
//! timer.tick(); // Returns Some(Event::TimerCompleted) once, at zero
//! ```
//!
//! Every command has a `*_at(now_epoch_ms)` form taking the wall clock
//! explicitly, for hosts that drive the timer from their own clock and for
//! tests; the plain forms read the system clock.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::events::Event;
use crate::stats::{StatsRecord, StatsStore};

use super::sequence::Sequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    /// Not running with partial progress; also the state while the user is
    /// scrubbing the dial.
    Paused,
    Completed,
}

/// Core session state machine.
///
/// Owns the countdown runtime plus an injected [`StatsStore`]; reaching
/// zero while running loads the stats record, accounts for the completed
/// session, advances the work/break sequence, and commits - exactly once.
///
/// Mode selection and scrubbing never touch the store.
pub struct SessionTimer<S: StatsStore> {
    store: S,
    sequence: Sequence,
    /// Snapshot for display; refreshed on construction and completion.
    stats: StatsRecord,
    state: TimerState,
    duration_ms: u64,
    remaining_ms: u64,
    /// Epoch ms at which a run of the full duration would have started.
    /// Set on start so that `duration - (now - anchor)` equals the
    /// remaining time carried into the run; `None` unless `Running`.
    anchor_epoch_ms: Option<u64>,
}

impl<S: StatsStore> SessionTimer<S> {
    /// Create a timer for the given mode duration, in the `Idle` state
    /// with the default work/break sequence.
    pub fn new(store: S, duration_secs: u64) -> Self {
        let stats = store.load();
        let duration_ms = duration_secs.saturating_mul(1000);
        Self {
            store,
            sequence: Sequence::default(),
            stats,
            state: TimerState::Idle,
            duration_ms,
            remaining_ms: duration_ms,
            anchor_epoch_ms: None,
        }
    }

    /// Replace the work/break sequence definition.
    pub fn with_sequence(mut self, sequence: Sequence) -> Self {
        self.sequence = sequence;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_ms / 1000
    }

    /// Remaining whole seconds, rounded up so a countdown shows its full
    /// value until a second has actually elapsed.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs_at(now_ms())
    }

    /// [`SessionTimer::remaining_secs`] against an explicit clock.
    pub fn remaining_secs_at(&self, now_epoch_ms: u64) -> u64 {
        self.remaining_ms_at(now_epoch_ms).div_ceil(1000)
    }

    /// Current stats record snapshot for display.
    pub fn stats(&self) -> &StatsRecord {
        &self.stats
    }

    /// Re-read the stats record from the store (rollover applies).
    pub fn reload_stats(&mut self) -> &StatsRecord {
        self.stats = self.store.load();
        &self.stats
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build a full state snapshot event for the UI to redraw from.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            duration_secs: self.duration_secs(),
            remaining_secs: self.remaining_secs(),
            daily_count: self.stats.daily_count,
            total_count: self.stats.total_count,
            segment_index: self.stats.sequence.segment_index,
            progress_minutes: self.stats.sequence.progress_minutes,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select a new mode duration. Stops any active run, discards the
    /// anchor, and resets remaining time to the full duration.
    pub fn select_mode(&mut self, duration_secs: u64) -> Option<Event> {
        self.duration_ms = duration_secs.saturating_mul(1000);
        self.remaining_ms = self.duration_ms;
        self.state = TimerState::Idle;
        self.anchor_epoch_ms = None;
        Some(Event::ModeSelected {
            duration_secs,
            at: Utc::now(),
        })
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Start or resume the countdown.
    ///
    /// The anchor is backdated by the time already elapsed, so resuming
    /// after a pause never loses progress.
    pub fn start_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused if self.remaining_ms > 0 => {
                let resuming = self.state == TimerState::Paused;
                let elapsed_ms = self.duration_ms.saturating_sub(self.remaining_ms);
                self.anchor_epoch_ms = Some(now_epoch_ms.saturating_sub(elapsed_ms));
                self.state = TimerState::Running;
                let at = Utc::now();
                Some(if resuming {
                    Event::TimerResumed {
                        remaining_secs: self.remaining_secs_at(now_epoch_ms),
                        at,
                    }
                } else {
                    Event::TimerStarted {
                        duration_secs: self.duration_secs(),
                        remaining_secs: self.remaining_secs_at(now_epoch_ms),
                        at,
                    }
                })
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// Freeze the countdown, discarding the anchor so a later resume
    /// cannot pick up a stale one.
    pub fn pause_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.remaining_ms = self.remaining_ms_at(now_epoch_ms);
                self.anchor_epoch_ms = None;
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs_at(now_epoch_ms),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn toggle_run_pause(&mut self) -> Option<Event> {
        self.toggle_run_pause_at(now_ms())
    }

    /// Flip `Running` <-> `Idle`/`Paused`, preserving remaining time.
    pub fn toggle_run_pause_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.state == TimerState::Running {
            self.pause_at(now_epoch_ms)
        } else {
            self.start_at(now_epoch_ms)
        }
    }

    pub fn suspend(&mut self) -> Option<Event> {
        self.suspend_at(now_ms())
    }

    /// Visibility-loss hook: force `Running -> Paused` deterministically.
    /// The countdown must not keep running hidden and then jump.
    pub fn suspend_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        self.pause_at(now_epoch_ms)
    }

    /// Set remaining time directly (the drag-to-set dial). Clamped to
    /// `[0, duration]`. A scrub while running is an implicit pause.
    pub fn scrub(&mut self, target_secs: i64) -> Option<Event> {
        let clamped = target_secs.clamp(0, self.duration_secs() as i64) as u64;
        self.remaining_ms = clamped.saturating_mul(1000);
        self.anchor_epoch_ms = None;
        self.state = TimerState::Paused;
        Some(Event::TimerScrubbed {
            remaining_secs: clamped,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Recompute remaining time from the anchor. Returns the completion
    /// event once, synchronously with the commit; re-entrant-safe (no
    /// action unless `Running`, so a tick landing after completion or
    /// after a mode change is a no-op).
    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_ms = self.remaining_ms_at(now_epoch_ms);
        if self.remaining_ms > 0 {
            return None;
        }
        self.state = TimerState::Completed;
        self.anchor_epoch_ms = None;
        Some(self.record_completion(now_epoch_ms))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn remaining_ms_at(&self, now_epoch_ms: u64) -> u64 {
        match self.anchor_epoch_ms {
            Some(anchor) => self
                .duration_ms
                .saturating_sub(now_epoch_ms.saturating_sub(anchor)),
            None => self.remaining_ms,
        }
    }

    /// The completion path: one load, one commit. Runs only on the
    /// `Running -> Completed` transition, which can fire at most once per
    /// run, so a session is never double counted.
    fn record_completion(&mut self, now_epoch_ms: u64) -> Event {
        let today = dates::date_of_epoch_ms(now_epoch_ms);
        let completed_minutes = self.duration_ms as f64 / 60_000.0;

        let mut record = self.store.load_on(today);
        record.record_completion(today);
        record.sequence = self.sequence.advance(&record.sequence, completed_minutes);
        self.store.commit(&record);

        let event = Event::TimerCompleted {
            duration_secs: self.duration_secs(),
            completed_minutes,
            daily_count: record.daily_count,
            total_count: record.total_count,
            at: Utc::now(),
        };
        self.stats = record;
        event
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
