//! # Tomatid Core Library
//!
//! This library provides the core logic for Tomatid, a single-screen
//! countdown timer widget that collects "tomatoes": completed focus
//! sessions, counted per day and over a lifetime. The widget UI (dial
//! rendering, gestures, animation) is a thin layer over this crate and
//! lives elsewhere.
//!
//! ## Architecture
//!
//! - **Session Timer**: A wall-clock-anchored state machine that requires
//!   the caller to periodically invoke `tick()` for progress updates
//! - **Stats**: The single persisted statistics record with daily-rollover
//!   semantics, behind a swappable store trait
//! - **Storage**: SQLite-backed key-value persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Core timer state machine
//! - [`StatsStore`]: Statistics persistence contract ([`KvStatsStore`] in
//!   production, [`MemoryStatsStore`] for tests and ephemeral contexts)
//! - [`Sequence`]: The repeating work/break segment cycle
//! - [`Config`]: Application configuration management

pub mod dates;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use stats::{KvStatsStore, MemoryStatsStore, NullStatsStore, StatsRecord, StatsStore, STATS_KEY};
pub use storage::{Config, Database};
pub use timer::{Segment, SegmentKind, Sequence, SequencePosition, SessionTimer, TimerState};
