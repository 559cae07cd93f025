//! Persistent stats store contract and implementations.
//!
//! The store holds exactly one serialized [`StatsRecord`] under a single
//! key. Loading always applies daily rollover against the supplied date;
//! storage failures and malformed payloads degrade to a fresh record rather
//! than surfacing to the caller.

use chrono::NaiveDate;
use log::warn;

use crate::dates;
use crate::error::CoreError;
use crate::stats::StatsRecord;
use crate::storage::Database;

/// Key under which the record is persisted. Shared with earlier
/// incarnations of this widget, so existing data keeps loading.
pub const STATS_KEY: &str = "tomato-stats";

/// Single-record persistence for tomato statistics.
///
/// `load_on` returns a fresh copy every call; callers must not write back a
/// record loaded earlier, or they may clobber a rollover that happened in
/// between. Rollover is evaluated on every load, never cached.
pub trait StatsStore {
    /// The last-committed record with rollover applied against `today`, or
    /// a fresh zeroed record if nothing usable is stored.
    fn load_on(&self, today: NaiveDate) -> StatsRecord;

    /// Overwrite the single stored payload. Must be atomic from the
    /// caller's perspective; failures are absorbed.
    fn commit(&mut self, record: &StatsRecord);

    /// [`StatsStore::load_on`] against the current UTC date.
    fn load(&self) -> StatsRecord {
        self.load_on(dates::today())
    }
}

fn decode(payload: Option<&str>, today: NaiveDate) -> StatsRecord {
    match payload {
        None => StatsRecord::fresh(today),
        Some(raw) => match serde_json::from_str::<StatsRecord>(raw) {
            Ok(mut record) => {
                record.apply_rollover(today);
                record
            }
            Err(err) => {
                warn!("discarding malformed stats payload: {err}");
                StatsRecord::fresh(today)
            }
        },
    }
}

/// Production store over the SQLite kv table.
pub struct KvStatsStore {
    db: Database,
}

impl KvStatsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open against the default per-device database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened; hosts without a
    /// usable storage medium should fall back to [`NullStatsStore`] or
    /// [`MemoryStatsStore`].
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::new(Database::open()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl StatsStore for KvStatsStore {
    fn load_on(&self, today: NaiveDate) -> StatsRecord {
        match self.db.kv_get(STATS_KEY) {
            Ok(payload) => decode(payload.as_deref(), today),
            Err(err) => {
                warn!("stats load failed, starting fresh: {err}");
                StatsRecord::fresh(today)
            }
        }
    }

    fn commit(&mut self, record: &StatsRecord) {
        let payload = match serde_json::to_string(record) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("stats serialization failed, commit dropped: {err}");
                return;
            }
        };
        // Single-statement upsert; no partial write is observable.
        if let Err(err) = self.db.kv_set(STATS_KEY, &payload) {
            warn!("stats commit failed: {err}");
        }
    }
}

/// In-memory store holding the raw payload string.
///
/// The test fake, and the honest shape of the historical cookie-backed
/// deployment: one textual payload, no durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    payload: Option<String>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-existing payload, as if previously committed.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl StatsStore for MemoryStatsStore {
    fn load_on(&self, today: NaiveDate) -> StatsRecord {
        decode(self.payload.as_deref(), today)
    }

    fn commit(&mut self, record: &StatsRecord) {
        match serde_json::to_string(record) {
            Ok(payload) => self.payload = Some(payload),
            Err(err) => warn!("stats serialization failed, commit dropped: {err}"),
        }
    }
}

/// Store for contexts with no persistence medium at all: loads are always
/// fresh and commits are silent no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatsStore;

impl StatsStore for NullStatsStore {
    fn load_on(&self, today: NaiveDate) -> StatsRecord {
        StatsRecord::fresh(today)
    }

    fn commit(&mut self, _record: &StatsRecord) {}
}
