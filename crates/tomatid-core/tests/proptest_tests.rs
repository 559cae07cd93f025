//! Property-based tests using proptest
//!
//! These verify that the clamping, advancement, and decoding paths hold
//! their invariants for arbitrary inputs without panicking.

use proptest::prelude::*;
use tomatid_core::{
    MemoryStatsStore, Segment, Sequence, SequencePosition, SessionTimer, StatsStore,
};

proptest! {
    // Scrubbing never leaves [0, duration], whatever the caller asks for.
    #[test]
    fn scrub_stays_within_mode_bounds(
        duration_secs in 1u64..=7200,
        target in i64::MIN / 2..i64::MAX / 2,
    ) {
        let mut timer = SessionTimer::new(MemoryStatsStore::new(), duration_secs);
        timer.scrub(target);
        let now = 1_770_000_000_000;
        prop_assert!(timer.remaining_secs_at(now) <= duration_secs);
    }
}

proptest! {
    // After advancement the position is always in steady state: a valid
    // segment index and progress strictly below that segment's duration.
    #[test]
    fn advancement_lands_in_steady_state(
        work_min in 1u64..=240,
        break_min in 1u64..=240,
        start_index in 0usize..2,
        progress_pct in 0.0f64..1.0,
        completed_minutes in 0.01f64..600.0,
    ) {
        let sequence = Sequence::new(vec![
            Segment::work(work_min),
            Segment::rest(break_min),
        ]).unwrap();

        let durations = [work_min, break_min];
        let position = SequencePosition {
            segment_index: start_index,
            // Strictly below the segment boundary, as in steady state.
            progress_minutes: progress_pct * (durations[start_index] as f64 - f64::EPSILON),
        };

        let next = sequence.advance(&position, completed_minutes);
        prop_assert!(next.segment_index < 2);
        prop_assert!(next.progress_minutes >= 0.0);
        prop_assert!(next.progress_minutes < durations[next.segment_index] as f64);
    }
}

proptest! {
    // Arbitrary stored payloads must never panic the decoder; they load
    // as either a parsed record or a fresh one.
    #[test]
    fn decoding_arbitrary_payloads_never_panics(payload in ".{0,256}") {
        let store = MemoryStatsStore::with_payload(payload);
        let today = chrono::NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let record = store.load_on(today);
        prop_assert_eq!(record.last_updated, today);
    }
}
