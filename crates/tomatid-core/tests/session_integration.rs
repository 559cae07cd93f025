//! Integration tests for the session timer against the stats store.
//!
//! These drive the machine the way the widget does - select, start, tick -
//! and verify what ends up committed, including across simulated app
//! launches and day boundaries.

use tomatid_core::{Event, MemoryStatsStore, SessionTimer, StatsStore, TimerState};

// 2026-02-02 03:20:00 UTC
const T0: u64 = 1_770_000_000_000;
const DAY_MS: u64 = 86_400_000;

fn complete_one(timer: &mut SessionTimer<MemoryStatsStore>, start_ms: u64) {
    timer.start_at(start_ms);
    let duration_ms = timer.duration_secs() * 1000;
    let event = timer.tick_at(start_ms + duration_ms);
    assert!(matches!(event, Some(Event::TimerCompleted { .. })));
}

#[test]
fn two_completions_same_day_collect_one_date() {
    let mut timer = SessionTimer::new(MemoryStatsStore::new(), 120);

    complete_one(&mut timer, T0);
    timer.select_mode(120);
    complete_one(&mut timer, T0 + 600_000);

    let record = timer.store().load_on(tomatid_core::dates::date_of_epoch_ms(T0));
    assert_eq!(record.daily_count, 2);
    assert_eq!(record.total_count, 2);
    assert_eq!(record.collected_dates.len(), 1);
}

#[test]
fn stats_survive_a_relaunch() {
    let mut timer = SessionTimer::new(MemoryStatsStore::new(), 300);
    complete_one(&mut timer, T0);

    // A fresh machine over the same payload, as after an app restart.
    let payload = timer.store().payload().unwrap().to_string();
    let relaunched = SessionTimer::new(MemoryStatsStore::with_payload(payload), 300);
    assert_eq!(relaunched.stats().total_count, 1);
}

#[test]
fn next_day_completion_rolls_daily_count_over() {
    let mut timer = SessionTimer::new(MemoryStatsStore::new(), 120);
    complete_one(&mut timer, T0);
    complete_one_next_day(&mut timer);

    let day_two = tomatid_core::dates::date_of_epoch_ms(T0 + DAY_MS);
    let record = timer.store().load_on(day_two);
    assert_eq!(record.daily_count, 1, "yesterday's sessions rolled off");
    assert_eq!(record.total_count, 2, "lifetime count kept both");
    assert_eq!(record.collected_dates.len(), 2);
}

fn complete_one_next_day(timer: &mut SessionTimer<MemoryStatsStore>) {
    timer.select_mode(120);
    complete_one(timer, T0 + DAY_MS);
}

#[test]
fn work_segment_closes_after_an_hour_of_sessions() {
    // Four 15-minute sessions fill the 60-minute work segment; the fourth
    // crosses the boundary and lands at the start of the break segment.
    let mut timer = SessionTimer::new(MemoryStatsStore::new(), 900);

    for i in 0..3 {
        complete_one(&mut timer, T0 + i * 1_000_000);
        assert_eq!(timer.stats().sequence.segment_index, 0);
        timer.select_mode(900);
    }
    complete_one(&mut timer, T0 + 3_000_000);

    assert_eq!(timer.stats().sequence.segment_index, 1);
    assert_eq!(timer.stats().sequence.progress_minutes, 0.0);
}

#[test]
fn overshoot_is_discarded_at_the_boundary() {
    // 30 + 60 overshoots the work segment by 30 minutes; the break
    // segment still starts from zero.
    let mut timer = SessionTimer::new(MemoryStatsStore::new(), 1800);
    complete_one(&mut timer, T0);
    assert_eq!(timer.stats().sequence.progress_minutes, 30.0);

    timer.select_mode(3600);
    complete_one(&mut timer, T0 + 2_000_000);
    assert_eq!(timer.stats().sequence.segment_index, 1);
    assert_eq!(timer.stats().sequence.progress_minutes, 0.0);
}

#[test]
fn snapshot_reflects_committed_stats() {
    let mut timer = SessionTimer::new(MemoryStatsStore::new(), 120);
    complete_one(&mut timer, T0);

    match timer.snapshot() {
        Event::StateSnapshot {
            state,
            daily_count,
            total_count,
            ..
        } => {
            assert_eq!(state, TimerState::Completed);
            assert_eq!(daily_count, 1);
            assert_eq!(total_count, 1);
        }
        other => panic!("expected StateSnapshot, got {other:?}"),
    }
}
