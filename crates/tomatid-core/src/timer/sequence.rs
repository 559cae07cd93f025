use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Work,
    Break,
}

/// One phase of the repeating work/break sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Duration in minutes.
    pub duration_min: u64,
}

impl Segment {
    pub fn work(duration_min: u64) -> Self {
        Self {
            kind: SegmentKind::Work,
            duration_min,
        }
    }

    pub fn rest(duration_min: u64) -> Self {
        Self {
            kind: SegmentKind::Break,
            duration_min,
        }
    }
}

/// Position within a [`Sequence`], persisted as part of the stats record.
///
/// Steady state keeps `progress_minutes` strictly below the current
/// segment's duration; advancement fires in the same call that detects a
/// boundary crossing, so a larger value is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequencePosition {
    pub segment_index: usize,
    pub progress_minutes: f64,
}

/// The fixed repeating list of work/break segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    segments: Vec<Segment>,
}

impl Sequence {
    /// Build a sequence from explicit segments.
    ///
    /// # Errors
    /// Rejects an empty segment list or a segment with zero duration.
    pub fn new(segments: Vec<Segment>) -> Result<Self, ValidationError> {
        if segments.is_empty() {
            return Err(ValidationError::EmptyCollection("sequence segments".into()));
        }
        if let Some(seg) = segments.iter().find(|s| s.duration_min == 0) {
            return Err(ValidationError::InvalidValue {
                field: "duration_min".into(),
                message: format!("{:?} segment must be longer than zero minutes", seg.kind),
            });
        }
        Ok(Self { segments })
    }

    /// The default work/break cycle: one hour of work, fifteen minutes off.
    pub fn default_work_break() -> Self {
        Self {
            segments: vec![Segment::work(60), Segment::rest(15)],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at a persisted position, wrapping the index. A persisted
    /// index can outrun a definition that has since been shortened.
    pub fn segment_at(&self, position: &SequencePosition) -> &Segment {
        &self.segments[position.segment_index % self.segments.len()]
    }

    /// Fold `completed_minutes` of finished session time into `position`.
    ///
    /// Crossing the current segment's boundary moves to the next segment
    /// (wrapping) with progress reset to zero: surplus minutes beyond the
    /// boundary are discarded, not carried into the next segment.
    pub fn advance(&self, position: &SequencePosition, completed_minutes: f64) -> SequencePosition {
        let index = position.segment_index % self.segments.len();
        let segment = &self.segments[index];
        let new_progress = position.progress_minutes + completed_minutes;

        if new_progress >= segment.duration_min as f64 {
            SequencePosition {
                segment_index: (index + 1) % self.segments.len(),
                progress_minutes: 0.0,
            }
        } else {
            SequencePosition {
                segment_index: index,
                progress_minutes: new_progress,
            }
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::default_work_break()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(segment_index: usize, progress_minutes: f64) -> SequencePosition {
        SequencePosition {
            segment_index,
            progress_minutes,
        }
    }

    #[test]
    fn default_sequence_is_work_then_break() {
        let seq = Sequence::default();
        assert_eq!(
            seq.segments(),
            &[Segment::work(60), Segment::rest(15)]
        );
    }

    #[test]
    fn accumulates_below_boundary() {
        let seq = Sequence::default();
        let next = seq.advance(&pos(0, 10.0), 20.0);
        assert_eq!(next, pos(0, 30.0));
    }

    #[test]
    fn crossing_boundary_discards_surplus() {
        let seq = Sequence::default();
        // 50 + 15 overshoots the 60-minute work segment by 5; the surplus
        // is dropped rather than carried into the break.
        let next = seq.advance(&pos(0, 50.0), 15.0);
        assert_eq!(next, pos(1, 0.0));
    }

    #[test]
    fn exact_boundary_advances() {
        let seq = Sequence::default();
        let next = seq.advance(&pos(0, 45.0), 15.0);
        assert_eq!(next, pos(1, 0.0));
    }

    #[test]
    fn last_segment_wraps_to_first() {
        let seq = Sequence::default();
        let next = seq.advance(&pos(1, 10.0), 5.0);
        assert_eq!(next, pos(0, 0.0));
    }

    #[test]
    fn stale_index_wraps_instead_of_panicking() {
        let seq = Sequence::default();
        let next = seq.advance(&pos(7, 0.0), 5.0);
        assert_eq!(next.segment_index, 1);
    }

    #[test]
    fn rejects_empty_and_zero_duration() {
        assert!(Sequence::new(vec![]).is_err());
        assert!(Sequence::new(vec![Segment::work(0)]).is_err());
    }

    #[test]
    fn position_wire_field_names() {
        let json = serde_json::to_string(&pos(1, 12.5)).unwrap();
        assert_eq!(json, r#"{"segmentIndex":1,"progressMinutes":12.5}"#);
    }
}
