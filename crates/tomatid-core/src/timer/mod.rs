mod engine;
mod sequence;

pub use engine::{SessionTimer, TimerState};
pub use sequence::{Segment, SegmentKind, Sequence, SequencePosition};
