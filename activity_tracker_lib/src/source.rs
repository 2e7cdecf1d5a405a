use crate::track_point::TrackPoint;

/// Raised by a position source when it cannot produce a fix. The session never
/// sees this; the source decides whether to retry or give up.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("position unavailable: {reason}")]
pub struct PositionUnavailable {
    pub reason: String,
}

impl PositionUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Anything that delivers fixes in arrival order: a GPS receiver, a recorded file, a test fixture.
pub trait PositionSource {
    /// `None` once the source is exhausted.
    fn next_fix(&mut self) -> Option<Result<TrackPoint, PositionUnavailable>>;
}
