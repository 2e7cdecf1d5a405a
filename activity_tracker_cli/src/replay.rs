use std::path::Path;

use activity_tracker_lib::{
    ActivitySession, Clock, Coordinate, Ingest, ManualClock, PositionSource, PositionUnavailable,
    SessionError, TrackPoint,
};
use chrono::{DateTime, TimeDelta, Utc};

use crate::gpx_util;

/// Plays back the points of a recorded GPX file as if they came from a receiver.
pub struct GpxSource {
    points: std::vec::IntoIter<TrackPoint>,
}

impl GpxSource {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self {
            points: points.into_iter(),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self::new(gpx_util::read_gpx(path)?))
    }
}

impl PositionSource for GpxSource {
    fn next_fix(&mut self) -> Option<Result<TrackPoint, PositionUnavailable>> {
        self.points.next().map(Ok)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Pause the session whenever two consecutive fixes are further apart than this.
    pub auto_pause_after: Option<TimeDelta>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub started_at: Option<DateTime<Utc>>,
    pub distance_km: f64,
    pub elapsed: TimeDelta,
    pub paused: TimeDelta,
    pub pauses: usize,
    pub rejected: usize,
    pub dropouts: usize,
    pub path: Vec<Coordinate>,
}

/// Drives a session from a position source, with the clock following the fix timestamps.
/// The session is stopped at the last fix.
pub fn replay<S: PositionSource>(source: &mut S, options: &ReplayOptions) -> Result<ReplaySummary, SessionError> {
    let clock = ManualClock::at_epoch();
    let mut session = ActivitySession::new(clock.clone());

    let mut previous: Option<DateTime<Utc>> = None;
    let mut pauses = 0;
    let mut rejected = 0;
    let mut dropouts = 0;

    while let Some(fix) = source.next_fix() {
        let fix = match fix {
            Ok(fix) => fix,
            Err(err) => {
                tracing::warn!("Skipping fix: {}", err);
                dropouts += 1;
                continue;
            }
        };

        match previous {
            None => {
                clock.set(fix.timestamp);
                session.start()?;
            }
            Some(last) => {
                if let Some(threshold) = options.auto_pause_after {
                    if fix.timestamp - last > threshold {
                        clock.set(last);
                        session.pause()?;
                        clock.set(fix.timestamp);
                        session.resume()?;
                        pauses += 1;
                        tracing::debug!("Auto-paused between {} and {}", last, fix.timestamp);
                    }
                }
                clock.set(fix.timestamp);
            }
        }

        match session.ingest_position(fix.position) {
            Ok(Ingest::Recorded) => {}
            Ok(Ingest::Ignored) => tracing::warn!("Fix at {} was ignored", fix.timestamp),
            Err(err) => {
                tracing::warn!("Rejected fix at {}: {}", fix.timestamp, err);
                rejected += 1;
            }
        }

        previous = Some(fix.timestamp.max(previous.unwrap_or(fix.timestamp)));
    }

    if let Some(last) = previous {
        clock.set(last);
        session.stop()?;
    }

    let summary = ReplaySummary {
        started_at: session.started_at(),
        distance_km: session.total_distance(),
        elapsed: session.elapsed(clock.now()),
        paused: session.total_paused(),
        pauses,
        rejected,
        dropouts,
        path: session.path_points().to_vec(),
    };

    tracing::info!(
        "Replayed {} points: {:.3} km in {}s ({} pauses)",
        summary.path.len(),
        summary.distance_km,
        summary.elapsed.num_seconds(),
        summary.pauses
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use activity_tracker_lib::distance::path_distance;

    use super::*;

    struct Flaky {
        fixes: Vec<Result<TrackPoint, PositionUnavailable>>,
    }

    impl PositionSource for Flaky {
        fn next_fix(&mut self) -> Option<Result<TrackPoint, PositionUnavailable>> {
            if self.fixes.is_empty() {
                None
            } else {
                Some(self.fixes.remove(0))
            }
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + TimeDelta::seconds(seconds)
    }

    #[test]
    fn replays_the_whole_file() {
        let mut source = GpxSource::open(crate::HARBOUR_LOOP_GPX).unwrap();
        let summary = replay(&mut source, &ReplayOptions::default()).unwrap();

        assert_eq!(summary.path.len(), 6);
        assert_eq!(summary.pauses, 0);
        assert_eq!(summary.elapsed, TimeDelta::minutes(12));
        assert!((summary.distance_km - path_distance(&summary.path)).abs() < 1e-12);
        assert_eq!(summary.started_at.map(|t| t.to_rfc3339()).as_deref(), Some("2025-05-01T07:00:00+00:00"));
    }

    #[test]
    fn auto_pause_removes_the_gap() {
        let mut source = GpxSource::open(crate::HARBOUR_LOOP_GPX).unwrap();
        let options = ReplayOptions {
            auto_pause_after: Some(TimeDelta::minutes(1)),
        };
        let summary = replay(&mut source, &options).unwrap();

        assert_eq!(summary.pauses, 1);
        assert_eq!(summary.paused, TimeDelta::minutes(10));
        assert_eq!(summary.elapsed, TimeDelta::minutes(2));
        assert_eq!(summary.path.len(), 6);
    }

    #[test]
    fn dropouts_and_bad_fixes_are_counted_and_skipped() {
        let mut source = Flaky {
            fixes: vec![
                Ok(TrackPoint::new(Coordinate::new(0., 0.), at(0))),
                Err(PositionUnavailable::new("no satellites")),
                Ok(TrackPoint::new(Coordinate::new(95., 0.), at(5))),
                Ok(TrackPoint::new(Coordinate::new(0., 1.), at(10))),
            ],
        };
        let summary = replay(&mut source, &ReplayOptions::default()).unwrap();

        assert_eq!(summary.dropouts, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.path.len(), 2);
        assert_eq!(summary.elapsed, TimeDelta::seconds(10));
        assert!((summary.distance_km - 111.19).abs() < 0.1);
    }

    #[test]
    fn empty_source_never_starts() {
        let summary = replay(&mut GpxSource::new(Vec::new()), &ReplayOptions::default()).unwrap();
        assert_eq!(summary.started_at, None);
        assert_eq!(summary.elapsed, TimeDelta::zero());
        assert!(summary.path.is_empty());
    }
}
