use std::time::Duration;

use activity_tracker_lib::{SessionSnapshot, SharedSession, SystemClock, TrackPoint};
use anyhow::ensure;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct LiveOptions {
    /// Playback speed, 2.0 plays the recording twice as fast as it happened.
    pub speed: f64,
    /// How often the display polls the session.
    pub tick: Duration,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            speed: crate::DEFAULT_SPEED,
            tick: Duration::from_millis(crate::DEFAULT_TICK_MS),
        }
    }
}

/// Feeds recorded points into a wall-clock session from a separate task, spaced
/// out like the original recording, while `on_tick` gets a snapshot every tick.
/// Stops the session once the source runs dry and returns the final snapshot.
pub async fn run_live(
    points: Vec<TrackPoint>,
    options: LiveOptions,
    mut on_tick: impl FnMut(&SessionSnapshot),
) -> anyhow::Result<SessionSnapshot> {
    ensure!(options.speed.is_finite() && options.speed > 0., "Speed must be positive, got {}", options.speed);
    ensure!(!options.tick.is_zero(), "Tick interval must be non-zero");

    let session = SharedSession::new(SystemClock);
    session.start()?;

    let (tx, mut rx) = mpsc::channel::<TrackPoint>(64);
    let speed = options.speed;
    let feeder = tokio::spawn(async move {
        let mut previous: Option<DateTime<Utc>> = None;
        for point in points {
            if let Some(previous) = previous {
                let gap = (point.timestamp - previous).to_std().unwrap_or_default();
                tokio::time::sleep(scaled_gap(gap, speed)).await;
            }
            previous = Some(point.timestamp);

            if tx.send(point).await.is_err() {
                tracing::warn!("Session went away, stopping position feed");
                break;
            }
        }
    });

    let mut ticker = tokio::time::interval(options.tick);
    loop {
        tokio::select! {
            point = rx.recv() => {
                let Some(point) = point else {
                    break;
                };
                if let Err(err) = session.ingest_position(point.position) {
                    tracing::warn!("Rejected fix at {}: {}", point.timestamp, err);
                }
            }
            _ = ticker.tick() => {
                on_tick(&session.snapshot());
            }
        }
    }

    feeder.await?;
    session.stop()?;

    let snapshot = session.snapshot();
    on_tick(&snapshot);
    Ok(snapshot)
}

/// Recorded gap shrunk (or stretched) by `speed`. Gaps too long to represent
/// are capped at `MAX_GAP`.
fn scaled_gap(gap: Duration, speed: f64) -> Duration {
    Duration::try_from_secs_f64(gap.as_secs_f64() / speed)
        .unwrap_or(MAX_GAP)
        .min(MAX_GAP)
}

const MAX_GAP: Duration = Duration::from_secs(24 * 60 * 60);

#[cfg(test)]
mod tests {
    use activity_tracker_lib::{distance::path_distance, Coordinate, SessionState};

    use super::*;
    use crate::gpx_util::read_gpx;

    #[tokio::test]
    async fn plays_back_every_point() {
        let points = read_gpx(crate::HARBOUR_LOOP_GPX).unwrap();
        let path: Vec<Coordinate> = points.iter().map(|p| p.position).collect();

        let mut ticks = 0;
        let options = LiveOptions {
            speed: 1_000_000.,
            tick: Duration::from_millis(1),
        };
        let snapshot = run_live(points, options, |_| ticks += 1).await.unwrap();

        assert_eq!(snapshot.state, SessionState::Stopped);
        assert_eq!(snapshot.points, 6);
        assert!((snapshot.total_distance_km - path_distance(&path)).abs() < 1e-12);
        assert!(ticks >= 1);
    }

    #[test]
    fn scales_gaps_by_speed() {
        assert_eq!(scaled_gap(Duration::from_secs(30), 10.), Duration::from_secs(3));
        assert_eq!(scaled_gap(Duration::from_secs(1), 0.5), Duration::from_secs(2));
        assert_eq!(scaled_gap(Duration::ZERO, 1e-300), Duration::ZERO);
    }

    #[test]
    fn huge_gaps_are_capped_instead_of_panicking() {
        let year = Duration::from_secs(365 * 24 * 60 * 60);
        assert_eq!(scaled_gap(year, 1e-300), MAX_GAP);
        assert_eq!(scaled_gap(year, 1.), MAX_GAP);
    }

    #[tokio::test]
    async fn rejects_non_positive_speed() {
        let options = LiveOptions {
            speed: 0.,
            ..Default::default()
        };
        assert!(run_live(Vec::new(), options, |_| {}).await.is_err());
    }
}
