use chrono::{DateTime, TimeDelta, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    clock::Clock,
    coordinate::Coordinate,
    distance,
    error::SessionError,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Tracking,
    Paused,
    Stopped,
}

/// What happened to a position handed to [`ActivitySession::ingest_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// Appended to the path.
    Recorded,
    /// Dropped because the session was not tracking.
    Ignored,
}

/// Point-in-time view of a session for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub elapsed: TimeDelta,
    pub total_distance_km: f64,
    pub points: usize,
}

/// The instants each state needs. `paused_at` only exists while paused.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Tracking {
        started_at: DateTime<Utc>,
    },
    Paused {
        started_at: DateTime<Utc>,
        paused_at: DateTime<Utc>,
    },
    Stopped {
        started_at: DateTime<Utc>,
        stopped_at: DateTime<Utc>,
    },
}

impl Phase {
    fn state(&self) -> SessionState {
        match self {
            Phase::Idle => SessionState::Idle,
            Phase::Tracking { .. } => SessionState::Tracking,
            Phase::Paused { .. } => SessionState::Paused,
            Phase::Stopped { .. } => SessionState::Stopped,
        }
    }
}

/// One movement session: lifecycle, path, distance and pause-aware elapsed time.
///
/// The session never schedules work of its own. It is driven by commands, by
/// positions pushed through [`ingest_position`](Self::ingest_position) and by
/// duration polls, all of which complete immediately. Hosts that deliver those
/// from several threads should go through [`SharedSession`](crate::SharedSession).
#[derive(Debug)]
pub struct ActivitySession<C: Clock> {
    clock: C,
    phase: Phase,
    total_paused: TimeDelta,
    coordinates: Vec<Coordinate>,
    total_distance: f64,
}

impl<C: Clock> ActivitySession<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            phase: Phase::Idle,
            total_paused: TimeDelta::zero(),
            coordinates: Vec::new(),
            total_distance: 0.,
        }
    }

    /// Begins tracking. Only legal from `Idle`; anything else reports `AlreadyActive`
    /// and leaves the session untouched so the caller can decide what to do.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Idle {
            let state = self.current_state();
            tracing::warn!("Refusing to start, session is {:?}", state);
            return Err(SessionError::AlreadyActive { state });
        }

        let now = self.clock.now();
        self.clear_accumulators();
        self.phase = Phase::Tracking { started_at: now };

        tracing::debug!("Session started at {}", now);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        let Phase::Tracking { started_at } = self.phase else {
            let state = self.current_state();
            tracing::warn!("Refusing to pause, session is {:?}", state);
            return Err(SessionError::NotTracking { state });
        };

        let now = self.clock.now();
        self.phase = Phase::Paused {
            started_at,
            paused_at: now,
        };

        tracing::debug!("Session paused at {}", now);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        let Phase::Paused {
            started_at,
            paused_at,
        } = self.phase
        else {
            let state = self.current_state();
            tracing::warn!("Refusing to resume, session is {:?}", state);
            return Err(SessionError::NotPaused { state });
        };

        let now = self.clock.now();
        let pause = non_negative(now - paused_at);
        self.total_paused += pause;
        self.phase = Phase::Tracking { started_at };

        tracing::debug!("Session resumed at {} after {}s paused", now, pause.num_seconds());
        Ok(())
    }

    /// Single-button variant: pauses while tracking, resumes while paused.
    /// Returns the state the session ended up in.
    pub fn toggle_pause(&mut self) -> Result<SessionState, SessionError> {
        match self.phase {
            Phase::Tracking { .. } => self.pause()?,
            Phase::Paused { .. } => self.resume()?,
            _ => {
                return Err(SessionError::NotTracking {
                    state: self.current_state(),
                })
            }
        }
        Ok(self.current_state())
    }

    /// Ends the session, freezing elapsed time and path. Stopping while paused
    /// ends the session where the pause began. Only `reset` leaves `Stopped`.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        let now = self.clock.now();
        let (started_at, stopped_at) = match self.phase {
            Phase::Tracking { started_at } => (started_at, now),
            Phase::Paused {
                started_at,
                paused_at,
            } => (started_at, paused_at),
            Phase::Idle | Phase::Stopped { .. } => {
                let state = self.current_state();
                tracing::warn!("Refusing to stop, session is {:?}", state);
                return Err(SessionError::NotActive { state });
            }
        };

        self.phase = Phase::Stopped {
            started_at,
            stopped_at,
        };

        tracing::debug!(
            "Session stopped at {} with {:.3} km over {} points",
            stopped_at,
            self.total_distance,
            self.coordinates.len()
        );
        Ok(())
    }

    /// Back to `Idle` with everything cleared. Legal from any state.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.clear_accumulators();
        tracing::debug!("Session reset");
    }

    /// Appends a position to the path while tracking.
    ///
    /// Malformed coordinates are always rejected. Valid positions that arrive
    /// outside `Tracking` (late fixes after a pause or reset) are dropped and
    /// reported as [`Ingest::Ignored`].
    pub fn ingest_position(&mut self, coordinate: Coordinate) -> Result<Ingest, SessionError> {
        if !coordinate.is_valid() {
            tracing::warn!("Rejecting invalid coordinate {:?}", coordinate);
            return Err(SessionError::InvalidCoordinate {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }

        if !matches!(self.phase, Phase::Tracking { .. }) {
            tracing::trace!("Ignoring position while {:?}", self.current_state());
            return Ok(Ingest::Ignored);
        }

        if let Some(previous) = self.coordinates.last() {
            self.total_distance = distance::accumulate(*previous, coordinate, self.total_distance);
        }
        self.coordinates.push(coordinate);

        Ok(Ingest::Recorded)
    }

    /// Active time as of `now`: time since start minus every pause.
    ///
    /// Frozen at the pause instant while paused and at the stop instant once
    /// stopped. Zero while idle or when `now` precedes the start.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        let raw = match self.phase {
            Phase::Idle => return TimeDelta::zero(),
            Phase::Tracking { started_at } => now - started_at,
            Phase::Paused {
                started_at,
                paused_at,
            } => paused_at - started_at,
            Phase::Stopped {
                started_at,
                stopped_at,
            } => stopped_at - started_at,
        };

        non_negative(raw - self.total_paused)
    }

    /// [`elapsed`](Self::elapsed) against the session's own clock.
    pub fn elapsed_now(&self) -> TimeDelta {
        self.elapsed(self.clock.now())
    }

    /// Kilometers travelled along the recorded path.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn current_state(&self) -> SessionState {
        self.phase.state()
    }

    /// Recorded path in arrival order.
    pub fn path_points(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            Phase::Idle => None,
            Phase::Tracking { started_at }
            | Phase::Paused { started_at, .. }
            | Phase::Stopped { started_at, .. } => Some(started_at),
        }
    }

    pub fn paused_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            Phase::Paused { paused_at, .. } => Some(paused_at),
            _ => None,
        }
    }

    /// Sum of the completed pauses.
    pub fn total_paused(&self) -> TimeDelta {
        self.total_paused
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            state: self.current_state(),
            elapsed: self.elapsed(now),
            total_distance_km: self.total_distance,
            points: self.coordinates.len(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_at(self.clock.now())
    }

    fn clear_accumulators(&mut self) {
        self.coordinates.clear();
        self.total_distance = 0.;
        self.total_paused = TimeDelta::zero();
    }
}

fn non_negative(delta: TimeDelta) -> TimeDelta {
    delta.max(TimeDelta::zero())
}
