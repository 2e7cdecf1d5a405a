use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use crate::{
    clock::Clock,
    coordinate::Coordinate,
    error::SessionError,
    session::{ActivitySession, Ingest, SessionSnapshot, SessionState},
};

/// A session behind a lock, for hosts that deliver positions and commands on
/// different threads. Every call takes the lock once, so each command and each
/// position lands atomically and in the order the lock was acquired.
#[derive(Debug)]
pub struct SharedSession<C: Clock> {
    inner: Arc<Mutex<ActivitySession<C>>>,
}

impl<C: Clock> Clone for SharedSession<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: Clock> SharedSession<C> {
    pub fn new(clock: C) -> Self {
        Self::from_session(ActivitySession::new(clock))
    }

    pub fn from_session(session: ActivitySession<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs `f` with the lock held, for reads that must see one consistent state.
    pub fn with<R>(&self, f: impl FnOnce(&mut ActivitySession<C>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn start(&self) -> Result<(), SessionError> {
        self.inner.lock().start()
    }

    pub fn pause(&self) -> Result<(), SessionError> {
        self.inner.lock().pause()
    }

    pub fn resume(&self) -> Result<(), SessionError> {
        self.inner.lock().resume()
    }

    pub fn toggle_pause(&self) -> Result<SessionState, SessionError> {
        self.inner.lock().toggle_pause()
    }

    pub fn stop(&self) -> Result<(), SessionError> {
        self.inner.lock().stop()
    }

    pub fn reset(&self) {
        self.inner.lock().reset()
    }

    pub fn ingest_position(&self, coordinate: Coordinate) -> Result<Ingest, SessionError> {
        self.inner.lock().ingest_position(coordinate)
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        self.inner.lock().elapsed(now)
    }

    pub fn elapsed_now(&self) -> TimeDelta {
        self.inner.lock().elapsed_now()
    }

    pub fn total_distance(&self) -> f64 {
        self.inner.lock().total_distance()
    }

    pub fn current_state(&self) -> SessionState {
        self.inner.lock().current_state()
    }

    /// Copy of the path, since the lock cannot be held across the caller's use of it.
    pub fn path_points(&self) -> Vec<Coordinate> {
        self.inner.lock().path_points().to_vec()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot()
    }
}
