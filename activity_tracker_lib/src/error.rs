use crate::session::SessionState;

/// Commands a session refused. None of them leave the session unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("session is already active ({state:?})")]
    AlreadyActive { state: SessionState },
    #[error("cannot pause, session is not tracking ({state:?})")]
    NotTracking { state: SessionState },
    #[error("cannot resume, session is not paused ({state:?})")]
    NotPaused { state: SessionState },
    #[error("cannot stop, session was never started ({state:?})")]
    NotActive { state: SessionState },
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}
