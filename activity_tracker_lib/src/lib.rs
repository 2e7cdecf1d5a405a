pub mod clock;
pub mod coordinate;
pub mod distance;
pub mod error;
pub mod session;
pub mod shared;
pub mod source;
pub mod track_point;

pub use clock::{Clock, ManualClock, SystemClock};
pub use coordinate::Coordinate;
pub use error::SessionError;
pub use session::{ActivitySession, Ingest, SessionSnapshot, SessionState};
pub use shared::SharedSession;
pub use source::{PositionSource, PositionUnavailable};
pub use track_point::TrackPoint;
