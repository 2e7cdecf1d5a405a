use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A single fix as delivered by a position source.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub position: Coordinate,
    pub timestamp: DateTime<Utc>,
}

impl TrackPoint {
    pub fn new(position: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}
