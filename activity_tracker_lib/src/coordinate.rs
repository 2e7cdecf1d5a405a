use geo_types::{Coord, Point};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// A position on the earth's surface in decimal degrees.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Like `new`, but rejects NaN, infinities and anything outside [-90, 90] x [-180, 180].
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, SessionError> {
        let coordinate = Self::new(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(SessionError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

// geo-types is x/y, so longitude goes first.
impl From<Coordinate> for Point {
    fn from(value: Coordinate) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Point> for Coordinate {
    fn from(value: Point) -> Self {
        Coordinate::new(value.y(), value.x())
    }
}

impl From<Coordinate> for Coord {
    fn from(value: Coordinate) -> Self {
        Coord {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord> for Coordinate {
    fn from(value: Coord) -> Self {
        Coordinate::new(value.y, value.x)
    }
}
