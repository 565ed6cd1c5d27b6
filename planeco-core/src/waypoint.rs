//! Waypoints: labelled WGS84 positions handed to the engine by address
//! producers (autocomplete, reverse geocoding, file import).

use geo::Coord;
use thiserror::Error;

/// A labelled stop on an itinerary.
///
/// Waypoints are immutable once created. Coordinates are WGS84 degrees.
///
/// # Examples
/// ```
/// use planeco_core::Waypoint;
///
/// # fn main() -> Result<(), planeco_core::WaypointError> {
/// let wp = Waypoint::new("Tour Eiffel, Paris", 48.8584, 2.2945)?;
/// assert_eq!(wp.coord().x, 2.2945);
/// assert_eq!(wp.coord().y, 48.8584);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "WaypointRecord", into = "WaypointRecord")
)]
pub struct Waypoint {
    address: String,
    lat: f64,
    lon: f64,
}

/// Errors returned by [`Waypoint::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaypointError {
    /// Latitude was non-finite or outside `-90.0..=90.0`.
    #[error("latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),
    /// Longitude was non-finite or outside `-180.0..=180.0`.
    #[error("longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),
}

impl Waypoint {
    /// Validate and construct a waypoint.
    pub fn new(address: impl Into<String>, lat: f64, lon: f64) -> Result<Self, WaypointError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(WaypointError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(WaypointError::InvalidLongitude(lon));
        }
        Ok(Self {
            address: address.into(),
            lat,
            lon,
        })
    }

    /// Display label of the waypoint.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Latitude in degrees.
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    pub const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Wire shape of a waypoint: `{ address, lat, lon }`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct WaypointRecord {
    address: String,
    lat: f64,
    lon: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<WaypointRecord> for Waypoint {
    type Error = WaypointError;

    fn try_from(record: WaypointRecord) -> Result<Self, Self::Error> {
        Self::new(record.address, record.lat, record.lon)
    }
}

#[cfg(feature = "serde")]
impl From<Waypoint> for WaypointRecord {
    fn from(waypoint: Waypoint) -> Self {
        Self {
            address: waypoint.address,
            lat: waypoint.lat,
            lon: waypoint.lon,
        }
    }
}
