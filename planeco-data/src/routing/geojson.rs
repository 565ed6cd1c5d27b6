//! GeoJSON line geometry shared by both backends.

use geo::{Coord, LineString};
use planeco_core::ProviderError;
use serde::Deserialize;

/// GeoJSON `LineString` geometry object.
///
/// Positions are `[longitude, latitude]` with an optional trailing
/// elevation, which is ignored.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Positions along the line.
    pub coordinates: Vec<Vec<f64>>,
}

impl LineGeometry {
    /// Convert into a `geo` line with `x = longitude` and `y = latitude`.
    pub fn into_line_string(self) -> Result<LineString<f64>, ProviderError> {
        self.coordinates
            .into_iter()
            .map(|position| match position.as_slice() {
                [x, y, ..] => Ok(Coord { x: *x, y: *y }),
                _ => Err(ProviderError::ParseError {
                    message: format!("GeoJSON position {position:?} has fewer than two values"),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(LineString::new)
    }
}
