//! Core data models: waypoints and the GeoJSON LineString they mirror into.

use crate::error::FormatError;
use crate::kmz;
use serde::{Deserialize, Serialize};

/// One path vertex.
///
/// Altitude is optional per waypoint. A path may mix both variants and a
/// missing altitude means "unset", not zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub enum Waypoint {
    Point2 { lon: f64, lat: f64 },
    Point3 { lon: f64, lat: f64, alt: f64 },
}

impl Waypoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Waypoint::Point2 { lon, lat }
    }

    pub fn with_altitude(lon: f64, lat: f64, alt: f64) -> Self {
        Waypoint::Point3 { lon, lat, alt }
    }

    pub fn lon(&self) -> f64 {
        match *self {
            Waypoint::Point2 { lon, .. } | Waypoint::Point3 { lon, .. } => lon,
        }
    }

    pub fn lat(&self) -> f64 {
        match *self {
            Waypoint::Point2 { lat, .. } | Waypoint::Point3 { lat, .. } => lat,
        }
    }

    pub fn altitude(&self) -> Option<f64> {
        match *self {
            Waypoint::Point2 { .. } => None,
            Waypoint::Point3 { alt, .. } => Some(alt),
        }
    }

    /// Altitude, or `default` when unset.
    pub fn altitude_or(&self, default: f64) -> f64 {
        self.altitude().unwrap_or(default)
    }

    /// Drop the altitude, keeping lon/lat.
    pub fn to_2d(&self) -> Self {
        Waypoint::new(self.lon(), self.lat())
    }
}

impl TryFrom<Vec<f64>> for Waypoint {
    type Error = String;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        match coords.as_slice() {
            [lon, lat] => Ok(Waypoint::new(*lon, *lat)),
            [lon, lat, alt, ..] => Ok(Waypoint::with_altitude(*lon, *lat, *alt)),
            _ => Err(format!(
                "position needs at least 2 numbers, got {}",
                coords.len()
            )),
        }
    }
}

impl From<Waypoint> for Vec<f64> {
    fn from(wp: Waypoint) -> Self {
        match wp {
            Waypoint::Point2 { lon, lat } => vec![lon, lat],
            Waypoint::Point3 { lon, lat, alt } => vec![lon, lat, alt],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    #[default]
    LineString,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,
    pub coordinates: Vec<Waypoint>,
}

impl LineString {
    pub fn new(coordinates: Vec<Waypoint>) -> Self {
        Self {
            geometry_type: GeometryType::LineString,
            coordinates,
        }
    }

    /// Build from a flat `[lon, lat, lon, lat, ...]` list, as entered by hand.
    pub fn from_flat(flat: &[f64]) -> Result<Self, FormatError> {
        if flat.len() % 2 != 0 {
            return Err(FormatError::OddCoordinateCount(flat.len()));
        }
        let coordinates = flat
            .chunks_exact(2)
            .map(|pair| Waypoint::new(pair[0], pair[1]))
            .collect();
        Ok(Self::new(coordinates))
    }

    /// Parse pasted `lon,lat` pairs separated by spaces or newlines.
    ///
    /// Tuples follow KML `<coordinates>` rules, so a third field is read as
    /// altitude. At least two points are required.
    pub fn from_pairs_text(text: &str) -> Result<Self, FormatError> {
        let coordinates = kmz::parse_coordinates(text)?;
        if coordinates.len() < 2 {
            return Err(FormatError::TooFewPoints(coordinates.len()));
        }
        Ok(Self::new(coordinates))
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
