//! Editable flight path.
//!
//! [`FlightPath`] owns the waypoint list and the GeoJSON geometry mirrored
//! from it. Every mutating call rebuilds the geometry before returning, so
//! the two never diverge.
//!
//! Index-addressed edits never fail: an out-of-range index leaves the path
//! untouched.

use crate::config::PlannerConfig;
use crate::error::FormatError;
use crate::export::write_csv;
use crate::kmz;
use crate::models::{LineString, Waypoint};
use crate::obj::export_obj;
use crate::simplify::{simplify_rdp, METERS_PER_DEGREE};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Summary of a path: size, planar length and per-waypoint positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStats {
    pub num_waypoints: usize,
    pub total_distance_m: f64,
    pub total_distance_km: f64,
    pub waypoints: Vec<WaypointSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointSummary {
    pub lon: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

/// Mutable waypoint sequence backing a GeoJSON `LineString`.
#[derive(Debug, Clone, Default)]
pub struct FlightPath {
    waypoints: Vec<Waypoint>,
    geometry: LineString,
}

impl FlightPath {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        let mut path = Self {
            waypoints,
            geometry: LineString::default(),
        };
        path.sync_geometry();
        path
    }

    pub fn from_geometry(geometry: LineString) -> Self {
        Self::new(geometry.coordinates)
    }

    /// Decode a KMZ archive and wrap its first path.
    pub fn from_kmz(bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self::from_geometry(kmz::decode(bytes)?))
    }

    /// Replace the whole path with a new geometry.
    pub fn load(&mut self, geometry: LineString) {
        self.waypoints = geometry.coordinates;
        self.sync_geometry();
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn geometry(&self) -> &LineString {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Insert a 2D waypoint before `index`; indices past the end append.
    pub fn insert(&mut self, index: usize, lon: f64, lat: f64) {
        let index = index.min(self.waypoints.len());
        self.waypoints.insert(index, Waypoint::new(lon, lat));
        self.sync_geometry();
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.waypoints.len() {
            self.waypoints.remove(index);
            self.sync_geometry();
        }
    }

    /// Move a waypoint. The moved waypoint loses any altitude it had.
    pub fn move_to(&mut self, index: usize, lon: f64, lat: f64) {
        if let Some(wp) = self.waypoints.get_mut(index) {
            *wp = Waypoint::new(lon, lat);
            self.sync_geometry();
        }
    }

    pub fn set_altitude(&mut self, index: usize, altitude_m: f64) {
        if let Some(wp) = self.waypoints.get_mut(index) {
            *wp = Waypoint::with_altitude(wp.lon(), wp.lat(), altitude_m);
            self.sync_geometry();
        }
    }

    pub fn reverse(&mut self) {
        self.waypoints.reverse();
        self.sync_geometry();
    }

    /// Ramer-Douglas-Peucker simplification with a tolerance in meters.
    ///
    /// Meters become degrees through a flat 111 km per degree. Kept waypoints
    /// are 2D once three or more points go through the filter.
    pub fn simplify(&mut self, tolerance_meters: f64) {
        let before = self.waypoints.len();
        self.waypoints = simplify_rdp(&self.waypoints, tolerance_meters / METERS_PER_DEGREE);
        self.sync_geometry();
        debug!(
            before,
            after = self.waypoints.len(),
            tolerance_meters,
            "simplified path"
        );
    }

    /// Waypoint count and planar length (`sqrt(dlat^2 + dlon^2) * 111000`).
    pub fn stats(&self) -> PathStats {
        let total_distance_m: f64 = self
            .waypoints
            .windows(2)
            .map(|pair| {
                let dlat = pair[1].lat() - pair[0].lat();
                let dlon = pair[1].lon() - pair[0].lon();
                (dlat.powi(2) + dlon.powi(2)).sqrt() * METERS_PER_DEGREE
            })
            .sum();

        PathStats {
            num_waypoints: self.waypoints.len(),
            total_distance_m,
            total_distance_km: total_distance_m / 1000.0,
            waypoints: self
                .waypoints
                .iter()
                .map(|wp| WaypointSummary {
                    lon: wp.lon(),
                    lat: wp.lat(),
                    alt: wp.altitude(),
                })
                .collect(),
        }
    }

    pub fn export_geojson(&self) -> serde_json::Value {
        let coordinates: Vec<Vec<f64>> = self
            .geometry
            .coordinates
            .iter()
            .map(|&wp| wp.into())
            .collect();
        json!({ "type": "LineString", "coordinates": coordinates })
    }

    pub fn export_csv(&self) -> Result<String, csv::Error> {
        write_csv(&self.waypoints, PlannerConfig::DEFAULT_CSV_ALTITUDE_M)
    }

    /// KMZ archive of the path. Altitudes are written as `0`.
    pub fn export_kmz(&self) -> Result<Vec<u8>, FormatError> {
        kmz::encode(&self.waypoints)
    }

    pub fn export_obj(&self, default_altitude: f64, thickness: f64) -> String {
        export_obj(&self.waypoints, default_altitude, thickness)
    }

    fn sync_geometry(&mut self) {
        self.geometry.coordinates.clone_from(&self.waypoints);
    }
}

impl From<LineString> for FlightPath {
    fn from(geometry: LineString) -> Self {
        Self::from_geometry(geometry)
    }
}
