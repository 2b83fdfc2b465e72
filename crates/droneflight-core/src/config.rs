//! Planner defaults shared by the path engine and its callers.

use serde::{Deserialize, Serialize};

/// Tunable defaults for path export and launch planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum acceptable wind speed in m/s
    pub wind_limit_mps: f64,
    /// Forecast window to score, in hours
    pub hours_lookahead: u32,
    /// Planned flight duration in hours (reported back, not scored)
    pub duration_hours: f64,
    /// Altitude used for OBJ vertices of waypoints without one
    pub obj_default_altitude_m: f64,
    /// Ribbon width for OBJ export; zero exports a polyline
    pub obj_thickness: f64,
    /// Number of launch suggestions kept after ranking
    pub max_suggestions: usize,
}

impl PlannerConfig {
    pub const DEFAULT_WIND_LIMIT_MPS: f64 = 10.0;
    pub const DEFAULT_HOURS_LOOKAHEAD: u32 = 24;
    pub const DEFAULT_DURATION_HOURS: f64 = 1.0;
    /// Altitude written to CSV rows for waypoints without one
    pub const DEFAULT_CSV_ALTITUDE_M: f64 = 50.0;
    pub const DEFAULT_OBJ_ALTITUDE_M: f64 = 0.0;
    pub const DEFAULT_OBJ_THICKNESS: f64 = 0.0;
    pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            wind_limit_mps: Self::DEFAULT_WIND_LIMIT_MPS,
            hours_lookahead: Self::DEFAULT_HOURS_LOOKAHEAD,
            duration_hours: Self::DEFAULT_DURATION_HOURS,
            obj_default_altitude_m: Self::DEFAULT_OBJ_ALTITUDE_M,
            obj_thickness: Self::DEFAULT_OBJ_THICKNESS,
            max_suggestions: Self::DEFAULT_MAX_SUGGESTIONS,
        }
    }
}
