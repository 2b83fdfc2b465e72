pub mod config;
pub mod error;
pub mod export;
pub mod kmz;
pub mod models;
pub mod obj;
pub mod optimizer;
pub mod path;
pub mod simplify;

pub use config::PlannerConfig;
pub use error::{FormatError, WeatherError};
pub use models::{GeometryType, LineString, Waypoint};
pub use optimizer::{
    check_flight_conditions, launch_score, rank_forecast, rate_flight_path, suggest_launch_times,
    CurrentWeather, FlightConditions, Forecast, ForecastEntry, LaunchSuggestion,
    LaunchWindowReport, Location, PathRating, Recommendation, WeatherProvider,
};
pub use path::{FlightPath, PathStats, WaypointSummary};
pub use simplify::{perpendicular_distance, simplify_indices, simplify_rdp, METERS_PER_DEGREE};
