//! Launch-time suggestions and path rating from forecast weather.
//!
//! Weather data comes from a [`WeatherProvider`]; this module only scores it.
//! Provider failures never escape as errors: they are reported in the
//! result's `error` field instead.

use crate::config::PlannerConfig;
use crate::error::WeatherError;
use crate::models::Waypoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Cloud cover assumed for forecast entries that omit it.
const FORECAST_DEFAULT_CLOUD_PCT: f64 = 100.0;
/// Visibility assumed when current conditions omit it.
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;
/// Minimum visibility for a flight to count as safe.
const MIN_SAFE_VISIBILITY_M: f64 = 5_000.0;
const MAX_PATH_SCORE: f64 = 100.0;

/// Source of forecast and current weather, e.g. an OpenWeather client.
pub trait WeatherProvider {
    /// Hourly forecast entries for the next `hours` hours.
    fn get_forecast(&self, lat: f64, lon: f64, hours: u32) -> Result<Forecast, WeatherError>;

    fn get_current_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rain {
    /// Rain volume over the last hour, in mm
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud cover percentage
    pub all: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: Option<f64>,
}

/// One hourly forecast entry, in OpenWeather's response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds)
    pub dt: i64,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub rain: Option<Rain>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
}

impl ForecastEntry {
    pub fn wind_speed(&self) -> f64 {
        self.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0)
    }

    pub fn rain_mm(&self) -> f64 {
        self.rain.as_ref().and_then(|r| r.one_hour).unwrap_or(0.0)
    }

    pub fn cloud_pct(&self) -> f64 {
        self.clouds
            .as_ref()
            .and_then(|c| c.all)
            .unwrap_or(FORECAST_DEFAULT_CLOUD_PCT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

/// Current conditions at one location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub rain: Option<Rain>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    /// Visibility in meters
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub main: Option<MainReadings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// A scored launch hour. Lower scores are better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSuggestion {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    pub wind_mps: f64,
    pub rain_mm: f64,
    pub cloud_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchWindowReport {
    pub location: Location,
    pub duration_hours: f64,
    pub hours_lookahead: u32,
    pub wind_limit_mps: f64,
    pub suggestions: Vec<LaunchSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Go/no-go evaluation of current conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConditions {
    pub safe: bool,
    pub wind_speed_mps: f64,
    pub wind_limit_mps: f64,
    pub rain_mm_h: f64,
    pub cloud_coverage_pct: f64,
    pub visibility_m: f64,
    pub temp_c: f64,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Good to fly")]
    GoodToFly,
    #[serde(rename = "Marginal conditions")]
    Marginal,
    #[serde(rename = "Not recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn from_score(score: f64) -> Self {
        if score > 60.0 {
            Recommendation::GoodToFly
        } else if score > 30.0 {
            Recommendation::Marginal
        } else {
            Recommendation::NotRecommended
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::GoodToFly => "Good to fly",
            Recommendation::Marginal => "Marginal conditions",
            Recommendation::NotRecommended => "Not recommended",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRating {
    pub path_rating: f64,
    pub max_score: f64,
    pub waypoint_scores: Vec<f64>,
    pub recommendation: Recommendation,
}

/// Linear launch score: `(wind / limit) * 100 + rain * 50 + clouds / 2`.
pub fn launch_score(wind_mps: f64, rain_mm: f64, cloud_pct: f64, wind_limit_mps: f64) -> f64 {
    (wind_mps / wind_limit_mps) * 100.0 + rain_mm * 50.0 + cloud_pct / 2.0
}

/// Score every forecast entry and keep the best `limit`, best first.
///
/// Ties keep forecast order. Entries with an unrepresentable timestamp are
/// skipped.
pub fn rank_forecast(
    forecast: &Forecast,
    wind_limit_mps: f64,
    limit: usize,
) -> Vec<LaunchSuggestion> {
    let mut ranked: Vec<LaunchSuggestion> = forecast
        .list
        .iter()
        .filter_map(|entry| {
            let Some(timestamp) = DateTime::from_timestamp(entry.dt, 0) else {
                warn!(dt = entry.dt, "skipping forecast entry with invalid timestamp");
                return None;
            };
            let (wind_mps, rain_mm, cloud_pct) =
                (entry.wind_speed(), entry.rain_mm(), entry.cloud_pct());
            Some(LaunchSuggestion {
                timestamp,
                score: launch_score(wind_mps, rain_mm, cloud_pct, wind_limit_mps),
                wind_mps,
                rain_mm,
                cloud_pct,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    ranked.truncate(limit);
    ranked
}

/// Suggest the best launch hours at a location.
pub fn suggest_launch_times<P>(
    provider: &P,
    lat: f64,
    lon: f64,
    config: &PlannerConfig,
) -> LaunchWindowReport
where
    P: WeatherProvider + ?Sized,
{
    let mut report = LaunchWindowReport {
        location: Location { lat, lon },
        duration_hours: config.duration_hours,
        hours_lookahead: config.hours_lookahead,
        wind_limit_mps: config.wind_limit_mps,
        suggestions: Vec::new(),
        error: None,
    };

    if config.wind_limit_mps <= 0.0 {
        report.error = Some("Wind limit must be positive".to_string());
        return report;
    }

    match provider.get_forecast(lat, lon, config.hours_lookahead) {
        Ok(forecast) => {
            report.suggestions =
                rank_forecast(&forecast, config.wind_limit_mps, config.max_suggestions);
            debug!(
                entries = forecast.list.len(),
                kept = report.suggestions.len(),
                "ranked launch windows"
            );
        }
        Err(e) => {
            warn!(error = %e, "forecast unavailable");
            report.error = Some("Could not fetch forecast".to_string());
        }
    }

    report
}

/// Evaluate current conditions against a wind limit.
///
/// Safe means wind at or under the limit, no rain, and visibility over 5 km.
pub fn check_flight_conditions(current: &CurrentWeather, wind_limit_mps: f64) -> FlightConditions {
    let wind_speed_mps = current.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0);
    let rain_mm_h = current.rain.as_ref().and_then(|r| r.one_hour).unwrap_or(0.0);
    let cloud_coverage_pct = current.clouds.as_ref().and_then(|c| c.all).unwrap_or(0.0);
    let visibility_m = current.visibility.unwrap_or(DEFAULT_VISIBILITY_M);
    let temp_c = current.main.as_ref().and_then(|m| m.temp).unwrap_or(0.0);

    FlightConditions {
        safe: wind_speed_mps <= wind_limit_mps
            && rain_mm_h == 0.0
            && visibility_m > MIN_SAFE_VISIBILITY_M,
        wind_speed_mps,
        wind_limit_mps,
        rain_mm_h,
        cloud_coverage_pct,
        visibility_m,
        temp_c,
        checked_at: Utc::now(),
    }
}

/// Rate a path by the current conditions at each of its waypoints.
///
/// Each waypoint with available weather scores 50 when safe plus up to 30
/// for calm wind. Waypoints whose weather cannot be fetched are left out of
/// the average.
pub fn rate_flight_path<P>(provider: &P, waypoints: &[Waypoint], wind_limit_mps: f64) -> PathRating
where
    P: WeatherProvider + ?Sized,
{
    let waypoint_scores: Vec<f64> = waypoints
        .iter()
        .filter_map(|wp| match provider.get_current_weather(wp.lat(), wp.lon()) {
            Ok(current) => {
                let conditions = check_flight_conditions(&current, wind_limit_mps);
                let safe_bonus = if conditions.safe { 50.0 } else { 0.0 };
                Some(safe_bonus + (30.0 - conditions.wind_speed_mps * 2.0).max(0.0))
            }
            Err(e) => {
                debug!(error = %e, lat = wp.lat(), lon = wp.lon(), "no conditions for waypoint");
                None
            }
        })
        .collect();

    let path_rating = if waypoint_scores.is_empty() {
        0.0
    } else {
        waypoint_scores.iter().sum::<f64>() / waypoint_scores.len() as f64
    };

    PathRating {
        path_rating,
        max_score: MAX_PATH_SCORE,
        waypoint_scores,
        recommendation: Recommendation::from_score(path_rating),
    }
}
