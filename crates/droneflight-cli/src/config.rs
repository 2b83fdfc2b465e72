//! CLI configuration from environment.

use std::env;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "flight_planner=info,droneflight_core=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub openweather_url: String,
    pub openweather_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openweather_url: env::var("OPENWEATHER_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5".to_string()),
            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        }
    }
}

/// Build the tracing filter from a `RUST_LOG`-style directive string.
///
/// User directives replace the defaults entirely, so `droneflight_core=debug`
/// is honored as given.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults() {
        let filter = log_filter(None).to_string().to_lowercase();
        assert!(filter.contains("flight_planner=info"));
        assert!(filter.contains("droneflight_core=info"));

        let blank = log_filter(Some("  ")).to_string().to_lowercase();
        assert!(blank.contains("droneflight_core=info"));
    }

    #[test]
    fn test_log_filter_keeps_user_directive() {
        let filter = log_filter(Some("droneflight_core=debug")).to_string().to_lowercase();
        assert!(filter.contains("droneflight_core=debug"));
        assert!(!filter.contains("droneflight_core=info"));
    }
}
