//! DroneFlight CLI support code.
//!
//! - config: environment-driven settings
//! - weather: OpenWeather client implementing `WeatherProvider`

pub mod config;
pub mod weather;

pub use config::{log_filter, Config};
pub use weather::OpenWeatherClient;
