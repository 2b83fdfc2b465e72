//! DroneFlight Planner - pre-flight planning from a KMZ route.
//!
//! Loads a KMZ path, optionally checks weather and suggests launch times,
//! applies simplify/reverse edits and writes the result to KMZ, CSV, OBJ or
//! GeoJSON.

use anyhow::{Context, Result};
use clap::Parser;
use droneflight_cli::{log_filter, Config, OpenWeatherClient};
use droneflight_core::{
    check_flight_conditions, rate_flight_path, suggest_launch_times, FlightPath, PlannerConfig,
    WeatherProvider,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "DroneFlight Planner - pre-flight operations assistant",
    long_about = None
)]
struct Args {
    /// Path to KMZ file
    kmz_file: PathBuf,

    /// Flight area latitude
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Flight area longitude
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Max wind speed (m/s)
    #[arg(long, default_value_t = PlannerConfig::DEFAULT_WIND_LIMIT_MPS)]
    wind_limit: f64,

    /// Hours to look ahead for weather
    #[arg(long, default_value_t = PlannerConfig::DEFAULT_HOURS_LOOKAHEAD)]
    lookahead: u32,

    /// Simplify path (tolerance in meters)
    #[arg(long)]
    simplify: Option<f64>,

    /// Reverse flight direction
    #[arg(long)]
    reverse: bool,

    /// Check current weather conditions
    #[arg(long)]
    check_weather: bool,

    /// Suggest optimal launch times
    #[arg(long)]
    suggest_times: bool,

    /// Export modified path to KMZ file
    #[arg(long)]
    export_kmz: Option<PathBuf>,

    /// Export waypoints to CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Export path to Wavefront OBJ file
    #[arg(long)]
    export_obj: Option<PathBuf>,

    /// Export path to GeoJSON file
    #[arg(long)]
    export_geojson: Option<PathBuf>,

    /// Ribbon width for OBJ export (0 = polyline)
    #[arg(long, default_value_t = PlannerConfig::DEFAULT_OBJ_THICKNESS)]
    thickness: f64,

    /// Altitude for OBJ vertices without one
    #[arg(long, default_value_t = PlannerConfig::DEFAULT_OBJ_ALTITUDE_M)]
    default_alt: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let planner = PlannerConfig {
        wind_limit_mps: args.wind_limit,
        hours_lookahead: args.lookahead,
        obj_default_altitude_m: args.default_alt,
        obj_thickness: args.thickness,
        ..Default::default()
    };

    let bytes = fs::read(&args.kmz_file)
        .with_context(|| format!("File not found: {}", args.kmz_file.display()))?;
    let mut path = FlightPath::from_kmz(&bytes).context("Error parsing KMZ")?;
    println!("Loaded KMZ: {}", args.kmz_file.display());
    println!("Loaded flight path with {} waypoints", path.len());

    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; weather checks will be unavailable");
    }
    let weather = OpenWeatherClient::new(config.openweather_url, config.openweather_api_key)?;

    if args.check_weather {
        println!("\n--- Current Weather Conditions ---");
        match weather.get_current_weather(args.lat, args.lon) {
            Ok(current) => {
                let conditions = check_flight_conditions(&current, planner.wind_limit_mps);
                println!("Safe to fly: {}", conditions.safe);
                println!(
                    "Wind: {:.1} m/s (limit: {:.1})",
                    conditions.wind_speed_mps, conditions.wind_limit_mps
                );
                println!("Rain: {:.1} mm/h", conditions.rain_mm_h);
                println!("Cloud cover: {}%", conditions.cloud_coverage_pct);
                println!("Visibility: {:.1} km", conditions.visibility_m / 1000.0);
                println!("Temperature: {:.1}°C", conditions.temp_c);
            }
            Err(e) => println!("Weather check failed: {}", e),
        }
    }

    if args.suggest_times {
        println!("\n--- Suggested Launch Times ---");
        let report = suggest_launch_times(&weather, args.lat, args.lon, &planner);
        if report.suggestions.is_empty() {
            println!("No suggestions available");
        }
        for (i, suggestion) in report.suggestions.iter().take(3).enumerate() {
            println!("{}. {} (score: {:.1})", i + 1, suggestion.timestamp, suggestion.score);
            println!("   Wind: {:.1} m/s", suggestion.wind_mps);
            println!("   Rain: {:.1} mm", suggestion.rain_mm);
            println!("   Clouds: {}%", suggestion.cloud_pct);
        }
    }

    if let Some(tolerance) = args.simplify {
        println!("\nSimplifying path (tolerance: {}m)...", tolerance);
        path.simplify(tolerance);
    }

    if args.reverse {
        println!("\nReversing flight direction...");
        path.reverse();
    }

    println!("\n--- Path Rating ---");
    let stats = path.stats();
    println!("Waypoints: {}", stats.num_waypoints);
    println!("Total distance: {:.2} km", stats.total_distance_km);

    let rating = rate_flight_path(&weather, path.waypoints(), planner.wind_limit_mps);
    println!("Path rating: {:.1}/{}", rating.path_rating, rating.max_score);
    println!("Recommendation: {}", rating.recommendation);

    if let Some(out) = &args.export_kmz {
        let kmz = path.export_kmz().context("Failed to encode KMZ")?;
        fs::write(out, kmz).with_context(|| format!("Failed to write {}", out.display()))?;
        println!("\nExported KMZ: {}", out.display());
    }

    if let Some(out) = &args.export_csv {
        let csv = path.export_csv().context("Failed to encode CSV")?;
        fs::write(out, csv).with_context(|| format!("Failed to write {}", out.display()))?;
        println!("Exported CSV: {}", out.display());
    }

    if let Some(out) = &args.export_obj {
        let obj = path.export_obj(planner.obj_default_altitude_m, planner.obj_thickness);
        fs::write(out, obj).with_context(|| format!("Failed to write {}", out.display()))?;
        println!("Exported OBJ: {}", out.display());
    }

    if let Some(out) = &args.export_geojson {
        let geojson = serde_json::to_string_pretty(&path.export_geojson())?;
        fs::write(out, geojson).with_context(|| format!("Failed to write {}", out.display()))?;
        println!("Exported GeoJSON: {}", out.display());
    }

    println!("\nFlight planning complete!");
    Ok(())
}
