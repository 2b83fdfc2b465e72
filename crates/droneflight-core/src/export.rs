//! CSV export for flight controllers.

use crate::models::Waypoint;

/// Header row of the waypoint CSV.
pub const CSV_HEADER: [&str; 4] = ["lon", "lat", "alt_m", "speed_mps"];

/// Write waypoints as `lon,lat,alt_m,speed_mps` rows.
///
/// Waypoints without altitude get `default_altitude`. The speed column is a
/// reserved placeholder and is always `0`.
pub fn write_csv(waypoints: &[Waypoint], default_altitude: f64) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for wp in waypoints {
        writer.write_record([
            wp.lon().to_string(),
            wp.lat().to_string(),
            wp.altitude_or(default_altitude).to_string(),
            "0".to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_defaults_missing_altitude() {
        let path = vec![
            Waypoint::with_altitude(-122.42, 37.77, 120.0),
            Waypoint::new(-122.41, 37.78),
        ];
        let csv = write_csv(&path, 50.0).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(
            rows,
            vec![
                "lon,lat,alt_m,speed_mps",
                "-122.42,37.77,120,0",
                "-122.41,37.78,50,0",
            ]
        );
    }

    #[test]
    fn test_csv_empty_path_has_header_only() {
        let csv = write_csv(&[], 50.0).unwrap();
        assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["lon,lat,alt_m,speed_mps"]);
    }
}
