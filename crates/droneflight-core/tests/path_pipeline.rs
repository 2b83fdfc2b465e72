//! End-to-end path pipeline tests: KMZ in, edits, exports out.
//!
//! Run with: cargo test -p droneflight-core --test path_pipeline

use droneflight_core::{kmz, FlightPath, FormatError, Waypoint};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SAMPLE_COORDS: &str = "-122.42,37.77,100 -122.41,37.77,100 -122.41,37.78,100";

fn make_sample_kmz(coords: &str) -> Vec<u8> {
    let kml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <LineString>
        <coordinates>
{coords}
        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>"#
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("doc.kml", SimpleFileOptions::default())
        .expect("start kml member");
    writer.write_all(kml.as_bytes()).expect("write kml");
    writer.finish().expect("finish archive").into_inner()
}

#[test]
fn test_kmz_to_geojson() {
    let path = FlightPath::from_kmz(&make_sample_kmz(SAMPLE_COORDS)).unwrap();
    let geojson = path.export_geojson();

    assert_eq!(geojson["type"], "LineString");
    assert_eq!(geojson["coordinates"].as_array().unwrap().len(), 3);
    assert_eq!(geojson["coordinates"][0], serde_json::json!([-122.42, 37.77, 100.0]));
}

#[test]
fn test_kmz_to_obj_polyline() {
    let path = FlightPath::from_kmz(&make_sample_kmz(SAMPLE_COORDS)).unwrap();
    let obj = path.export_obj(0.0, 0.0);

    assert!(obj.contains("v -122.42 37.77 100"));
    assert!(obj.trim().ends_with("l 1 2 3"));
}

#[test]
fn test_kmz_to_obj_with_thickness() {
    let path = FlightPath::from_kmz(&make_sample_kmz(SAMPLE_COORDS)).unwrap();
    let obj = path.export_obj(0.0, 1.0);

    assert_eq!(obj.matches("v ").count(), 6);
    assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 2);
    assert!(obj.contains("f 1 3 4 2"));
    assert!(!obj.contains("l "));
}

#[test]
fn test_waypoint_count_matches_file() {
    let coords: Vec<String> = (0..250)
        .map(|i| format!("{},{}", -122.0 + i as f64 * 0.001, 37.0 + (i % 7) as f64 * 0.001))
        .collect();
    let path = FlightPath::from_kmz(&make_sample_kmz(&coords.join("\n"))).unwrap();

    assert_eq!(path.len(), 250);
    assert_eq!(path.waypoints()[0], Waypoint::new(-122.0, 37.0));
}

#[test]
fn test_edit_then_round_trip_through_kmz() {
    let mut path = FlightPath::from_kmz(&make_sample_kmz(SAMPLE_COORDS)).unwrap();
    path.insert(1, -122.415, 37.765);
    path.set_altitude(1, 60.0);
    path.reverse();

    let reloaded = FlightPath::from_kmz(&path.export_kmz().unwrap()).unwrap();

    assert_eq!(reloaded.len(), path.len());
    for (a, b) in path.waypoints().iter().zip(reloaded.waypoints()) {
        assert_eq!((a.lon(), a.lat()), (b.lon(), b.lat()));
        assert_eq!(b.altitude(), Some(0.0));
    }
}

#[test]
fn test_simplify_keeps_endpoints_and_never_grows() {
    let coords: Vec<String> = (0..100)
        .map(|i| {
            let t = i as f64 * 0.0005;
            format!("{},{}", t, (t * 400.0).sin() * 0.0004)
        })
        .collect();
    let original = FlightPath::from_kmz(&make_sample_kmz(&coords.join(" "))).unwrap();

    for tolerance in [0.0, 5.0, 20.0, 100.0] {
        let mut path = original.clone();
        path.simplify(tolerance);

        assert!(path.len() <= original.len());
        assert_eq!(path.waypoints().first().map(|w| (w.lon(), w.lat())), Some((0.0, 0.0)));
        let last = original.waypoints().last().unwrap();
        assert_eq!(
            path.waypoints().last().map(|w| (w.lon(), w.lat())),
            Some((last.lon(), last.lat()))
        );
    }
}

#[test]
fn test_csv_export_from_kmz_path() {
    let mut path = FlightPath::from_kmz(&make_sample_kmz("1,2,30 3,4")).unwrap();
    path.remove(5);

    let csv = path.export_csv().unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows, vec!["lon,lat,alt_m,speed_mps", "1,2,30,0", "3,4,50,0"]);
}

#[test]
fn test_decode_errors_surface_to_caller() {
    assert!(matches!(
        FlightPath::from_kmz(b"PK not really"),
        Err(FormatError::InvalidArchive(_))
    ));
    assert!(matches!(
        kmz::decode(&make_sample_kmz("1,2 x,y")),
        Err(FormatError::InvalidCoordinate { .. })
    ));
}
