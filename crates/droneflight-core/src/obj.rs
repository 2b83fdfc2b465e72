//! Wavefront OBJ export of a flight path.
//!
//! Coordinates pass straight through: x = longitude, y = latitude,
//! z = altitude. With a thickness the path becomes a flat ribbon of quads
//! in the lon/lat plane; otherwise a single polyline.

use crate::models::Waypoint;

const HEADER: &str = "# flight path exported by droneflight";
const OBJECT_NAME: &str = "flight_path";
const HAIRPIN_EPSILON: f64 = 1e-9;

/// Render waypoints as OBJ text.
///
/// `default_altitude` fills in waypoints without one. A `thickness` greater
/// than zero produces a ribbon mesh of that width, otherwise a polyline.
pub fn export_obj(waypoints: &[Waypoint], default_altitude: f64, thickness: f64) -> String {
    let mut lines = vec![HEADER.to_string(), format!("o {OBJECT_NAME}")];

    if thickness > 0.0 {
        push_ribbon(&mut lines, waypoints, default_altitude, thickness);
    } else {
        push_polyline(&mut lines, waypoints, default_altitude);
    }

    lines.join("\n")
}

fn push_polyline(lines: &mut Vec<String>, waypoints: &[Waypoint], default_altitude: f64) {
    for wp in waypoints {
        lines.push(format!(
            "v {} {} {}",
            wp.lon(),
            wp.lat(),
            wp.altitude_or(default_altitude)
        ));
    }

    if waypoints.len() > 1 {
        let indices = (1..=waypoints.len())
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("l {indices}"));
    }
}

fn push_ribbon(
    lines: &mut Vec<String>,
    waypoints: &[Waypoint],
    default_altitude: f64,
    thickness: f64,
) {
    let half = thickness / 2.0;

    for (wp, tangent) in waypoints.iter().zip(ribbon_tangents(waypoints)) {
        // Unit normal to the left of travel; zero when no direction is known.
        let (nx, ny) = tangent.map(|(tx, ty)| (-ty, tx)).unwrap_or((0.0, 0.0));
        let alt = wp.altitude_or(default_altitude);

        lines.push(format!(
            "v {} {} {}",
            wp.lon() + nx * half,
            wp.lat() + ny * half,
            alt
        ));
        lines.push(format!(
            "v {} {} {}",
            wp.lon() - nx * half,
            wp.lat() - ny * half,
            alt
        ));
    }

    for i in 0..waypoints.len().saturating_sub(1) {
        let a = 2 * i + 1;
        let b = a + 1;
        let c = a + 2;
        let d = a + 3;
        lines.push(format!("f {a} {c} {d} {b}"));
    }
}

/// Horizontal unit tangent at each waypoint.
///
/// Interior points average the incoming and outgoing segment directions,
/// falling back to the incoming one on a hairpin. Zero-length segments carry
/// no direction; a point without any valid adjacent segment reuses the
/// previous point's tangent, or has none at the start of the path.
fn ribbon_tangents(waypoints: &[Waypoint]) -> Vec<Option<(f64, f64)>> {
    let segments: Vec<Option<(f64, f64)>> = waypoints
        .windows(2)
        .map(|pair| {
            unit(
                pair[1].lon() - pair[0].lon(),
                pair[1].lat() - pair[0].lat(),
            )
        })
        .collect();

    let mut tangents = Vec::with_capacity(waypoints.len());
    let mut previous = None;

    for i in 0..waypoints.len() {
        let incoming = i.checked_sub(1).and_then(|s| segments[s]);
        let outgoing = segments.get(i).copied().flatten();

        let tangent = match (incoming, outgoing) {
            (Some(a), Some(b)) => unit(a.0 + b.0, a.1 + b.1)
                .filter(|_| (a.0 + b.0).hypot(a.1 + b.1) > HAIRPIN_EPSILON)
                .or(Some(a)),
            (Some(d), None) | (None, Some(d)) => Some(d),
            (None, None) => previous,
        };

        if tangent.is_some() {
            previous = tangent;
        }
        tangents.push(tangent);
    }

    tangents
}

fn unit(dx: f64, dy: f64) -> Option<(f64, f64)> {
    let len = dx.hypot(dy);
    if len > 0.0 && len.is_finite() {
        Some((dx / len, dy / len))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> Vec<Waypoint> {
        vec![
            Waypoint::with_altitude(-122.42, 37.77, 100.0),
            Waypoint::with_altitude(-122.41, 37.77, 100.0),
            Waypoint::with_altitude(-122.41, 37.78, 100.0),
        ]
    }

    fn vertices(obj: &str) -> Vec<(f64, f64, f64)> {
        obj.lines()
            .filter(|l| l.starts_with("v "))
            .map(|l| {
                let parts: Vec<f64> = l[2..]
                    .split_whitespace()
                    .map(|p| p.parse().unwrap())
                    .collect();
                (parts[0], parts[1], parts[2])
            })
            .collect()
    }

    #[test]
    fn test_polyline_export() {
        let obj = export_obj(&sample_path(), 0.0, 0.0);

        assert!(obj.starts_with("# "));
        assert!(obj.contains("\no flight_path\n"));
        assert!(obj.contains("v -122.42 37.77 100"));
        assert!(obj.trim_end().ends_with("l 1 2 3"));
        assert_eq!(obj.matches("v ").count(), 3);
        assert!(!obj.contains("f "));
    }

    #[test]
    fn test_polyline_uses_default_altitude() {
        let path = vec![Waypoint::new(1.0, 2.0), Waypoint::with_altitude(3.0, 4.0, 7.5)];
        let obj = export_obj(&path, 42.0, 0.0);
        assert!(obj.contains("v 1 2 42"));
        assert!(obj.contains("v 3 4 7.5"));
    }

    #[test]
    fn test_polyline_single_point_has_no_line() {
        let obj = export_obj(&[Waypoint::new(1.0, 2.0)], 0.0, 0.0);
        assert_eq!(obj.matches("v ").count(), 1);
        assert!(!obj.contains("l "));

        let empty = export_obj(&[], 0.0, 0.0);
        assert_eq!(empty.lines().count(), 2);
    }

    #[test]
    fn test_ribbon_export_counts() {
        let obj = export_obj(&sample_path(), 0.0, 1.0);

        assert_eq!(obj.matches("v ").count(), 6);
        assert!(!obj.contains("l "));
        let faces: Vec<&str> = obj.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, vec!["f 1 3 4 2", "f 3 5 6 4"]);
    }

    #[test]
    fn test_ribbon_offsets_perpendicular_to_travel() {
        // Heading east: offsets go north and south.
        let path = vec![Waypoint::with_altitude(0.0, 0.0, 5.0), Waypoint::new(2.0, 0.0)];
        let verts = vertices(&export_obj(&path, 9.0, 1.0));

        assert_eq!(verts.len(), 4);
        assert_eq!(verts[0], (0.0, 0.5, 5.0));
        assert_eq!(verts[1], (0.0, -0.5, 5.0));
        assert_eq!(verts[2], (2.0, 0.5, 9.0));
        assert_eq!(verts[3], (2.0, -0.5, 9.0));
    }

    #[test]
    fn test_ribbon_corner_uses_averaged_direction() {
        // East then north: the corner tangent points north-east.
        let path = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(1.0, 1.0),
        ];
        let verts = vertices(&export_obj(&path, 0.0, 2.0));
        let h = std::f64::consts::FRAC_1_SQRT_2;

        let (lx, ly, _) = verts[2];
        let (rx, ry, _) = verts[3];
        assert!((lx - (1.0 - h)).abs() < 1e-12);
        assert!((ly - h).abs() < 1e-12);
        assert!((rx - (1.0 + h)).abs() < 1e-12);
        assert!((ry + h).abs() < 1e-12);
    }

    #[test]
    fn test_ribbon_handles_duplicate_points() {
        let path = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(2.0, 0.0),
        ];
        let verts = vertices(&export_obj(&path, 0.0, 1.0));

        assert_eq!(verts.len(), 10);
        assert!(verts.iter().all(|(x, y, z)| x.is_finite() && y.is_finite() && z.is_finite()));
        // The middle duplicate has no valid segment and reuses the eastward tangent.
        assert_eq!(verts[4], (1.0, 0.5, 0.0));
        assert_eq!(verts[5], (1.0, -0.5, 0.0));
    }

    #[test]
    fn test_ribbon_all_coincident_points_have_zero_offset() {
        let path = vec![Waypoint::new(3.0, 3.0), Waypoint::new(3.0, 3.0)];
        let verts = vertices(&export_obj(&path, 0.0, 1.0));
        assert!(verts.iter().all(|&(x, y, _)| x == 3.0 && y == 3.0));
    }

    #[test]
    fn test_ribbon_hairpin_falls_back_to_incoming() {
        let path = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(0.0, 0.0),
        ];
        let verts = vertices(&export_obj(&path, 0.0, 1.0));
        assert_eq!(verts[2], (1.0, 0.5, 0.0));
        assert_eq!(verts[3], (1.0, -0.5, 0.0));
    }

    #[test]
    fn test_ribbon_single_point() {
        let obj = export_obj(&[Waypoint::new(1.0, 1.0)], 0.0, 1.0);
        assert_eq!(obj.matches("v ").count(), 2);
        assert!(!obj.contains("f "));
    }
}
