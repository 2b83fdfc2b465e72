//! Ramer-Douglas-Peucker polyline simplification.
//!
//! Distances are planar in degree space: altitude plays no part and there is
//! no latitude-dependent scaling of longitude.

use crate::models::Waypoint;

/// Planar meters-per-degree factor used for tolerances and path length.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Distance from `point` to the infinite line through `start` and `end`.
///
/// Vertical and horizontal chords use the plain absolute difference, so a
/// degenerate chord never divides by zero.
pub fn perpendicular_distance(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    let (x, y) = point;
    let (x1, y1) = start;
    let (x2, y2) = end;

    if x1 == x2 {
        return (x - x1).abs();
    }
    if y1 == y2 {
        return (y - y1).abs();
    }

    let num = ((y2 - y1) * x - (x2 - x1) * y + x2 * y1 - y2 * x1).abs();
    let den = ((y2 - y1).powi(2) + (x2 - x1).powi(2)).sqrt();
    num / den
}

/// Simplify a path, `epsilon` given in degrees.
///
/// Paths of fewer than three waypoints come back unchanged. Otherwise the
/// kept waypoints are returned as 2D points.
pub fn simplify_rdp(points: &[Waypoint], epsilon: f64) -> Vec<Waypoint> {
    if points.len() < 3 {
        return points.to_vec();
    }
    simplify_indices(points, epsilon)
        .into_iter()
        .map(|i| points[i].to_2d())
        .collect()
}

/// Indices of the waypoints RDP keeps, in path order.
///
/// Uses an explicit work stack so long paths cannot exhaust the call stack.
/// A negative `epsilon` is treated as zero.
pub fn simplify_indices(points: &[Waypoint], epsilon: f64) -> Vec<usize> {
    if points.len() < 3 {
        return (0..points.len()).collect();
    }

    let epsilon = epsilon.max(0.0);
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let chord_start = (points[start].lon(), points[start].lat());
        let chord_end = (points[end].lon(), points[end].lat());

        let mut max_distance = 0.0;
        let mut max_index = start;
        for (i, wp) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = perpendicular_distance((wp.lon(), wp.lat()), chord_start, chord_end);
            if d > max_distance {
                max_distance = d;
                max_index = i;
            }
        }

        if max_distance > epsilon {
            keep[max_index] = true;
            stack.push((max_index, end));
            stack.push((start, max_index));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}
