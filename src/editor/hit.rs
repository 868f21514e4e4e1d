//! Pointer hit testing against handles and polygon edges.

use glam::DVec2;

/// Squared distance from `p3` to the segment `p1`-`p2`.
///
/// Only perpendicular projections that land on the segment count: when the
/// projection parameter falls outside `[0, 1]`, or the segment is a single
/// point, the result is `f64::INFINITY`.
pub fn distance_to_edge_squared(p1: DVec2, p2: DVec2, p3: DVec2) -> f64 {
    let d = p2 - p1;
    let len_sq = d.length_squared();
    if len_sq == 0.0 {
        return f64::INFINITY;
    }
    let u = (p3 - p1).dot(d) / len_sq;
    if !(0.0..=1.0).contains(&u) {
        return f64::INFINITY;
    }
    p3.distance_squared(p1 + u * d)
}

/// Index of the closed-path edge nearest `p` within `threshold_sq`.
///
/// Edge `i` runs from `points[i]` to `points[(i + 1) % n]`.
pub fn edge_near(points: &[DVec2], p: DVec2, threshold_sq: f64) -> Option<usize> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    (0..n)
        .map(|i| (i, distance_to_edge_squared(points[i], points[(i + 1) % n], p)))
        .filter(|&(_, d)| d < threshold_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// The handle under `p`, topmost (last drawn) first
pub fn handle_at(handles: &[DVec2], p: DVec2, radius: f64) -> Option<usize> {
    let r_sq = radius * radius;
    handles.iter().rposition(|h| h.distance_squared(p) <= r_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn perpendicular_distance() {
        let d = distance_to_edge_squared(dvec2(0.0, 0.0), dvec2(0.0, 100.0), dvec2(3.0, 50.0));
        assert_eq!(d, 9.0);
    }

    #[test]
    fn projection_outside_segment_is_no_match() {
        let d = distance_to_edge_squared(dvec2(0.0, 0.0), dvec2(0.0, 100.0), dvec2(0.0, 101.0));
        assert_eq!(d, f64::INFINITY);
        let d = distance_to_edge_squared(dvec2(5.0, 5.0), dvec2(5.0, 5.0), dvec2(5.0, 5.0));
        assert_eq!(d, f64::INFINITY);
    }

    #[test]
    fn nearest_edge_wins() {
        let square = [
            dvec2(0.0, 0.0),
            dvec2(100.0, 0.0),
            dvec2(100.0, 100.0),
            dvec2(0.0, 100.0),
        ];
        assert_eq!(edge_near(&square, dvec2(0.0, 50.0), 16.0), Some(3));
        assert_eq!(edge_near(&square, dvec2(50.0, 1.0), 16.0), Some(0));
        assert_eq!(edge_near(&square, dvec2(50.0, 50.0), 16.0), None);
    }

    #[test]
    fn handles_hit_within_radius() {
        let handles = [dvec2(0.0, 0.0), dvec2(3.0, 0.0)];
        assert_eq!(handle_at(&handles, dvec2(2.0, 0.0), 4.0), Some(1));
        assert_eq!(handle_at(&handles, dvec2(-4.0, 0.0), 4.0), Some(0));
        assert_eq!(handle_at(&handles, dvec2(20.0, 0.0), 4.0), None);
    }
}
