//! Shared helpers for the generator family.

use crate::geometry::Point;

/// Length of the straight stub left at the open end of a closed or
/// near-closed shape, giving the machine room to transition.
pub const CONNECTOR_LENGTH: f64 = 0.01;

/// Append `v`, first removing the previous point if it would make the last
/// three collinear. Keeps space-filling backbones down to their corners.
pub fn push_collinear_collapsed(points: &mut Vec<Point>, v: Point, epsilon: f64) {
    if points.len() > 1 {
        let a = (points[points.len() - 1] - points[points.len() - 2]).normalized();
        let b = (v - points[points.len() - 1]).normalized();
        if (a.dot(b) - 1.0).abs() < epsilon {
            points.pop();
        }
    }
    points.push(v);
}

/// Offset a backbone polyline sideways by `dist`.
///
/// Walks the segments in order and displaces both endpoints of each along the
/// in-plane perpendicular of its tangent. Interior corners receive the
/// offsets of both adjacent segments. The first point is then extended
/// backward and the last forward by `dist`, clearing the backbone's ends.
fn offset_pass(mut pts: Vec<Point>, dist: f64) -> Vec<Point> {
    if pts.len() < 2 {
        return pts;
    }

    let mut prev = pts[0];
    for i in 0..pts.len() - 1 {
        let fwd = (pts[i + 1] - prev).normalized();
        prev = pts[i + 1];

        // cross(tangent, +Z) projected into the plane
        let right = Point::new(fwd.y, -fwd.x);
        let offset = right * -dist;

        pts[i] += offset;
        pts[i + 1] += offset;
    }

    let front = (pts[1] - pts[0]).normalized() * dist;
    pts[0] -= front;
    let n = pts.len();
    let back = (pts[n - 1] - pts[n - 2]).normalized() * dist;
    pts[n - 1] += back;

    pts
}

/// Derive the two traces of a space-filling comb pair from one backbone.
///
/// The upper trace is the backbone itself with its first stitch pushed out to
/// the perimeter. The lower trace runs the offset pass forward and again over
/// the reversed backbone, concatenating the two offset polylines into one
/// path that brackets the backbone without touching it.
pub fn comb_pair(backbone: &[Point], dist: f64, epsilon: f64) -> (Vec<Point>, Vec<Point>) {
    let mut upper = backbone.to_vec();
    if upper.len() > 1 {
        let back = (upper[0] - upper[1]).normalized();
        upper[0] += back * dist;
    }

    let forward = offset_pass(backbone.to_vec(), dist);
    let reversed = offset_pass(backbone.iter().rev().copied().collect(), dist);

    let mut lower: Vec<Point> = Vec::with_capacity(forward.len() + reversed.len());
    for p in forward.into_iter().chain(reversed) {
        if lower.last().is_some_and(|l| l.distance(p) < epsilon) {
            continue;
        }
        lower.push(p);
    }

    (lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EPSILON;

    #[test]
    fn collinear_middle_point_is_dropped() {
        let mut pts = Vec::new();
        push_collinear_collapsed(&mut pts, Point::new(0.0, 0.0), EPSILON);
        push_collinear_collapsed(&mut pts, Point::new(1.0, 0.0), EPSILON);
        push_collinear_collapsed(&mut pts, Point::new(2.0, 0.0), EPSILON);
        assert_eq!(pts, vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);

        push_collinear_collapsed(&mut pts, Point::new(2.0, 1.0), EPSILON);
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn offset_pass_displaces_straight_run_sideways() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let out = offset_pass(pts, 1.0);
        // Tangent +X: perpendicular offset lands at y = +1, ends extended.
        assert!((out[0].x - -1.0).abs() < 1e-9);
        assert!((out[0].y - 1.0).abs() < 1e-9);
        assert!((out[1].x - 11.0).abs() < 1e-9);
        assert!((out[1].y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn comb_pair_has_no_contact_with_backbone() {
        use crate::geometry::Segment;

        // An L-shaped backbone, corners only.
        let backbone = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ];
        let (lower, upper) = comb_pair(&backbone, 1.0, EPSILON);

        assert!(lower.len() >= 4);
        assert_eq!(upper.len(), backbone.len());

        // No lower vertex may come near any backbone segment.
        for w in upper.windows(2) {
            let seg = Segment::new(w[0], w[1]);
            for p in &lower {
                assert!(!seg.hit_test(*p, 0.001), "lower point {p:?} touches backbone");
            }
        }
    }
}
