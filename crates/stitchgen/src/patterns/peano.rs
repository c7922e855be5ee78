//! Peano-curve comb pattern.
//!
//! Same comb construction as the Hilbert pair, but the backbone is the Peano
//! curve: 3x3 subdivision with horizontal/vertical flip states steering the
//! traversal so consecutive cells stay adjacent.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::PeanoParams;

use super::util::{comb_pair, push_collinear_collapsed};

const MAX_ORDER: u32 = 5;

/// Visit the nine sub-regions of one region in serpentine order.
///
/// The middle row toggles the horizontal flip of its children, the middle
/// column the vertical flip; that keeps the walk continuous across region
/// boundaries.
fn recurse(x: i32, y: i32, o: u32, h_flip: bool, v_flip: bool, epsilon: f64, verts: &mut Vec<Point>) {
    if o == 0 {
        push_collinear_collapsed(verts, Point::new(x as f64, y as f64), epsilon);
        return;
    }

    let o = o - 1;
    let d = 3i32.pow(o);

    let pick = |flip: bool, k: i32| if flip { 2 - k } else { k };

    recurse(x + pick(h_flip, 0) * d, y + pick(v_flip, 0) * d, o, h_flip, v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 0) * d, y + pick(v_flip, 1) * d, o, !h_flip, v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 0) * d, y + pick(v_flip, 2) * d, o, h_flip, v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 1) * d, y + pick(v_flip, 2) * d, o, h_flip, !v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 1) * d, y + pick(v_flip, 1) * d, o, !h_flip, !v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 1) * d, y + pick(v_flip, 0) * d, o, h_flip, !v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 2) * d, y + pick(v_flip, 0) * d, o, h_flip, v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 2) * d, y + pick(v_flip, 1) * d, o, !h_flip, v_flip, epsilon, verts);
    recurse(x + pick(h_flip, 2) * d, y + pick(v_flip, 2) * d, o, h_flip, v_flip, epsilon, verts);
}

/// Build the Peano comb pair. Returns (lower, upper, width).
pub fn peano_comb(
    p: &PeanoParams,
    epsilon: f64,
) -> Result<(Vec<Point>, Vec<Point>, f64), PatternError> {
    let dist = p.common.dist;

    if p.order < 1 {
        return Err(invalid("order must be at least 1"));
    }
    if p.order > MAX_ORDER {
        return Err(invalid(format!("order must be at most {MAX_ORDER}")));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }

    let mut backbone = Vec::new();
    recurse(0, 0, p.order, false, false, epsilon, &mut backbone);

    let w = 3i32.pow(p.order);
    let width = w as f64 * dist * 2.0;

    let c = Point::new(width * 0.5 - dist, width * 0.5 - dist);

    for v in &mut backbone {
        *v = *v * (dist * 2.0) - c;
    }

    let (lower, upper) = comb_pair(&backbone, dist, epsilon);

    Ok((lower, upper, width))
}
