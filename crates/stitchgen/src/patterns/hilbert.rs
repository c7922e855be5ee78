//! Hilbert-curve comb pattern - a space-filling electrode pair.
//!
//! The backbone visits every cell of a `2^order` grid exactly once. The
//! upper "curve" electrode follows the backbone; the lower "tree" electrode
//! is the comb offset of the same backbone, bracketing it on both sides.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::HilbertParams;

use super::util::{comb_pair, push_collinear_collapsed};

const MAX_ORDER: u32 = 8;

// Cell-index-to-coordinate mapping of the Hilbert curve.

fn rot(n: i32, x: &mut i32, y: &mut i32, rx: i32, ry: i32) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }

        std::mem::swap(x, y);
    }
}

fn d2xy(n: i32, d: i32) -> (i32, i32) {
    let mut x = 0;
    let mut y = 0;
    let mut t = d;

    let mut s = 1;
    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        rot(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }

    (x, y)
}

/// Build the Hilbert comb pair. Returns (lower, upper, width).
pub fn hilbert_comb(
    p: &HilbertParams,
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

    let w = 2i32.pow(p.order);
    let cells = w * w;

    let width = w as f64 * dist * 2.0;
    let c = Point::new(width * 0.5, width * 0.5);

    let mut backbone: Vec<Point> = Vec::with_capacity(cells as usize);
    for i in 0..cells {
        let (x, y) = d2xy(w, i);
        let v = Point::new((x as f64 + 0.5) * dist * 2.0, (y as f64 + 0.5) * dist * 2.0) - c;
        push_collinear_collapsed(&mut backbone, v, epsilon);
    }

    let (lower, upper) = comb_pair(&backbone, dist, epsilon);

    Ok((lower, upper, width))
}
