//! Square spiral pair: one rectangular spiral and its point-mirrored copy,
//! nested so the two arms alternate without touching.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::SpiralParams;

/// Build the square spiral pair. Returns (lower, upper, width).
pub fn spiral_double(p: &SpiralParams) -> Result<(Vec<Point>, Vec<Point>, f64), PatternError> {
    let dist = p.common.dist;

    if p.turns < 1 {
        return Err(invalid("need at least one turn"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }

    let width = p.turns as f64 * dist * 2.0;

    let mut dir = 0_usize;
    let mut v = Point::new(-width * 0.5, width * 0.5);

    let mut temp = vec![v];

    for i in 0..=(2 * p.turns as i64) {
        // strides shrink by one dist every half revolution
        let k = ((i + 1) / 2) * 2 - 1;
        let offset = (2 * p.turns as i64 - k.max(0)) as f64 * dist;

        match dir {
            0 => v.x += offset,
            1 => v.y -= offset,
            2 => v.x -= offset,
            _ => v.y += offset,
        }
        temp.push(v);
        dir = (dir + 1) % 4;
    }

    // nudge the inner terminus off the midline; the side depends on where
    // the spiral ended up after an odd or even number of turns
    let parity = if p.turns % 2 == 1 { 1.0 } else { -1.0 };
    let n = temp.len();
    temp[n - 1].x += dist * 0.5 * parity;

    let lower = temp.clone();
    let upper: Vec<Point> = temp.iter().map(|v| Point::new(-v.x, -v.y)).collect();

    Ok((lower, upper, width))
}
