//! Circular single-trace patterns: chord boustrophedon and spiral.

use std::f64::consts::PI;

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::{CircleParams, SpiralCircleParams};

use super::util::CONNECTOR_LENGTH;

/// Fill a circle with horizontal chords stepped by `dist`, alternating
/// direction. Where the arc between two chord ends is longer than the jump
/// size, intermediate stitches are laid along the circumference.
///
/// Returns the vertex list (connector first) and the maximum radius reached.
/// The caller flips the result by 180 degrees so the connector ends up at
/// the bottom.
pub fn boustrophedon_circle(p: &CircleParams) -> Result<(Vec<Point>, f64), PatternError> {
    let dist = p.common.dist;
    let jump = p.common.jump_size;

    if p.diameter <= 0.0 {
        return Err(invalid("diameter must be positive"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }
    if jump <= 0.0 {
        return Err(invalid("jump size must be positive"));
    }

    let mut temp = Vec::new();

    let r = p.diameter / 2.0;

    let mut s = 0.0;
    let mut dir = 1.0;

    while s < p.diameter {
        let y = r - s;
        let h = y.abs();

        let x1 = (r * r - h * h).abs().sqrt() * dir;
        let x0 = -x1;

        temp.push(Point::new(x0, y));
        temp.push(Point::new(x1, y));

        s += dist;

        if s < p.diameter {
            let a0 = (y / r).asin(); // angle to current edge
            let a1 = ((r - s) / r).asin(); // angle to next edge
            let da = (a1 - a0).abs();
            let ds = da * r; // arc length to the next chord

            if ds > jump {
                // step along the circumference
                let a_jump = jump / r;

                let mut a = a0 - a_jump;
                while a > a1 {
                    temp.push(Point::new(a.cos() * r * dir, a.sin() * r));
                    a -= a_jump;
                }
            }
        }

        dir = -dir;
    }

    let r_max = temp
        .iter()
        .map(|v| v.length_sq())
        .fold(0.0, f64::max)
        .sqrt();

    temp.insert(0, Point::new(0.0, r + CONNECTOR_LENGTH));

    Ok((temp, r_max))
}

/// Spiral from the outer diameter in to the inner one. Not a perfect
/// Archimedean spiral: each step advances by one chord of the current
/// radius, with the chord length interpolated between the outer and inner
/// jump sizes as the spiral tightens.
///
/// Returns the vertex list (connector first) plus the first and last spiral
/// points for the size summary. The caller rotates the result 90 degrees
/// clockwise.
pub fn spiral_circle(p: &SpiralCircleParams) -> Result<(Vec<Point>, Point, Point), PatternError> {
    let dist = p.common.dist;

    if p.diameter <= 0.0 {
        return Err(invalid("diameter must be positive"));
    }
    if p.inner_diameter < 0.0 {
        return Err(invalid("inner diameter must not be negative"));
    }
    if p.inner_diameter > p.diameter {
        return Err(invalid("inner diameter larger than diameter"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }
    if p.common.jump_size <= 0.0 || p.inner_jump_size <= 0.0 {
        return Err(invalid("jump sizes must be positive"));
    }

    let r0 = p.diameter / 2.0;
    let r1 = p.inner_diameter / 2.0;
    let j0 = p.common.jump_size;
    let j1 = p.inner_jump_size;

    let mut temp = Vec::new();

    let mut a = 0.0_f64;
    let mut r = r0;

    while r > r1 {
        let x = r * a.cos();
        let y = r * a.sin();

        temp.push(Point::new(x, y));

        let d = x.hypot(y);

        let progress = (r - r1) / (r0 - r1); // 1 at the rim, 0 at the center
        let jump = j1 * (1.0 - progress) + j0 * progress;

        // the jump chord no longer fits on the shrinking circle
        if 2.0 * d <= jump {
            break;
        }

        // increment angle so the chord of the current radius has length jump
        let b = 2.0 * (jump / (2.0 * d)).asin();

        a -= b;
        r -= dist * (b / (2.0 * PI));
    }

    let first = temp.first().copied().unwrap_or_default();
    let last = temp.last().copied().unwrap_or_default();

    temp.insert(0, Point::new(r0 + CONNECTOR_LENGTH, 0.0));

    Ok((temp, first, last))
}
