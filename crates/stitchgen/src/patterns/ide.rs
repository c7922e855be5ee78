//! Interdigitated electrode (IDE) comb pair.
//!
//! Alternating teeth hang from two opposing bus bars: even teeth belong to
//! the lower trace, odd teeth to the upper. Each tooth is stitched down and
//! back so both traces remain single continuous paths.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::IdeParams;

/// Build the IDE pair. Returns (lower, upper, width).
pub fn ide_comb(p: &IdeParams) -> Result<(Vec<Point>, Vec<Point>, f64), PatternError> {
    let dist = p.common.dist;
    let length = (p.teeth as f64 - 2.0) * dist; // tooth length

    if p.teeth < 2 {
        return Err(invalid("need at least two teeth"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }
    if length <= 0.0 {
        return Err(invalid("tooth length collapses to zero"));
    }

    let width = (p.teeth as f64 - 1.0) * dist;
    let h = dist + length;

    let mut lower = Vec::new();
    let mut upper = Vec::new();

    upper.push(Point::new(-width * 0.5, h * 0.5));
    for i in 0..p.teeth {
        let x = i as f64 * dist - width * 0.5;
        if i % 2 == 1 {
            upper.push(Point::new(x, h * 0.5));
            upper.push(Point::new(x, h * 0.5 - length));
            upper.push(Point::new(x, h * 0.5));
        } else {
            lower.push(Point::new(x, -h * 0.5));
            lower.push(Point::new(x, length - h * 0.5));
            lower.push(Point::new(x, -h * 0.5));
        }
    }

    // close the bus bar on whichever side owns the last tooth
    let x_last = (p.teeth as f64 - 1.0) * dist - width * 0.5;
    if p.teeth % 2 == 1 {
        upper.push(Point::new(x_last, h * 0.5));
    } else {
        lower.push(Point::new(x_last, -h * 0.5));
    }

    Ok((lower, upper, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teeth_split_between_traces() {
        let p = IdeParams::default(); // 10 teeth
        let (lower, upper, width) = ide_comb(&p).unwrap();

        assert!((width - 9.0).abs() < 1e-12);
        // 5 even teeth * 3 vertices + closing vertex
        assert_eq!(lower.len(), 16);
        // leading bus vertex + 5 odd teeth * 3 vertices
        assert_eq!(upper.len(), 16);
    }

    #[test]
    fn traces_never_share_an_x_column() {
        let p = IdeParams::default();
        let (lower, upper, _) = ide_comb(&p).unwrap();

        // Tooth columns alternate; no tooth x appears in both traces.
        for l in &lower {
            for u in &upper {
                if (l.x - u.x).abs() < 1e-9 {
                    // Only the bus-bar extremes may line up; they sit on
                    // opposite sides of the pattern.
                    assert!((l.y - u.y).abs() > 1e-9);
                }
            }
        }
    }

    #[test]
    fn rejects_too_few_teeth() {
        let mut p = IdeParams::default();
        p.teeth = 2; // tooth length (teeth - 2) * dist == 0
        assert!(ide_comb(&p).is_err());

        p.teeth = 1;
        assert!(ide_comb(&p).is_err());
    }
}
