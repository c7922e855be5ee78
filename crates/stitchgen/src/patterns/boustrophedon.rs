//! Crossed boustrophedon pair: a horizontal serpentine (lower) interleaved
//! with a vertical one (upper) over the same square. The half-`dist` phase
//! offset keeps the two traces clear of each other at the crossings.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::BoustrophedonParams;

/// Build the crossed serpentine pair. Returns (lower, upper, width).
pub fn boustrophedon_double(
    p: &BoustrophedonParams,
) -> Result<(Vec<Point>, Vec<Point>, f64), PatternError> {
    let dist = p.common.dist;

    if p.windings < 1 {
        return Err(invalid("need at least one winding"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }

    let width = 2.0 * dist * p.windings as f64;
    let half = width * 0.5;

    let mut lower = Vec::new();
    let mut upper = Vec::new();

    lower.push(Point::new(-half, -half));
    upper.push(Point::new(half, -half));

    for i in 0..p.windings {
        let fi = i as f64;

        lower.push(Point::new(-half + dist * (2.0 * fi + 0.5), -half));
        lower.push(Point::new(-half + dist * (2.0 * fi + 0.5), half));
        lower.push(Point::new(-half + dist * (2.0 * fi + 1.5), half));
        lower.push(Point::new(-half + dist * (2.0 * fi + 1.5), -half));

        upper.push(Point::new(half, -half + dist * (2.0 * fi + 0.5)));
        upper.push(Point::new(-half, -half + dist * (2.0 * fi + 0.5)));
        upper.push(Point::new(-half, -half + dist * (2.0 * fi + 1.5)));
        upper.push(Point::new(half, -half + dist * (2.0 * fi + 1.5)));
    }

    lower.push(Point::new(half, -half));
    upper.push(Point::new(half, half));

    Ok((lower, upper, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_match_windings() {
        let p = BoustrophedonParams::default(); // 5 windings
        let (lower, upper, width) = boustrophedon_double(&p).unwrap();

        assert!((width - 10.0).abs() < 1e-12);
        assert_eq!(lower.len(), 2 + 4 * 5);
        assert_eq!(upper.len(), 2 + 4 * 5);
    }

    #[test]
    fn traces_are_perpendicular_serpentines() {
        let p = BoustrophedonParams::default();
        let (lower, upper, _) = boustrophedon_double(&p).unwrap();

        // The lower trace's long runs are vertical, the upper's horizontal.
        let lower_vertical = lower
            .windows(2)
            .filter(|w| w[0].x == w[1].x && (w[0].y - w[1].y).abs() > 5.0)
            .count();
        let upper_horizontal = upper
            .windows(2)
            .filter(|w| w[0].y == w[1].y && (w[0].x - w[1].x).abs() > 5.0)
            .count();

        // Each winding contributes one full run out and one back.
        assert_eq!(lower_vertical, 10);
        assert_eq!(upper_horizontal, 10);
    }

    #[test]
    fn rejects_zero_windings() {
        let mut p = BoustrophedonParams::default();
        p.windings = 0;
        assert!(boustrophedon_double(&p).is_err());
    }
}
