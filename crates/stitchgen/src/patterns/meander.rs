//! Rectangular meander patterns: the inward-then-outward walk shared by the
//! double pair and the tiled grid variant.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::{MeanderParams, MeanderTiledParams};

use super::TiledLayout;

/// Walk a rectangular meander: spiral inward with shrinking strides, turn
/// around, and interleave back out with growing ones. Directions cycle
/// right, down, left, up.
fn meander_walk(turns: u32, dist: f64, start: Point) -> Vec<Point> {
    let mut dir = 0_usize;
    let mut v = start;

    let mut temp = vec![v];

    for i in 0..=turns {
        let offset = turns.saturating_sub(i).max(1) as f64 * 2.0 * dist;
        match dir {
            0 => v.x += offset,
            1 => v.y -= offset,
            2 => v.x -= offset,
            _ => v.y += offset,
        }
        temp.push(v);
        dir = (dir + 1) % 4;
    }

    dir = (dir + 2) % 4;

    for i in 0..turns {
        let offset = (i + 1) as f64 * 2.0 * dist;
        match dir {
            0 => v.x += offset,
            1 => v.y -= offset,
            2 => v.x -= offset,
            _ => v.y += offset,
        }
        temp.push(v);
        dir = (dir + 3) % 4;
    }

    temp
}

/// Build the meander pair: the lower trace walks the meander, the upper is
/// its quarter-turned copy. Returns (lower, upper, width).
pub fn meander_double(p: &MeanderParams) -> Result<(Vec<Point>, Vec<Point>, f64), PatternError> {
    let dist = p.common.dist;

    if p.turns < 1 {
        return Err(invalid("need at least one turn"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }

    let width = p.turns as f64 * dist * 2.0;

    let start = Point::new(-(width + 2.0 * dist) * 0.5, width * 0.5);
    let mut temp = meander_walk(p.turns, dist, start);

    // trim the lead-in and lead-out to leave connector room
    temp[0].x += dist;
    let n = temp.len();
    temp[n - 1].x -= dist;

    // both traces are filled front-to-back from the walk, reversing it
    let lower: Vec<Point> = temp.iter().rev().copied().collect();
    let upper: Vec<Point> = temp.iter().rev().map(|v| Point::new(-v.y, v.x)).collect();

    Ok((lower, upper, width))
}

/// Build the tiled meander layout: one meander cell per tile, neighbouring
/// cells sharing an edge (the walk's first and last vertices are dropped).
pub fn meander_tiled(p: &MeanderTiledParams) -> Result<TiledLayout, PatternError> {
    let dist = p.common.dist;
    let tiles_x = p.tile.tiles_x;
    let tiles_y = p.tile.tiles_y;

    if p.turns < 1 {
        return Err(invalid("need at least one turn"));
    }
    if tiles_x < 1 || tiles_y < 1 {
        return Err(invalid("need at least one tile in each direction"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }

    let w = (p.turns as f64 + 1.0) * dist * 2.0;

    let start = Point::new(-w * 0.5, w * 0.5 - dist);
    let mut temp = meander_walk(p.turns, dist, start);

    // neighbouring cells share one edge
    temp.remove(0);
    temp.pop();

    let spacing = w - 2.0 * dist;

    let x0 = -spacing * (tiles_x as f64 - 1.0) * 0.5;
    let y0 = spacing * (tiles_y as f64 - 1.0) * 0.5;

    let mut lower = Vec::new();
    for i in 0..tiles_y {
        let origin = Point::new(x0, y0 - i as f64 * spacing);
        for v in &temp {
            lower.push(origin + *v);
        }
    }

    let mut upper = Vec::new();
    for i in 0..tiles_x {
        let origin = Point::new(x0 + i as f64 * spacing, y0);
        for v in &temp {
            upper.push(origin + Point::new(-v.y, v.x));
        }
    }

    Ok(TiledLayout {
        lower,
        upper,
        step_x: spacing,
        step_y: -spacing,
    })
}
