//! Diamond tilings: a zigzag diamond cell and a spiral diamond cell, laid
//! out down a column (lower trace) and across a row (upper trace, quarter-
//! turned), with the remaining grid filled by clone translation.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::{DiamondSpiralParams, DiamondZigzagParams};

use super::TiledLayout;

/// Stack one diamond cell down the Y run and across the X run of the grid.
///
/// The lower trace descends through `tiles_y + 1` cells bracketed by lead
/// vertices; the upper trace is the quarter-turned cell swept across
/// `tiles_x + 1` columns the same way.
fn layout_diamond(
    cell: &[Point],
    cell_diagonal: f64,
    tiles_x: u32,
    tiles_y: u32,
) -> TiledLayout {
    let mut lower = Vec::new();
    let x0 = -(tiles_x as f64 - 1.0) * cell_diagonal * 0.5;
    let y0 = (tiles_y as f64 - 1.0) * cell_diagonal * 0.5 + cell_diagonal;

    lower.push(Point::new(x0, y0));
    for i in 0..=tiles_y {
        let origin = Point::new(x0, y0 - i as f64 * cell_diagonal);
        for v in cell {
            lower.push(origin + *v);
        }
    }
    lower.push(Point::new(x0, y0 - (tiles_y as f64 + 1.0) * cell_diagonal));

    let mut upper = Vec::new();
    let x0 = -(tiles_y as f64 - 1.0) * cell_diagonal * 0.5;
    let y0 = (tiles_x as f64 - 1.0) * cell_diagonal * 0.5 + cell_diagonal;

    upper.push(Point::new(-y0, x0));
    for i in 0..=tiles_x {
        let origin = Point::new(-y0 + i as f64 * cell_diagonal, x0);
        for v in cell {
            upper.push(origin + Point::new(-v.y, v.x));
        }
    }
    upper.push(Point::new(
        -y0 + (tiles_x as f64 + 1.0) * cell_diagonal,
        x0,
    ));

    TiledLayout {
        lower,
        upper,
        step_x: cell_diagonal,
        step_y: cell_diagonal,
    }
}

/// Build the zigzag diamond tiling: each cell is a diamond traversed in a
/// dense zigzag, two strokes per winding on each flank.
pub fn diamond_zigzag_tiled(p: &DiamondZigzagParams) -> Result<TiledLayout, PatternError> {
    let dist = p.common.dist;
    let tiles_x = p.tile.tiles_x;
    let tiles_y = p.tile.tiles_y;

    if p.windings < 1 {
        return Err(invalid("need at least one winding"));
    }
    if tiles_x < 1 || tiles_y < 1 {
        return Err(invalid("need at least one tile in each direction"));
    }
    if dist <= 0.0 {
        return Err(invalid("trace distance must be positive"));
    }
    if p.tile.tile_dist < 0.0 {
        return Err(invalid("tile distance must not be negative"));
    }

    let sqrt2 = 2.0_f64.sqrt();

    let diamond_diagonal = p.windings as f64 * dist * 2.0;
    let cell_diagonal = p.tile.tile_dist * sqrt2 + diamond_diagonal;
    let offset = p.tile.tile_dist * 0.5 * sqrt2;

    // x coordinate folds back once the zigzag passes the diamond's waist
    let flank = |progress: f64| {
        if progress <= diamond_diagonal * 0.5 {
            progress
        } else {
            diamond_diagonal - progress
        }
    };

    let mut cell = Vec::new();
    let mut progress = 0.0;

    for _ in 0..p.windings {
        cell.push(Point::new(flank(progress), -offset - progress));
        progress += dist;
        cell.push(Point::new(flank(progress), -offset - progress));

        cell.push(Point::new(-flank(progress), -offset - progress));
        progress += dist;
        cell.push(Point::new(-flank(progress), -offset - progress));
    }

    Ok(layout_diamond(&cell, cell_diagonal, tiles_x, tiles_y))
}

/// Build the spiral diamond tiling: each cell is a diamond wound from the
/// rim to the center in `turns` laps.
pub fn diamond_spiral_tiled(p: &DiamondSpiralParams) -> Result<TiledLayout, PatternError> {
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
    if p.tile.tile_dist < 0.0 {
        return Err(invalid("tile distance must not be negative"));
    }

    let sqrt2 = 2.0_f64.sqrt();

    let diamond_diagonal = p.turns as f64 * dist * 2.0 * sqrt2;
    let cell_diagonal = diamond_diagonal + p.tile.tile_dist * sqrt2;

    let offset = p.tile.tile_dist * 0.5 * sqrt2;
    let d = dist * sqrt2;

    let mut cell = Vec::new();

    cell.push(Point::new(0.0, -offset));
    for j in 0..p.turns {
        let fj = j as f64;
        cell.push(Point::new(diamond_diagonal * 0.5 - fj * d, -cell_diagonal * 0.5));
        cell.push(Point::new(0.0, -diamond_diagonal + fj * d - offset));
        cell.push(Point::new(-diamond_diagonal * 0.5 + fj * d, -cell_diagonal * 0.5));
        cell.push(Point::new(-d * 0.5, -fj * d - d * 0.5 - offset));
    }
    cell.push(Point::new(0.0, -cell_diagonal * 0.5));

    Ok(layout_diamond(&cell, cell_diagonal, tiles_x, tiles_y))
}
