//! Antenna tiling: each cell pairs a rake of vertical fingers hanging from
//! two horizontal bus runs (lower trace) with a fingered spine crossing the
//! cell between them (upper trace).

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::AntennaParams;

use super::TiledLayout;

/// Build the antenna layout.
pub fn antenna_tiled(p: &AntennaParams) -> Result<TiledLayout, PatternError> {
    let dist = p.common.dist;
    let tiles_x = p.tile.tiles_x;
    let tiles_y = p.tile.tiles_y;

    if p.order < 1 {
        return Err(invalid("order must be at least 1"));
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

    let cell_size = p.order as f64 * 4.0 * dist;
    let tile_size = cell_size + p.tile.tile_dist;
    let finger = cell_size * 0.5 - dist;

    // lower cell: top and bottom bus runs, each raking fingers toward the
    // cell center from both sides

    let mut cell = Vec::new();

    let x0 = 0.0;
    let mut y0 = tile_size / 2.0 - p.tile.tile_dist * 0.5;

    cell.push(Point::new(x0, y0));

    // top, left flank
    for i in 0..p.order {
        let x = x0 - (p.order - i) as f64 * dist * 2.0;
        cell.push(Point::new(x, y0));
        cell.push(Point::new(x, y0 - finger));
        cell.push(Point::new(x, y0));
    }

    // top, right flank
    for i in 0..p.order {
        let x = x0 + (p.order - i) as f64 * dist * 2.0;
        cell.push(Point::new(x, y0));
        cell.push(Point::new(x, y0 - finger));
        cell.push(Point::new(x, y0));
    }
    cell.push(Point::new(x0, y0));

    y0 -= cell_size;
    cell.push(Point::new(x0, y0));

    // bottom, left flank
    for i in 0..p.order {
        let x = x0 - (p.order - i) as f64 * dist * 2.0;
        cell.push(Point::new(x, y0));
        cell.push(Point::new(x, y0 + finger));
        cell.push(Point::new(x, y0));
    }

    // bottom, right flank
    for i in 0..p.order {
        let x = x0 + (p.order - i) as f64 * dist * 2.0;
        cell.push(Point::new(x, y0));
        cell.push(Point::new(x, y0 + finger));
        cell.push(Point::new(x, y0));
    }
    cell.push(Point::new(x0, y0));

    let gx0 = -tile_size * (tiles_x as f64 - 1.0) * 0.5;
    let gy0 = tile_size * (tiles_y as f64 - 1.0) * 0.5;

    let mut lower = Vec::new();
    lower.push(Point::new(gx0, gy0 + tile_size / 2.0));
    for i in 0..tiles_y {
        let origin = Point::new(gx0, gy0 - i as f64 * tile_size);
        for v in &cell {
            lower.push(*v + origin);
        }
    }
    lower.push(Point::new(
        gx0,
        gy0 - tiles_y as f64 * tile_size + tile_size / 2.0,
    ));

    // upper cell: horizontal spine with a finger pair every second dist step

    let mut spine = Vec::new();

    let mut sx = -tile_size * 0.5 + p.tile.tile_dist * 0.5;
    let sy = 0.0;

    spine.push(Point::new(sx, sy));

    for _ in 0..p.order * 2 {
        sx += dist;

        spine.push(Point::new(sx, sy));
        spine.push(Point::new(sx, sy + finger));
        spine.push(Point::new(sx, sy - finger));
        spine.push(Point::new(sx, sy));

        sx += dist;
    }
    spine.push(Point::new(sx, sy));

    let mut upper = Vec::new();
    upper.push(Point::new(gx0 - tile_size * 0.5, gy0));
    for i in 0..tiles_x {
        let origin = Point::new(gx0 + i as f64 * tile_size, gy0);
        for v in &spine {
            upper.push(*v + origin);
        }
    }
    upper.push(Point::new(
        gx0 + tiles_x as f64 * tile_size - tile_size * 0.5,
        gy0,
    ));

    Ok(TiledLayout {
        lower,
        upper,
        step_x: tile_size,
        step_y: -tile_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_match_order_and_grid() {
        let p = AntennaParams::default(); // order 5, 2x2 tiles
        let layout = antenna_tiled(&p).unwrap();

        // lower cell: 2 bus runs x (1 anchor + 2 flanks x order x 3 + 1 close)
        let cell_len = 2 * (2 + 6 * p.order as usize);
        assert_eq!(
            layout.lower.len(),
            2 + cell_len * p.tile.tiles_y as usize
        );

        // spine: 2 anchors + 2*order finger groups of 4
        let spine_len = 2 + 8 * p.order as usize;
        assert_eq!(
            layout.upper.len(),
            2 + spine_len * p.tile.tiles_x as usize
        );
    }

    #[test]
    fn fingers_stay_inside_the_cell() {
        let p = AntennaParams::default();
        let layout = antenna_tiled(&p).unwrap();

        let cell_size = p.order as f64 * 4.0 * p.common.dist;
        let tile_size = cell_size + p.tile.tile_dist;
        let total_h = p.tile.tiles_y as f64 * tile_size;

        for v in &layout.lower {
            assert!(v.y.abs() <= total_h * 0.5 + tile_size);
            assert!(v.x.abs() <= tile_size);
        }
    }

    #[test]
    fn rejects_zero_order() {
        let mut p = AntennaParams::default();
        p.order = 0;
        assert!(antenna_tiled(&p).is_err());
    }
}
