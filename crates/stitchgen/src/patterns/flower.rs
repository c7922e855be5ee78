//! Flower tiling: four triangular spiral petals wound around the cell
//! center. The lower trace sweeps mirrored petals down the column, the upper
//! the plain petals across the row.

use crate::error::{PatternError, invalid};
use crate::geometry::Point;
use crate::params::FlowerParams;

use super::TiledLayout;

/// Build the flower layout.
pub fn flower_tiled(p: &FlowerParams) -> Result<TiledLayout, PatternError> {
    let dist = p.common.dist;
    let cell_dist = p.tile.tile_dist;
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
    if cell_dist < 0.0 {
        return Err(invalid("tile distance must not be negative"));
    }

    let sqrt2 = 2.0_f64.sqrt();

    let tri_height = p.turns as f64 * (dist * (1.0 + sqrt2));
    let tri_width = tri_height * sqrt2;

    let cell_size = (2.0 * tri_height + cell_dist) / sqrt2;
    let tile_size = 2.0 * (cell_size + cell_dist);

    let mut cell = Vec::new();

    // lower left petal
    let mut x0 = cell_dist * 0.5 - tile_size * 0.5;
    let mut y0 = -cell_dist * 0.5;

    let mut x = x0;
    let mut y = y0;
    let mut a = tri_width;
    for i in 0..p.turns {
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist * sqrt2;
        }
        y -= a;
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist;
        }
        y += a;
        x += a;
        cell.push(Point::new(x, y));
        a -= dist;
        x -= a;
    }
    // the petal's own last corner is skipped to avoid an acute angle
    cell.push(Point::new(-cell_dist * 0.5, cell_dist * 0.25));

    // upper left petal
    x0 += cell_size;
    y0 += cell_dist + cell_dist / sqrt2;

    x = x0;
    y = y0;
    a = tri_width;
    for i in 0..p.turns {
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist;
        }
        y += a;
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist * sqrt2;
        }
        x -= a;
        cell.push(Point::new(x, y));
        a -= dist;
        x += a;
        y -= a;
    }
    cell.push(Point::new(x, y));
    cell.push(Point::new(cell_dist * 0.5, -cell_dist * 0.25));

    // lower right petal
    x0 += cell_dist;
    y0 -= cell_dist + 2.0 * cell_dist / sqrt2;

    x = x0;
    y = y0;
    a = tri_width;
    for i in 0..p.turns {
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist;
        }
        y -= a;
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist * sqrt2;
        }
        x += a;
        cell.push(Point::new(x, y));
        a -= dist;
        x -= a;
        y += a;
    }
    cell.push(Point::new(x, y));
    cell.push(Point::new(cell_dist * 0.25, cell_dist * 0.5));

    // upper right petal
    x0 += cell_dist / sqrt2;
    y0 += cell_dist + cell_dist / sqrt2;

    x = x0;
    y = y0;
    a = tri_width;
    for i in 0..p.turns {
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist;
        }
        x += a;
        cell.push(Point::new(x, y));
        if i > 0 {
            a -= dist * sqrt2;
        }
        y += a;
        cell.push(Point::new(x, y));
        a -= dist;
        x -= a;
        y -= a;
    }
    cell.push(Point::new(x, y));
    cell.push(Point::new(tile_size * 0.5, 0.0));

    let gx0 = -tile_size * (tiles_x as f64 - 1.0) * 0.5;
    let gy0 = tile_size * (tiles_y as f64 - 1.0) * 0.5;

    let mut lower = Vec::new();
    lower.push(Point::new(gx0, gy0 + tile_size / 2.0));
    for i in 0..tiles_y {
        let origin = Point::new(gx0, gy0 - i as f64 * tile_size);
        for v in &cell {
            lower.push(Point::new(-v.y, -v.x) + origin);
        }
    }

    let mut upper = Vec::new();
    upper.push(Point::new(gx0 - tile_size / 2.0, gy0));
    for i in 0..tiles_x {
        let origin = Point::new(gx0 + i as f64 * tile_size, gy0);
        for v in &cell {
            upper.push(*v + origin);
        }
    }

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
    fn cell_repeats_across_the_grid() {
        let p = FlowerParams::default(); // 4 turns, 2x2 tiles
        let layout = flower_tiled(&p).unwrap();

        // Four petals of 3 vertices per turn, plus their closing points.
        let cell_len = 4 * (3 * p.turns as usize) + 7;
        assert_eq!(
            layout.lower.len(),
            1 + cell_len * p.tile.tiles_y as usize
        );
        assert_eq!(
            layout.upper.len(),
            1 + cell_len * p.tile.tiles_x as usize
        );

        // Row cells are exact translations of each other.
        let a = &layout.upper[1..1 + cell_len];
        let b = &layout.upper[1 + cell_len..1 + 2 * cell_len];
        let step = layout.step_x;
        for (p1, p2) in a.iter().zip(b) {
            assert!((p1.x + step - p2.x).abs() < 1e-9);
            assert!((p1.y - p2.y).abs() < 1e-9);
        }
    }

    #[test]
    fn lower_is_mirrored_swap_of_upper_cell() {
        let p = FlowerParams::default();
        let layout = flower_tiled(&p).unwrap();

        // First lower cell vertex corresponds to the first upper cell
        // vertex through (x, y) -> (-y, -x), modulo grid origins.
        let cell_len = 4 * (3 * p.turns as usize) + 7;
        let gx0 = -layout.step_x * (p.tile.tiles_x as f64 - 1.0) * 0.5;
        let gy0 = layout.step_x * (p.tile.tiles_y as f64 - 1.0) * 0.5;

        for i in 0..cell_len {
            let u = layout.upper[1 + i] - Point::new(gx0, gy0);
            let l = layout.lower[1 + i] - Point::new(gx0, gy0);
            assert!((l.x - -u.y).abs() < 1e-9);
            assert!((l.y - -u.x).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_zero_turns() {
        let mut p = FlowerParams::default();
        p.turns = 0;
        assert!(flower_tiled(&p).is_err());
    }
}
