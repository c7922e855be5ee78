//! Common utilities shared across CLI commands.

use stitchgen::PatternParams;

/// Output format for generated patterns.
#[derive(Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
}

fn float(key: &str, value: &str) -> Result<f64, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for --{key}: {value}"))
}

fn count(key: &str, value: &str) -> Result<u32, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for --{key}: {value}"))
}

fn no_apply(key: &str, params: &PatternParams) -> String {
    format!("--{key} does not apply to {}", params.kind().name())
}

/// Apply one `--key value` parameter flag to the pattern parameters.
///
/// Shared between the generate command's flag loop and recipe jobs, so both
/// accept the same option names.
pub fn apply_param_flag(
    params: &mut PatternParams,
    key: &str,
    value: &str,
) -> Result<(), String> {
    match key {
        "dist" => params.common_mut().dist = float(key, value)?,
        "jump" => params.common_mut().jump_size = float(key, value)?,
        "min-jump" => params.common_mut().min_jump_size = float(key, value)?,
        "tiles-x" => match params.tile_mut() {
            Some(tile) => tile.tiles_x = count(key, value)?,
            None => return Err(no_apply(key, params)),
        },
        "tiles-y" => match params.tile_mut() {
            Some(tile) => tile.tiles_y = count(key, value)?,
            None => return Err(no_apply(key, params)),
        },
        "tile-dist" => match params.tile_mut() {
            Some(tile) => tile.tile_dist = float(key, value)?,
            None => return Err(no_apply(key, params)),
        },
        "diameter" => match params {
            PatternParams::BoustrophedonCircle(p) => p.diameter = float(key, value)?,
            PatternParams::SpiralCircle(p) => p.diameter = float(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "inner-diameter" => match params {
            PatternParams::SpiralCircle(p) => p.inner_diameter = float(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "inner-jump" => match params {
            PatternParams::SpiralCircle(p) => p.inner_jump_size = float(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "width" => match params {
            PatternParams::QuadOrtho(p) => p.width = float(key, value)?,
            PatternParams::QuadDiag(p) => p.width = float(key, value)?,
            PatternParams::QuadDouble(p) => p.width = float(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "jump-mult" => match params {
            PatternParams::QuadDouble(p) => p.jump_mult = count(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "teeth" => match params {
            PatternParams::Ide(p) => p.teeth = count(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "windings" => match params {
            PatternParams::BoustrophedonDouble(p) => p.windings = count(key, value)?,
            PatternParams::DiamondZigzag(p) => p.windings = count(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "turns" => match params {
            PatternParams::MeanderDouble(p) => p.turns = count(key, value)?,
            PatternParams::SpiralDouble(p) => p.turns = count(key, value)?,
            PatternParams::DiamondSpiral(p) => p.turns = count(key, value)?,
            PatternParams::MeanderTiled(p) => p.turns = count(key, value)?,
            PatternParams::Flower(p) => p.turns = count(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        "order" => match params {
            PatternParams::Hilbert(p) => p.order = count(key, value)?,
            PatternParams::Peano(p) => p.order = count(key, value)?,
            PatternParams::Antenna(p) => p.order = count(key, value)?,
            _ => return Err(no_apply(key, params)),
        },
        _ => return Err(format!("unknown option --{key}")),
    }

    Ok(())
}
