//! Pattern lifecycle: build, validate, correct, query.
//!
//! A [`Pattern`] owns one or two traces plus, for tiled kinds, the clone
//! collections replicating them across a grid. Generator behavior is keyed
//! by [`PatternKind`]; handing `build` parameters of another kind is an
//! ordinary error, expected during UI-driven rebuilds.

use tracing::{info, warn};

use crate::config::{PatternConfig, Unit};
use crate::error::PatternError;
use crate::geometry::{Point, Segment};
use crate::params::PatternParams;
use crate::patterns;
use crate::trace::Trace;

/// Available pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    BoustrophedonCircle,
    SpiralCircle,
    QuadOrtho,
    QuadDiag,
    QuadDouble,
    Ide,
    BoustrophedonDouble,
    MeanderDouble,
    SpiralDouble,
    Hilbert,
    Peano,
    DiamondZigzag,
    DiamondSpiral,
    MeanderTiled,
    Antenna,
    Flower,
}

impl PatternKind {
    /// All families, in display order.
    pub fn all() -> &'static [PatternKind] {
        &[
            PatternKind::BoustrophedonCircle,
            PatternKind::SpiralCircle,
            PatternKind::QuadOrtho,
            PatternKind::QuadDiag,
            PatternKind::QuadDouble,
            PatternKind::Ide,
            PatternKind::BoustrophedonDouble,
            PatternKind::MeanderDouble,
            PatternKind::SpiralDouble,
            PatternKind::Hilbert,
            PatternKind::Peano,
            PatternKind::DiamondZigzag,
            PatternKind::DiamondSpiral,
            PatternKind::MeanderTiled,
            PatternKind::Antenna,
            PatternKind::Flower,
        ]
    }

    /// Canonical name, also used in export filenames.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::BoustrophedonCircle => "boustrophedon-circle",
            PatternKind::SpiralCircle => "spiral-circle",
            PatternKind::QuadOrtho => "boustrophedon-quad-ortho",
            PatternKind::QuadDiag => "boustrophedon-quad-diag",
            PatternKind::QuadDouble => "boustrophedon-quad-double",
            PatternKind::Ide => "ide",
            PatternKind::BoustrophedonDouble => "boustrophedon-double",
            PatternKind::MeanderDouble => "meander-double",
            PatternKind::SpiralDouble => "spiral-double",
            PatternKind::Hilbert => "hilbert",
            PatternKind::Peano => "peano",
            PatternKind::DiamondZigzag => "diamond-zigzag",
            PatternKind::DiamondSpiral => "diamond-spiral",
            PatternKind::MeanderTiled => "meander-tiled",
            PatternKind::Antenna => "antenna",
            PatternKind::Flower => "flower",
        }
    }

    /// Parse a family from its name or a common alias.
    pub fn from_name(name: &str) -> Option<PatternKind> {
        match name.to_lowercase().as_str() {
            "boustrophedon-circle" | "circle" => Some(PatternKind::BoustrophedonCircle),
            "spiral-circle" => Some(PatternKind::SpiralCircle),
            "boustrophedon-quad-ortho" | "quad-ortho" | "quad" => Some(PatternKind::QuadOrtho),
            "boustrophedon-quad-diag" | "quad-diag" => Some(PatternKind::QuadDiag),
            "boustrophedon-quad-double" | "quad-double" => Some(PatternKind::QuadDouble),
            "ide" | "comb" => Some(PatternKind::Ide),
            "boustrophedon-double" | "boustrophedon" => Some(PatternKind::BoustrophedonDouble),
            "meander-double" | "meander" => Some(PatternKind::MeanderDouble),
            "spiral-double" => Some(PatternKind::SpiralDouble),
            "hilbert" => Some(PatternKind::Hilbert),
            "peano" => Some(PatternKind::Peano),
            "diamond-zigzag" => Some(PatternKind::DiamondZigzag),
            "diamond-spiral" => Some(PatternKind::DiamondSpiral),
            "meander-tiled" => Some(PatternKind::MeanderTiled),
            "antenna" => Some(PatternKind::Antenna),
            "flower" => Some(PatternKind::Flower),
            _ => None,
        }
    }

    /// One-line description for UI listings.
    pub fn description(&self) -> &'static str {
        match self {
            PatternKind::BoustrophedonCircle => "Chord fill of a circle with arc hops",
            PatternKind::SpiralCircle => "Inward circular spiral, interpolated jump",
            PatternKind::QuadOrtho => "Serpentine fill of a square",
            PatternKind::QuadDiag => "Serpentine fill across the rotated square",
            PatternKind::QuadDouble => "Two perpendicular serpentine passes",
            PatternKind::Ide => "Interdigitated comb electrode pair",
            PatternKind::BoustrophedonDouble => "Crossed serpentine electrode pair",
            PatternKind::MeanderDouble => "Rectangular meander electrode pair",
            PatternKind::SpiralDouble => "Square spiral electrode pair",
            PatternKind::Hilbert => "Hilbert space-filling comb pair",
            PatternKind::Peano => "Peano space-filling comb pair",
            PatternKind::DiamondZigzag => "Tiled diamond zigzag grid",
            PatternKind::DiamondSpiral => "Tiled diamond spiral grid",
            PatternKind::MeanderTiled => "Tiled meander grid",
            PatternKind::Antenna => "Tiled dipole antenna grid",
            PatternKind::Flower => "Tiled flower petal grid",
        }
    }

    /// Families routing two independent traces.
    pub fn is_double(&self) -> bool {
        matches!(
            self,
            PatternKind::Ide
                | PatternKind::BoustrophedonDouble
                | PatternKind::MeanderDouble
                | PatternKind::SpiralDouble
                | PatternKind::Hilbert
                | PatternKind::Peano
                | PatternKind::DiamondZigzag
                | PatternKind::DiamondSpiral
                | PatternKind::MeanderTiled
                | PatternKind::Antenna
                | PatternKind::Flower
        )
    }

    /// Families replicating their trace pair across a grid.
    pub fn is_tiled(&self) -> bool {
        matches!(
            self,
            PatternKind::DiamondZigzag
                | PatternKind::DiamondSpiral
                | PatternKind::MeanderTiled
                | PatternKind::Antenna
                | PatternKind::Flower
        )
    }

    /// Default parameters for this family.
    pub fn default_params(&self) -> PatternParams {
        match self {
            PatternKind::BoustrophedonCircle => {
                PatternParams::BoustrophedonCircle(Default::default())
            }
            PatternKind::SpiralCircle => PatternParams::SpiralCircle(Default::default()),
            PatternKind::QuadOrtho => PatternParams::QuadOrtho(Default::default()),
            PatternKind::QuadDiag => PatternParams::QuadDiag(Default::default()),
            PatternKind::QuadDouble => PatternParams::QuadDouble(Default::default()),
            PatternKind::Ide => PatternParams::Ide(Default::default()),
            PatternKind::BoustrophedonDouble => {
                PatternParams::BoustrophedonDouble(Default::default())
            }
            PatternKind::MeanderDouble => PatternParams::MeanderDouble(Default::default()),
            PatternKind::SpiralDouble => PatternParams::SpiralDouble(Default::default()),
            PatternKind::Hilbert => PatternParams::Hilbert(Default::default()),
            PatternKind::Peano => PatternParams::Peano(Default::default()),
            PatternKind::DiamondZigzag => PatternParams::DiamondZigzag(Default::default()),
            PatternKind::DiamondSpiral => PatternParams::DiamondSpiral(Default::default()),
            PatternKind::MeanderTiled => PatternParams::MeanderTiled(Default::default()),
            PatternKind::Antenna => PatternParams::Antenna(Default::default()),
            PatternKind::Flower => PatternParams::Flower(Default::default()),
        }
    }
}

/// Indices of upper stitches that contact the lower stitch polyline.
fn shorting_indices(lower: &[Point], upper: &[Point], tolerance: f64) -> Vec<usize> {
    let mut hits = Vec::new();
    if lower.len() < 2 {
        return hits;
    }

    for (j, u) in upper.iter().enumerate() {
        for w in lower.windows(2) {
            if Segment::new(w[0], w[1]).hit_test(*u, tolerance) {
                hits.push(j);
                break;
            }
        }
    }

    hits
}

/// A buildable, queryable, exportable stitch pattern.
///
/// Holds the lower trace always, the upper trace for double kinds, and the
/// clone collections for tiled kinds. [`Pattern::traces`]/[`Pattern::traces2`]
/// list the prototypes first, then the clones.
#[derive(Debug)]
pub struct Pattern {
    kind: PatternKind,
    config: PatternConfig,
    unit: Option<Unit>,
    trace: Trace,
    trace2: Option<Trace>,
    tiles: Vec<Trace>,
    tiles2: Vec<Trace>,
    shortcuts: Vec<Point>,
    width: f64,
    size_string: String,
    full_name: String,
    jump_size: f64,
    min_jump_size: f64,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self::with_config(kind, PatternConfig::default())
    }

    pub fn with_config(kind: PatternKind, config: PatternConfig) -> Self {
        let trace = Trace::new(config.lower_color, config.epsilon, config.dedup_stitches);
        let trace2 = kind
            .is_double()
            .then(|| Trace::new(config.upper_color, config.epsilon, config.dedup_stitches));

        Self {
            kind,
            config,
            unit: None,
            trace,
            trace2,
            tiles: Vec::new(),
            tiles2: Vec::new(),
            shortcuts: Vec::new(),
            width: 0.0,
            size_string: String::new(),
            full_name: String::new(),
            jump_size: 0.0,
            min_jump_size: 0.0,
        }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = Some(unit);
    }

    /// Generator-specific extent summary, empty before the first build.
    pub fn size_string(&self) -> &str {
        &self.size_string
    }

    /// Parameter-encoded identifier used for export filenames.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn trace2(&self) -> Option<&Trace> {
        self.trace2.as_ref()
    }

    /// All lower traces: the prototype first, then the tile clones.
    pub fn traces(&self) -> Vec<&Trace> {
        std::iter::once(&self.trace).chain(self.tiles.iter()).collect()
    }

    /// All upper traces: the prototype first, then the tile clones.
    pub fn traces2(&self) -> Vec<&Trace> {
        match &self.trace2 {
            Some(t2) => std::iter::once(t2).chain(self.tiles2.iter()).collect(),
            None => Vec::new(),
        }
    }

    /// Contact points found by the last shortcut scan.
    pub fn shortcuts(&self) -> &[Point] {
        &self.shortcuts
    }

    /// Generator-specific extent; meaningful for double kinds.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sum of run lengths over every trace, clones included.
    pub fn total_run_length(&self) -> f64 {
        let lower: f64 = self.traces().iter().map(|t| t.run_length()).sum();
        let upper: f64 = self.traces2().iter().map(|t| t.run_length()).sum();
        lower + upper
    }

    /// Sum of stitch counts over every trace, clones included.
    pub fn total_stitch_count(&self) -> usize {
        let lower: usize = self.traces().iter().map(|t| t.stitch_count()).sum();
        let upper: usize = self.traces2().iter().map(|t| t.stitch_count()).sum();
        lower + upper
    }

    /// Drop all geometry; the pattern can be rebuilt afterwards.
    pub fn clear(&mut self) {
        self.trace.clear();
        if let Some(t2) = self.trace2.as_mut() {
            t2.clear();
        }
        self.tiles.clear();
        self.tiles2.clear();
        self.shortcuts.clear();
        self.width = 0.0;
        self.size_string.clear();
        self.full_name.clear();
    }

    /// Build the pattern from parameters of the matching kind.
    ///
    /// Runs the generator, resamples every trace, replicates tiles, and
    /// refreshes the shortcut diagnostics for double kinds. A successful
    /// build does not imply the traces are contact-free; call
    /// [`Pattern::correct`] to enforce that.
    pub fn build(&mut self, params: &PatternParams) -> Result<(), PatternError> {
        if params.kind() != self.kind {
            return Err(PatternError::KindMismatch {
                expected: self.kind.name(),
                got: params.kind().name(),
            });
        }

        self.clear();

        let common = *params.common();
        let mut jump_size = common.jump_size;
        let min_jump_size = common.min_jump_size;
        let name = self.kind.name();

        // (step_x, step_y, tiles_x, tiles_y) for the clone pass
        let mut tile_steps: Option<(f64, f64, u32, u32)> = None;

        match params {
            PatternParams::BoustrophedonCircle(p) => {
                let (verts, r_max) = patterns::boustrophedon_circle(p)?;
                for v in verts {
                    self.trace.insert_back(v);
                }
                self.trace.rotate180();

                self.size_string = format!("r: {:.3}", r_max);
                self.full_name = format!(
                    "{}-D{:.3}-d{:.3}-j{:.3}",
                    name, p.diameter, p.common.dist, jump_size
                );
            }
            PatternParams::SpiralCircle(p) => {
                let (verts, first, last) = patterns::spiral_circle(p)?;
                for v in verts {
                    self.trace.insert_back(v);
                }
                self.trace.rotate90_cw();

                self.size_string =
                    format!("ri: {:.3}, ro: {:.3}", last.length(), first.length());
                self.full_name = format!(
                    "{}-D{:.3}-ID{:.3}-d{:.3}-j[{:.3}-i{:.3}]",
                    name,
                    p.diameter,
                    p.inner_diameter,
                    p.common.dist,
                    jump_size,
                    p.inner_jump_size
                );
            }
            PatternParams::QuadOrtho(p) => {
                for v in patterns::quad_ortho(p)? {
                    self.trace.insert_back(v);
                }

                self.size_string = format!("w: {:.3}", p.width);
                self.full_name = format!(
                    "{}-W{:.3}-d{:.3}-j{:.3}",
                    name, p.width, p.common.dist, jump_size
                );
            }
            PatternParams::QuadDiag(p) => {
                for v in patterns::quad_diag(p)? {
                    self.trace.insert_back(v);
                }
                self.trace.rotate(45.0_f64.to_radians());

                self.size_string = format!("w: {:.3}", p.width);
                self.full_name = format!(
                    "{}-W{:.3}-d{:.3}-j{:.3}",
                    name, p.width, p.common.dist, jump_size
                );
            }
            PatternParams::QuadDouble(p) => {
                let (verts, effective_jump) = patterns::quad_double(p)?;
                for v in verts {
                    self.trace.insert_back(v);
                }
                jump_size = effective_jump;

                self.size_string = format!("w: {:.3}", p.width);
                self.full_name = format!(
                    "{}-W{:.3}-d{:.3}-j{:.3}",
                    name, p.width, p.common.dist, jump_size
                );
            }
            PatternParams::Ide(p) => {
                let (lower, upper, width) = patterns::ide_comb(p)?;
                self.fill_pair(lower, upper);
                self.width = width;

                self.size_string = format!("w: {:.3}", width);
                self.full_name = format!(
                    "{}-T{}-d{:.3}-j{:.3}",
                    name, p.teeth, p.common.dist, jump_size
                );
            }
            PatternParams::BoustrophedonDouble(p) => {
                let (lower, upper, width) = patterns::boustrophedon_double(p)?;
                self.fill_pair(lower, upper);
                self.width = width;

                self.size_string = format!("w: {:.3}", width);
                self.full_name = format!(
                    "{}-W{}-d{:.3}-j{:.3}",
                    name, p.windings, p.common.dist, jump_size
                );
            }
            PatternParams::MeanderDouble(p) => {
                let (lower, upper, width) = patterns::meander_double(p)?;
                self.fill_pair(lower, upper);
                self.width = width;

                self.size_string = format!("w: {:.3}", width);
                self.full_name = format!(
                    "{}-T{}-d{:.3}-j{:.3}",
                    name, p.turns, p.common.dist, jump_size
                );
            }
            PatternParams::SpiralDouble(p) => {
                let (lower, upper, width) = patterns::spiral_double(p)?;
                self.fill_pair(lower, upper);
                self.width = width;

                self.size_string = format!("w: {:.3}", width);
                self.full_name = format!(
                    "{}-T{}-d{:.3}-j{:.3}",
                    name, p.turns, p.common.dist, jump_size
                );
            }
            PatternParams::Hilbert(p) => {
                let (lower, upper, width) =
                    patterns::hilbert_comb(p, self.config.epsilon)?;
                self.fill_pair(lower, upper);
                self.width = width;

                self.size_string = format!("w: {:.3}", width);
                self.full_name = format!(
                    "{}-O{}-d{:.3}-j{:.3}",
                    name, p.order, p.common.dist, jump_size
                );
            }
            PatternParams::Peano(p) => {
                let (lower, upper, width) = patterns::peano_comb(p, self.config.epsilon)?;
                self.fill_pair(lower, upper);
                self.width = width;

                self.size_string = format!("w: {:.3}", width);
                self.full_name = format!(
                    "{}-O{}-d{:.3}-j{:.3}",
                    name, p.order, p.common.dist, jump_size
                );
            }
            PatternParams::DiamondZigzag(p) => {
                let layout = patterns::diamond_zigzag_tiled(p)?;
                tile_steps = self.fill_tiled(layout, p.tile.tiles_x, p.tile.tiles_y);

                self.size_string = format!(
                    "cell: {:.3}, grid: {}x{}",
                    self.width, p.tile.tiles_x, p.tile.tiles_y
                );
                self.full_name = format!(
                    "{}-W{}-{}x{}-d{:.3}-cd{:.3}-j{:.3}",
                    name,
                    p.windings,
                    p.tile.tiles_x,
                    p.tile.tiles_y,
                    p.common.dist,
                    p.tile.tile_dist,
                    jump_size
                );
            }
            PatternParams::DiamondSpiral(p) => {
                let layout = patterns::diamond_spiral_tiled(p)?;
                tile_steps = self.fill_tiled(layout, p.tile.tiles_x, p.tile.tiles_y);

                self.size_string = format!(
                    "cell: {:.3}, grid: {}x{}",
                    self.width, p.tile.tiles_x, p.tile.tiles_y
                );
                self.full_name = format!(
                    "{}-T{}-{}x{}-d{:.3}-cd{:.3}-j{:.3}",
                    name,
                    p.turns,
                    p.tile.tiles_x,
                    p.tile.tiles_y,
                    p.common.dist,
                    p.tile.tile_dist,
                    jump_size
                );
            }
            PatternParams::MeanderTiled(p) => {
                let layout = patterns::meander_tiled(p)?;
                tile_steps = self.fill_tiled(layout, p.tile.tiles_x, p.tile.tiles_y);

                self.size_string = format!(
                    "cell: {:.3}, grid: {}x{}",
                    self.width, p.tile.tiles_x, p.tile.tiles_y
                );
                self.full_name = format!(
                    "{}-T{}-{}x{}-d{:.3}-cd{:.3}-j{:.3}",
                    name,
                    p.turns,
                    p.tile.tiles_x,
                    p.tile.tiles_y,
                    p.common.dist,
                    p.tile.tile_dist,
                    jump_size
                );
            }
            PatternParams::Antenna(p) => {
                let layout = patterns::antenna_tiled(p)?;
                tile_steps = self.fill_tiled(layout, p.tile.tiles_x, p.tile.tiles_y);

                self.size_string = format!(
                    "cell: {:.3}, grid: {}x{}",
                    self.width, p.tile.tiles_x, p.tile.tiles_y
                );
                self.full_name = format!(
                    "{}-O{}-{}x{}-d{:.3}-cd{:.3}-j{:.3}",
                    name,
                    p.order,
                    p.tile.tiles_x,
                    p.tile.tiles_y,
                    p.common.dist,
                    p.tile.tile_dist,
                    jump_size
                );
            }
            PatternParams::Flower(p) => {
                let layout = patterns::flower_tiled(p)?;
                tile_steps = self.fill_tiled(layout, p.tile.tiles_x, p.tile.tiles_y);

                self.size_string = format!(
                    "cell: {:.3}, grid: {}x{}",
                    self.width, p.tile.tiles_x, p.tile.tiles_y
                );
                self.full_name = format!(
                    "{}-T{}-{}x{}-d{:.3}-cd{:.3}-j{:.3}",
                    name,
                    p.turns,
                    p.tile.tiles_x,
                    p.tile.tiles_y,
                    p.common.dist,
                    p.tile.tile_dist,
                    jump_size
                );
            }
        }

        // resample the upper trace first, then the lower
        if let Some(t2) = self.trace2.as_mut() {
            t2.rebuild(jump_size, min_jump_size)?;
        }
        self.trace.rebuild(jump_size, min_jump_size)?;

        // replicate across the grid by clone + translate + rebuild
        if let Some((step_x, step_y, tiles_x, tiles_y)) = tile_steps {
            for i in 1..tiles_x {
                let mut t = self.trace.clone();
                t.translate(Point::new(i as f64 * step_x, 0.0));
                t.rebuild(jump_size, min_jump_size)?;
                self.tiles.push(t);
            }

            if let Some(t2) = &self.trace2 {
                for i in 1..tiles_y {
                    let mut t = t2.clone();
                    t.translate(Point::new(0.0, i as f64 * step_y));
                    t.rebuild(jump_size, min_jump_size)?;
                    self.tiles2.push(t);
                }
            }
        }

        self.jump_size = jump_size;
        self.min_jump_size = min_jump_size;

        if self.kind.is_double() && !self.kind.is_tiled() {
            // diagnostic only; contacts do not fail the build
            self.find_shortcuts();
        }

        self.validate();

        Ok(())
    }

    fn fill_pair(&mut self, lower: Vec<Point>, upper: Vec<Point>) {
        for v in lower {
            self.trace.insert_back(v);
        }
        if let Some(t2) = self.trace2.as_mut() {
            for v in upper {
                t2.insert_back(v);
            }
        }
    }

    fn fill_tiled(
        &mut self,
        layout: patterns::TiledLayout,
        tiles_x: u32,
        tiles_y: u32,
    ) -> Option<(f64, f64, u32, u32)> {
        self.width = layout.step_x.abs();
        let steps = (layout.step_x, layout.step_y, tiles_x, tiles_y);
        self.fill_pair(layout.lower, layout.upper);
        Some(steps)
    }

    /// Scan the upper trace's stitches against the lower trace's segments,
    /// recording every contact. Returns true iff none were found.
    ///
    /// Intentionally a no-op for tiled kinds: detection does not generalize
    /// across tile replicas in this design.
    pub fn find_shortcuts(&mut self) -> bool {
        self.shortcuts.clear();

        if self.kind.is_tiled() {
            return true;
        }

        let Some(upper) = &self.trace2 else {
            return true;
        };

        let lower = self.trace.stitches();
        if lower.len() >= 2 {
            for u in upper.stitches() {
                for w in lower.windows(2) {
                    if Segment::new(w[0], w[1]).hit_test(*u, self.config.distance_tolerance) {
                        warn!(
                            pattern = self.kind.name(),
                            x = u.x,
                            y = u.y,
                            "shortcut between traces"
                        );
                        self.shortcuts.push(*u);
                    }
                }
            }
        }

        self.shortcuts.is_empty()
    }

    /// Remove every upper-trace stitch that contacts the lower trace, then
    /// re-scan for residual contacts. Returns the number of stitches
    /// removed. Only the upper trace is pruned, keeping the lower backbone
    /// intact. A no-op for tiled kinds.
    pub fn correct(&mut self) -> Result<usize, PatternError> {
        if self.kind.is_tiled() {
            return Ok(0);
        }

        let Some(upper) = &self.trace2 else {
            return Ok(0);
        };

        let rem = shorting_indices(
            self.trace.stitches(),
            upper.stitches(),
            self.config.distance_tolerance,
        );
        let removed = rem.len();

        if let Some(t2) = self.trace2.as_mut() {
            t2.remove_stitches(rem)?;
        }

        info!(
            pattern = self.kind.name(),
            removed, "removed shorting stitches"
        );

        if !self.find_shortcuts() {
            return Err(PatternError::ShortcutsRemain(self.shortcuts.len()));
        }

        self.validate();

        Ok(removed)
    }

    /// Density lint over both base traces; warnings only.
    pub fn validate(&self) -> bool {
        let mut ok = self.trace.validate();
        if let Some(t2) = &self.trace2 {
            ok = t2.validate() && ok;
        }
        ok
    }

    fn for_each_trace(&mut self, mut f: impl FnMut(&mut Trace)) {
        f(&mut self.trace);
        if let Some(t2) = self.trace2.as_mut() {
            f(t2);
        }
        for t in &mut self.tiles {
            f(t);
        }
        for t in &mut self.tiles2 {
            f(t);
        }
    }

    // Transforms act on every trace's vertices, clones included. Stitches
    // regenerate on the next build.

    pub fn translate(&mut self, t: Point) {
        self.for_each_trace(|tr| tr.translate(t));
    }

    pub fn rotate(&mut self, rad: f64) {
        self.for_each_trace(|tr| tr.rotate(rad));
    }

    pub fn rotate90_cw(&mut self) {
        self.for_each_trace(|tr| tr.rotate90_cw());
    }

    pub fn rotate90_ccw(&mut self) {
        self.for_each_trace(|tr| tr.rotate90_ccw());
    }

    pub fn rotate180(&mut self) {
        self.for_each_trace(|tr| tr.rotate180());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DISTANCE_TOLERANCE;
    use crate::params::{MeanderTiledParams, QuadOrthoParams};

    #[test]
    fn kind_names_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for kind in PatternKind::all() {
            assert!(seen.insert(kind.name()), "duplicate name {}", kind.name());
            assert_eq!(PatternKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(PatternKind::from_name("no-such-pattern"), None);
    }

    #[test]
    fn tiled_kinds_are_double() {
        for kind in PatternKind::all() {
            if kind.is_tiled() {
                assert!(kind.is_double(), "{} tiled but not double", kind.name());
            }
        }
    }

    #[test]
    fn build_rejects_mismatched_params() {
        let mut pattern = Pattern::new(PatternKind::Hilbert);
        let err = pattern.build(&PatternKind::MeanderDouble.default_params());
        assert!(matches!(err, Err(PatternError::KindMismatch { .. })));
    }

    #[test]
    fn every_kind_builds_with_defaults() {
        for kind in PatternKind::all() {
            let mut pattern = Pattern::new(*kind);
            pattern
                .build(&kind.default_params())
                .unwrap_or_else(|e| panic!("{} failed to build: {e}", kind.name()));

            assert!(pattern.trace().stitch_count() > 0, "{}", kind.name());
            assert_eq!(pattern.trace2().is_some(), kind.is_double());
            assert!(!pattern.size_string().is_empty());
            assert!(pattern.full_name().starts_with(kind.name()));
        }
    }

    #[test]
    fn build_is_deterministic() {
        let params = PatternKind::Hilbert.default_params();

        let mut a = Pattern::new(PatternKind::Hilbert);
        a.build(&params).unwrap();
        let mut b = Pattern::new(PatternKind::Hilbert);
        b.build(&params).unwrap();

        assert_eq!(a.trace().stitches(), b.trace().stitches());
        assert_eq!(
            a.trace2().unwrap().stitches(),
            b.trace2().unwrap().stitches()
        );
    }

    #[test]
    fn rebuild_replaces_previous_geometry() {
        let mut pattern = Pattern::new(PatternKind::QuadOrtho);
        pattern
            .build(&PatternParams::QuadOrtho(QuadOrthoParams::default()))
            .unwrap();
        let first = pattern.trace().stitch_count();

        let mut p = QuadOrthoParams::default();
        p.width = 20.0;
        pattern.build(&PatternParams::QuadOrtho(p)).unwrap();
        assert!(pattern.trace().stitch_count() > first);
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut pattern = Pattern::new(PatternKind::QuadOrtho);
        pattern
            .build(&PatternKind::QuadOrtho.default_params())
            .unwrap();

        pattern.clear();
        assert_eq!(pattern.trace().stitch_count(), 0);
        assert_eq!(pattern.total_stitch_count(), 0);
        assert!(pattern.size_string().is_empty());
    }

    #[test]
    fn shorting_indices_flags_contact() {
        let lower = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let upper = [Point::new(5.0, 0.0000001)];
        assert_eq!(shorting_indices(&lower, &upper, DISTANCE_TOLERANCE), vec![0]);
    }

    #[test]
    fn shorting_indices_has_no_false_positive() {
        let lower = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let upper = [Point::new(5.0, 1.0)];
        assert!(shorting_indices(&lower, &upper, DISTANCE_TOLERANCE).is_empty());
    }

    #[test]
    fn hilbert_comb_is_contact_free() {
        let mut pattern = Pattern::new(PatternKind::Hilbert);
        pattern
            .build(&PatternKind::Hilbert.default_params())
            .unwrap();
        assert!(pattern.shortcuts().is_empty());
    }

    #[test]
    fn correct_removes_crossing_contacts() {
        // The crossed boustrophedon pair shares its lower-right corner
        // point between the two traces; correction must prune it.
        let mut pattern = Pattern::new(PatternKind::BoustrophedonDouble);
        pattern
            .build(&PatternKind::BoustrophedonDouble.default_params())
            .unwrap();
        assert!(!pattern.shortcuts().is_empty());

        let before = pattern.trace2().unwrap().stitch_count();
        let removed = pattern.correct().unwrap();
        assert!(removed > 0);
        assert_eq!(
            pattern.trace2().unwrap().stitch_count(),
            before - removed
        );

        assert!(pattern.find_shortcuts());
        assert!(pattern.shortcuts().is_empty());
    }

    #[test]
    fn correct_is_noop_for_tiled_patterns() {
        let mut pattern = Pattern::new(PatternKind::MeanderTiled);
        pattern
            .build(&PatternKind::MeanderTiled.default_params())
            .unwrap();

        assert_eq!(pattern.correct().unwrap(), 0);
        assert!(pattern.find_shortcuts());
    }

    #[test]
    fn tiling_replicates_traces_across_the_grid() {
        let mut p = MeanderTiledParams::default();
        p.tile.tiles_x = 3;
        p.tile.tiles_y = 2;

        let mut pattern = Pattern::new(PatternKind::MeanderTiled);
        pattern.build(&PatternParams::MeanderTiled(p)).unwrap();

        let traces = pattern.traces();
        let traces2 = pattern.traces2();
        assert_eq!(traces.len(), 3);
        assert_eq!(traces2.len(), 2);

        // clone i sits i steps to the right of the prototype
        let w = (p.turns as f64 + 1.0) * p.common.dist * 2.0;
        let step = w - 2.0 * p.common.dist;
        for (i, t) in traces.iter().enumerate() {
            let base = traces[0].verts()[0];
            let v = t.verts()[0];
            assert!((v.x - (base.x + i as f64 * step)).abs() < 1e-9);
            assert!((v.y - base.y).abs() < 1e-9);
        }
    }

    #[test]
    fn aggregate_metrics_sum_over_all_traces() {
        let mut pattern = Pattern::new(PatternKind::Antenna);
        pattern.build(&PatternKind::Antenna.default_params()).unwrap();

        let stitch_sum: usize = pattern
            .traces()
            .iter()
            .chain(pattern.traces2().iter())
            .map(|t| t.stitch_count())
            .sum();
        assert_eq!(pattern.total_stitch_count(), stitch_sum);
        assert!(stitch_sum > 0);

        let run_sum: f64 = pattern
            .traces()
            .iter()
            .chain(pattern.traces2().iter())
            .map(|t| t.run_length())
            .sum();
        assert!((pattern.total_run_length() - run_sum).abs() < 1e-9);
    }

    #[test]
    fn tile_clones_own_fresh_buffers() {
        let mut pattern = Pattern::new(PatternKind::Flower);
        pattern.build(&PatternKind::Flower.default_params()).unwrap();

        let mut ids = std::collections::HashSet::new();
        for t in pattern.traces().iter().chain(pattern.traces2().iter()) {
            assert!(ids.insert(t.buffer().id()), "shared buffer handle");
        }
    }

    #[test]
    fn transforms_apply_to_every_trace() {
        let mut pattern = Pattern::new(PatternKind::MeanderTiled);
        pattern
            .build(&PatternKind::MeanderTiled.default_params())
            .unwrap();

        let before: Vec<Vec<Point>> = pattern
            .traces()
            .iter()
            .chain(pattern.traces2().iter())
            .map(|t| t.verts().to_vec())
            .collect();

        pattern.translate(Point::new(3.0, -2.0));
        pattern.translate(Point::new(-3.0, 2.0));
        pattern.rotate(1.1);
        pattern.rotate(-1.1);

        let after: Vec<Vec<Point>> = pattern
            .traces()
            .iter()
            .chain(pattern.traces2().iter())
            .map(|t| t.verts().to_vec())
            .collect();

        for (a, b) in before.iter().zip(&after) {
            for (p1, p2) in a.iter().zip(b) {
                assert!(p1.distance(*p2) < 1e-9);
            }
        }
    }

    #[test]
    fn validation_is_non_fatal() {
        let mut pattern = Pattern::new(PatternKind::QuadDiag);
        pattern
            .build(&PatternKind::QuadDiag.default_params())
            .unwrap();
        assert!(pattern.validate());
    }
}
