//! SVG export: one polyline per trace on a 300x200 mm embroidery frame.
//!
//! Stitch coordinates are scaled by the pattern's unit, centered on the
//! canvas and y-flipped into SVG space. Lower traces are written first, then
//! the upper ones, each stroked with its own color.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PatternError;
use crate::pattern::Pattern;
use crate::trace::Trace;

// embroidery frame size is 30x20 cm
const CANVAS_WIDTH: i32 = 300;
const CANVAS_HEIGHT: i32 = 200;

fn polyline(svg: &mut String, trace: &Trace, scale: f64) {
    let stitches = trace.stitches();
    if stitches.is_empty() {
        return;
    }

    let cx = CANVAS_WIDTH as f64 / 2.0;
    let cy = CANVAS_HEIGHT as f64 / 2.0;

    let points: String = stitches
        .iter()
        .map(|s| format!("{:.5},{:.5}", cx + s.x * scale, cy - s.y * scale))
        .collect::<Vec<_>>()
        .join(" ");

    let _ = writeln!(
        svg,
        "  <polyline points=\"{}\" stroke=\"{}\" stroke-width=\"1\" fill=\"none\" />",
        points,
        trace.color().to_hex()
    );
}

impl Pattern {
    /// Render the pattern as an SVG document string.
    ///
    /// Fails if no unit has been set or the pattern has not been built.
    pub fn to_svg(&self) -> Result<String, PatternError> {
        let scale = self.unit().ok_or(PatternError::UnitNotSet)?.scale_mm();

        if self.total_stitch_count() == 0 {
            return Err(PatternError::EmptyTrace);
        }

        let mut svg = String::new();
        let _ = writeln!(svg, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>");
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\"\n  \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\"\n  \
             version=\"1.1\" baseProfile=\"full\"\n  \
             width=\"{w}mm\" height=\"{h}mm\"\n  \
             viewBox=\"0 0 {w} {h}\">",
            w = CANVAS_WIDTH,
            h = CANVAS_HEIGHT
        );
        let _ = writeln!(svg, "  <title>{}</title>", self.name());

        for trace in self.traces() {
            polyline(&mut svg, trace, scale);
        }
        for trace in self.traces2() {
            polyline(&mut svg, trace, scale);
        }

        svg.push_str("</svg>\n");

        Ok(svg)
    }

    /// Write the SVG to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), PatternError> {
        let svg = self.to_svg()?;
        fs::write(path, svg)?;
        Ok(())
    }

    /// Write the SVG to `<full-name>.svg` in the current directory and
    /// return the path.
    pub fn save(&self) -> Result<PathBuf, PatternError> {
        if self.full_name().is_empty() {
            return Err(PatternError::EmptyTrace);
        }

        let path = PathBuf::from(format!("{}.svg", self.full_name()));
        self.save_to(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Unit;
    use crate::pattern::PatternKind;

    fn built(kind: PatternKind) -> Pattern {
        let mut pattern = Pattern::new(kind);
        pattern.build(&kind.default_params()).unwrap();
        pattern
    }

    #[test]
    fn save_requires_a_unit() {
        let pattern = built(PatternKind::QuadOrtho);
        assert!(matches!(pattern.to_svg(), Err(PatternError::UnitNotSet)));
    }

    #[test]
    fn svg_has_frame_and_polylines() {
        let mut pattern = built(PatternKind::Hilbert);
        pattern.set_unit(Unit::Mm);

        let svg = pattern.to_svg().unwrap();
        assert!(svg.contains("viewBox=\"0 0 300 200\""));
        assert!(svg.contains("width=\"300mm\""));
        assert!(svg.contains("<title>hilbert</title>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("stroke=\"#FFFF00\""));
        assert!(svg.contains("stroke=\"#00FFFF\""));
    }

    #[test]
    fn tiled_svg_writes_one_polyline_per_trace() {
        let mut pattern = built(PatternKind::MeanderTiled);
        pattern.set_unit(Unit::Mm);

        let svg = pattern.to_svg().unwrap();
        let expected = pattern.traces().len() + pattern.traces2().len();
        assert_eq!(svg.matches("<polyline").count(), expected);
    }

    #[test]
    fn coordinates_are_scaled_and_y_flipped() {
        let mut pattern = built(PatternKind::QuadOrtho);
        pattern.set_unit(Unit::Cm);

        let svg = pattern.to_svg().unwrap();
        // first quad vertex is (-5, 5); at cm scale that lands at
        // (150 - 50, 100 - 50)
        assert!(svg.contains("100.00000,50.00000"));
    }

    #[test]
    fn save_to_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.svg");

        let mut pattern = built(PatternKind::Ide);
        pattern.set_unit(Unit::Mm);
        pattern.save_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.ends_with("</svg>\n"));
    }

    #[test]
    fn default_save_uses_the_full_name() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let mut pattern = built(PatternKind::QuadOrtho);
        pattern.set_unit(Unit::Mm);
        let path = pattern.save().unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{}.svg", pattern.full_name())
        );
        assert!(path.exists());

        std::env::set_current_dir(cwd).unwrap();
    }
}
