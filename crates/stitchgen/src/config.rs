//! Engine configuration: tolerances, trace palette, output units.
//!
//! Everything that used to be a process-wide tuning knob lives here as an
//! explicit value handed to [`Pattern`](crate::Pattern) at construction.

/// Geometric zero threshold.
pub const EPSILON: f64 = 1e-5;

/// Contact tolerance for shortcut detection between two traces.
pub const DISTANCE_TOLERANCE: f64 = 1e-3;

/// Display color of a trace, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Default color of the lower (backbone) trace.
    pub const LOWER: Color = Color { r: 1.0, g: 1.0, b: 0.0 };
    /// Default color of the upper trace.
    pub const UPPER: Color = Color { r: 0.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Hex string for SVG strokes, e.g. `#FFFF00`.
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Output scale of exported coordinates. Inch is intentionally not offered;
/// a pattern with no unit set refuses to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Mm,
    Cm,
    M,
}

impl Unit {
    /// Millimeters per unit.
    pub fn scale_mm(self) -> f64 {
        match self {
            Unit::Mm => 1.0,
            Unit::Cm => 10.0,
            Unit::M => 1000.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
        }
    }

    pub fn from_name(name: &str) -> Option<Unit> {
        match name.to_lowercase().as_str() {
            "mm" => Some(Unit::Mm),
            "cm" => Some(Unit::Cm),
            "m" => Some(Unit::M),
            _ => None,
        }
    }
}

/// Engine-wide settings for one pattern instance.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Geometric zero threshold used by resampling and collinearity checks.
    pub epsilon: f64,
    /// Contact tolerance for shortcut detection.
    pub distance_tolerance: f64,
    /// Color of the lower trace.
    pub lower_color: Color,
    /// Color of the upper trace.
    pub upper_color: Color,
    /// Enable the resample post-filter that drops stitches closer than the
    /// minimum jump size. Off by default; both modes are supported.
    pub dedup_stitches: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            distance_tolerance: DISTANCE_TOLERANCE,
            lower_color: Color::LOWER,
            upper_color: Color::UPPER,
            dedup_stitches: false,
        }
    }
}

impl PatternConfig {
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup_stitches = dedup;
        self
    }

    pub fn with_distance_tolerance(mut self, tolerance: f64) -> Self {
        self.distance_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex() {
        assert_eq!(Color::LOWER.to_hex(), "#FFFF00");
        assert_eq!(Color::UPPER.to_hex(), "#00FFFF");
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_hex(), "#FF007F");
    }

    #[test]
    fn unit_scales() {
        assert_eq!(Unit::Mm.scale_mm(), 1.0);
        assert_eq!(Unit::Cm.scale_mm(), 10.0);
        assert_eq!(Unit::M.scale_mm(), 1000.0);
    }

    #[test]
    fn unit_names_round_trip() {
        for unit in [Unit::Mm, Unit::Cm, Unit::M] {
            assert_eq!(Unit::from_name(unit.name()), Some(unit));
        }
        assert_eq!(Unit::from_name("inch"), None);
    }
}
