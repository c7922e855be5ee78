//! Error type for pattern building, correction and export.

use std::fmt;
use std::io;

/// Expected failure modes of the engine. Invalid parameters and resampling
/// failures are normal outcomes of UI-driven rebuilds, not bugs.
#[derive(Debug)]
pub enum PatternError {
    /// The parameter variant does not match the pattern's kind.
    KindMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// A dimension, count or distance is out of range for the generator.
    InvalidParams(String),
    /// Resampling produced no stitches (no vertices inserted, or cleared).
    EmptyTrace,
    /// Stitch removal was asked for an index past the end.
    StitchIndex { index: usize, len: usize },
    /// Correction ran but contacts between the traces remain.
    ShortcutsRemain(usize),
    /// Export requires a unit and none was set.
    UnitNotSet,
    /// File output failed.
    Io(io::Error),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::KindMismatch { expected, got } => {
                write!(f, "parameter mismatch: pattern is {expected}, got {got} parameters")
            }
            PatternError::InvalidParams(msg) => write!(f, "invalid parameters: {msg}"),
            PatternError::EmptyTrace => write!(f, "trace has no stitches"),
            PatternError::StitchIndex { index, len } => {
                write!(f, "stitch index {index} out of range (len {len})")
            }
            PatternError::ShortcutsRemain(n) => {
                write!(f, "{n} shortcut(s) remain after correction")
            }
            PatternError::UnitNotSet => write!(f, "unit not set"),
            PatternError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PatternError {
    fn from(e: io::Error) -> Self {
        PatternError::Io(e)
    }
}

/// Shorthand used by generators when rejecting their inputs.
pub(crate) fn invalid(msg: impl Into<String>) -> PatternError {
    PatternError::InvalidParams(msg.into())
}
