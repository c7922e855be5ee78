//! Patterns command: list the available generator families.

use stitchgen::PatternKind;

pub fn cmd_patterns() {
    println!("Available patterns:");
    for kind in PatternKind::all() {
        let tag = if kind.is_tiled() {
            " [tiled]"
        } else if kind.is_double() {
            " [double]"
        } else {
            ""
        };
        println!("  {:<28} {}{}", kind.name(), kind.description(), tag);
    }
}
