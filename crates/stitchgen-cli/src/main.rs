//! stitchgen - CLI for conductive-thread stitch pattern generation
//!
//! Usage:
//!   stitchgen patterns                    List available pattern families
//!   stitchgen generate <pattern> [opts]   Generate one pattern, export SVG/JSON
//!   stitchgen recipe <file.json>          Run a batch of generation jobs

mod cli;

use std::env;

use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("stitchgen - stitch pattern generator for conductive-thread layouts");
    println!();
    println!("Usage:");
    println!("  stitchgen patterns                    List available pattern families");
    println!("  stitchgen generate <pattern> [opts]   Generate a pattern and export it");
    println!("  stitchgen recipe <file.json>          Run a batch of generation jobs");
    println!();
    println!("Generate options:");
    println!("  -d, --dist <f>         Trace distance (default 1)");
    println!("  -j, --jump <f>         Jump size / stitch spacing (default 1)");
    println!("      --min-jump <f>     Minimum jump size (default: jump * 0.2)");
    println!("      --diameter <f>     Circle diameter");
    println!("      --inner-diameter <f>  Spiral inner diameter");
    println!("      --inner-jump <f>   Spiral inner jump size");
    println!("      --width <f>        Quad width");
    println!("      --jump-mult <n>    Quad-double jump multiplier");
    println!("      --teeth <n>        IDE tooth count");
    println!("      --windings <n>     Winding count");
    println!("      --turns <n>        Turn count");
    println!("      --order <n>        Recursion order / finger count");
    println!("      --tiles-x <n>      Tile columns (tiled patterns)");
    println!("      --tiles-y <n>      Tile rows (tiled patterns)");
    println!("      --tile-dist <f>    Gap between tiles");
    println!("      --correct          Remove shorting stitches after the build");
    println!("      --dedup            Drop stitches closer than the minimum jump");
    println!("  -u, --unit <mm|cm|m>   Output unit (default mm)");
    println!("  -f, --format <svg|json>  Output format (default svg)");
    println!("  -o, --output <path>    Output file (default: <full-name>.svg)");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("patterns") => cli::patterns::cmd_patterns(),
        Some("generate") => cli::generate::cmd_generate(&args[1..]),
        Some("recipe") => cli::recipe::cmd_recipe(&args[1..]),
        Some("help") | Some("-h") | Some("--help") | None => print_usage(),
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_usage();
            std::process::exit(1);
        }
    }
}
