//! Generate command: build one pattern and export it as SVG or JSON.

use std::fs;
use std::path::Path;
use std::process::exit;

use serde::Serialize;

use stitchgen::{Pattern, PatternConfig, PatternKind, Trace, Unit};

use super::common::{OutputFormat, apply_param_flag};

/// A stitch point in JSON output.
#[derive(Serialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

/// One trace in JSON output.
#[derive(Serialize)]
struct JsonTrace {
    color: String,
    stitch_count: usize,
    run_length: f64,
    stitches: Vec<JsonPoint>,
}

impl JsonTrace {
    fn from_trace(trace: &Trace) -> Self {
        Self {
            color: trace.color().to_hex(),
            stitch_count: trace.stitch_count(),
            run_length: trace.run_length(),
            stitches: trace
                .stitches()
                .iter()
                .map(|s| JsonPoint { x: s.x, y: s.y })
                .collect(),
        }
    }
}

/// Whole-pattern JSON output.
#[derive(Serialize)]
struct JsonPattern {
    pattern: String,
    full_name: String,
    size: String,
    unit: String,
    total_stitch_count: usize,
    total_run_length: f64,
    shortcut_count: usize,
    traces: Vec<JsonTrace>,
    traces2: Vec<JsonTrace>,
}

impl JsonPattern {
    fn from_pattern(pattern: &Pattern) -> Self {
        Self {
            pattern: pattern.name().to_string(),
            full_name: pattern.full_name().to_string(),
            size: pattern.size_string().to_string(),
            unit: pattern.unit().map(|u| u.name()).unwrap_or("").to_string(),
            total_stitch_count: pattern.total_stitch_count(),
            total_run_length: pattern.total_run_length(),
            shortcut_count: pattern.shortcuts().len(),
            traces: pattern
                .traces()
                .into_iter()
                .map(JsonTrace::from_trace)
                .collect(),
            traces2: pattern
                .traces2()
                .into_iter()
                .map(JsonTrace::from_trace)
                .collect(),
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {flag}");
            exit(1);
        }
    }
}

/// Execute the generate command.
pub fn cmd_generate(args: &[String]) {
    if args.is_empty() {
        eprintln!("Usage: stitchgen generate <pattern> [options]");
        eprintln!("Run 'stitchgen patterns' for the list of patterns.");
        exit(1);
    }

    let Some(kind) = PatternKind::from_name(&args[0]) else {
        eprintln!("Unknown pattern: {}", args[0]);
        eprintln!("Run 'stitchgen patterns' for the list of patterns.");
        exit(1);
    };

    let mut params = kind.default_params();
    let mut unit = Unit::Mm;
    let mut output: Option<String> = None;
    let mut format = OutputFormat::Svg;
    let mut run_correct = false;
    let mut dedup = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                output = Some(next_value(args, &mut i, "--output").to_string());
            }
            "-f" | "--format" => {
                format = match next_value(args, &mut i, "--format").to_lowercase().as_str() {
                    "svg" => OutputFormat::Svg,
                    "json" => OutputFormat::Json,
                    other => {
                        eprintln!("Unknown format: {other}. Use 'svg' or 'json'.");
                        exit(1);
                    }
                };
            }
            "-u" | "--unit" => {
                let value = next_value(args, &mut i, "--unit");
                unit = match Unit::from_name(value) {
                    Some(unit) => unit,
                    None => {
                        eprintln!("Unknown unit: {value}. Use mm, cm or m.");
                        exit(1);
                    }
                };
            }
            "-d" | "--dist" => {
                let value = next_value(args, &mut i, "--dist").to_string();
                if let Err(e) = apply_param_flag(&mut params, "dist", &value) {
                    eprintln!("{e}");
                    exit(1);
                }
            }
            "-j" | "--jump" => {
                let value = next_value(args, &mut i, "--jump").to_string();
                if let Err(e) = apply_param_flag(&mut params, "jump", &value) {
                    eprintln!("{e}");
                    exit(1);
                }
            }
            "--correct" => run_correct = true,
            "--dedup" => dedup = true,
            flag if flag.starts_with("--") => {
                let key = flag[2..].to_string();
                let value = next_value(args, &mut i, flag).to_string();
                if let Err(e) = apply_param_flag(&mut params, &key, &value) {
                    eprintln!("{e}");
                    exit(1);
                }
            }
            other => {
                eprintln!("Unknown option: {other}");
                exit(1);
            }
        }
        i += 1;
    }

    let config = PatternConfig::default().with_dedup(dedup);
    let mut pattern = Pattern::with_config(kind, config);
    pattern.set_unit(unit);

    if let Err(e) = pattern.build(&params) {
        eprintln!("Build failed: {e}");
        exit(1);
    }

    if !pattern.shortcuts().is_empty() && !run_correct {
        eprintln!(
            "{} shortcut(s) detected; pass --correct to remove them",
            pattern.shortcuts().len()
        );
    }

    if run_correct {
        match pattern.correct() {
            Ok(removed) if removed > 0 => {
                // status goes to stderr so JSON output stays clean
                eprintln!("Removed {removed} shorting stitch(es)");
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Correction failed: {e}");
                exit(1);
            }
        }
    }

    match format {
        OutputFormat::Svg => {
            let written = match &output {
                Some(path) => {
                    if let Err(e) = pattern.save_to(Path::new(path)) {
                        eprintln!("Export failed: {e}");
                        exit(1);
                    }
                    path.clone()
                }
                None => match pattern.save() {
                    Ok(path) => path.display().to_string(),
                    Err(e) => {
                        eprintln!("Export failed: {e}");
                        exit(1);
                    }
                },
            };
            println!("Wrote {written}");
        }
        OutputFormat::Json => {
            let doc = JsonPattern::from_pattern(&pattern);
            let text = match serde_json::to_string_pretty(&doc) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("JSON encoding failed: {e}");
                    exit(1);
                }
            };
            match &output {
                Some(path) => {
                    if let Err(e) = fs::write(path, text) {
                        eprintln!("Export failed: {e}");
                        exit(1);
                    }
                    println!("Wrote {path}");
                }
                None => println!("{text}"),
            }
        }
    }

    eprintln!(
        "{}: {} stitches, run length {:.3} ({})",
        pattern.name(),
        pattern.total_stitch_count(),
        pattern.total_run_length(),
        pattern.size_string()
    );
}
