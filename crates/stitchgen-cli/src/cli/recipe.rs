//! Recipe command: run a batch of generation jobs from a JSON file.
//!
//! A recipe is a JSON array of jobs:
//!
//! ```json
//! [
//!   { "pattern": "hilbert", "order": 3, "dist": 0.5, "output": "hilbert.svg" },
//!   { "pattern": "ide", "teeth": 12, "correct": true, "unit": "cm" }
//! ]
//! ```
//!
//! Any key besides `pattern`, `output`, `unit`, `correct` and `dedup` is
//! treated as a parameter flag, with the same names as the generate command.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::exit;

use serde::Deserialize;

use stitchgen::{Pattern, PatternConfig, PatternKind, Unit};

use super::common::apply_param_flag;

#[derive(Deserialize)]
struct RecipeJob {
    pattern: String,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    correct: bool,
    #[serde(default)]
    dedup: bool,
    #[serde(flatten)]
    options: BTreeMap<String, serde_json::Value>,
}

fn run_job(job: &RecipeJob) -> Result<String, String> {
    let kind = PatternKind::from_name(&job.pattern)
        .ok_or_else(|| format!("unknown pattern: {}", job.pattern))?;

    let mut params = kind.default_params();
    for (key, value) in &job.options {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        apply_param_flag(&mut params, key, &text)?;
    }

    let unit = match &job.unit {
        Some(name) => Unit::from_name(name).ok_or_else(|| format!("unknown unit: {name}"))?,
        None => Unit::Mm,
    };

    let config = PatternConfig::default().with_dedup(job.dedup);
    let mut pattern = Pattern::with_config(kind, config);
    pattern.set_unit(unit);

    pattern.build(&params).map_err(|e| e.to_string())?;

    if job.correct {
        pattern.correct().map_err(|e| e.to_string())?;
    }

    match &job.output {
        Some(path) => {
            pattern.save_to(Path::new(path)).map_err(|e| e.to_string())?;
            Ok(path.clone())
        }
        None => {
            let path = pattern.save().map_err(|e| e.to_string())?;
            Ok(path.display().to_string())
        }
    }
}

/// Execute the recipe command.
pub fn cmd_recipe(args: &[String]) {
    let Some(file) = args.first() else {
        eprintln!("Usage: stitchgen recipe <file.json>");
        exit(1);
    };

    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Cannot read {file}: {e}");
            exit(1);
        }
    };

    let jobs: Vec<RecipeJob> = match serde_json::from_str(&content) {
        Ok(jobs) => jobs,
        Err(e) => {
            eprintln!("Cannot parse {file}: {e}");
            exit(1);
        }
    };

    let mut failures = 0;
    for (index, job) in jobs.iter().enumerate() {
        match run_job(job) {
            Ok(path) => println!("[{index}] {} -> {path}", job.pattern),
            Err(e) => {
                eprintln!("[{index}] {} failed: {e}", job.pattern);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{failures} job(s) failed");
        exit(1);
    }
}
