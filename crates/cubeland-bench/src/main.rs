use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use cubeland_bench::report;
use cubeland_bench::runner::BenchmarkRunner;
use cubeland_bench::scenes;
use cubeland_core::config::WorldConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 600u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                config_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--baseline" => {
                baseline_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--output" => {
                output_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--regression-threshold" => {
                regression_threshold = parse(&args, &mut i);
            }
            "--ticks" => {
                tick_count = parse(&args, &mut i);
            }
            "--help" | "-h" => {
                eprintln!("Usage: walkthrough [OPTIONS]");
                eprintln!("  --config <path>                World config RON (default: built-in)");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Ticks per scene (default: 600)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => WorldConfig::load(path).unwrap_or_else(|e| {
            eprintln!("ERROR: {}: {e}", path.display());
            process::exit(1);
        }),
        None => WorldConfig::default(),
    };
    let seed = config.seed;
    let runner = BenchmarkRunner::new(config, tick_count);

    let mut results = Vec::new();
    for scene in &scenes::standard_scenes() {
        match runner.run_scene(scene) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("ERROR: scene '{}': {e}", scene.name);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Walkthrough Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: timestamp(),
            seed,
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                eprintln!("ERROR: failed to save baseline {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            if baseline.seed != seed {
                log::warn!(
                    "Baseline was recorded with seed {}, current seed is {}",
                    baseline.seed,
                    seed
                );
            }
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Walkthrough complete.");
}

/// The argument after flag `args[*i]`, advancing `i` past it.
fn value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = args[*i].clone();
    let raw = value(args, i);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, raw);
        process::exit(1);
    })
}

/// Seconds since the Unix epoch, as a plain string.
fn timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("unix-{secs}")
}
