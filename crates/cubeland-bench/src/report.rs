use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    /// Terrain seed the baseline was recorded with.
    pub seed: u64,
    pub results: Vec<BenchmarkResult>,
}

/// Load a baseline from a JSON file. Returns None if the file is missing or
/// unreadable.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            log::warn!("Ignoring malformed baseline {}: {e}", path.display());
            None
        }
    }
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Scenes whose mean tick time grew by more than `threshold_pct` over the
/// baseline, with the percent change. Scenes absent from the baseline are
/// not compared.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<(String, f64)> {
    current
        .iter()
        .filter_map(|result| {
            let base = baseline
                .results
                .iter()
                .find(|b| b.scene_name == result.scene_name)?;
            if base.timings.mean_ms <= 0.0 {
                return None;
            }
            let pct_change =
                (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
            (pct_change > threshold_pct).then(|| (result.scene_name.clone(), pct_change))
        })
        .collect()
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Ticks | Blocks | Visible | Shown | Hidden | Edits | Jumps | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Max (ms) |\n");
    out.push_str("|-------|-------|--------|---------|-------|--------|-------|-------|-----------|-------------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
            r.scene_name,
            r.tick_count,
            r.grid_blocks,
            r.visible_blocks,
            r.presented,
            r.retracted,
            r.edits,
            r.jumps,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[(String, f64)], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = format!("REGRESSIONS DETECTED (>{:.0}% threshold):\n", threshold_pct);
    for (scene, pct) in regressions {
        out.push_str(&format!("  - {}: +{:.1}%\n", scene, pct));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::compute_timings;

    fn result(name: &str, mean: f64) -> BenchmarkResult {
        BenchmarkResult {
            scene_name: name.to_string(),
            tick_count: 1,
            grid_blocks: 10,
            visible_blocks: 5,
            presented: 7,
            retracted: 2,
            edits: 0,
            jumps: 0,
            respawns: 0,
            timings: compute_timings(&[mean]),
        }
    }

    fn baseline(results: Vec<BenchmarkResult>) -> Baseline {
        Baseline {
            timestamp: "t".to_string(),
            seed: 1,
            results,
        }
    }

    #[test]
    fn test_compare_flags_only_slower_scenes() {
        let base = baseline(vec![result("walk", 1.0), result("idle", 1.0)]);
        let current = [result("walk", 1.5), result("idle", 1.05), result("new", 9.0)];
        let regressions = compare(&current, &base, 10.0);
        assert_eq!(regressions.len(), 1);
        assert_eq!(regressions[0].0, "walk");
        assert!((regressions[0].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_skips_zero_baseline() {
        let base = baseline(vec![result("idle", 0.0)]);
        assert!(compare(&[result("idle", 1.0)], &base, 10.0).is_empty());
    }

    #[test]
    fn test_markdown_has_row_per_scene() {
        let table = format_markdown(&[result("walk", 1.0), result("idle", 2.0)]);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("| walk | 1 | 10 | 5 | 7 | 2 |"));
    }

    #[test]
    fn test_baseline_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("cubeland-bench-{}", std::process::id()));
        let path = dir.join("baseline.json");
        save_baseline(&path, &baseline(vec![result("walk", 1.25)])).unwrap();
        let loaded = load_baseline(&path).unwrap();
        assert_eq!(loaded.results[0].scene_name, "walk");
        assert_eq!(loaded.results[0].timings.mean_ms, 1.25);
        std::fs::write(&path, "not json").unwrap();
        assert!(load_baseline(&path).is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
