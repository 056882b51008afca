use std::time::Instant;

use cubeland_core::config::WorldConfig;
use cubeland_core::error::ConfigError;
use cubeland_sim::pick::CrosshairPicker;
use cubeland_sim::Simulation;
use cubeland_world::sink::RecordingSink;

use crate::scenes::{self, SceneConfig};

/// Fixed frame time fed to every tick, so runs are reproducible.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub tick_count: u32,
    /// Blocks in the grid at the end of the run.
    pub grid_blocks: usize,
    /// Blocks in the visible set at the end of the run.
    pub visible_blocks: usize,
    pub presented: u64,
    pub retracted: u64,
    pub edits: u32,
    pub jumps: u32,
    pub respawns: u32,
    pub timings: TimingSeries,
}

/// Replays scripted sessions against a freshly generated world per scene.
pub struct BenchmarkRunner {
    config: WorldConfig,
    tick_count: u32,
}

impl BenchmarkRunner {
    pub fn new(config: WorldConfig, tick_count: u32) -> Self {
        Self { config, tick_count }
    }

    /// Run a single benchmark scene and return timing results.
    ///
    /// Each tick is timed end to end: movement, edits and, on the ticks it
    /// falls due, the visibility pass.
    pub fn run_scene(&self, scene: &SceneConfig) -> Result<BenchmarkResult, ConfigError> {
        log::info!("Running scene '{}' ({} ticks)...", scene.name, self.tick_count);

        let mut sim = Simulation::new(self.config.clone())?;
        let mut sink = RecordingSink::new();
        let picker = CrosshairPicker::with_reach(self.config.reach);
        sim.prime(&mut sink);

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut edits = 0;
        let mut jumps = 0;
        let mut respawns = 0;

        for tick in 0..self.tick_count {
            let input = scenes::scripted_input(scene.script, tick);

            let frame_start = Instant::now();
            let report = sim.tick(FRAME_DT, &input, &picker, &mut sink);
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);

            if report.edit.is_some_and(|e| e.changed_world()) {
                edits += 1;
            }
            jumps += report.step.jumped as u32;
            respawns += report.step.respawned as u32;
        }

        if !sink.is_clean() {
            log::warn!(
                "  Render sink saw {} double presents and {} bad retracts",
                sink.double_presents,
                sink.bad_retracts
            );
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );

        Ok(BenchmarkResult {
            scene_name: scene.name.to_string(),
            tick_count: self.tick_count,
            grid_blocks: sim.world().grid().len(),
            visible_blocks: sim.world().visible().len(),
            presented: sink.presented,
            retracted: sink.retracted,
            edits,
            jumps,
            respawns,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let percentile = |p: f64| sorted[(((n as f64) * p).ceil() as usize).min(n - 1)];

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: percentile(0.95),
        p99_ms: percentile(0.99),
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
