//! Timing harness and cross-check.
//!
//! `bench_kernel` is the reference run: seed the population, read the energy,
//! time `steps` kernel calls, read the energy again. `verify` runs the lane
//! kernel and the array-of-structures kernel side by side from the same seed.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::configuration::config::RunConfig;
use crate::simulation::energy::{calc, relative_drift};
use crate::simulation::integrator::run;
use crate::simulation::params::{Parameters, NUM};
use crate::simulation::reference;
use crate::simulation::states::Stars;

/// Result of one timed run
#[derive(Debug, Clone, Copy)]
pub struct BenchReport {
    pub initial_energy: f32,
    pub final_energy: f32,
    pub elapsed: Duration,
}

impl BenchReport {
    pub fn drift(&self) -> f32 {
        relative_drift(self.initial_energy, self.final_energy)
    }
}

/// The three console lines of the reference program
impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial energy: {:.6}", self.initial_energy)?;
        writeln!(f, "Final energy: {:.6}", self.final_energy)?;
        write!(f, "Time elapsed: {} ms", self.elapsed.as_millis())
    }
}

/// Seed, measure energy, time the kernel loop, measure energy again
pub fn bench_kernel(cfg: &RunConfig) -> BenchReport {
    let params = Parameters::REFERENCE;
    let mut stars: Stars<NUM> = Stars::from_seed(cfg.seed);

    let initial_energy = calc(&stars, &params);
    debug!(seed = cfg.seed, bodies = NUM, initial_energy, "initialized");

    let t0 = Instant::now();
    run(&mut stars, &params, cfg.steps);
    let elapsed = t0.elapsed();

    let final_energy = calc(&stars, &params);
    let report = BenchReport { initial_energy, final_energy, elapsed };

    let drift = report.drift();
    info!(
        steps = cfg.steps,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        drift,
        "run finished"
    );
    if !drift.is_finite() || drift.abs() > cfg.drift_tolerance {
        warn!(drift, tolerance = cfg.drift_tolerance, "energy drift exceeds tolerance");
    }

    report
}

/// Lane kernel vs array-of-structures kernel after the same number of steps
#[derive(Debug, Clone, Copy)]
pub struct VerifyReport {
    pub max_position_diff: f32,
    pub lane_energy: f32,
    pub reference_energy: f32,
}

impl VerifyReport {
    pub fn energy_diff(&self) -> f32 {
        (self.lane_energy - self.reference_energy).abs()
    }

    pub fn passed(&self, position_tolerance: f32, energy_tolerance: f32) -> bool {
        let scale = self.lane_energy.abs().max(self.reference_energy.abs());
        self.max_position_diff <= position_tolerance && self.energy_diff() <= energy_tolerance * scale
    }
}

pub fn verify(seed: u64, steps: usize) -> VerifyReport {
    let params = Parameters::REFERENCE;
    let mut stars: Stars<NUM> = Stars::from_seed(seed);
    let mut bodies = stars.to_bodies();

    run(&mut stars, &params, steps);
    for _ in 0..steps {
        reference::step(&mut bodies, &params);
    }

    let max_position_diff = bodies
        .iter()
        .enumerate()
        .map(|(i, b)| (stars.position(i) - b.x).amax())
        .fold(0.0f32, f32::max);

    let report = VerifyReport {
        max_position_diff,
        lane_energy: calc(&stars, &params),
        reference_energy: reference::energy(&bodies, &params),
    };
    info!(
        steps,
        max_position_diff,
        energy_diff = report.energy_diff(),
        "cross-check against reference kernel"
    );
    report
}
