pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, Lane, NVec3, Stars};
pub use simulation::params::{Parameters, DT, EPS, G, NUM, SEED, STEPS};
pub use simulation::forces::{drift, kick, pair_velocity_delta, step, velocity_delta};
pub use simulation::energy::{calc, energy, kinetic_energy, pair_potential, potential_energy, relative_drift, Energy};
pub use simulation::integrator::{run, run_for};

pub use configuration::config::RunConfig;

pub use benchmark::benchmark::{bench_kernel, verify, BenchReport, VerifyReport};
