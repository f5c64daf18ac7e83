//! Numerical and physical constants for the simulation
//!
//! Everything here is fixed at build time:
//! - population size `NUM` and default run length `STEPS`,
//! - gravitational constant `G`, softening `EPS` and time step `DT`.
//!
//! `Parameters` bundles the three physical constants so the kernels can be
//! driven with a different step size in tests (e.g. the scale check).

pub const NUM: usize = 48; // bodies in the reference population
pub const STEPS: usize = 100_000; // kernel calls in the reference run
pub const SEED: u64 = 42; // default initialization seed

pub const G: f32 = 0.001; // gravitational constant
pub const EPS: f32 = 0.001; // softening length
pub const DT: f32 = 0.01; // time step

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub g: f32, // gravitational constant
    pub eps: f32, // softening length
    pub dt: f32, // time step
}

impl Parameters {
    /// The build-time constants used by the reference run
    pub const REFERENCE: Parameters = Parameters { g: G, eps: EPS, dt: DT };

    /// Same physics, different step size
    pub fn with_dt(self, dt: f32) -> Self {
        Self { dt, ..self }
    }

    /// Softening squared, added to every squared separation
    #[inline]
    pub fn eps2(&self) -> f32 {
        self.eps * self.eps
    }

    /// `G * dt`, folded into a single factor for the velocity kick
    #[inline]
    pub fn g_dt(&self) -> f32 {
        self.g * self.dt
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::REFERENCE
    }
}
