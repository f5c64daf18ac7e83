//! Array-of-structures reference kernel
//!
//! The plain layout: a slice of `Body` with nalgebra vectors, one force
//! evaluation per pair written the obvious way. It is slower than the lane
//! kernel in `forces` and exists to cross-check it (see `benchmark::verify`).

use super::params::Parameters;
use super::states::{Body, NVec3};

/// One kick + drift over a slice of bodies
pub fn step(bodies: &mut [Body], params: &Parameters) {
    let n = bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let eps2 = params.eps2();
    let g_dt = params.g_dt();

    // Velocity deltas from the start-of-step positions
    let mut dv = vec![NVec3::zeros(); n];
    for (i, out) in dv.iter_mut().enumerate() {
        let xi = bodies[i].x;
        for bj in bodies.iter() {
            // r points from i to j, i is pulled along +r
            let r = bj.x - xi;
            let d2 = r.norm_squared() + eps2;
            *out += r * (g_dt * bj.mass() / (d2 * d2.sqrt()));
        }
    }

    // Kick
    for (b, d) in bodies.iter_mut().zip(dv.iter()) {
        b.v += *d;
    }

    // Drift with the updated velocities
    for b in bodies.iter_mut() {
        b.x += b.v * params.dt;
    }
}

/// Total energy, same ordered-pair convention as `energy::calc`
pub fn energy(bodies: &[Body], params: &Parameters) -> f32 {
    let eps2 = params.eps2();

    let kinetic: f32 = bodies.iter().map(|b| 0.5 * b.mass() * b.v.norm_squared()).sum();

    let mut potential = 0.0;
    for bi in bodies {
        for bj in bodies {
            let d2 = (bj.x - bi.x).norm_squared() + eps2;
            potential -= 0.5 * params.g * bi.mass() * bj.mass() / d2.sqrt();
        }
    }

    kinetic + potential
}
