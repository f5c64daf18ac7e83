//! Force / integration kernel for the fixed-size population
//!
//! One `step` is two strictly ordered passes over the lanes:
//! - `kick`: every body sums the softened pull of every body (itself
//!   included, which contributes exactly zero) from the positions as they were
//!   at the start of the step, then adds the sum to its velocity
//! - `drift`: every position advances by `v * dt` using the new velocities
//!
//! `kick` only ever borrows the position lanes immutably, so no body can see a
//! neighbour's position from the current step.

use super::params::Parameters;
use super::states::{Lane, NVec3, Stars};

/// Advance the whole system by one time step
pub fn step<const N: usize>(stars: &mut Stars<N>, params: &Parameters) {
    kick(stars, params);
    drift(stars, params.dt);
}

/// Velocity update for every body from the current position snapshot
pub fn kick<const N: usize>(stars: &mut Stars<N>, params: &Parameters) {
    let g_dt = params.g_dt();
    let eps2 = params.eps2();

    let Stars { px, py, pz, vx, vy, vz, mass } = stars;

    for i in 0..N {
        let (xi, yi, zi) = (px.0[i], py.0[i], pz.0[i]);
        let (dvx, dvy, dvz) = accumulate(px, py, pz, mass, xi, yi, zi, g_dt, eps2);
        vx.0[i] += dvx;
        vy.0[i] += dvy;
        vz.0[i] += dvz;
    }
}

/// Position update; must run after every velocity of the step is final
pub fn drift<const N: usize>(stars: &mut Stars<N>, dt: f32) {
    let Stars { px, py, pz, vx, vy, vz, .. } = stars;

    for (p, v) in [(px, &*vx), (py, &*vy), (pz, &*vz)] {
        for (x, &u) in p.0.iter_mut().zip(v.0.iter()) {
            *x += u * dt;
        }
    }
}

/// Net velocity change body `i` receives in one kick
pub fn velocity_delta<const N: usize>(stars: &Stars<N>, i: usize, params: &Parameters) -> NVec3 {
    let (dvx, dvy, dvz) = accumulate(
        &stars.px,
        &stars.py,
        &stars.pz,
        &stars.mass,
        stars.px.0[i],
        stars.py.0[i],
        stars.pz.0[i],
        params.g_dt(),
        params.eps2(),
    );
    NVec3::new(dvx, dvy, dvz)
}

/// Contribution of body `j` to the velocity change of body `i`
///
/// For `i == j` the displacement is zero, so this is the zero vector for any
/// softening.
pub fn pair_velocity_delta<const N: usize>(
    stars: &Stars<N>,
    i: usize,
    j: usize,
    params: &Parameters,
) -> NVec3 {
    let d = stars.position(j) - stars.position(i);
    let d2 = d.norm_squared() + params.eps2();
    d * (params.g_dt() * stars.mass(j) / (d2 * d2.sqrt()))
}

/// Inner all-pairs loop for one target position.
///
/// Written over zipped lanes so the bounds checks vanish and the body is a
/// straight run of mul/add/sqrt that the compiler can vectorize across `j`.
#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn accumulate<const N: usize>(
    px: &Lane<N>,
    py: &Lane<N>,
    pz: &Lane<N>,
    mass: &Lane<N>,
    xi: f32,
    yi: f32,
    zi: f32,
    g_dt: f32,
    eps2: f32,
) -> (f32, f32, f32) {
    let (mut ax, mut ay, mut az) = (0.0f32, 0.0f32, 0.0f32);

    for (((&xj, &yj), &zj), &mj) in px.0.iter().zip(&py.0).zip(&pz.0).zip(&mass.0) {
        let dx = xj - xi;
        let dy = yj - yi;
        let dz = zj - zi;

        // softened |d|^2, then |d|^3
        let d2 = dx * dx + dy * dy + dz * dz + eps2;
        let d3 = d2 * d2.sqrt();

        let s = g_dt * mj / d3;
        ax += dx * s;
        ay += dy * s;
        az += dz * s;
    }

    (ax, ay, az)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kick_leaves_positions_alone() {
        let mut stars: Stars<8> = Stars::from_seed(5);
        let before = stars.clone();
        kick(&mut stars, &Parameters::REFERENCE);
        assert_eq!(stars.px, before.px);
        assert_eq!(stars.py, before.py);
        assert_eq!(stars.pz, before.pz);
        assert_ne!(stars.vx, before.vx);
    }

    #[test]
    fn drift_moves_by_velocity() {
        let mut stars: Stars<4> = Stars::from_seed(6);
        let before = stars.clone();
        drift(&mut stars, 0.5);
        for i in 0..4 {
            let expected = before.position(i) + before.velocity(i) * 0.5;
            assert!((stars.position(i) - expected).norm() < 1e-6);
            assert_eq!(stars.velocity(i), before.velocity(i));
        }
    }
}
