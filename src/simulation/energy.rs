//! Energy diagnostic
//!
//! Recomputes kinetic + potential energy from a `Stars` snapshot. Read-only,
//! used before and after a run to check conservation; never part of the
//! stepped loop.
//!
//! The potential sums over all ordered pairs with a `1/2` factor, diagonal
//! included. Each diagonal term is `-G m_i^2 / (2 eps)`, a constant for the
//! lifetime of the store since masses never change.

use super::params::Parameters;
use super::states::Stars;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub kinetic: f32,
    pub potential: f32,
}

impl Energy {
    pub fn total(&self) -> f32 {
        self.kinetic + self.potential
    }
}

/// Total energy of the system
pub fn calc<const N: usize>(stars: &Stars<N>, params: &Parameters) -> f32 {
    energy(stars, params).total()
}

/// Kinetic / potential breakdown
pub fn energy<const N: usize>(stars: &Stars<N>, params: &Parameters) -> Energy {
    Energy {
        kinetic: kinetic_energy(stars),
        potential: potential_energy(stars, params),
    }
}

/// Sum of `m v^2 / 2`
pub fn kinetic_energy<const N: usize>(stars: &Stars<N>) -> f32 {
    let mut ke = 0.0;
    for i in 0..N {
        let v2 = stars.vx.0[i] * stars.vx.0[i] + stars.vy.0[i] * stars.vy.0[i] + stars.vz.0[i] * stars.vz.0[i];
        ke += 0.5 * stars.mass.0[i] * v2;
    }
    ke
}

/// Softened gravitational potential over ordered pairs, halved
pub fn potential_energy<const N: usize>(stars: &Stars<N>, params: &Parameters) -> f32 {
    let eps2 = params.eps2();
    let half_g = 0.5 * params.g;
    let mut pe = 0.0;

    for i in 0..N {
        let (xi, yi, zi) = (stars.px.0[i], stars.py.0[i], stars.pz.0[i]);
        let mi = stars.mass.0[i];

        let mut row = 0.0;
        for (((&xj, &yj), &zj), &mj) in stars.px.0.iter().zip(&stars.py.0).zip(&stars.pz.0).zip(&stars.mass.0) {
            let dx = xj - xi;
            let dy = yj - yi;
            let dz = zj - zi;
            let d2 = dx * dx + dy * dy + dz * dz + eps2;
            row += mj / d2.sqrt();
        }
        pe -= half_g * mi * row;
    }
    pe
}

/// Unscaled potential of the pair `(i, j)`: `-G m_i m_j / sqrt(|d|^2 + eps^2)`
///
/// Symmetric in `i` and `j`; the ordered-pair sum applies the `1/2`.
pub fn pair_potential<const N: usize>(stars: &Stars<N>, i: usize, j: usize, params: &Parameters) -> f32 {
    let d2 = (stars.position(j) - stars.position(i)).norm_squared() + params.eps2();
    -params.g * (stars.mass(i) * stars.mass(j)) / d2.sqrt()
}

/// `(final - initial) / |initial|`
pub fn relative_drift(initial: f32, last: f32) -> f32 {
    (last - initial) / initial.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_is_signed_and_relative() {
        assert_eq!(relative_drift(-2.0, -1.0), 0.5);
        assert_eq!(relative_drift(4.0, 3.0), -0.25);
    }

    #[test]
    fn breakdown_adds_up() {
        let stars: Stars<6> = Stars::from_seed(11);
        let e = energy(&stars, &Parameters::REFERENCE);
        assert!(e.kinetic > 0.0);
        assert!(e.potential < 0.0);
        assert_eq!(e.total(), calc(&stars, &Parameters::REFERENCE));
    }
}
