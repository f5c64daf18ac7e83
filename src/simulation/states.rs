//! Core state types for the N-body simulation.
//!
//! - `Body`  one point mass, validated on construction (mass > 0, finite)
//! - `Stars` the whole population as a structure of arrays
//!
//! `Stars` keeps every attribute in its own 64-byte aligned `[f32; N]` so the
//! all-pairs loop streams through contiguous lanes. `N` is a const generic:
//! the population never grows or shrinks after construction.

use anyhow::{ensure, Result};
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use super::params::NUM;

pub type NVec3 = Vector3<f32>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    m: f32, // mass, > 0
}

impl Body {
    /// Build a body, rejecting non-positive mass and non-finite components
    pub fn new(x: NVec3, v: NVec3, m: f32) -> Result<Self> {
        ensure!(m.is_finite() && m > 0.0, "body mass must be positive and finite, got {m}");
        ensure!(x.iter().all(|c| c.is_finite()), "body position is not finite: {x:?}");
        ensure!(v.iter().all(|c| c.is_finite()), "body velocity is not finite: {v:?}");
        Ok(Self { x, v, m })
    }

    pub fn mass(&self) -> f32 {
        self.m
    }
}

/// One 64-byte aligned lane of `N` floats
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(64))]
pub struct Lane<const N: usize>(pub [f32; N]);

impl<const N: usize> Lane<N> {
    const ZERO: Self = Lane([0.0; N]);
}

/// All bodies, one lane per attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Stars<const N: usize = NUM> {
    pub px: Lane<N>,
    pub py: Lane<N>,
    pub pz: Lane<N>,
    pub vx: Lane<N>,
    pub vy: Lane<N>,
    pub vz: Lane<N>,
    pub(crate) mass: Lane<N>,
}

impl<const N: usize> Stars<N> {
    /// Seeded initialization, reproducible across runs
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        Self::random(&mut rng)
    }

    /// Positions and velocities uniform in [-1, 1), masses uniform in [1, 2)
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut stars = Self::empty();
        // per-body draw order keeps a body's values independent of N
        for i in 0..N {
            stars.px.0[i] = rng.random_range(-1.0..1.0);
            stars.py.0[i] = rng.random_range(-1.0..1.0);
            stars.pz.0[i] = rng.random_range(-1.0..1.0);
            stars.vx.0[i] = rng.random_range(-1.0..1.0);
            stars.vy.0[i] = rng.random_range(-1.0..1.0);
            stars.vz.0[i] = rng.random_range(-1.0..1.0);
            stars.mass.0[i] = rng.random_range(1.0..2.0);
        }
        stars
    }

    /// Pack already validated bodies into lanes
    pub fn from_bodies(bodies: [Body; N]) -> Self {
        let mut stars = Self::empty();
        for (i, b) in bodies.iter().enumerate() {
            stars.write(i, b);
        }
        stars
    }

    /// Unpack into an array-of-structures copy
    pub fn to_bodies(&self) -> Vec<Body> {
        (0..N).map(|i| self.body(i)).collect()
    }

    fn empty() -> Self {
        Self {
            px: Lane::ZERO,
            py: Lane::ZERO,
            pz: Lane::ZERO,
            vx: Lane::ZERO,
            vy: Lane::ZERO,
            vz: Lane::ZERO,
            mass: Lane::ZERO,
        }
    }

    fn write(&mut self, i: usize, b: &Body) {
        self.set_position(i, b.x);
        self.set_velocity(i, b.v);
        self.mass.0[i] = b.m;
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn body(&self, i: usize) -> Body {
        Body {
            x: self.position(i),
            v: self.velocity(i),
            m: self.mass.0[i],
        }
    }

    /// Replace body `i` wholesale; the only way a mass can change
    pub fn set_body(&mut self, i: usize, b: Body) {
        self.write(i, &b);
    }

    pub fn position(&self, i: usize) -> NVec3 {
        NVec3::new(self.px.0[i], self.py.0[i], self.pz.0[i])
    }

    pub fn set_position(&mut self, i: usize, x: NVec3) {
        self.px.0[i] = x.x;
        self.py.0[i] = x.y;
        self.pz.0[i] = x.z;
    }

    pub fn velocity(&self, i: usize) -> NVec3 {
        NVec3::new(self.vx.0[i], self.vy.0[i], self.vz.0[i])
    }

    pub fn set_velocity(&mut self, i: usize, v: NVec3) {
        self.vx.0[i] = v.x;
        self.vy.0[i] = v.y;
        self.vz.0[i] = v.z;
    }

    pub fn mass(&self, i: usize) -> f32 {
        self.mass.0[i]
    }

    pub fn masses(&self) -> &[f32; N] {
        &self.mass.0
    }

    /// True when no attribute of any body is NaN or infinite
    pub fn is_finite(&self) -> bool {
        [&self.px, &self.py, &self.pz, &self.vx, &self.vy, &self.vz, &self.mass]
            .iter()
            .all(|lane| lane.0.iter().all(|c| c.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass() {
        assert!(Body::new(NVec3::zeros(), NVec3::zeros(), 0.0).is_err());
        assert!(Body::new(NVec3::zeros(), NVec3::zeros(), -1.0).is_err());
        assert!(Body::new(NVec3::zeros(), NVec3::zeros(), f32::NAN).is_err());
        assert!(Body::new(NVec3::zeros(), NVec3::zeros(), 1.0).is_ok());
    }

    #[test]
    fn rejects_non_finite_vectors() {
        let bad = NVec3::new(0.0, f32::INFINITY, 0.0);
        assert!(Body::new(bad, NVec3::zeros(), 1.0).is_err());
        assert!(Body::new(NVec3::zeros(), bad, 1.0).is_err());
    }

    #[test]
    fn lanes_are_cache_line_aligned() {
        assert_eq!(std::mem::align_of::<Lane<NUM>>(), 64);
        let stars = Stars::<NUM>::from_seed(1);
        assert_eq!(stars.px.0.as_ptr() as usize % 64, 0);
        assert_eq!(stars.mass.0.as_ptr() as usize % 64, 0);
    }

    #[test]
    fn body_round_trips_through_lanes() {
        let mut stars = Stars::<4>::from_seed(3);
        let b = Body::new(NVec3::new(0.1, 0.2, 0.3), NVec3::new(-0.4, 0.5, -0.6), 1.5).unwrap();
        stars.set_body(2, b);
        assert_eq!(stars.body(2), b);
        assert_eq!(stars.mass(2), 1.5);
    }
}
