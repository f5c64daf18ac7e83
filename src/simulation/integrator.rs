//! Fixed-step driver for the kernel
//!
//! Repeats the symplectic-Euler `step` (kick then drift) a fixed number of
//! times. The step count is always known up front.

use super::forces::step;
use super::params::Parameters;
use super::states::Stars;

/// Advance `stars` by `steps` kernel calls
pub fn run<const N: usize>(stars: &mut Stars<N>, params: &Parameters, steps: usize) {
    for _ in 0..steps {
        step(stars, params);
    }
}

/// Advance `stars` by (approximately) `t` units of simulated time.
/// Returns the number of steps taken, `round(t / dt)`.
pub fn run_for<const N: usize>(stars: &mut Stars<N>, params: &Parameters, t: f32) -> usize {
    let steps = (t / params.dt).round().max(0.0) as usize;
    run(stars, params, steps);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_for_rounds_to_whole_steps() {
        let mut stars: Stars<4> = Stars::from_seed(2);
        let p = Parameters::REFERENCE;
        assert_eq!(run_for(&mut stars, &p, 0.1), 10);
        assert_eq!(run_for(&mut stars, &p, 0.0), 0);
    }

    #[test]
    fn zero_steps_is_a_no_op() {
        let mut stars: Stars<4> = Stars::from_seed(2);
        let before = stars.clone();
        run(&mut stars, &Parameters::REFERENCE, 0);
        assert_eq!(stars, before);
    }
}
