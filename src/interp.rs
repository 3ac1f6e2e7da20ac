//! Frame-delta-scaled exponential smoothing.
//!
//! Every moving thing in the engine converges the same way: one explicit
//! Euler step of `current += (target - current) * rate * dt` per tick. The
//! step is frame-rate independent to first order - smaller deltas take more,
//! smaller steps toward the same trajectory - and it is deliberately the
//! Euler approximation, not the closed-form `1 - exp(-rate * dt)` decay,
//! because the visual timing of the formations is tuned against it.
//!
//! Targets jump discontinuously when the gesture state flips; positions never
//! do, because a single step only ever covers the fraction `rate * dt` of the
//! remaining distance.

use glam::Vec3;

/// Advance `current` one smoothing step toward `target`.
#[inline]
pub fn step(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current + (target - current) * (rate * dt)
}

/// Scalar counterpart of [`step`], used for scale convergence.
#[inline]
pub fn step_scalar(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_fractionally() {
        let current = Vec3::ZERO;
        let target = Vec3::new(10.0, 0.0, 0.0);
        let next = step(current, target, 2.0, 1.0 / 60.0);

        let expected = 10.0 * 2.0 / 60.0;
        assert!((next.x - expected).abs() < 1e-6);
        assert!(next.x < target.x);
    }

    #[test]
    fn test_step_zero_dt_is_identity() {
        let current = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(-4.0, 0.0, 9.0);
        assert_eq!(step(current, target, 2.5, 0.0), current);
    }

    #[test]
    fn test_step_converges() {
        let target = Vec3::new(3.0, -2.0, 1.0);
        let mut current = Vec3::new(-5.0, 5.0, -5.0);
        for _ in 0..1000 {
            current = step(current, target, 2.5, 1.0 / 60.0);
        }
        assert!(current.distance(target) < 1e-3);
    }

    #[test]
    fn test_step_is_euler_not_exact_decay() {
        // One large step must match the linear formula exactly, not the
        // closed-form exponential.
        let current = Vec3::X;
        let target = Vec3::ZERO;
        let next = step(current, target, 2.0, 0.25);
        assert!((next.x - 0.5).abs() < 1e-6);

        let exact = (-2.0f32 * 0.25).exp();
        assert!((next.x - exact).abs() > 1e-2);
    }

    #[test]
    fn test_step_scalar_matches_vector() {
        let v = step(Vec3::splat(1.0), Vec3::splat(4.0), 1.5, 0.1);
        let s = step_scalar(1.0, 4.0, 1.5, 0.1);
        assert!((v.x - s).abs() < 1e-6);
    }
}
