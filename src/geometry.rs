//! Procedural home-layout generators.
//!
//! Pure functions that place particles in their "formed" resting layout: a
//! volumetric cone for body and volume-sparkle particles, a helical ribbon
//! for the spiral kinds. Cone sampling draws from a caller-supplied RNG once
//! at layout creation; ribbon placement is a deterministic function of
//! `(index, total)` so consecutive particles trace a continuous helix.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Total cone height.
pub const CONE_HEIGHT: f32 = 10.0;
/// Y coordinate of the cone apex.
pub const CONE_APEX_Y: f32 = 6.0;
/// Y coordinate of the cone base.
pub const CONE_BASE_Y: f32 = -4.0;

/// Radius of the cone at height `y` (linear taper from apex to base).
///
/// Zero at the apex, `base_radius` at the base.
#[inline]
pub fn taper_radius(y: f32, base_radius: f32) -> f32 {
    ((CONE_APEX_Y - y) / CONE_HEIGHT) * base_radius
}

/// Sample a point uniformly inside the cone volume.
///
/// Height is uniform over `[CONE_BASE_Y, CONE_APEX_Y]`; the planar offset
/// uses `r = sqrt(u) * taper_radius(y)` so density is uniform per unit area
/// rather than per unit radius, which would cluster points on the axis.
pub fn cone_volume_sample<R: Rng>(rng: &mut R, base_radius: f32) -> Vec3 {
    let y = CONE_BASE_Y + rng.gen::<f32>() * CONE_HEIGHT;
    let radius_at_y = taper_radius(y, base_radius);

    let r = rng.gen::<f32>().sqrt() * radius_at_y;
    let theta = rng.gen::<f32>() * TAU;

    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// One particle's slot on a helical ribbon.
///
/// Captures everything the formed state needs: the height, the taper radius
/// at that height, and the unspun angle. The ribbon rotates as a whole by
/// adding a time-based spin to `theta` at resolve time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralDescriptor {
    /// Height on the cone.
    pub y: f32,
    /// Ribbon radius at this height.
    pub radius: f32,
    /// Angular position along the helix, before spin.
    pub theta: f32,
}

impl SpiralDescriptor {
    /// World position of this slot with the given spin angle applied.
    #[inline]
    pub fn position(&self, spin: f32) -> Vec3 {
        Vec3::new(
            self.radius * (self.theta + spin).cos(),
            self.y,
            self.radius * (self.theta + spin).sin(),
        )
    }
}

/// Place particle `index` of `total` on a helical ribbon wrapped around the
/// cone.
///
/// Normalized position `t = index / total` maps linearly from apex to base;
/// radius follows the same linear taper as the cone body scaled by
/// `base_radius`; `theta` advances `turns` full rotations over the ribbon
/// plus a constant `phase` so interleaved ribbons do not overlap.
pub fn spiral_ribbon_sample(index: u32, total: u32, base_radius: f32, turns: f32, phase: f32) -> SpiralDescriptor {
    let t = index as f32 / total.max(1) as f32;
    let y = CONE_APEX_Y - t * CONE_HEIGHT;
    let radius = taper_radius(y, base_radius);
    let theta = t * TAU * turns + phase;

    SpiralDescriptor { y, radius, theta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_taper_radius_endpoints() {
        assert!((taper_radius(CONE_APEX_Y, 3.8)).abs() < 1e-6);
        assert!((taper_radius(CONE_BASE_Y, 3.8) - 3.8).abs() < 1e-6);
    }

    #[test]
    fn test_cone_sample_inside_volume() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = cone_volume_sample(&mut rng, 3.8);
            assert!(p.y >= CONE_BASE_Y && p.y <= CONE_APEX_Y);
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!(planar <= taper_radius(p.y, 3.8) + 1e-5);
        }
    }

    #[test]
    fn test_cone_sample_area_uniform() {
        // If planar offsets are uniform per unit area, the squared ratio
        // r / r_max(y) is uniform on [0, 1]. Bin it and expect near-equal
        // counts per bin.
        let mut rng = SmallRng::seed_from_u64(7);
        const N: usize = 40_000;
        const BINS: usize = 10;
        let mut counts = [0usize; BINS];

        for _ in 0..N {
            let p = cone_volume_sample(&mut rng, 3.8);
            let r_max = taper_radius(p.y, 3.8);
            if r_max < 1e-4 {
                continue;
            }
            let ratio = ((p.x * p.x + p.z * p.z).sqrt() / r_max).min(0.999_999);
            counts[(ratio * ratio * BINS as f32) as usize] += 1;
        }

        let total: usize = counts.iter().sum();
        let expected = total as f32 / BINS as f32;
        for &c in &counts {
            let deviation = (c as f32 - expected).abs() / expected;
            assert!(deviation < 0.1, "ring count {} deviates {:.1}% from {}", c, deviation * 100.0, expected);
        }
    }

    #[test]
    fn test_cone_sample_deterministic_per_seed() {
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(cone_volume_sample(&mut a, 3.9), cone_volume_sample(&mut b, 3.9));
        }
    }

    #[test]
    fn test_spiral_sample_deterministic() {
        let a = spiral_ribbon_sample(42, 150, 4.5, 6.0, 0.0);
        let b = spiral_ribbon_sample(42, 150, 4.5, 6.0, 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_spiral_endpoints_and_turns() {
        let top = spiral_ribbon_sample(0, 100, 4.5, 6.0, 0.5);
        assert!((top.y - CONE_APEX_Y).abs() < 1e-6);
        assert!(top.radius.abs() < 1e-6);
        assert!((top.theta - 0.5).abs() < 1e-6);

        let mid = spiral_ribbon_sample(50, 100, 4.5, 6.0, 0.5);
        assert!((mid.y - 1.0).abs() < 1e-5);
        assert!((mid.theta - (0.5 * TAU * 6.0 + 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_spiral_position_spin() {
        let slot = spiral_ribbon_sample(25, 100, 4.6, 6.0, 0.0);
        let p = slot.position(0.0);
        assert!((p.length() - (slot.radius * slot.radius + slot.y * slot.y).sqrt()).abs() < 1e-4);

        // Spinning preserves height and radius.
        let q = slot.position(1.3);
        assert!((q.y - p.y).abs() < 1e-6);
        let pr = (p.x * p.x + p.z * p.z).sqrt();
        let qr = (q.x * q.x + q.z * q.z).sqrt();
        assert!((pr - qr).abs() < 1e-4);
    }

    #[test]
    fn test_spiral_zero_total_does_not_divide_by_zero() {
        let slot = spiral_ribbon_sample(0, 0, 4.5, 6.0, 0.0);
        assert!(slot.y.is_finite() && slot.theta.is_finite());
    }
}
