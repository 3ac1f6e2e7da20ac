//! Render-facing output records and tint palettes.
//!
//! The engine does not render. Each tick it produces flat lists of [`Pose`]
//! records that a renderer collaborator consumes however it likes (meshes,
//! instancing, sprites). Tints are drawn from a per-kind [`Palette`] once at
//! construction and never recomputed.

use glam::Vec3;
use rand::Rng;

/// Pre-defined tint palettes, one per visual treatment.
///
/// Five stops each; a particle picks one stop at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Emerald greens for the cone body.
    #[default]
    Emerald,

    /// Warm golds for sparkle particles.
    Gold,

    /// Deep reds for lanterns.
    Crimson,

    /// Mixed accent colors for emblem panels.
    Accent,
}

impl Palette {
    /// Get the color stops for this palette (5 colors, RGB 0-1).
    pub fn colors(&self) -> [Vec3; 5] {
        match self {
            Palette::Emerald => [
                Vec3::new(0.063, 0.725, 0.506), // Emerald
                Vec3::new(0.204, 0.827, 0.600), // Mint
                Vec3::new(0.431, 0.906, 0.718), // Pale green
                Vec3::new(0.000, 1.000, 0.616), // Spring green
                Vec3::new(0.314, 0.784, 0.471), // Sea green
            ],
            Palette::Gold => [
                Vec3::new(1.000, 0.843, 0.000), // Gold
                Vec3::new(1.000, 0.765, 0.150), // Amber
                Vec3::new(1.000, 0.920, 0.350), // Pale gold
                Vec3::new(0.980, 0.700, 0.080), // Deep gold
                Vec3::new(1.000, 0.880, 0.550), // Champagne
            ],
            Palette::Crimson => [
                Vec3::new(1.000, 0.000, 0.000), // Red
                Vec3::new(0.900, 0.100, 0.100), // Scarlet
                Vec3::new(0.800, 0.000, 0.100), // Crimson
                Vec3::new(1.000, 0.200, 0.150), // Coral red
                Vec3::new(0.750, 0.050, 0.050), // Dark red
            ],
            Palette::Accent => [
                Vec3::new(1.000, 0.000, 0.000), // Red
                Vec3::new(0.000, 1.000, 0.000), // Green
                Vec3::new(1.000, 1.000, 1.000), // White
                Vec3::new(1.000, 0.843, 0.000), // Gold
                Vec3::new(0.259, 0.529, 0.961), // Blue
            ],
        }
    }

    /// Pick one stop at random.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let colors = self.colors();
        colors[rng.gen_range(0..colors.len())]
    }

    /// The stop at a fixed index, wrapping past the end.
    #[inline]
    pub fn stop(&self, index: usize) -> Vec3 {
        let colors = self.colors();
        colors[index % colors.len()]
    }
}

/// One particle's transform for the current tick.
///
/// Rotation is Euler radians; batches whose particles always face the fixed
/// viewpoint instead set the batch-level billboard flag and leave rotation
/// zeroed. `glow` is an emissive multiplier the renderer may map onto
/// brightness (blinking sparkles sweep it between 0.5 and 2.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Per-instance tint, fixed at construction.
    pub tint: Vec3,
    /// Emissive intensity multiplier.
    pub glow: f32,
}

impl Pose {
    /// A unit pose at the origin with the given tint.
    pub fn with_tint(tint: Vec3) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            tint,
            glow: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_comes_from_palette() {
        let mut rng = SmallRng::seed_from_u64(3);
        let palette = Palette::Emerald;
        let stops = palette.colors();
        for _ in 0..50 {
            let tint = palette.sample(&mut rng);
            assert!(stops.contains(&tint));
        }
    }

    #[test]
    fn test_stop_wraps() {
        let palette = Palette::Accent;
        assert_eq!(palette.stop(0), palette.stop(5));
        assert_eq!(palette.stop(2), palette.stop(7));
    }

    #[test]
    fn test_colors_in_unit_range() {
        for palette in [Palette::Emerald, Palette::Gold, Palette::Crimson, Palette::Accent] {
            for c in palette.colors() {
                assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            }
        }
    }
}
