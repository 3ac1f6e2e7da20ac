//! Per-particle layout construction.
//!
//! Layouts are the immutable half of a particle: home position, scatter slot,
//! tint, and the small set of randomized constants that keep thousands of
//! particles from moving in lockstep. They are created once when an ensemble
//! is instantiated, from a caller-supplied seed, and never mutated - repeated
//! construction with the same `(seed, slot, total)` yields identical layouts,
//! which is what makes the engine testable headlessly.

use crate::geometry::{cone_volume_sample, spiral_ribbon_sample, SpiralDescriptor};
use crate::kind::{EnsembleKind, Formation};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Context handed to layout generation, one per particle.
///
/// Owns a `SmallRng` seeded deterministically from the ensemble seed and the
/// particle's slot, so every random draw is reproducible.
pub struct LayoutContext {
    /// Global ribbon/scatter slot of the particle being placed.
    pub slot: u32,
    /// Total slot count the ensemble is parametrized over.
    pub total: u32,
    rng: SmallRng,
}

impl LayoutContext {
    /// Create a context for one particle.
    pub fn new(seed: u64, slot: u32, total: u32) -> Self {
        // Golden-ratio mixing keeps neighboring slots from drawing
        // correlated streams out of SmallRng.
        let mixed = seed ^ (slot as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            slot,
            total,
            rng: SmallRng::seed_from_u64(mixed),
        }
    }

    /// Normalized position along the slot sequence (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.slot as f32 / self.total.max(1) as f32
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside an axis-aligned box with the given half extents.
    pub fn random_in_box(&mut self, half: Vec3) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-half.x..half.x),
            self.rng.gen_range(-half.y..half.y),
            self.rng.gen_range(-half.z..half.z),
        )
    }

    /// Access the underlying RNG for one-off draws.
    #[inline]
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

/// Immutable per-particle data, fixed at ensemble creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleLayout {
    /// Home position in the formed state (spin not applied).
    pub home: Vec3,
    /// Ribbon slot descriptor; `None` for cone kinds.
    pub spiral: Option<SpiralDescriptor>,
    /// Static scatter slot angle.
    pub slot_angle: f32,
    /// Phase used by scatter bob and blink, derived from the slot index.
    pub bob_phase: f32,
    /// Tint, drawn once from the kind's palette.
    pub tint: Vec3,
    /// Blink speed; 0.0 for steady kinds.
    pub blink_speed: f32,
    /// Randomized blink phase offset.
    pub blink_phase: f32,
    /// Per-particle multiplier on the interpolation rate.
    pub speed_scale: f32,
    /// Small per-particle offset on the scatter angle; zero for ribbon kinds
    /// so scattered ribbons keep their wide deterministic spread.
    pub angle_offset: f32,
}

/// Mutable per-particle state, advanced every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRuntime {
    /// Current position.
    pub position: Vec3,
    /// Current Euler rotation.
    pub rotation: Vec3,
}

impl ParticleLayout {
    /// Generate the layout/runtime pair for one particle.
    ///
    /// The runtime starts at a randomized position distinct from home so the
    /// first formation is itself animated rather than popping into place.
    pub fn generate(kind: EnsembleKind, ctx: &mut LayoutContext) -> (ParticleLayout, ParticleRuntime) {
        let params = kind.params();

        let (home, spiral, start_half) = match params.formation {
            Formation::Cone { base_radius } => {
                let home = cone_volume_sample(ctx.rng(), base_radius);
                (home, None, Vec3::splat(5.0))
            }
            Formation::Spiral { base_radius, turns, phase } => {
                let desc = spiral_ribbon_sample(ctx.slot, ctx.total, base_radius, turns, phase);
                (desc.position(0.0), Some(desc), Vec3::new(7.5, 7.5, 5.0))
            }
        };

        let slot_angle = ctx.progress() * PI * params.slot_turns;
        let angle_offset = match params.formation {
            Formation::Cone { .. } => ctx.random_range(0.0, 0.2),
            Formation::Spiral { .. } => 0.0,
        };

        let tint = match kind {
            EnsembleKind::Emblem(symbol) => symbol.tint(),
            _ => kind.palette().sample(ctx.rng()),
        };

        let blink_speed = match params.blink {
            Some((lo, hi)) => ctx.random_range(lo, hi),
            None => 0.0,
        };

        let layout = ParticleLayout {
            home,
            spiral,
            slot_angle,
            bob_phase: ctx.slot as f32,
            tint,
            blink_speed,
            blink_phase: ctx.random_range(0.0, TAU),
            speed_scale: ctx.random_range(0.9, 1.1),
            angle_offset,
        };

        let runtime = ParticleRuntime {
            position: ctx.random_in_box(start_half),
            rotation: Vec3::ZERO,
        };

        (layout, runtime)
    }
}
