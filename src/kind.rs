//! Ensemble kinds and their behavior parameters.
//!
//! Behavior differences between the visual treatments are parametric, not
//! structural: every kind resolves targets with the same three-state table
//! and differs only in radii, rates and flags. [`EnsembleKind`] is therefore
//! a flat enum dispatching into a [`KindParams`] value, with one preset
//! constructor per kind.

use crate::error::ConfigError;
use crate::visuals::Palette;
use glam::Vec3;
use std::f32::consts::PI;

/// Emblem symbol identity.
///
/// The engine keeps five emblem sub-batches, one per symbol, so the renderer
/// can bind one texture per batch. Tint is fixed per symbol, matching the
/// texture rather than randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Snowflake,
    Gift,
    Stocking,
    Bell,
    Star,
}

impl Symbol {
    /// All symbols, in sub-batch order.
    pub const ALL: [Symbol; 5] = [
        Symbol::Snowflake,
        Symbol::Gift,
        Symbol::Stocking,
        Symbol::Bell,
        Symbol::Star,
    ];

    /// Fixed tint for this symbol's batch.
    pub fn tint(self) -> Vec3 {
        Palette::Accent.stop(self as usize)
    }
}

/// Visual treatment of an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnsembleKind {
    /// Dense cone body.
    Body,
    /// Sparse blinking sparkles filling the cone volume.
    VolumeSparkle,
    /// Blinking sparkles tracing the ribbon helix.
    RibbonSparkle,
    /// Lanterns hung along their own helix band.
    Lantern,
    /// Flat symbol panels on the ribbon, one sub-batch per symbol.
    Emblem(Symbol),
}

impl EnsembleKind {
    /// Behavior parameters for this kind.
    pub fn params(self) -> KindParams {
        match self {
            EnsembleKind::Body => KindParams::body(),
            EnsembleKind::VolumeSparkle => KindParams::volume_sparkle(),
            EnsembleKind::RibbonSparkle => KindParams::ribbon_sparkle(),
            EnsembleKind::Lantern => KindParams::lantern(),
            EnsembleKind::Emblem(_) => KindParams::emblem(),
        }
    }

    /// Tint palette for this kind.
    pub fn palette(self) -> Palette {
        match self {
            EnsembleKind::Body => Palette::Emerald,
            EnsembleKind::VolumeSparkle | EnsembleKind::RibbonSparkle => Palette::Gold,
            EnsembleKind::Lantern => Palette::Crimson,
            EnsembleKind::Emblem(_) => Palette::Accent,
        }
    }
}

/// Home formation of a kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formation {
    /// Randomized point inside the cone volume.
    Cone {
        /// Cone base radius.
        base_radius: f32,
    },
    /// Deterministic slot on a helical ribbon.
    Spiral {
        /// Ribbon base radius (taper-scaled with height).
        base_radius: f32,
        /// Full rotations over the ribbon length.
        turns: f32,
        /// Constant angular offset so interleaved ribbons stay apart.
        phase: f32,
    },
}

/// Per-kind rotation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tumble {
    /// No rotation.
    #[default]
    None,
    /// Slow spin around X and Z, 1 rad/s each.
    Spin,
    /// Pendulum swing around Z plus slow Y rotation (lanterns).
    Swing,
}

/// Behavior parameters shared by every particle of an ensemble.
///
/// The preset constructors carry the tuned constants for the built-in kinds.
/// The per-kind scatter `slot_turns` multipliers (2 for cone kinds, 18 for
/// ribbon kinds) are tuning values, not invariants - ribbon particles just
/// need to separate far from their home ordering when scattered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindParams {
    /// Home formation.
    pub formation: Formation,
    /// Interpolation rate toward the target, per second.
    pub rate: f32,
    /// Interpolation rate while settling under pinch.
    pub settle_rate: f32,
    /// Formed-ribbon spin speed, radians per second. Unused by cone kinds.
    pub spin: f32,
    /// Scatter ring radius.
    pub scatter_radius: f32,
    /// Scatter ring drift speed, radians per second.
    pub scatter_drift: f32,
    /// Scatter slot angle multiplier: slot = (index / total) * PI * slot_turns.
    pub slot_turns: f32,
    /// Vertical bob amplitude while scattered.
    pub bob_amplitude: f32,
    /// Vertical jitter amplitude while settling (at most 0.01).
    pub jitter_amplitude: f32,
    /// Vertical jitter frequency while settling.
    pub jitter_speed: f32,
    /// Whether this batch always faces the fixed viewpoint.
    pub billboard: bool,
    /// Base uniform scale.
    pub base_scale: f32,
    /// Scale pulse amplitude (0 disables the pulse).
    pub pulse_amplitude: f32,
    /// Scale pulse frequency.
    pub pulse_speed: f32,
    /// Steady emissive intensity for non-blinking kinds.
    pub glow: f32,
    /// Blink speed range; `None` keeps the steady glow.
    pub blink: Option<(f32, f32)>,
    /// Rotation policy.
    pub tumble: Tumble,
}

impl KindParams {
    /// Dense cone body: fast convergence, tight scatter ring, tumbling.
    pub fn body() -> Self {
        Self {
            formation: Formation::Cone { base_radius: 3.8 },
            rate: 2.5,
            settle_rate: 1.0,
            spin: 0.0,
            scatter_radius: 8.0,
            scatter_drift: 0.1,
            slot_turns: 2.0,
            bob_amplitude: 4.0,
            jitter_amplitude: 0.005,
            jitter_speed: 1.0,
            billboard: false,
            base_scale: 1.0,
            pulse_amplitude: 0.0,
            pulse_speed: 0.0,
            glow: 1.2,
            blink: None,
            tumble: Tumble::Spin,
        }
    }

    /// Volume sparkles: slightly wider cone, wide scatter, blinking.
    pub fn volume_sparkle() -> Self {
        Self {
            formation: Formation::Cone { base_radius: 3.9 },
            rate: 2.0,
            settle_rate: 1.0,
            spin: 0.0,
            scatter_radius: 12.0,
            scatter_drift: 0.15,
            slot_turns: 2.0,
            bob_amplitude: 4.0,
            jitter_amplitude: 0.005,
            jitter_speed: 1.0,
            billboard: false,
            base_scale: 1.0,
            pulse_amplitude: 0.0,
            pulse_speed: 0.0,
            glow: 1.0,
            blink: Some((2.0, 7.0)),
            tumble: Tumble::None,
        }
    }

    /// Ribbon sparkles: intermixed with the emblem helix, blinking.
    pub fn ribbon_sparkle() -> Self {
        Self {
            formation: Formation::Spiral {
                base_radius: 4.6,
                turns: 6.0,
                phase: PI,
            },
            rate: 1.8,
            settle_rate: 1.0,
            spin: 0.2,
            scatter_radius: 13.0,
            scatter_drift: 0.3,
            slot_turns: 18.0,
            bob_amplitude: 5.0,
            jitter_amplitude: 0.01,
            jitter_speed: 2.0,
            billboard: false,
            base_scale: 1.0,
            pulse_amplitude: 0.0,
            pulse_speed: 0.0,
            glow: 1.0,
            blink: Some((3.0, 8.0)),
            tumble: Tumble::None,
        }
    }

    /// Lanterns: outermost helix band, swinging as they move.
    pub fn lantern() -> Self {
        Self {
            formation: Formation::Spiral {
                base_radius: 4.8,
                turns: 6.0,
                phase: 0.5,
            },
            rate: 1.5,
            settle_rate: 1.0,
            spin: 0.2,
            scatter_radius: 14.0,
            scatter_drift: 0.4,
            slot_turns: 18.0,
            bob_amplitude: 6.0,
            jitter_amplitude: 0.01,
            jitter_speed: 2.0,
            billboard: false,
            base_scale: 1.0,
            pulse_amplitude: 0.0,
            pulse_speed: 0.0,
            glow: 2.0,
            blink: None,
            tumble: Tumble::Swing,
        }
    }

    /// Emblem panels: billboarded, scale-pulsing ribbon slots.
    pub fn emblem() -> Self {
        Self {
            formation: Formation::Spiral {
                base_radius: 4.5,
                turns: 6.0,
                phase: 0.0,
            },
            rate: 2.0,
            settle_rate: 1.0,
            spin: 0.2,
            scatter_radius: 10.0,
            scatter_drift: 0.5,
            slot_turns: 18.0,
            bob_amplitude: 5.0,
            jitter_amplitude: 0.01,
            jitter_speed: 2.0,
            billboard: true,
            base_scale: 0.5,
            pulse_amplitude: 0.1,
            pulse_speed: 3.0,
            glow: 0.8,
            blink: None,
            tumble: Tumble::None,
        }
    }

    /// Reject parameter sets the resolvers cannot safely run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
            Ok(())
        }
        fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
            Ok(())
        }

        positive("rate", self.rate)?;
        positive("settle_rate", self.settle_rate)?;
        positive("scatter_radius", self.scatter_radius)?;
        positive("base_scale", self.base_scale)?;
        non_negative("spin", self.spin)?;
        non_negative("scatter_drift", self.scatter_drift)?;
        non_negative("slot_turns", self.slot_turns)?;
        non_negative("bob_amplitude", self.bob_amplitude)?;
        non_negative("jitter_speed", self.jitter_speed)?;
        non_negative("pulse_amplitude", self.pulse_amplitude)?;
        non_negative("pulse_speed", self.pulse_speed)?;
        non_negative("glow", self.glow)?;

        // Settling must read as frozen, not drifting.
        if !self.jitter_amplitude.is_finite() || !(0.0..=0.01).contains(&self.jitter_amplitude) {
            return Err(ConfigError::InvalidParameter {
                name: "jitter_amplitude",
                value: self.jitter_amplitude,
            });
        }

        match self.formation {
            Formation::Cone { base_radius } => positive("base_radius", base_radius)?,
            Formation::Spiral { base_radius, turns, phase } => {
                positive("base_radius", base_radius)?;
                positive("turns", turns)?;
                if !phase.is_finite() {
                    return Err(ConfigError::InvalidParameter { name: "phase", value: phase });
                }
            }
        }

        if let Some((lo, hi)) = self.blink {
            positive("blink.lo", lo)?;
            positive("blink.hi", hi)?;
            if hi < lo {
                return Err(ConfigError::InvalidParameter { name: "blink.hi", value: hi });
            }
        }

        Ok(())
    }
}
