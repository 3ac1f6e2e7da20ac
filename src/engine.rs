//! Choreography engine: builder, per-tick orchestration, frame output.
//!
//! The engine owns the full cast - the cone body, both sparkle ensembles,
//! the lantern band, five emblem sub-batches and the attachment engine - and
//! advances all of them under one gesture-state snapshot per tick. Batches
//! are independent (no batch reads another's output), but they must all see
//! the same state value for a tick or the formations visibly tear apart.
//! Passing the state into [`Engine::tick`] by value gives that snapshot for
//! free, and leaves state lifecycle entirely to the caller.
//!
//! Ensembles share no mutable state with each other, so a host that wants to
//! spread updates across worker threads can do so safely; the engine itself
//! keeps the update single-threaded, which comfortably covers the target
//! population on one core.

use crate::attach::{AttachmentEngine, AttachmentItem, AttachmentPose};
use crate::ensemble::Ensemble;
use crate::error::{ConfigError, TickError};
use crate::gesture::GestureState;
use crate::kind::{EnsembleKind, Symbol};
use crate::time::Tick;
use crate::visuals::{Palette, Pose};
use glam::Vec3;
use log::{debug, trace};

/// Height of the crest above the formation.
const CREST_Y: f32 = 6.5;

/// Builder for a choreography [`Engine`].
///
/// Use method chaining to configure, then call `.build()`.
///
/// # Example
///
/// ```
/// use choreo::prelude::*;
///
/// let mut engine = Choreography::new()
///     .with_seed(7)
///     .with_body_count(256)
///     .build()
///     .unwrap();
///
/// let frame = engine
///     .tick(GestureState::Closed, &[], Tick::new(0.016, 0.016))
///     .unwrap();
/// assert_eq!(frame.ensembles[0].poses().len(), 256);
/// ```
#[derive(Debug, Clone)]
pub struct Choreography {
    seed: u64,
    body_count: u32,
    volume_sparkle_count: u32,
    ribbon_sparkle_count: u32,
    lantern_count: u32,
    emblem_count: u32,
}

impl Choreography {
    /// Create a builder with the default cast sizes.
    pub fn new() -> Self {
        Self {
            seed: 0,
            body_count: 8000,
            volume_sparkle_count: 400,
            ribbon_sparkle_count: 100,
            lantern_count: 10,
            emblem_count: 150,
        }
    }

    /// Seed for every randomized layout draw. Two engines built with the
    /// same configuration and seed behave identically.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of cone-body particles.
    pub fn with_body_count(mut self, count: u32) -> Self {
        self.body_count = count;
        self
    }

    /// Number of volume sparkles.
    pub fn with_volume_sparkle_count(mut self, count: u32) -> Self {
        self.volume_sparkle_count = count;
        self
    }

    /// Number of ribbon sparkles.
    pub fn with_ribbon_sparkle_count(mut self, count: u32) -> Self {
        self.ribbon_sparkle_count = count;
        self
    }

    /// Number of lanterns.
    pub fn with_lantern_count(mut self, count: u32) -> Self {
        self.lantern_count = count;
        self
    }

    /// Total emblem panels, interleaved across the five symbol sub-batches.
    pub fn with_emblem_count(mut self, count: u32) -> Self {
        self.emblem_count = count;
        self
    }

    /// Build the engine. Counts of zero are valid and produce inert batches.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let mut ensembles = Vec::with_capacity(4 + Symbol::ALL.len());

        ensembles.push(Ensemble::new(
            EnsembleKind::Body,
            self.body_count,
            stream_seed(self.seed, 0),
        )?);
        ensembles.push(Ensemble::new(
            EnsembleKind::VolumeSparkle,
            self.volume_sparkle_count,
            stream_seed(self.seed, 1),
        )?);
        ensembles.push(Ensemble::new(
            EnsembleKind::RibbonSparkle,
            self.ribbon_sparkle_count,
            stream_seed(self.seed, 2),
        )?);
        ensembles.push(Ensemble::new(
            EnsembleKind::Lantern,
            self.lantern_count,
            stream_seed(self.seed, 3),
        )?);

        // The five emblem sub-batches stride one shared ribbon so the helix
        // stays continuous while each batch keeps a single symbol texture.
        let stride = Symbol::ALL.len() as u32;
        for (i, symbol) in Symbol::ALL.into_iter().enumerate() {
            ensembles.push(Ensemble::strided(
                EnsembleKind::Emblem(symbol),
                i as u32,
                stride,
                self.emblem_count,
                stream_seed(self.seed, 4 + i as u64),
            )?);
        }

        let total: usize = ensembles.iter().map(Ensemble::len).sum();
        debug!(
            "choreography built: {} particles across {} batches (seed {})",
            total,
            ensembles.len(),
            self.seed
        );

        let mut crest = Pose::with_tint(Palette::Gold.stop(0));
        crest.position = Vec3::new(0.0, CREST_Y, 0.0);
        crest.glow = 2.0;

        Ok(Engine {
            ensembles,
            attachments: AttachmentEngine::new(stream_seed(self.seed, 9)),
            crest,
            last_state: None,
        })
    }
}

impl Default for Choreography {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive an independent seed stream per sub-engine so ensembles do not
/// mirror each other's draws.
fn stream_seed(seed: u64, stream: u64) -> u64 {
    seed ^ (stream + 1).wrapping_mul(0xA076_1D64_78BD_642F)
}

/// One tick's output, borrowed from the engine.
///
/// Valid until the next `tick` call. Ensemble order is fixed: body, volume
/// sparkle, ribbon sparkle, lantern, then the five emblem sub-batches in
/// [`Symbol::ALL`] order.
pub struct Frame<'a> {
    /// All particle batches, each exposing its kind, billboard flag and poses.
    pub ensembles: &'a [Ensemble],
    /// Attachment poses, one per item in the sequence passed to `tick`.
    pub attachments: &'a [AttachmentPose],
    /// The single crest pose above the formation.
    pub crest: Pose,
}

/// The choreography engine.
pub struct Engine {
    ensembles: Vec<Ensemble>,
    attachments: AttachmentEngine,
    crest: Pose,
    last_state: Option<GestureState>,
}

impl Engine {
    /// Advance the whole cast one tick.
    ///
    /// `state` is the tick's gesture snapshot, forwarded unchanged to every
    /// batch; `items` is the current attachment sequence. The tick is
    /// validated before anything moves, so a rejected tick leaves every
    /// particle exactly where the previous tick left it.
    pub fn tick(
        &mut self,
        state: GestureState,
        items: &[AttachmentItem],
        tick: Tick,
    ) -> Result<Frame<'_>, TickError> {
        tick.validate()?;

        if self.last_state != Some(state) {
            trace!("gesture state -> {:?} at t={:.2}", state, tick.elapsed);
            self.last_state = Some(state);
        }

        for ensemble in &mut self.ensembles {
            ensemble.update(state, tick);
        }
        self.attachments.update(state, items, tick);

        // The crest ignores gesture state entirely: a slow spin and bob,
        // purely a function of elapsed time.
        self.crest.position.y = CREST_Y + (tick.elapsed * 2.0).sin() * 0.2;
        self.crest.rotation.y = tick.elapsed * 0.5;

        Ok(self.frame())
    }

    /// The most recent frame without advancing anything.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            ensembles: &self.ensembles,
            attachments: self.attachments.poses(),
            crest: self.crest,
        }
    }

    /// All particle batches, in fixed order.
    #[inline]
    pub fn ensembles(&self) -> &[Ensemble] {
        &self.ensembles
    }

    /// The attachment engine, for focus/cursor inspection.
    #[inline]
    pub fn attachments(&self) -> &AttachmentEngine {
        &self.attachments
    }

    /// Total particle count across all batches.
    pub fn particle_count(&self) -> usize {
        self.ensembles.iter().map(Ensemble::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn small_engine() -> Engine {
        Choreography::new()
            .with_seed(21)
            .with_body_count(16)
            .with_volume_sparkle_count(8)
            .with_ribbon_sparkle_count(8)
            .with_lantern_count(4)
            .with_emblem_count(10)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_produces_fixed_batch_order() {
        let engine = small_engine();
        let kinds: Vec<_> = engine.ensembles().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), 9);
        assert_eq!(kinds[0], EnsembleKind::Body);
        assert_eq!(kinds[3], EnsembleKind::Lantern);
        assert_eq!(kinds[4], EnsembleKind::Emblem(Symbol::Snowflake));
        assert_eq!(kinds[8], EnsembleKind::Emblem(Symbol::Star));
    }

    #[test]
    fn test_emblem_counts_split_across_symbols() {
        let engine = small_engine();
        let emblem_total: usize = engine.ensembles()[4..].iter().map(Ensemble::len).sum();
        assert_eq!(emblem_total, 10);
        assert_eq!(engine.particle_count(), 16 + 8 + 8 + 4 + 10);
    }

    #[test]
    fn test_zero_counts_build_inert_engine() {
        let mut engine = Choreography::new()
            .with_body_count(0)
            .with_volume_sparkle_count(0)
            .with_ribbon_sparkle_count(0)
            .with_lantern_count(0)
            .with_emblem_count(0)
            .build()
            .unwrap();

        let frame = engine.tick(GestureState::Closed, &[], Tick::new(DT, DT)).unwrap();
        assert!(frame.ensembles.iter().all(|e| e.poses().is_empty()));
        assert!(frame.attachments.is_empty());
    }

    #[test]
    fn test_invalid_tick_rejected_before_any_motion() {
        let mut engine = small_engine();
        engine.tick(GestureState::Open, &[], Tick::new(DT, DT)).unwrap();
        let before: Vec<_> = engine.ensembles()[0].poses().to_vec();

        let err = engine.tick(GestureState::Open, &[], Tick::new(1.0, f32::NAN));
        assert!(matches!(err, Err(TickError::NonFiniteDelta(_))));

        let err = engine.tick(GestureState::Open, &[], Tick::new(1.0, -DT));
        assert!(matches!(err, Err(TickError::NegativeDelta(_))));

        assert_eq!(engine.ensembles()[0].poses(), &before[..]);
    }

    #[test]
    fn test_same_seed_same_behavior() {
        let mut a = small_engine();
        let mut b = small_engine();
        for frame in 1..=30 {
            let tick = Tick::new(frame as f32 * DT, DT);
            a.tick(GestureState::Open, &[], tick).unwrap();
            b.tick(GestureState::Open, &[], tick).unwrap();
        }
        assert_eq!(a.ensembles()[0].poses(), b.ensembles()[0].poses());
    }

    #[test]
    fn test_crest_bobs_and_spins_deterministically() {
        let mut engine = small_engine();
        let frame = engine.tick(GestureState::Closed, &[], Tick::new(1.0, DT)).unwrap();
        let expected_y = CREST_Y + (2.0f32).sin() * 0.2;
        assert!((frame.crest.position.y - expected_y).abs() < 1e-5);
        assert!((frame.crest.rotation.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_billboard_flag_only_on_emblems() {
        let engine = small_engine();
        for ensemble in engine.ensembles() {
            let is_emblem = matches!(ensemble.kind(), EnsembleKind::Emblem(_));
            assert_eq!(ensemble.billboard(), is_emblem);
        }
    }
}
