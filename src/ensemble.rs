//! Ensemble batches.
//!
//! An ensemble owns a fixed number of particles sharing one visual treatment,
//! plus a pose buffer of the same length that is rewritten in place every
//! tick. Steady-state updates allocate nothing: layouts are immutable,
//! runtimes and poses are preallocated at construction, and the gesture state
//! is read once per tick so the per-particle loop stays branch-light even at
//! eight thousand particles.
//!
//! Index order is semantic. A particle's position in the sequence is its slot
//! on the ribbon helix and its angular slot on the scatter ring, which is why
//! ensembles are constructed over explicit slot sequences rather than bare
//! counts - the five emblem sub-batches interleave strided slots over one
//! shared ribbon so the helix stays continuous across symbols.

use crate::error::ConfigError;
use crate::gesture::GestureState;
use crate::interp;
use crate::kind::{EnsembleKind, KindParams};
use crate::layout::{LayoutContext, ParticleLayout, ParticleRuntime};
use crate::targets;
use crate::time::Tick;
use crate::visuals::Pose;
use glam::Vec3;

/// A fixed-size batch of particles of one kind.
pub struct Ensemble {
    kind: EnsembleKind,
    params: KindParams,
    layouts: Vec<ParticleLayout>,
    runtimes: Vec<ParticleRuntime>,
    poses: Vec<Pose>,
}

impl Ensemble {
    /// Create an ensemble of `count` particles over slots `0..count`.
    ///
    /// A count of zero is a valid, inert ensemble that emits no poses.
    pub fn new(kind: EnsembleKind, count: u32, seed: u64) -> Result<Self, ConfigError> {
        Self::with_params(kind, kind.params(), count, seed)
    }

    /// Create an ensemble with custom behavior parameters.
    ///
    /// Parameters are validated up front; a rejected set never touches any
    /// sibling batch.
    pub fn with_params(
        kind: EnsembleKind,
        params: KindParams,
        count: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::from_slots(kind, params, (0..count).collect(), count, seed))
    }

    /// Create an ensemble over the strided slot sequence
    /// `offset, offset + stride, ...` below `total`.
    ///
    /// Used for emblem sub-batches: five batches with stride 5 and offsets
    /// 0..5 share one `total`-slot ribbon, so each batch renders with its own
    /// symbol while the combined helix stays continuous.
    pub fn strided(
        kind: EnsembleKind,
        offset: u32,
        stride: u32,
        total: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        if offset >= stride {
            return Err(ConfigError::OffsetOutsideStride { offset, stride });
        }
        let params = kind.params();
        params.validate()?;

        let slots: Vec<u32> = (offset..total).step_by(stride as usize).collect();
        Ok(Self::from_slots(kind, params, slots, total, seed))
    }

    fn from_slots(
        kind: EnsembleKind,
        params: KindParams,
        slots: Vec<u32>,
        total: u32,
        seed: u64,
    ) -> Self {
        let mut layouts = Vec::with_capacity(slots.len());
        let mut runtimes = Vec::with_capacity(slots.len());
        let mut poses = Vec::with_capacity(slots.len());

        for slot in slots {
            let mut ctx = LayoutContext::new(seed, slot, total);
            let (layout, runtime) = ParticleLayout::generate(kind, &mut ctx);

            let mut pose = Pose::with_tint(layout.tint);
            pose.position = runtime.position;
            pose.scale = params.base_scale;
            pose.glow = params.glow;

            layouts.push(layout);
            runtimes.push(runtime);
            poses.push(pose);
        }

        Self {
            kind,
            params,
            layouts,
            runtimes,
            poses,
        }
    }

    /// Visual kind of this batch.
    #[inline]
    pub fn kind(&self) -> EnsembleKind {
        self.kind
    }

    /// Behavior parameters of this batch.
    #[inline]
    pub fn params(&self) -> &KindParams {
        &self.params
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether this batch is empty (valid and inert).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Whether the renderer should orient this batch toward the fixed
    /// viewpoint instead of using per-pose rotation.
    #[inline]
    pub fn billboard(&self) -> bool {
        self.params.billboard
    }

    /// The pose records written by the last update, one per particle.
    #[inline]
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Immutable per-particle layouts.
    #[inline]
    pub fn layouts(&self) -> &[ParticleLayout] {
        &self.layouts
    }

    /// Current particle positions (runtime view, same order as `poses`).
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.runtimes.iter().map(|r| r.position)
    }

    /// Advance every particle one tick and rewrite the pose buffer.
    ///
    /// The gesture state is consumed once, up front; each match arm runs the
    /// whole batch under one target rule.
    pub fn update(&mut self, state: GestureState, tick: Tick) {
        let params = &self.params;
        let elapsed = tick.elapsed;

        match state {
            GestureState::Closed => {
                for ((layout, runtime), pose) in self
                    .layouts
                    .iter()
                    .zip(self.runtimes.iter_mut())
                    .zip(self.poses.iter_mut())
                {
                    let target = targets::formed_target(params, layout, elapsed);
                    advance(params, layout, runtime, pose, target, params.rate, tick);
                }
            }
            GestureState::Open | GestureState::Unknown => {
                for ((layout, runtime), pose) in self
                    .layouts
                    .iter()
                    .zip(self.runtimes.iter_mut())
                    .zip(self.poses.iter_mut())
                {
                    let target = targets::scatter_target(params, layout, elapsed);
                    advance(params, layout, runtime, pose, target, params.rate, tick);
                }
            }
            GestureState::Pinch => {
                for ((layout, runtime), pose) in self
                    .layouts
                    .iter()
                    .zip(self.runtimes.iter_mut())
                    .zip(self.poses.iter_mut())
                {
                    let target = targets::settle_target(params, layout, runtime.position, elapsed);
                    advance(params, layout, runtime, pose, target, params.settle_rate, tick);
                }
            }
        }
    }
}

/// Shared tail of the update loop: one smoothing step, rotation policy, and
/// the pose write.
#[inline]
fn advance(
    params: &KindParams,
    layout: &ParticleLayout,
    runtime: &mut ParticleRuntime,
    pose: &mut Pose,
    target: Vec3,
    base_rate: f32,
    tick: Tick,
) {
    runtime.position = interp::step(
        runtime.position,
        target,
        base_rate * layout.speed_scale,
        tick.delta,
    );
    runtime.rotation = targets::advance_rotation(params, layout, runtime.rotation, tick);

    pose.position = runtime.position;
    pose.rotation = runtime.rotation;
    pose.scale = targets::resolve_scale(params, layout, tick.elapsed);
    pose.glow = targets::resolve_glow(params, layout, tick.elapsed);
}
