//! Attachment engine for user-supplied memory panels.
//!
//! A small, low-cardinality sibling of the particle ensembles: a sparse set
//! of flat panels (photos) positioned with the same state-driven
//! target-and-interpolate pattern, plus a focus protocol. At most one item is
//! focused at a time; the engine - not the user - selects which, by a
//! rotating cursor that advances once per completed pinch cycle.
//!
//! The engine never creates or destroys items. It consumes the current
//! sequence each tick (append-only from its perspective) and lazily assigns
//! each newly seen item an idle point on a shell around the formation and one
//! of three motion variants, so several focused items in a row do not all
//! move identically.

use crate::gesture::GestureState;
use crate::interp;
use crate::time::Tick;
use glam::Vec3;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Where a focused item is presented, in front of the viewer.
pub const PRESENTATION_POINT: Vec3 = Vec3::new(0.0, 0.0, 5.0);

const FOCUS_SCALE: f32 = 3.0;
const IDLE_SCALE: f32 = 0.8;
const FOCUS_RATE: f32 = 4.0;
const FOCUS_SCALE_RATE: f32 = 3.0;
const IDLE_RATE: f32 = 2.0;

/// A user-supplied memory panel: an image reference plus identity.
///
/// Owned by the external UI; the engine only reads the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentItem {
    /// Stable identity assigned by the owner.
    pub id: u64,
    /// Image reference (URL, path, asset key - opaque to the engine).
    pub image: String,
}

impl AttachmentItem {
    /// Create an item.
    pub fn new(id: u64, image: impl Into<String>) -> Self {
        Self {
            id,
            image: image.into(),
        }
    }
}

/// Focused-item motion, chosen once per item when it is first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MotionVariant {
    /// Hold the presentation point.
    Still,
    /// Small circular drift around it.
    CircleJitter,
    /// Small vertical bounce on it.
    Bounce,
}

/// Engine-side state for one item.
struct Slot {
    idle: Vec3,
    variant: MotionVariant,
    position: Vec3,
    scale: f32,
}

/// One attachment's output for the current tick.
///
/// Attachments always face the fixed viewpoint, so no rotation is emitted;
/// `active` tells the renderer which emphasis level to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentPose {
    /// World position.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Whether this is the focused item.
    pub active: bool,
}

/// State-driven positioning and focus rotation for attachment items.
pub struct AttachmentEngine {
    slots: Vec<Slot>,
    poses: Vec<AttachmentPose>,
    cursor: usize,
    focused: Option<usize>,
    rng: SmallRng,
}

impl AttachmentEngine {
    /// Create an engine with the given seed for idle-point and motion-variant
    /// draws.
    pub fn new(seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            poses: Vec::new(),
            cursor: 0,
            focused: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Index of the currently focused item, if any.
    #[inline]
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Index the next pinch will focus (modulo the sequence length at that
    /// moment).
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pose records from the last update, one per item.
    #[inline]
    pub fn poses(&self) -> &[AttachmentPose] {
        &self.poses
    }

    /// Advance the focus state machine and every item one tick.
    pub fn update(&mut self, state: GestureState, items: &[AttachmentItem], tick: Tick) {
        self.ensure_slots(items.len());

        // Focus transitions first, so this tick's poses already reflect them.
        match state {
            GestureState::Pinch => {
                if self.focused.is_none() && !items.is_empty() {
                    let index = self.cursor % items.len();
                    self.focused = Some(index);
                    debug!("attachment focused: index {} of {}", index, items.len());
                }
            }
            _ => {
                if self.focused.take().is_some() {
                    self.cursor = (self.cursor + 1) % items.len().max(1);
                    debug!("attachment focus released, cursor now {}", self.cursor);
                }
            }
        }

        // Items are append-only by contract, but an out-of-range focus must
        // still never index out of bounds.
        if matches!(self.focused, Some(i) if i >= items.len()) {
            self.focused = None;
        }

        let t = tick.elapsed;
        for (i, slot) in self.slots.iter_mut().take(items.len()).enumerate() {
            let active = self.focused == Some(i);

            if active {
                let mut target = PRESENTATION_POINT;
                match slot.variant {
                    MotionVariant::Still => {}
                    MotionVariant::CircleJitter => {
                        target.x += (t * 10.0).cos() * 0.5;
                        target.y += (t * 10.0).sin() * 0.5;
                    }
                    MotionVariant::Bounce => {
                        target.y += (t * 5.0).sin().abs() * 0.5;
                    }
                }
                slot.position = interp::step(slot.position, target, FOCUS_RATE, tick.delta);
                slot.scale = interp::step_scalar(slot.scale, FOCUS_SCALE, FOCUS_SCALE_RATE, tick.delta);
            } else {
                let mut target = slot.idle;
                if state == GestureState::Open {
                    target.x = (t * 0.2 + i as f32).cos() * 8.0;
                    target.z = (t * 0.2 + i as f32).sin() * 8.0;
                }
                slot.position = interp::step(slot.position, target, IDLE_RATE, tick.delta);
                slot.scale = interp::step_scalar(slot.scale, IDLE_SCALE, IDLE_RATE, tick.delta);
            }

            self.poses[i] = AttachmentPose {
                position: slot.position,
                scale: slot.scale,
                active,
            };
        }
        self.poses.truncate(items.len());
    }

    /// Assign idle points and motion variants to items seen for the first
    /// time. The only allocation in the engine's lifetime happens here, when
    /// the sequence grows.
    fn ensure_slots(&mut self, count: usize) {
        while self.slots.len() < count {
            let idle = self.sample_idle_point();
            let variant = match self.rng.gen_range(0..3) {
                0 => MotionVariant::Still,
                1 => MotionVariant::CircleJitter,
                _ => MotionVariant::Bounce,
            };
            self.slots.push(Slot {
                idle,
                variant,
                position: idle,
                scale: IDLE_SCALE,
            });
            self.poses.push(AttachmentPose {
                position: idle,
                scale: IDLE_SCALE,
                active: false,
            });
        }
        while self.poses.len() < count.min(self.slots.len()) {
            self.poses.push(AttachmentPose {
                position: Vec3::ZERO,
                scale: IDLE_SCALE,
                active: false,
            });
        }
    }

    /// Random idle point on a shell hugging the formation's taper.
    fn sample_idle_point(&mut self) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let y = self.rng.gen_range(-3.0..5.0);
        let r = (1.0 - (y + 4.0) / 10.0) * 5.0;
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    }
}
