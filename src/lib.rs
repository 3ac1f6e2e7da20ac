//! # Choreo - Particle Choreography Engine
//!
//! A headless, deterministic engine that drives thousands of particles toward
//! discrete target formations - a solid cone, a radial scatter burst, a
//! settled hover - selected by an externally supplied gesture state.
//!
//! Choreo computes transforms; it never renders. Each tick it consumes one
//! [`GestureState`], the current attachment sequence and a [`Tick`] time
//! snapshot, and emits flat pose lists a renderer collaborator can draw
//! however it likes.
//!
//! ## Quick Start
//!
//! ```
//! use choreo::prelude::*;
//!
//! let mut engine = Choreography::new()
//!     .with_seed(42)
//!     .with_body_count(1000)
//!     .build()
//!     .unwrap();
//!
//! let mut clock = Clock::new();
//! clock.set_fixed_delta(Some(1.0 / 60.0));
//!
//! // In your frame loop:
//! let frame = engine
//!     .tick(GestureState::Closed, &[], clock.tick())
//!     .unwrap();
//!
//! for batch in frame.ensembles {
//!     for pose in batch.poses() {
//!         // hand position / rotation / scale / tint / glow to your renderer
//!         let _ = pose.position;
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Gesture states
//!
//! An external classifier supplies one [`GestureState`] per tick:
//!
//! - `Closed` - particles converge onto the formed shape (cone body plus
//!   spinning ribbon helices)
//! - `Open` / `Unknown` - particles disperse into slow orbiting scatter rings
//! - `Pinch` - particles settle in place while the attachment engine presents
//!   the next memory panel
//!
//! ### Ensembles
//!
//! Particles are grouped into fixed-size batches sharing one visual
//! treatment: [`EnsembleKind::Body`], [`EnsembleKind::VolumeSparkle`],
//! [`EnsembleKind::RibbonSparkle`], [`EnsembleKind::Lantern`] and five
//! [`EnsembleKind::Emblem`] sub-batches keyed by [`Symbol`]. Behavior
//! differences are parametric ([`KindParams`]), not structural.
//!
//! ### Determinism
//!
//! All randomness happens at construction time from a caller-supplied seed.
//! Two engines built with the same configuration and fed the same ticks
//! produce identical frames, which is what makes the engine testable without
//! a renderer.
//!
//! ### Attachments
//!
//! User-supplied photo panels ride along: idle on a shell around the
//! formation, and while the gesture is a pinch, one item at a time is
//! presented front and center, rotating through the sequence across pinch
//! cycles. See [`AttachmentEngine`].

pub mod attach;
pub mod ensemble;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod interp;
pub mod kind;
pub mod layout;
pub mod targets;
pub mod time;
pub mod visuals;

pub use attach::{AttachmentEngine, AttachmentItem, AttachmentPose};
pub use ensemble::Ensemble;
pub use engine::{Choreography, Engine, Frame};
pub use error::{ConfigError, TickError};
pub use gesture::GestureState;
pub use glam::Vec3;
pub use kind::{EnsembleKind, Formation, KindParams, Symbol, Tumble};
pub use layout::{ParticleLayout, ParticleRuntime};
pub use time::{Clock, Tick};
pub use visuals::{Palette, Pose};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```
/// use choreo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attach::{AttachmentEngine, AttachmentItem, AttachmentPose};
    pub use crate::engine::{Choreography, Engine, Frame};
    pub use crate::ensemble::Ensemble;
    pub use crate::error::{ConfigError, TickError};
    pub use crate::gesture::GestureState;
    pub use crate::kind::{EnsembleKind, KindParams, Symbol};
    pub use crate::time::{Clock, Tick};
    pub use crate::visuals::{Palette, Pose};
    pub use crate::Vec3;
}
