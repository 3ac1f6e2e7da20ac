//! Error types for choreo.
//!
//! This module provides error types for engine construction and per-tick
//! validation. The engine itself is closed-form numeric computation with no
//! I/O, so the taxonomy is deliberately narrow: bad configuration is rejected
//! at build time, bad clock input is rejected at tick entry, and everything
//! else (empty ensembles, empty attachment sequences) is a valid inert state.

use std::fmt;

/// Errors that can occur while building an engine or ensemble.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A kind parameter that must be finite and positive was not.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A strided ensemble was asked for with a zero stride.
    ZeroStride,
    /// A strided ensemble's offset does not fall inside its stride.
    OffsetOutsideStride {
        /// The rejected offset.
        offset: u32,
        /// The stride it must be smaller than.
        stride: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { name, value } => {
                write!(
                    f,
                    "Invalid ensemble parameter {}: {} (must be finite and positive)",
                    name, value
                )
            }
            ConfigError::ZeroStride => write!(f, "Strided ensemble requires a stride of at least 1"),
            ConfigError::OffsetOutsideStride { offset, stride } => {
                write!(f, "Strided ensemble offset {} must be less than stride {}", offset, stride)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur at tick entry.
///
/// Both delta variants are raised before any particle is touched, so a
/// rejected tick leaves every ensemble exactly as the previous tick left it.
#[derive(Debug, Clone, PartialEq)]
pub enum TickError {
    /// Delta time was NaN or infinite. Proceeding would propagate NaN into
    /// every particle position.
    NonFiniteDelta(f32),
    /// Delta time was negative. The frame clock contract is monotonic
    /// elapsed time and non-negative deltas.
    NegativeDelta(f32),
    /// Elapsed time was NaN or infinite.
    NonFiniteElapsed(f32),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::NonFiniteDelta(d) => write!(f, "Tick rejected: delta time {} is not finite", d),
            TickError::NegativeDelta(d) => write!(f, "Tick rejected: delta time {} is negative", d),
            TickError::NonFiniteElapsed(t) => {
                write!(f, "Tick rejected: elapsed time {} is not finite", t)
            }
        }
    }
}

impl std::error::Error for TickError {}
