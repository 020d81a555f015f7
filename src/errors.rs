//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ArmatureError`] covers all failure modes:
//! - Malformed keyframe data rejected at track construction
//! - Skin construction with inconsistent bone/bind-pose data
//! - Cyclic scene graphs caught during traversal
//!
//! All of these indicate authoring bugs. They are raised at construction or
//! on the first traversal that hits them, and never retried.
//!
//! # Usage
//!
//! Fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ArmatureError>`.

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArmatureError {
    // ========================================================================
    // Keyframe Track Errors
    // ========================================================================
    /// A keyframe track was constructed with no samples.
    #[error("keyframe track has no samples")]
    EmptyTrack,

    /// A keyframe time is NaN or infinite.
    #[error("keyframe time is not finite: {0}")]
    NonFiniteKeyTime(f32),

    /// Two keyframes share the same time. Times must be strictly increasing
    /// once sorted, otherwise the bracketing fraction divides by zero.
    #[error("duplicate keyframe time: {0}")]
    DuplicateKeyTime(f32),

    // ========================================================================
    // Skinning Errors
    // ========================================================================
    /// A skin was constructed with different numbers of bones and bind-pose
    /// offset matrices.
    #[error("skin has {bones} bones but {offsets} bind-pose offset matrices")]
    BindPoseMismatch {
        /// Number of bone node references supplied.
        bones: usize,
        /// Number of inverse bind-pose matrices supplied.
        offsets: usize,
    },

    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// A traversal exceeded the maximum hierarchy depth, which means the
    /// node graph contains a cycle.
    #[error("scene graph traversal exceeded depth {max_depth}: node hierarchy contains a cycle")]
    GraphCycle {
        /// The depth limit that was hit.
        max_depth: usize,
    },
}

/// Alias for `Result<T, ArmatureError>`.
pub type Result<T> = std::result::Result<T, ArmatureError>;
