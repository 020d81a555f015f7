//! Keyframe animation: generic time→value tracks and the combined
//! translation/rotation/scale pose track.

pub mod tracks;
pub mod transform_track;
pub mod values;

pub use tracks::KeyframeTrack;
pub use transform_track::TransformTrack;
pub use values::{BlendFn, Interpolatable, step};
