use glam::{Affine3A, Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;
use crate::errors::Result;
use crate::transform::quaternion_slerp;

/// A pose curve: three independent keyframe tracks over translation, rotation
/// and scale, sampled at a shared time and composed into one matrix.
///
/// Translation and scale blend linearly; rotation blends with shortest-path
/// slerp. The sub-tracks may have different key counts and spacings, and each
/// loops over its own duration.
#[derive(Debug, Clone)]
pub struct TransformTrack {
    translation: KeyframeTrack<Vec3>,
    rotation: KeyframeTrack<Quat>,
    scale: KeyframeTrack<Vec3>,
}

impl TransformTrack {
    /// Builds a pose track from per-channel `(time, value)` pairs.
    ///
    /// Each channel is validated like [`KeyframeTrack::new`].
    pub fn new(
        translation_keys: impl IntoIterator<Item = (f32, Vec3)>,
        rotation_keys: impl IntoIterator<Item = (f32, Quat)>,
        scale_keys: impl IntoIterator<Item = (f32, Vec3)>,
    ) -> Result<Self> {
        Ok(Self {
            translation: KeyframeTrack::new(translation_keys)?,
            rotation: KeyframeTrack::with_blend(rotation_keys, quaternion_slerp)?,
            scale: KeyframeTrack::new(scale_keys)?,
        })
    }

    /// Builds a pose track from already-constructed channel tracks.
    #[must_use]
    pub fn from_tracks(
        translation: KeyframeTrack<Vec3>,
        rotation: KeyframeTrack<Quat>,
        scale: KeyframeTrack<Vec3>,
    ) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Longest channel duration.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.translation
            .duration()
            .max(self.rotation.duration())
            .max(self.scale.duration())
    }

    /// Samples all three channels at `time` and composes the pose in T·R·S
    /// order: scale in local space first, then rotation, then translation in
    /// the parent frame.
    #[must_use]
    pub fn sample(&self, time: f32) -> Affine3A {
        let translation = self.translation.sample(time);
        let rotation = self.rotation.sample(time);
        let scale = self.scale.sample(time);
        Affine3A::from_scale_rotation_translation(scale, rotation, translation)
    }
}
