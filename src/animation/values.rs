use glam::{Quat, Vec3};

use crate::transform::{lerp, quaternion_slerp};

/// A binary blend strategy: combines two keyframe values at a fraction.
pub type BlendFn<T> = fn(T, T, f32) -> T;

/// Value types a [`KeyframeTrack`](crate::animation::KeyframeTrack) can
/// interpolate, with the linear blend used when no strategy is supplied.
pub trait Interpolatable: Copy {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        lerp(start, end, t)
    }
}

impl Interpolatable for Quat {
    /// "Linear" for rotations is shortest-path slerp.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        quaternion_slerp(start, end, t)
    }
}

/// Step blend: holds the left keyframe value across the whole interval.
#[must_use]
pub fn step<T: Interpolatable>(start: T, _end: T, _t: f32) -> T {
    start
}
