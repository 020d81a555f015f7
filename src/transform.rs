//! Affine transform helpers.
//!
//! Pure, stateless constructors for the 4×4 affine matrices the scene graph
//! composes, plus the interpolation primitives the keyframe tracks plug in as
//! blend strategies. Matrix composition is parent-to-child left
//! multiplication: `parent * child` applies the child transform first in
//! object space, the standard model-matrix convention.

use glam::{Affine3A, Quat, Vec3};

/// Threshold above which two quaternions are considered nearly parallel and
/// slerp falls back to normalized linear interpolation.
const SLERP_DOT_THRESHOLD: f32 = 1.0 - 1e-5;

/// Returns the identity transform.
#[inline]
#[must_use]
pub fn identity() -> Affine3A {
    Affine3A::IDENTITY
}

/// Builds a translation by `v`.
#[inline]
#[must_use]
pub fn translate(v: Vec3) -> Affine3A {
    Affine3A::from_translation(v)
}

/// Builds a per-axis scale by `v`.
#[inline]
#[must_use]
pub fn scale(v: Vec3) -> Affine3A {
    Affine3A::from_scale(v)
}

/// Builds a uniform scale by `s`.
#[inline]
#[must_use]
pub fn scale_uniform(s: f32) -> Affine3A {
    Affine3A::from_scale(Vec3::splat(s))
}

/// Builds a rotation of `degrees` around `axis`.
///
/// The axis does not need to be normalized. A zero-length axis yields the
/// identity.
#[must_use]
pub fn rotate(axis: Vec3, degrees: f32) -> Affine3A {
    match axis.try_normalize() {
        Some(axis) => Affine3A::from_axis_angle(axis, degrees.to_radians()),
        None => Affine3A::IDENTITY,
    }
}

/// Linear interpolation `a + t * (b - a)`.
///
/// Unclamped: `t` outside `[0, 1]` extrapolates. Track sampling always passes
/// a bracketing fraction in `[0, 1)`.
#[inline]
#[must_use]
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Shortest-path spherical interpolation between unit quaternions.
///
/// When the endpoints' dot product is negative, `b` is negated so the
/// interpolation takes the short arc. Nearly parallel endpoints fall back to
/// normalized linear interpolation, where the spherical weights would divide
/// by a vanishing sine.
#[must_use]
pub fn quaternion_slerp(a: Quat, b: Quat, t: f32) -> Quat {
    let mut dot = a.dot(b);
    let mut end = b;
    if dot < 0.0 {
        dot = -dot;
        end = -b;
    }

    if dot > SLERP_DOT_THRESHOLD {
        return (a + (end - a) * t).normalize();
    }

    let theta = dot.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;
    (a * wa + end * wb).normalize()
}

/// Converts a unit quaternion to its rotation matrix.
#[inline]
#[must_use]
pub fn quaternion_matrix(q: Quat) -> Affine3A {
    Affine3A::from_quat(q)
}
