//! The draw contract between the scene graph and its drawable leaves.
//!
//! Drawables are external collaborators: the scene resolves transforms and
//! assembles a [`UniformSet`] per leaf, the drawable owns its GPU submission.
//! The per-frame external inputs (view/projection from the camera collaborator
//! plus any named extras such as a light direction) travel in a [`Frame`].

use glam::{Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;

/// Uniform name under which a skinned leaf receives its bone matrix array.
pub const JOINT_MATRICES_UNIFORM: &str = "joint_matrices";

/// A value deliverable as a shader uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    /// Array-valued uniform, e.g. the per-bone skinning matrices.
    Mat4Array(Vec<Mat4>),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

impl From<Vec<Mat4>> for UniformValue {
    fn from(v: Vec<Mat4>) -> Self {
        Self::Mat4Array(v)
    }
}

/// Everything a drawable receives for one draw call: the three standard
/// matrices plus arbitrary named extras.
#[derive(Debug, Clone)]
pub struct UniformSet {
    /// Accumulated world transform of the parent node chain.
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// Named extra uniforms: frame-wide extras plus, for skinned leaves,
    /// [`JOINT_MATRICES_UNIFORM`].
    pub extra: FxHashMap<String, UniformValue>,
}

impl UniformSet {
    /// Looks up a named extra uniform.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.extra.get(name)
    }

    /// The skinning matrix array, if this draw is skinned.
    #[must_use]
    pub fn joint_matrices(&self) -> Option<&[Mat4]> {
        match self.extra.get(JOINT_MATRICES_UNIFORM) {
            Some(UniformValue::Mat4Array(matrices)) => Some(matrices),
            _ => None,
        }
    }
}

/// Per-frame inputs supplied by the external render loop.
#[derive(Debug, Clone)]
pub struct Frame {
    pub view: Mat4,
    pub projection: Mat4,
    /// Named uniforms forwarded to every drawable this frame.
    pub uniforms: FxHashMap<String, UniformValue>,
}

impl Frame {
    #[must_use]
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view,
            projection,
            uniforms: FxHashMap::default(),
        }
    }

    /// Adds a named frame-wide uniform, builder style.
    #[must_use]
    pub fn with_uniform(mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.uniforms.insert(name.into(), value.into());
        self
    }
}

/// A scene-graph leaf that issues its own draw call.
///
/// Implementors receive the resolved uniforms and perform GPU submission
/// however they see fit; the scene never looks inside.
pub trait Drawable {
    fn draw(&mut self, uniforms: &UniformSet);
}
