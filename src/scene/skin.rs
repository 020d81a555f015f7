use glam::{Affine3A, Mat4};
use slotmap::SlotMap;

use crate::errors::{ArmatureError, Result};
use crate::scene::node::Node;
use crate::scene::NodeKey;

/// Linear-blend skinning adapter: turns per-bone world transforms into the
/// per-bone matrix array the vertex shader consumes.
///
/// Bones are weak references into the scene's node arena (the skin never owns
/// them), parallel to an owned, immutable list of inverse bind-pose matrices.
/// Per-vertex bone indices authored in the mesh index into the same sequence,
/// so bone order is preserved end to end.
///
/// Skin matrices cannot be cached across frames: any bone may move, so they
/// are recomputed from the current world transforms on every draw.
#[derive(Debug, Clone)]
pub struct Skin {
    bones: Vec<NodeKey>,
    inverse_bind_matrices: Vec<Affine3A>,
}

impl Skin {
    /// Creates a skin from bone node references and the matching inverse
    /// bind-pose matrices.
    ///
    /// Fails with [`ArmatureError::BindPoseMismatch`] when the lists differ
    /// in length.
    pub fn new(bones: Vec<NodeKey>, inverse_bind_matrices: Vec<Affine3A>) -> Result<Self> {
        if bones.len() != inverse_bind_matrices.len() {
            return Err(ArmatureError::BindPoseMismatch {
                bones: bones.len(),
                offsets: inverse_bind_matrices.len(),
            });
        }
        Ok(Self {
            bones,
            inverse_bind_matrices,
        })
    }

    /// Bone node references, in shader joint-index order.
    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[NodeKey] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Computes the skinning matrix array from the current bone world
    /// transforms: `joint[k] = world[k] * inverse_bind[k]`.
    ///
    /// Reads each bone's most recently resolved world matrix, so the frame's
    /// update pass must have run first. A bone key that no longer resolves
    /// contributes an identity world transform and logs a warning.
    #[must_use]
    pub fn compute_joint_matrices(&self, nodes: &SlotMap<NodeKey, Node>) -> Vec<Mat4> {
        self.bones
            .iter()
            .zip(&self.inverse_bind_matrices)
            .map(|(&bone, inverse_bind)| {
                let world = match nodes.get(bone) {
                    Some(node) => *node.world_matrix(),
                    None => {
                        log::warn!("skin references missing bone node {bone:?}");
                        Affine3A::IDENTITY
                    }
                };
                Mat4::from(world * *inverse_bind)
            })
            .collect()
    }
}
