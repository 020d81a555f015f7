use glam::Affine3A;

use crate::animation::TransformTrack;
use crate::scene::{DrawableKey, NodeKey, SkinKey};

/// A child reference held by a [`Node`] (or the scene's root list).
///
/// Children are an explicit tagged union: either another node of the
/// hierarchy or a drawable leaf, optionally skinned. Keys are non-owning, so
/// the same node or drawable may appear under several parents. The graph is
/// a DAG of references and must stay acyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Node(NodeKey),
    Drawable {
        drawable: DrawableKey,
        /// Bound skin, resolved immediately before each draw of this leaf.
        skin: Option<SkinKey>,
    },
}

/// A scene node: a local transform, the resolved world transform, and an
/// ordered child list.
///
/// # Transform
///
/// `local` is the node's transform relative to its parent (identity by
/// default). `world_matrix()` exposes the most recently resolved world
/// transform (the parent chain's accumulated product), written by
/// [`Scene::update`](crate::scene::Scene::update) each frame.
///
/// # Animation
///
/// A node built with [`Node::animated`] owns a [`TransformTrack`]; the update
/// pass rewrites `local` from the track at the current time, so external code
/// should not set `local` on such a node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Transform relative to the parent.
    pub local: Affine3A,
    pub(crate) world: Affine3A,
    pub(crate) children: Vec<Child>,
    pub(crate) animation: Option<TransformTrack>,
}

impl Node {
    /// Creates a node with an identity local transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            local: Affine3A::IDENTITY,
            world: Affine3A::IDENTITY,
            children: Vec::new(),
            animation: None,
        }
    }

    /// Creates a node with the given local transform.
    #[must_use]
    pub fn with_local(local: Affine3A) -> Self {
        Self {
            local,
            ..Self::new()
        }
    }

    /// Creates a node whose local transform is driven by `track`.
    #[must_use]
    pub fn animated(track: TransformTrack) -> Self {
        Self {
            animation: Some(track),
            ..Self::new()
        }
    }

    /// Returns a read-only slice of this node's children, in draw order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Returns the animation track driving this node, if any.
    #[inline]
    #[must_use]
    pub fn animation(&self) -> Option<&TransformTrack> {
        self.animation.as_ref()
    }

    /// Returns the most recently resolved world transform.
    ///
    /// Valid after the frame's [`Scene::update`](crate::scene::Scene::update)
    /// pass; identity before the first update.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
