//! Scene container and the two per-frame passes.
//!
//! `update` resolves the hierarchy: animated nodes resample their local
//! transform, then world matrices propagate root-to-leaf. `draw` walks the
//! resolved graph in child order and invokes each drawable leaf with its
//! uniforms, gathering skin matrices immediately before the leaf's own draw.
//! Running the passes back to back guarantees every bone world transform is
//! final before any skin reads it.

use glam::{Affine3A, Mat4};
use slotmap::SlotMap;

use crate::draw::{Drawable, Frame, JOINT_MATRICES_UNIFORM, UniformSet, UniformValue};
use crate::errors::{ArmatureError, Result};
use crate::scene::node::{Child, Node};
use crate::scene::skin::Skin;
use crate::scene::{DrawableKey, NodeKey, SkinKey};

/// Traversal depth at which a walk is assumed to be cyclic.
///
/// Shared (diamond) references are legal, so cycles are detected by depth
/// rather than by a visited set.
const MAX_DEPTH: usize = 256;

/// The scene graph: arena storages for nodes, drawables and skins, plus an
/// ordered root child list.
///
/// Nodes and drawables are addressed by non-owning keys, so a subtree or a
/// shared mesh may be referenced from several parents. The structure is built
/// once at scene setup; per frame only `update` and `draw` run.
pub struct Scene {
    nodes: SlotMap<NodeKey, Node>,
    drawables: SlotMap<DrawableKey, Box<dyn Drawable>>,
    skins: SlotMap<SkinKey, Skin>,
    roots: Vec<Child>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            drawables: SlotMap::with_key(),
            skins: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Registers a node and returns its key. The node is not parented; use
    /// [`attach`](Scene::attach) or [`add_root_node`](Scene::add_root_node).
    pub fn insert_node(&mut self, node: Node) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Registers a drawable leaf and returns its key.
    pub fn insert_drawable(&mut self, drawable: Box<dyn Drawable>) -> DrawableKey {
        self.drawables.insert(drawable)
    }

    /// Registers a skin and returns its key.
    pub fn insert_skin(&mut self, skin: Skin) -> SkinKey {
        self.skins.insert(skin)
    }

    /// Appends a child at the root level. Root children accumulate from the
    /// identity transform.
    pub fn add_root(&mut self, child: Child) {
        self.roots.push(child);
    }

    /// Appends a node at the root level.
    pub fn add_root_node(&mut self, node: NodeKey) {
        self.roots.push(Child::Node(node));
    }

    /// Appends an unskinned drawable at the root level.
    pub fn add_root_drawable(&mut self, drawable: DrawableKey) {
        self.roots.push(Child::Drawable {
            drawable,
            skin: None,
        });
    }

    /// Appends `child` to `parent`'s ordered child list.
    ///
    /// Order affects draw order only, never transform correctness. Attaching
    /// a node to itself is refused (it is a one-edge cycle).
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if parent == child {
            log::warn!("cannot attach node {parent:?} to itself");
            return;
        }
        let Some(node) = self.nodes.get_mut(parent) else {
            log::warn!("attach: missing parent node {parent:?}");
            return;
        };
        node.children.push(Child::Node(child));
    }

    /// Appends an unskinned drawable leaf under `parent`.
    pub fn attach_drawable(&mut self, parent: NodeKey, drawable: DrawableKey) {
        self.attach_leaf(parent, drawable, None);
    }

    /// Appends a skinned drawable leaf under `parent`. The skin's joint
    /// matrices are gathered immediately before each draw of this leaf.
    pub fn attach_skinned(&mut self, parent: NodeKey, drawable: DrawableKey, skin: SkinKey) {
        self.attach_leaf(parent, drawable, Some(skin));
    }

    fn attach_leaf(&mut self, parent: NodeKey, drawable: DrawableKey, skin: Option<SkinKey>) {
        let Some(node) = self.nodes.get_mut(parent) else {
            log::warn!("attach: missing parent node {parent:?}");
            return;
        };
        node.children.push(Child::Drawable { drawable, skin });
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    #[must_use]
    pub fn skin(&self, key: SkinKey) -> Option<&Skin> {
        self.skins.get(key)
    }

    /// Read-back of a node's most recently resolved world transform.
    #[must_use]
    pub fn world_transform(&self, key: NodeKey) -> Option<Affine3A> {
        self.nodes.get(key).map(|node| *node.world_matrix())
    }

    /// Root children, in draw order.
    #[must_use]
    pub fn roots(&self) -> &[Child] {
        &self.roots
    }

    /// Computes a registered skin's joint matrix array from the current node
    /// world transforms. The draw pass does the same immediately before each
    /// skinned leaf's draw call.
    #[must_use]
    pub fn joint_matrices(&self, key: SkinKey) -> Option<Vec<Mat4>> {
        self.skins
            .get(key)
            .map(|skin| skin.compute_joint_matrices(&self.nodes))
    }

    // ========================================================================
    // Per-frame passes
    // ========================================================================

    /// Resolves the hierarchy for the current frame.
    ///
    /// Iterative depth-first walk with an explicit stack. Per node, in order:
    /// the local transform is resampled from the animation track (if any) at
    /// `time`, then `world = parent_world * local`, then the children are
    /// pushed. `time` is the render loop's elapsed-seconds clock; tracks loop,
    /// so the epoch is irrelevant.
    ///
    /// Fails with [`ArmatureError::GraphCycle`] instead of hanging when the
    /// walk exceeds the maximum hierarchy depth.
    pub fn update(&mut self, time: f32) -> Result<()> {
        let mut stack: Vec<(NodeKey, Affine3A, usize)> = Vec::with_capacity(64);
        for child in self.roots.iter().rev() {
            if let Child::Node(key) = child {
                stack.push((*key, Affine3A::IDENTITY, 0));
            }
        }

        while let Some((key, parent_world, depth)) = stack.pop() {
            if depth >= MAX_DEPTH {
                return Err(ArmatureError::GraphCycle {
                    max_depth: MAX_DEPTH,
                });
            }
            let Some(node) = self.nodes.get_mut(key) else {
                log::warn!("update: scene graph references missing node {key:?}");
                continue;
            };

            if let Some(track) = &node.animation {
                node.local = track.sample(time);
            }
            node.world = parent_world * node.local;

            let world = node.world;
            for child in node.children.iter().rev() {
                if let Child::Node(child_key) = child {
                    stack.push((*child_key, world, depth + 1));
                }
            }
        }
        Ok(())
    }

    /// Draws every drawable leaf, in child insertion order.
    ///
    /// Each leaf receives its parent chain's accumulated world transform as
    /// the `model` uniform, the frame's `view`/`projection` and extra named
    /// uniforms. For skinned leaves the joint matrix array is computed from
    /// the current bone world transforms right before the leaf's draw call,
    /// so it always reflects this frame's pose.
    ///
    /// Call [`update`](Scene::update) first each frame.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let Self {
            nodes,
            drawables,
            skins,
            roots,
        } = self;

        let mut stack: Vec<(Child, Affine3A, usize)> = Vec::with_capacity(64);
        for child in roots.iter().rev() {
            stack.push((*child, Affine3A::IDENTITY, 0));
        }

        while let Some((child, parent_world, depth)) = stack.pop() {
            if depth >= MAX_DEPTH {
                return Err(ArmatureError::GraphCycle {
                    max_depth: MAX_DEPTH,
                });
            }
            match child {
                Child::Node(key) => {
                    let Some(node) = nodes.get(key) else {
                        log::warn!("draw: scene graph references missing node {key:?}");
                        continue;
                    };
                    let world = *node.world_matrix();
                    for grandchild in node.children.iter().rev() {
                        stack.push((*grandchild, world, depth + 1));
                    }
                }
                Child::Drawable { drawable, skin } => {
                    let Some(leaf) = drawables.get_mut(drawable) else {
                        log::warn!("draw: scene graph references missing drawable {drawable:?}");
                        continue;
                    };

                    let mut uniforms = UniformSet {
                        model: Mat4::from(parent_world),
                        view: frame.view,
                        projection: frame.projection,
                        extra: frame.uniforms.clone(),
                    };
                    if let Some(skin_key) = skin {
                        if let Some(skin) = skins.get(skin_key) {
                            uniforms.extra.insert(
                                JOINT_MATRICES_UNIFORM.to_string(),
                                UniformValue::Mat4Array(skin.compute_joint_matrices(nodes)),
                            );
                        } else {
                            log::warn!("draw: leaf references missing skin {skin_key:?}");
                        }
                    }
                    leaf.draw(&uniforms);
                }
            }
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
