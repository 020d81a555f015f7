//! Scene graph: hierarchy, transform resolution and skinning.
//!
//! - [`Node`]: a tree node with a local transform and ordered children
//! - [`Child`]: a child reference, either another node or a drawable leaf
//! - [`Scene`]: arena container plus the per-frame update and draw passes
//! - [`Skin`]: per-bone skinning matrix preparation

pub mod node;
pub mod scene;
pub mod skin;

pub use node::{Child, Node};
pub use scene::Scene;
pub use skin::Skin;

use slotmap::new_key_type;

new_key_type! {
    /// Non-owning handle to a [`Node`] in a [`Scene`].
    pub struct NodeKey;
    /// Non-owning handle to a drawable registered in a [`Scene`].
    pub struct DrawableKey;
    /// Non-owning handle to a [`Skin`] registered in a [`Scene`].
    pub struct SkinKey;
}
