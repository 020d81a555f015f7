#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod draw;
pub mod errors;
pub mod scene;
pub mod transform;
pub mod utils;

pub use animation::{Interpolatable, KeyframeTrack, TransformTrack};
pub use draw::{Drawable, Frame, UniformSet, UniformValue};
pub use errors::{ArmatureError, Result};
pub use scene::{Child, DrawableKey, Node, NodeKey, Scene, Skin, SkinKey};
pub use utils::Timer;
