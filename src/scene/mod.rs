//! Scene Graph
//!
//! A minimal scene graph for animated characters:
//! - [`Node`]: named node with a local [`Transform`] and hierarchy links
//! - [`Skeleton`]: ordered bone list defining a character's joint layout
//! - [`Character`]: a renderable instance (root node, skeleton, [`Material`])
//! - [`Scene`]: owns all of the above and implements
//!   [`VisualBackend`](crate::trail::VisualBackend) so ghost trails can drive it
//!
//! Characters can be deep-cloned, which is how ghost instances are made.

pub mod material;
pub mod node;
pub mod scene;
pub mod skeleton;
pub mod transform;

pub use material::Material;
pub use node::Node;
pub use scene::{Character, Scene};
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct SkeletonKey;
    pub struct CharacterKey;
}
