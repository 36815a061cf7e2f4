//! Scene Graph Module
//!
//! Manages the scene hierarchy and its components:
//! - [`Node`]: minimal hierarchy node (parent/children + transform)
//! - [`Transform`]: TRS component with cached matrices and dirty tracking
//! - [`Scene`]: node storage plus mesh, camera and light component maps
//! - [`Camera`] / [`Light`]: components attached to nodes
//! - [`Prefab`]: serialisable model description instantiated into a scene
//! - `transform_system`: decoupled world-matrix propagation

pub mod camera;
pub mod light;
pub mod mesh;
pub mod node;
pub mod prefab;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use mesh::{Geometry, Material, Mesh};
pub use node::Node;
pub use prefab::{Prefab, PrefabNode};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`Scene`].
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
