use crate::scene::NodeHandle;
use crate::scene::transform::Transform;
use glam::{Affine3A, Vec3};

/// A scene node holding only hierarchy and transform data.
///
/// Names, meshes, cameras and lights live in the [`Scene`](crate::scene::Scene)
/// component maps keyed by [`NodeHandle`], so nodes stay small and the
/// per-frame transform pass touches contiguous data only.
///
/// # Hierarchy
///
/// - `parent`: handle of the parent node (`None` for root nodes)
/// - `children`: child handles in insertion order; depth-first traversals
///   visit them in this order
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    /// Local TRS of the node relative to its parent.
    pub transform: Transform,

    /// Visibility flag. Hidden nodes keep animating.
    pub visible: bool,
}

impl Node {
    /// Creates a root-less node with an identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    /// Creates a node placed at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        let mut node = Self::new();
        node.transform.position = position;
        node
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// World matrix as of the last [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
