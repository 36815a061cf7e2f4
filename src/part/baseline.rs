use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::scene::{NodeHandle, Scene};

/// Rest transform of one leaf mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafBaseline {
    pub node: NodeHandle,
    /// Local position relative to the leaf's parent.
    pub position: Vec3,
    /// Local Euler XYZ rotation.
    pub rotation: Vec3,
    /// World position at capture time, used for neighbour distances.
    pub world_position: Vec3,
}

/// Leaf rest transforms of one part, captured at most once.
#[derive(Debug, Default)]
pub struct Baseline {
    leaves: Vec<LeafBaseline>,
    index: FxHashMap<NodeHandle, usize>,
    captured: bool,
}

impl Baseline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every mesh node below `root`, depth-first with parents before
    /// children. `root` itself is never a leaf, even when it carries a mesh:
    /// its transform belongs to the part, not to hover.
    ///
    /// Returns `true` only on the call that performed the capture. Later calls
    /// are no-ops. A missing `root` leaves the baseline uncaptured so the call
    /// can be retried.
    pub fn capture(&mut self, scene: &Scene, root: NodeHandle) -> bool {
        if self.captured || scene.get_node(root).is_none() {
            return false;
        }

        for handle in scene.collect_subtree(root) {
            if handle == root || !scene.is_mesh(handle) {
                continue;
            }
            let (Some(node), Some(world_position)) = (scene.get_node(handle), scene.world_position(handle)) else {
                continue;
            };
            self.index.insert(handle, self.leaves.len());
            self.leaves.push(LeafBaseline {
                node: handle,
                position: node.transform.position,
                rotation: node.transform.rotation,
                world_position,
            });
        }

        self.captured = true;
        true
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[must_use]
    pub fn get(&self, node: NodeHandle) -> Option<&LeafBaseline> {
        self.index.get(&node).map(|&i| &self.leaves[i])
    }

    #[must_use]
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.index.contains_key(&node)
    }

    /// Leaves in capture order.
    #[must_use]
    pub fn leaves(&self) -> &[LeafBaseline] {
        &self.leaves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}
