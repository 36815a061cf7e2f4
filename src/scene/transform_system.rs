//! Transform System
//!
//! Propagates local matrices down the hierarchy into world matrices. Kept
//! apart from [`Scene`](crate::scene::Scene) so that it only borrows the node
//! and camera storage it needs.

use glam::Affine3A;
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::{CameraKey, NodeHandle};

/// Updates world matrices for every subtree under `roots`.
///
/// Uses an explicit stack instead of recursion so deep hierarchies cannot
/// overflow. A node's world matrix is rebuilt when its own TRS changed or
/// when any ancestor's world matrix changed this pass.
pub fn update_hierarchy_iterative(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    camera_components: &SparseSecondaryMap<NodeHandle, CameraKey>,
    roots: &[NodeHandle],
) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_changed = local_changed || parent_changed;

        if world_changed {
            let new_world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);

            if let Some(&camera_key) = camera_components.get(node_handle)
                && let Some(camera) = cameras.get_mut(camera_key)
            {
                camera.update_view(&new_world);
            }
        }

        let current_world = node.transform.world_matrix;
        for &child in node.children.iter().rev() {
            stack.push((child, current_world, world_changed));
        }
    }
}

/// Computes the world matrix of `handle` from the current TRS values of the
/// node and all of its ancestors.
///
/// Unlike the cached matrix this never lags behind transforms written since
/// the last hierarchy update.
#[must_use]
pub fn compute_world_matrix(
    nodes: &SlotMap<NodeHandle, Node>,
    handle: NodeHandle,
) -> Option<Affine3A> {
    let mut node = nodes.get(handle)?;
    let mut world = node.transform.compose();

    while let Some(parent) = node.parent {
        let Some(parent_node) = nodes.get(parent) else {
            break;
        };
        world = parent_node.transform.compose() * world;
        node = parent_node;
    }

    Some(world)
}
