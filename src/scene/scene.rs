use glam::{Vec3, Vec4};
use slotmap::{SecondaryMap, SlotMap, SparseSecondaryMap};

use crate::errors::Result;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::prefab::Prefab;
use crate::scene::transform_system;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// Scene graph.
///
/// Pure data: nodes, the root list, and component pools with node → component
/// maps. All lookups by handle are `Option`-returning; a stale handle is never
/// an error.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,

    // ==== Node → component maps ====
    pub(crate) names: SecondaryMap<NodeHandle, String>,
    pub(crate) mesh_components: SparseSecondaryMap<NodeHandle, MeshKey>,
    pub(crate) camera_components: SparseSecondaryMap<NodeHandle, CameraKey>,
    pub(crate) light_components: SparseSecondaryMap<NodeHandle, LightKey>,

    pub background: Option<Vec4>,
    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            names: SecondaryMap::new(),
            mesh_components: SparseSecondaryMap::new(),
            camera_components: SparseSecondaryMap::new(),
            light_components: SparseSecondaryMap::new(),
            background: Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            active_camera: None,
        }
    }

    // ========================================================================
    // Node management
    // ========================================================================

    /// Creates a detached root node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        let handle = self.create_node();
        self.set_name(handle, name);
        handle
    }

    /// Inserts `node` as a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Inserts `node` under `parent`. Falls back to a root node if the parent
    /// does not exist.
    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
            if let Some(c) = self.nodes.get_mut(handle) {
                c.parent = Some(parent);
            }
        } else {
            log::warn!("Parent node not found, inserting as root");
            self.root_nodes.push(handle);
        }
        handle
    }

    /// Moves `child` under `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::warn!("Attach skipped: node not found");
            return;
        }
        if self.is_ancestor_of(child, parent) {
            log::warn!("Attach skipped: parent is a descendant of child");
            return;
        }

        self.detach_from_parent(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Makes `child` a root node.
    pub fn detach(&mut self, child: NodeHandle) {
        if !self.nodes.contains_key(child) {
            return;
        }
        self.detach_from_parent(child);
        self.root_nodes.push(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.transform.mark_dirty();
        }
    }

    fn detach_from_parent(&mut self, child: NodeHandle) {
        let old_parent = self.nodes.get_mut(child).and_then(|n| n.parent.take());
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }
    }

    fn is_ancestor_of(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(Node::parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(Node::parent);
        }
        false
    }

    /// Removes a node, its whole subtree and their components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        self.detach_from_parent(handle);

        for node in self.collect_subtree(handle) {
            if let Some(key) = self.mesh_components.remove(node) {
                self.meshes.remove(key);
            }
            if let Some(key) = self.camera_components.remove(node) {
                self.cameras.remove(key);
            }
            if let Some(key) = self.light_components.remove(node) {
                self.lights.remove(key);
            }
            if self.active_camera == Some(node) {
                self.active_camera = None;
            }
            self.names.remove(node);
            self.nodes.remove(node);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if self.nodes.contains_key(handle) {
            self.names.insert(handle, name.to_string());
        }
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    /// First node named `name` in depth-first order over all roots.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.root_nodes
            .iter()
            .find_map(|&root| self.find_in_subtree(root, name))
    }

    /// First node named `name` in the subtree rooted at `root` (inclusive).
    #[must_use]
    pub fn find_in_subtree(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.collect_subtree(root)
            .into_iter()
            .find(|&h| self.get_name(h) == Some(name))
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Handles of `root` and all its descendants, depth-first, parent before
    /// children, children in insertion order. Empty for a stale handle.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(root) {
            return out;
        }

        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        let key = self.meshes.insert(mesh);
        if let Some(old) = self.mesh_components.insert(handle, key) {
            self.meshes.remove(old);
        }
    }

    /// Leaf predicate: does this node draw anything?
    #[must_use]
    pub fn is_mesh(&self, handle: NodeHandle) -> bool {
        self.mesh_components.contains_key(handle)
    }

    #[must_use]
    pub fn get_mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        let key = *self.mesh_components.get(handle)?;
        self.meshes.get(key)
    }

    pub fn get_mesh_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        let key = *self.mesh_components.get(handle)?;
        self.meshes.get_mut(key)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let handle = self.create_node();
        self.set_mesh(handle, mesh);
        handle
    }

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let handle = self.add_to_parent(Node::new(), parent);
        self.set_mesh(handle, mesh);
        handle
    }

    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let handle = self.create_node_with_name("Camera");
        let key = self.cameras.insert(camera);
        self.camera_components.insert(handle, key);
        handle
    }

    #[must_use]
    pub fn get_camera(&self, handle: NodeHandle) -> Option<&Camera> {
        let key = *self.camera_components.get(handle)?;
        self.cameras.get(key)
    }

    pub fn add_light(&mut self, light: Light, position: Vec3) -> NodeHandle {
        let handle = self.add_node(Node::at(position));
        self.set_name(handle, "Light");
        let key = self.lights.insert(light);
        self.light_components.insert(handle, key);
        handle
    }

    /// Lights attached to live nodes.
    pub fn iter_lights(&self) -> impl Iterator<Item = (NodeHandle, &Light)> {
        self.light_components
            .iter()
            .filter_map(|(node, &key)| self.lights.get(key).map(|light| (node, light)))
    }

    // ========================================================================
    // Prefabs
    // ========================================================================

    /// Instantiates `prefab` under `parent` (or as roots) and returns the
    /// handles of the instantiated prefab roots.
    pub fn instantiate(&mut self, prefab: &Prefab, parent: Option<NodeHandle>) -> Result<Vec<NodeHandle>> {
        prefab.validate()?;

        let mut roots = Vec::with_capacity(prefab.roots.len());
        // (prefab index, parent handle, is prefab root)
        let mut stack: Vec<(usize, Option<NodeHandle>, bool)> =
            prefab.roots.iter().rev().map(|&i| (i, parent, true)).collect();

        while let Some((idx, parent_handle, is_root)) = stack.pop() {
            let desc = &prefab.nodes[idx];

            let mut node = Node::new();
            node.transform.position = desc.position;
            node.transform.rotation = desc.rotation;
            node.transform.scale = desc.scale;

            let handle = match parent_handle {
                Some(p) => self.add_to_parent(node, p),
                None => self.add_node(node),
            };
            if let Some(name) = &desc.name {
                self.set_name(handle, name);
            }
            if let Some(mesh) = &desc.mesh {
                self.set_mesh(handle, mesh.clone());
            }
            if is_root {
                roots.push(handle);
            }

            stack.extend(desc.children.iter().rev().map(|&c| (c, Some(handle), false)));
        }

        Ok(roots)
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    /// Updates world matrices of the whole scene. Call once per frame after
    /// all transform writers ran.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(
            &mut self.nodes,
            &mut self.cameras,
            &self.camera_components,
            &self.root_nodes,
        );
    }

    /// World-space position of `handle` computed from current transforms,
    /// independent of when matrices were last updated.
    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        transform_system::compute_world_matrix(&self.nodes, handle).map(|m| m.translation.into())
    }
}
