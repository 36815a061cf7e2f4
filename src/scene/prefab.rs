use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{ApexError, Result};
use crate::scene::mesh::Mesh;

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefabNode {
    pub name: Option<String>,
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Indices of child nodes in [`Prefab::nodes`].
    pub children: Vec<usize>,
    pub mesh: Option<Mesh>,
}

impl PrefabNode {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            children: Vec::new(),
            mesh: None,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }
}

impl Default for PrefabNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Model description produced by the (external) asset loader.
///
/// A prefab holds no [`NodeHandle`](crate::scene::NodeHandle)s; use
/// [`Scene::instantiate`](crate::scene::Scene::instantiate) to turn it into
/// scene nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefab {
    /// All nodes, flattened.
    pub nodes: Vec<PrefabNode>,
    /// Indices of root nodes in `nodes`.
    pub roots: Vec<usize>,
}

impl Prefab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its index.
    pub fn push(&mut self, node: PrefabNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Appends `node` as a child of `parent` and returns its index.
    pub fn push_child(&mut self, parent: usize, node: PrefabNode) -> Result<usize> {
        if parent >= self.nodes.len() {
            return Err(ApexError::PrefabIndexOutOfBounds {
                context: "parent".to_string(),
                index: parent,
            });
        }
        let idx = self.push(node);
        self.nodes[parent].children.push(idx);
        Ok(idx)
    }

    /// Appends a root node and returns its index.
    pub fn push_root(&mut self, node: PrefabNode) -> usize {
        let idx = self.push(node);
        self.roots.push(idx);
        idx
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let prefab: Self = serde_json::from_str(json)?;
        prefab.validate()?;
        Ok(prefab)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that every index is in range and that the node graph is a
    /// forest (no node reachable twice).
    pub fn validate(&self) -> Result<()> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<usize> = Vec::new();

        for &root in &self.roots {
            if root >= self.nodes.len() {
                return Err(ApexError::PrefabIndexOutOfBounds {
                    context: "root".to_string(),
                    index: root,
                });
            }
            stack.push(root);
        }

        while let Some(idx) = stack.pop() {
            if seen[idx] {
                return Err(ApexError::PrefabCycle(idx));
            }
            seen[idx] = true;

            for &child in &self.nodes[idx].children {
                if child >= self.nodes.len() {
                    return Err(ApexError::PrefabIndexOutOfBounds {
                        context: format!("child of node {idx}"),
                        index: child,
                    });
                }
                stack.push(child);
            }
        }

        Ok(())
    }
}
