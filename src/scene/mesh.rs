use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Geometry source of a mesh.
///
/// Decoding is left to the host renderer; the scene only needs to know what
/// kind of primitive a node draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Flat rectangle in the XY plane.
    Plane { width: f32, height: f32 },
    /// Primitive `primitive` of the model file at `uri`.
    Asset { uri: String, primitive: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Vec4,
    /// Texture file, opaque to the scene.
    pub texture: Option<String>,
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            texture: None,
            opacity: 1.0,
            transparent: false,
        }
    }
}

/// Drawable component. A node carrying one is a leaf element for hover
/// interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: Geometry,
    #[serde(default)]
    pub material: Material,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }

    /// Mesh referencing primitive `primitive` of `uri` with a default material.
    #[must_use]
    pub fn from_asset(uri: impl Into<String>, primitive: usize) -> Self {
        Self::new(
            Geometry::Asset {
                uri: uri.into(),
                primitive,
            },
            Material::default(),
        )
    }
}
