use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::controls::{ControlGroup, Knob};
use crate::errors::Result;
use crate::part::{EntrySettings, HoverSettings};
use crate::scene::LightKind;

/// A `Vec3` exposed as an `x`/`y`/`z` control group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunableVec3 {
    /// Control group name shown in the panel.
    pub group: String,
    pub value: Vec3,
    /// Per-axis lower bound.
    pub min: Vec3,
    /// Per-axis upper bound.
    pub max: Vec3,
    pub step: f32,
}

impl TunableVec3 {
    #[must_use]
    pub fn new(group: impl Into<String>, value: Vec3, min: f32, max: f32, step: f32) -> Self {
        Self {
            group: group.into(),
            value,
            min: Vec3::splat(min),
            max: Vec3::splat(max),
            step,
        }
    }

    #[must_use]
    pub fn with_axis_range(mut self, min: Vec3, max: Vec3) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Euler rotation tunable over a full turn.
    #[must_use]
    pub fn rotation(group: impl Into<String>, value: Vec3) -> Self {
        Self::new(group, value, 0.0, TAU, 0.01)
    }

    pub fn to_group(&self) -> Result<ControlGroup> {
        Ok(ControlGroup::new(self.group.clone())
            .with_knob("x", Knob::new("x", self.value.x, self.min.x, self.max.x, self.step)?)
            .with_knob("y", Knob::new("y", self.value.y, self.min.y, self.max.y, self.step)?)
            .with_knob("z", Knob::new("z", self.value.z, self.min.z, self.max.z, self.step)?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start: Vec3,
    pub end: Vec3,
    /// Point the camera keeps looking at while it flies.
    pub target: Vec3,
    pub duration: f32,
    pub easing: Easing,
}

impl Default for CameraRigSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.1,
            far: 1000.0,
            start: Vec3::new(202.4179, 200.0, -207.857),
            end: Vec3::new(66.3704, 27.2324, -42.5657),
            target: Vec3::ZERO,
            duration: 3.0,
            easing: Easing::PowerOut(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSettings {
    pub kind: LightKind,
    #[serde(default)]
    pub position: Vec3,
    pub intensity: f32,
}

impl LightSettings {
    #[must_use]
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            position: Vec3::ZERO,
            intensity,
        }
    }

    #[must_use]
    pub fn directional(position: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            intensity,
        }
    }
}

/// The group that carries all parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblySettings {
    pub position: TunableVec3,
    pub rotation: TunableVec3,
    pub scale: f32,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            position: TunableVec3::new("whole", Vec3::new(23.3, -3.0, 20.0), -50.0, 50.0, 0.1),
            rotation: TunableVec3::rotation("WholeRot", Vec3::new(0.0, 5.5, 0.0)),
            scale: 25.0,
        }
    }
}

/// One part of the model and the control groups driving its rest position
/// and scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSlot {
    /// Node name in the model.
    pub node: String,
    pub position: TunableVec3,
    /// Overrides the scale the node has in the model.
    #[serde(default)]
    pub scale: Option<Vec3>,
    /// Control group for the part scale. Without one the scale is fixed.
    #[serde(default)]
    pub scale_group: Option<String>,
}

impl PartSlot {
    #[must_use]
    pub fn new(node: impl Into<String>, group: impl Into<String>, rest: Vec3) -> Self {
        Self {
            node: node.into(),
            position: TunableVec3::new(group, rest, -10.0, 10.0, 0.1),
            scale: None,
            scale_group: None,
        }
    }

    #[must_use]
    pub fn with_scale_group(mut self, group: impl Into<String>) -> Self {
        self.scale_group = Some(group.into());
        self
    }

    /// Scale tunable starting at `value`, if the slot has a scale group.
    #[must_use]
    pub fn scale_tunable(&self, value: Vec3) -> Option<TunableVec3> {
        self.scale_group
            .as_ref()
            .map(|group| TunableVec3::new(group.clone(), value, 0.01, 10.0, 0.01))
    }
}

fn default_parts() -> Vec<PartSlot> {
    vec![
        PartSlot::new("Part2", "Part 1 Position", Vec3::new(1.1, 1.0, -0.07)).with_scale_group("Part 1 Scale"),
        PartSlot::new("Part1", "Part 2 Position", Vec3::new(0.2, 1.9, -0.2)).with_scale_group("Part 2 Scale"),
        PartSlot::new("Part3", "Part 3 Position", Vec3::new(-1.1, 0.4, -0.45)).with_scale_group("Part 3 Scale"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoSettings {
    pub texture: String,
    pub width: f32,
    pub height: f32,
    pub scale: Vec3,
    pub position: TunableVec3,
    pub rotation: TunableVec3,
    /// How far below its final position the logo starts.
    pub drop: f32,
    pub delay: f32,
    pub rise_duration: f32,
    pub rise_easing: Easing,
    pub fade_duration: f32,
    pub fade_easing: Easing,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            texture: "ASTARTA_CAPITAL-01.png".to_string(),
            width: 5.0,
            height: 3.0,
            scale: Vec3::new(7.0, 7.0, 1.0),
            position: TunableVec3::new("Text Position", Vec3::new(45.3, 8.1, 35.9), -80.0, 80.0, 0.1)
                .with_axis_range(Vec3::new(-80.0, -40.0, -80.0), Vec3::new(80.0, 40.0, 80.0)),
            rotation: TunableVec3::rotation("Text Rotation", Vec3::new(0.0, 0.8, 0.0)),
            drop: 20.0,
            delay: 1.8,
            rise_duration: 1.2,
            rise_easing: Easing::BackOut(1.3),
            fade_duration: 0.8,
            fade_easing: Easing::PowerOut(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub position: TunableVec3,
    pub scale: f32,
    /// Lights that ship with the terrain.
    pub lights: Vec<LightSettings>,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            position: TunableVec3::new("bgCol", Vec3::new(1.5, -9.9, -86.7), -50.0, 50.0, 0.1)
                .with_axis_range(Vec3::new(-50.0, -50.0, -100.0), Vec3::new(50.0, 50.0, 100.0)),
            scale: 17.0,
            lights: vec![
                LightSettings::ambient(0.5),
                LightSettings::directional(Vec3::new(10.0, 10.0, 15.0), 1.5),
            ],
        }
    }
}

/// Everything needed to assemble the showcase scene.
///
/// Every field has a default, so a JSON document only needs the values it
/// overrides:
///
/// ```json
/// { "hover": { "float_distance": 0.8 }, "assembly": { "scale": 30.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub camera: CameraRigSettings,
    pub lights: Vec<LightSettings>,
    pub assembly: AssemblySettings,
    pub parts: Vec<PartSlot>,
    pub logo: LogoSettings,
    pub terrain: TerrainSettings,
    pub entry: EntrySettings,
    pub hover: HoverSettings,
    /// Base seed for the per-part float generators.
    pub seed: u64,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            camera: CameraRigSettings::default(),
            lights: vec![
                LightSettings::ambient(0.5),
                LightSettings::directional(Vec3::new(10.0, 10.0, 5.0), 1.5),
            ],
            assembly: AssemblySettings::default(),
            parts: default_parts(),
            logo: LogoSettings::default(),
            terrain: TerrainSettings::default(),
            entry: EntrySettings::default(),
            hover: HoverSettings::default(),
            seed: 0x5EED,
        }
    }
}

impl ShowcaseConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded showcase config from {}", path.display());
        Ok(config)
    }
}
