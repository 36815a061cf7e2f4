//! Showcase Scene
//!
//! Assembles the complete pyramid showcase on top of the scene graph:
//! camera fly-in, lights, terrain backdrop, the tunable assembly group with
//! its animated parts, and the logo reveal. [`Showcase`] is the single entry
//! point a host drives once per frame.

pub mod camera_rig;
pub mod config;
pub mod logo;
pub mod stage;

pub use camera_rig::CameraFlyIn;
pub use config::{
    AssemblySettings, CameraRigSettings, LightSettings, LogoSettings, PartSlot, ShowcaseConfig,
    TerrainSettings, TunableVec3,
};
pub use logo::LogoReveal;
pub use stage::Showcase;
