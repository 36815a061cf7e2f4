#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod controls;
pub mod errors;
pub mod interaction;
pub mod part;
pub mod scene;
pub mod showcase;

pub use animation::{Easing, Tween, Tweener};
pub use controls::{ControlPanel, Knob};
pub use errors::{ApexError, Result};
pub use interaction::{PointerEvent, PointerHub};
pub use part::{PartConfig, PartController, Phase};
pub use scene::{Camera, Light, Mesh, Node, NodeHandle, Prefab, Scene};
pub use showcase::{Showcase, ShowcaseConfig};
