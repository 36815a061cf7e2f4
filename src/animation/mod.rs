//! Tween Engine
//!
//! Time-interpolated changes of node properties:
//! - [`Easing`]: shaping curves (`back.out`, `power.out`, linear)
//! - [`Tween`]: one channel of one node moving toward an end value
//! - [`Tweener`]: owns tweens and delayed calls, advances them each frame
//!   and reports completion payloads back to the owner
//!
//! Completion is reported as data (`E` payloads returned from
//! [`Tweener::update`]) rather than stored closures, so the owner decides
//! what a finished tween means while holding `&mut self`.

pub mod easing;
pub mod tween;
pub mod tweener;
pub mod values;

pub use easing::Easing;
pub use tween::{Channel, Channels, Tween, TweenValue};
pub use tweener::{CallKey, TweenKey, Tweener};
pub use values::Interpolatable;
