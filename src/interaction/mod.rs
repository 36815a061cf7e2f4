//! Pointer Interaction
//!
//! Turns "which node is under the pointer this frame" into enter/leave
//! events for subscribed nodes. Subscriptions live in [`PointerHub`], not on
//! the scene nodes, so owners can tear them down deterministically.

pub mod pointer;

pub use pointer::{OwnerId, PointerEvent, PointerEventKind, PointerHub, SubscriptionKey};
