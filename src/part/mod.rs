//! Part Animation
//!
//! Choreography for the rigid sub-assemblies ("parts") of the model:
//!
//! - [`PartController`]: one per part; owns its lifecycle, baseline,
//!   tweens and pointer subscriptions
//! - [`Lifecycle`] / [`Phase`]: forward-only `Entering → Settled → Interactive`
//! - [`EntryPose`]: per-part fly-in start pose and stagger
//! - [`Baseline`]: leaf rest transforms captured once after the fly-in
//! - [`find_nearby`]: brute-force neighbour search for the hover ripple
//! - [`FloatOffset`] / [`HoverSettings`]: randomised float targets
//!
//! # Who writes what
//!
//! | writer        | target                    | when                 |
//! |---------------|---------------------------|----------------------|
//! | entry tween   | part root position        | `Entering` only      |
//! | tunables      | part root position, scale | `Settled` and later  |
//! | hover tweens  | leaf position, rotation   | `Interactive` only   |

pub mod baseline;
pub mod controller;
pub mod entry;
pub mod hover;
pub mod lifecycle;
pub mod proximity;

pub use baseline::{Baseline, LeafBaseline};
pub use controller::{PartConfig, PartController, PartEvent};
pub use entry::{EntryPose, EntrySettings};
pub use hover::{FloatOffset, HoverSettings};
pub use lifecycle::{Lifecycle, Phase};
pub use proximity::{Neighbor, find_nearby, ripple_intensity};
