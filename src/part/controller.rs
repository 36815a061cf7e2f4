use glam::Vec3;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::{Channels, Tween, Tweener};
use crate::interaction::{OwnerId, PointerEvent, PointerEventKind, PointerHub, SubscriptionKey};
use crate::part::baseline::Baseline;
use crate::part::entry::{EntryPose, EntrySettings};
use crate::part::hover::{FloatOffset, HoverSettings};
use crate::part::lifecycle::{Lifecycle, Phase};
use crate::part::proximity::{find_nearby, ripple_intensity};
use crate::scene::{NodeHandle, Scene};

/// Completion payloads routed back into the controller by its tweener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartEvent {
    /// Fly-in tween landed.
    EntryFinished,
    /// Settle delay elapsed.
    CaptureBaseline,
    /// Staggered ripple float for a neighbour.
    Float { leaf: NodeHandle, intensity: f32 },
    /// Staggered ripple return for a neighbour.
    Return { leaf: NodeHandle },
}

/// Static description of one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartConfig {
    /// Node name of the part in the model.
    pub name: String,
    /// Designer rest position of the part root.
    pub rest_position: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub entry: EntrySettings,
    #[serde(default)]
    pub hover: HoverSettings,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl PartConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, rest_position: Vec3) -> Self {
        Self {
            name: name.into(),
            rest_position,
            scale: Vec3::ONE,
            entry: EntrySettings::default(),
            hover: HoverSettings::default(),
        }
    }
}

/// Drives one part through fly-in, settle and hover.
///
/// The controller never reads the clock itself: the host calls
/// [`update`](PartController::update) every frame and forwards pointer events
/// through [`handle_pointer`](PartController::handle_pointer). Offsets come
/// from the injected generator `R`, so a seeded generator reproduces every
/// float exactly.
///
/// # Ordering
///
/// - baseline capture is triggered only by the fly-in's completion (plus
///   the settle delay), never by elapsed-time guesses
/// - hover requests are ignored until the baseline is captured
/// - every new leaf animation first kills the leaf's position and rotation
///   tweens, so at most one tween per leaf channel is ever alive
pub struct PartController<R> {
    name: String,
    owner: OwnerId,
    root: NodeHandle,
    rest_position: Vec3,
    scale: Vec3,
    entry: EntrySettings,
    hover: HoverSettings,

    lifecycle: Lifecycle,
    baseline: Baseline,
    tweener: Tweener<PartEvent>,
    subscriptions: FxHashMap<NodeHandle, SubscriptionKey>,
    rng: R,

    mounted: bool,
    disposed: bool,
}

impl<R: Rng> PartController<R> {
    #[must_use]
    pub fn new(owner: OwnerId, root: NodeHandle, config: PartConfig, rng: R) -> Self {
        Self {
            name: config.name,
            owner,
            root,
            rest_position: config.rest_position,
            scale: config.scale,
            entry: config.entry,
            hover: config.hover,
            lifecycle: Lifecycle::new(),
            baseline: Baseline::new(),
            tweener: Tweener::new(),
            subscriptions: FxHashMap::default(),
            rng,
            mounted: false,
            disposed: false,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Places the part at its fly-in start pose and starts the fly-in.
    ///
    /// Only the first successful call does anything. Returns `false` if the
    /// part root is missing from `scene`; the call may be repeated once it
    /// exists.
    pub fn mount(&mut self, scene: &mut Scene) -> bool {
        if self.mounted || self.disposed {
            return false;
        }

        let pose = EntryPose::for_part(&self.name, self.rest_position);
        let Some(node) = scene.get_node_mut(self.root) else {
            log::warn!("{} - root node missing, fly-in deferred", self.name);
            return false;
        };
        node.transform.position = pose.start;
        node.transform.scale = self.scale;

        self.tweener.add(
            Tween::position(self.root, self.rest_position)
                .duration(self.entry.duration)
                .delay(pose.delay)
                .ease(self.entry.easing)
                .snap()
                .on_complete(PartEvent::EntryFinished),
        );
        self.mounted = true;
        log::debug!("{} - fly-in from {} after {}s", self.name, pose.start, pose.delay);
        true
    }

    /// Advances the part's tweens and reacts to whatever completed.
    pub fn update(&mut self, dt: f32, scene: &mut Scene, hub: &mut PointerHub) {
        if self.disposed {
            return;
        }
        for event in self.tweener.update(dt, scene) {
            self.handle_event(event, scene, hub);
        }
    }

    fn handle_event(&mut self, event: PartEvent, scene: &mut Scene, hub: &mut PointerHub) {
        match event {
            PartEvent::EntryFinished => {
                if self.lifecycle.advance(Phase::Settled) {
                    log::debug!("{} - settled", self.name);
                    // Tunables may have moved while the fly-in was running.
                    self.apply_rest_position(scene);
                    self.apply_scale(scene);
                    self.tweener
                        .delayed_call(self.entry.settle_delay, PartEvent::CaptureBaseline);
                }
            }
            PartEvent::CaptureBaseline => {
                self.capture_baseline(scene, hub);
            }
            PartEvent::Float { .. } | PartEvent::Return { .. } => self.apply_leaf_event(event),
        }
    }

    /// Snapshots leaf rest transforms and subscribes every leaf for hover.
    ///
    /// Normally triggered by the settle timer; safe to call again by hand.
    /// Does nothing before the fly-in finished, after a successful capture,
    /// or while the part root is missing (in which case it can be retried).
    pub fn capture_baseline(&mut self, scene: &Scene, hub: &mut PointerHub) -> bool {
        if self.disposed || !self.lifecycle.is_settled() {
            return false;
        }
        if !self.baseline.capture(scene, self.root) {
            if !self.baseline.is_captured() {
                log::warn!("{} - root node missing, baseline capture deferred", self.name);
            }
            return false;
        }

        for leaf in self.baseline.leaves() {
            let key = hub.subscribe(leaf.node, self.owner);
            self.subscriptions.insert(leaf.node, key);
        }
        self.lifecycle.advance(Phase::Interactive);
        log::info!("{} - Found {} meshes after initial animation", self.name, self.baseline.len());
        true
    }

    /// Cancels every tween and pending call and releases all pointer
    /// subscriptions. The controller is inert afterwards.
    pub fn dispose(&mut self, hub: &mut PointerHub) {
        if self.disposed {
            return;
        }
        self.tweener.clear();
        for (_, key) in self.subscriptions.drain() {
            hub.unsubscribe(key);
        }
        self.disposed = true;
        log::debug!("{} - disposed", self.name);
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Enter => self.pointer_enter(event.node),
            PointerEventKind::Leave => self.pointer_leave(event.node),
        }
    }

    fn tracks(&self, leaf: NodeHandle) -> bool {
        !self.disposed && self.lifecycle.accepts_hover() && self.baseline.contains(leaf)
    }

    /// Floats `leaf` at full intensity and ripples to its neighbours.
    /// Returns `false` (and animates nothing) if hover is not live yet or the
    /// leaf is not part of the baseline.
    pub fn pointer_enter(&mut self, leaf: NodeHandle) -> bool {
        if !self.tracks(leaf) {
            return false;
        }

        let neighbors = find_nearby(
            &self.baseline,
            leaf,
            self.hover.neighbor_radius,
            self.hover.max_neighbors,
        );
        log::debug!("{} - hover enter, {} neighbour(s) ripple", self.name, neighbors.len());

        self.float_leaf(leaf, 1.0);
        for (i, neighbor) in neighbors.iter().enumerate() {
            let event = PartEvent::Float {
                leaf: neighbor.node,
                intensity: ripple_intensity(neighbor.distance),
            };
            self.schedule(neighbor.node, i as f32 * self.hover.enter_stagger, event);
        }
        true
    }

    /// Returns `leaf` and the neighbours it rippled to back to baseline.
    pub fn pointer_leave(&mut self, leaf: NodeHandle) -> bool {
        if !self.tracks(leaf) {
            return false;
        }

        let neighbors = find_nearby(
            &self.baseline,
            leaf,
            self.hover.neighbor_radius,
            self.hover.max_neighbors,
        );
        log::debug!("{} - hover leave", self.name);

        self.return_leaf(leaf);
        for (i, neighbor) in neighbors.iter().enumerate() {
            let event = PartEvent::Return { leaf: neighbor.node };
            self.schedule(neighbor.node, i as f32 * self.hover.leave_stagger, event);
        }
        true
    }

    /// Runs a leaf event now, or after `delay`. A newer request for the same
    /// leaf replaces any still-pending one.
    fn schedule(&mut self, leaf: NodeHandle, delay: f32, event: PartEvent) {
        if delay > 0.0 {
            self.tweener.kill_calls_for(leaf);
            self.tweener.delayed_call_for(leaf, delay, event);
        } else {
            self.apply_leaf_event(event);
        }
    }

    fn apply_leaf_event(&mut self, event: PartEvent) {
        match event {
            PartEvent::Float { leaf, intensity } => self.float_leaf(leaf, intensity),
            PartEvent::Return { leaf } => self.return_leaf(leaf),
            PartEvent::EntryFinished | PartEvent::CaptureBaseline => {}
        }
    }

    fn float_leaf(&mut self, leaf: NodeHandle, intensity: f32) {
        let Some(base) = self.baseline.get(leaf).copied() else {
            return;
        };
        self.tweener.kill_tweens_of(leaf, Channels::POSITION | Channels::ROTATION);
        self.tweener.kill_calls_for(leaf);

        let offset = FloatOffset::sample(&mut self.rng, intensity, &self.hover);
        self.tweener.add(
            Tween::position(leaf, base.position + offset.position)
                .duration(self.hover.float_duration)
                .ease(self.hover.float_easing),
        );
        self.tweener.add(
            Tween::rotation(leaf, base.rotation + offset.rotation)
                .duration(self.hover.float_duration)
                .ease(self.hover.float_easing),
        );
    }

    fn return_leaf(&mut self, leaf: NodeHandle) {
        let Some(base) = self.baseline.get(leaf).copied() else {
            return;
        };
        self.tweener.kill_tweens_of(leaf, Channels::POSITION | Channels::ROTATION);
        self.tweener.kill_calls_for(leaf);

        self.tweener.add(
            Tween::position(leaf, base.position)
                .duration(self.hover.return_duration)
                .ease(self.hover.return_easing)
                .snap(),
        );
        self.tweener.add(
            Tween::rotation(leaf, base.rotation)
                .duration(self.hover.return_duration)
                .ease(self.hover.return_easing)
                .snap(),
        );
    }

    // ========================================================================
    // Tunables
    // ========================================================================

    /// Updates the designer rest position. Applied to the part root right
    /// away once settled, otherwise when the fly-in lands. Leaf baselines and
    /// leaf tweens are untouched. Returns whether the scene was written.
    pub fn set_rest_position(&mut self, position: Vec3, scene: &mut Scene) -> bool {
        self.rest_position = position;
        self.apply_rest_position(scene)
    }

    /// Updates the designer scale, with the same gating as
    /// [`set_rest_position`](Self::set_rest_position).
    pub fn set_scale(&mut self, scale: Vec3, scene: &mut Scene) -> bool {
        self.scale = scale;
        self.apply_scale(scene)
    }

    fn apply_rest_position(&mut self, scene: &mut Scene) -> bool {
        if self.disposed || !self.lifecycle.is_settled() {
            return false;
        }
        match scene.get_node_mut(self.root) {
            Some(node) => {
                node.transform.position = self.rest_position;
                true
            }
            None => false,
        }
    }

    fn apply_scale(&mut self, scene: &mut Scene) -> bool {
        if self.disposed || !self.lifecycle.is_settled() {
            return false;
        }
        match scene.get_node_mut(self.root) {
            Some(node) => {
                node.transform.scale = self.scale;
                true
            }
            None => false,
        }
    }
}

impl<R> PartController<R> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    #[must_use]
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    #[must_use]
    pub fn tweener(&self) -> &Tweener<PartEvent> {
        &self.tweener
    }

    #[must_use]
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn is_subscribed(&self, leaf: NodeHandle) -> bool {
        self.subscriptions.contains_key(&leaf)
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
