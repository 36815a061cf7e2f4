use bitflags::bitflags;
use glam::Vec3;

use crate::animation::easing::Easing;
use crate::animation::values::Interpolatable;
use crate::scene::{NodeHandle, Scene};

/// Default tween length in seconds.
pub const DEFAULT_DURATION: f32 = 0.5;

bitflags! {
    /// Set of channels, used to cancel several channels of a node at once.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        const POSITION = 1 << 0;
        const ROTATION = 1 << 1;
        const SCALE    = 1 << 2;
        const OPACITY  = 1 << 3;
    }
}

/// A single animatable property of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    /// Euler XYZ rotation.
    Rotation,
    Scale,
    /// Material opacity of the node's mesh.
    Opacity,
}

impl Channel {
    #[must_use]
    pub fn mask(self) -> Channels {
        match self {
            Channel::Position => Channels::POSITION,
            Channel::Rotation => Channels::ROTATION,
            Channel::Scale => Channels::SCALE,
            Channel::Opacity => Channels::OPACITY,
        }
    }

    /// Current value of this channel on `node`.
    #[must_use]
    pub fn read(self, scene: &Scene, node: NodeHandle) -> Option<TweenValue> {
        match self {
            Channel::Position => scene.get_node(node).map(|n| TweenValue::Vector(n.transform.position)),
            Channel::Rotation => scene.get_node(node).map(|n| TweenValue::Vector(n.transform.rotation)),
            Channel::Scale => scene.get_node(node).map(|n| TweenValue::Vector(n.transform.scale)),
            Channel::Opacity => scene.get_mesh(node).map(|m| TweenValue::Scalar(m.material.opacity)),
        }
    }

    /// Writes `value` into this channel. Returns `false` if the node (or its
    /// mesh) is gone or the value kind does not match the channel.
    pub fn write(self, scene: &mut Scene, node: NodeHandle, value: TweenValue) -> bool {
        match (self, value) {
            (Channel::Opacity, TweenValue::Scalar(v)) => match scene.get_mesh_mut(node) {
                Some(mesh) => {
                    mesh.material.opacity = v;
                    true
                }
                None => false,
            },
            (Channel::Position | Channel::Rotation | Channel::Scale, TweenValue::Vector(v)) => {
                let Some(n) = scene.get_node_mut(node) else {
                    return false;
                };
                match self {
                    Channel::Position => n.transform.position = v,
                    Channel::Rotation => n.transform.rotation = v,
                    _ => n.transform.scale = v,
                }
                true
            }
            _ => false,
        }
    }
}

/// Value carried by a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Vector(Vec3),
    Scalar(f32),
}

impl TweenValue {
    fn lerp(self, end: TweenValue, t: f32) -> Option<TweenValue> {
        match (self, end) {
            (TweenValue::Vector(a), TweenValue::Vector(b)) => {
                Some(TweenValue::Vector(Vec3::interpolate_linear(a, b, t)))
            }
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => {
                Some(TweenValue::Scalar(f32::interpolate_linear(a, b, t)))
            }
            _ => None,
        }
    }
}

impl From<Vec3> for TweenValue {
    fn from(v: Vec3) -> Self {
        TweenValue::Vector(v)
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        TweenValue::Scalar(v)
    }
}

/// Outcome of advancing a tween by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TweenStep {
    /// Still inside its start delay.
    Waiting,
    Running,
    Finished,
    /// Target vanished or value kind mismatched; drop without completing.
    Orphaned,
}

/// Moves one channel of one node toward an end value.
///
/// The start value is read when the delay elapses, not when the tween is
/// built, so a delayed tween picks up wherever earlier writers left the
/// node.
///
/// ```rust,ignore
/// let tween = Tween::position(node, Vec3::Y)
///     .duration(0.6)
///     .ease(Easing::BackOut(1.4))
///     .on_complete(MyEvent::Landed);
/// ```
#[derive(Debug, Clone)]
pub struct Tween<E> {
    node: NodeHandle,
    channel: Channel,
    to: TweenValue,
    duration: f32,
    delay: f32,
    easing: Easing,
    snap: bool,
    on_complete: Option<E>,

    from: Option<TweenValue>,
    elapsed: f32,
}

impl<E> Tween<E> {
    #[must_use]
    pub fn to(node: NodeHandle, channel: Channel, to: impl Into<TweenValue>) -> Self {
        Self {
            node,
            channel,
            to: to.into(),
            duration: DEFAULT_DURATION,
            delay: 0.0,
            easing: Easing::Linear,
            snap: false,
            on_complete: None,
            from: None,
            elapsed: 0.0,
        }
    }

    #[must_use]
    pub fn position(node: NodeHandle, to: Vec3) -> Self {
        Self::to(node, Channel::Position, to)
    }

    #[must_use]
    pub fn rotation(node: NodeHandle, to: Vec3) -> Self {
        Self::to(node, Channel::Rotation, to)
    }

    #[must_use]
    pub fn scale(node: NodeHandle, to: Vec3) -> Self {
        Self::to(node, Channel::Scale, to)
    }

    #[must_use]
    pub fn opacity(node: NodeHandle, to: f32) -> Self {
        Self::to(node, Channel::Opacity, to)
    }

    #[must_use]
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    #[must_use]
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    #[must_use]
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// On completion write the end value exactly instead of the last eased
    /// sample, removing any floating-point drift.
    #[must_use]
    pub fn snap(mut self) -> Self {
        self.snap = true;
        self
    }

    /// Payload handed back by [`Tweener::update`](crate::animation::Tweener::update)
    /// when this tween completes.
    #[must_use]
    pub fn on_complete(mut self, payload: E) -> Self {
        self.on_complete = Some(payload);
        self
    }

    #[must_use]
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[must_use]
    pub fn target(&self) -> TweenValue {
        self.to
    }

    /// Whether the delay has elapsed and the start value was captured.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.from.is_some()
    }

    pub(crate) fn take_payload(&mut self) -> Option<E> {
        self.on_complete.take()
    }

    pub(crate) fn advance(&mut self, dt: f32, scene: &mut Scene) -> TweenStep {
        self.elapsed += dt;
        let active = self.elapsed - self.delay;
        if active < 0.0 {
            return TweenStep::Waiting;
        }

        let from = match self.from {
            Some(v) => v,
            None => {
                let Some(v) = self.channel.read(scene, self.node) else {
                    return TweenStep::Orphaned;
                };
                self.from = Some(v);
                v
            }
        };

        let progress = if self.duration > 0.0 {
            (active / self.duration).min(1.0)
        } else {
            1.0
        };
        let done = progress >= 1.0;

        let value = if done && self.snap {
            self.to
        } else {
            match from.lerp(self.to, self.easing.apply(progress)) {
                Some(v) => v,
                None => return TweenStep::Orphaned,
            }
        };

        if !self.channel.write(scene, self.node, value) {
            return TweenStep::Orphaned;
        }

        if done { TweenStep::Finished } else { TweenStep::Running }
    }
}
