use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::animation::tween::{Channel, Channels, Tween, TweenStep};
use crate::scene::{NodeHandle, Scene};

new_key_type! {
    pub struct TweenKey;
    pub struct CallKey;
}

// Absorbs accumulated rounding in the frame clock.
const CLOCK_EPSILON: f64 = 1e-9;

struct TweenEntry<E> {
    seq: u64,
    tween: Tween<E>,
}

struct DelayedCall<E> {
    seq: u64,
    fire_at: f64,
    target: Option<NodeHandle>,
    payload: E,
}

/// Owns a set of tweens and delayed calls and advances them together.
///
/// Completion is reported through payloads of type `E`: a tween built with
/// [`Tween::on_complete`] or a [`delayed_call`](Tweener::delayed_call)
/// yields its payload from [`update`](Tweener::update) on the frame it
/// finishes. Payloads from one update come out in due order: finished tweens
/// by creation order, then delayed calls by fire time.
///
/// # Cancellation
///
/// [`kill_tweens_of`](Tweener::kill_tweens_of) drops every tween (waiting or
/// running) on the given node channels. Killed tweens never report their
/// payload.
pub struct Tweener<E> {
    tweens: SlotMap<TweenKey, TweenEntry<E>>,
    calls: SlotMap<CallKey, DelayedCall<E>>,
    clock: f64,
    next_seq: u64,
}

impl<E> Default for Tweener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Tweener<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            calls: SlotMap::with_key(),
            clock: 0.0,
            next_seq: 0,
        }
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn add(&mut self, tween: Tween<E>) -> TweenKey {
        let seq = self.bump_seq();
        log::trace!("tween #{seq} on {:?} {:?}", tween.node(), tween.channel());
        self.tweens.insert(TweenEntry { seq, tween })
    }

    /// Schedules `payload` to be returned from `update` after `delay` seconds.
    pub fn delayed_call(&mut self, delay: f32, payload: E) -> CallKey {
        self.insert_call(None, delay, payload)
    }

    /// Like [`delayed_call`](Self::delayed_call) but associated with `node`,
    /// so [`kill_calls_for`](Self::kill_calls_for) can cancel it.
    pub fn delayed_call_for(&mut self, node: NodeHandle, delay: f32, payload: E) -> CallKey {
        self.insert_call(Some(node), delay, payload)
    }

    fn insert_call(&mut self, target: Option<NodeHandle>, delay: f32, payload: E) -> CallKey {
        let seq = self.bump_seq();
        self.calls.insert(DelayedCall {
            seq,
            fire_at: self.clock + f64::from(delay.max(0.0)),
            target,
            payload,
        })
    }

    /// Removes every tween on `node` touching any channel in `channels`.
    /// Returns how many were removed.
    pub fn kill_tweens_of(&mut self, node: NodeHandle, channels: Channels) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, entry| {
            entry.tween.node() != node || !channels.contains(entry.tween.channel().mask())
        });
        let killed = before - self.tweens.len();
        if killed > 0 {
            log::trace!("killed {killed} tween(s) on {node:?}");
        }
        killed
    }

    /// Cancels pending delayed calls associated with `node`.
    pub fn kill_calls_for(&mut self, node: NodeHandle) -> usize {
        let before = self.calls.len();
        self.calls.retain(|_, call| call.target != Some(node));
        before - self.calls.len()
    }

    pub fn cancel_call(&mut self, key: CallKey) -> bool {
        self.calls.remove(key).is_some()
    }

    pub fn cancel_tween(&mut self, key: TweenKey) -> bool {
        self.tweens.remove(key).is_some()
    }

    /// Drops all tweens and delayed calls.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.calls.clear();
    }

    /// Number of live tweens (waiting or running) on `node`'s `channel`.
    #[must_use]
    pub fn tweens_of(&self, node: NodeHandle, channel: Channel) -> usize {
        self.tweens
            .values()
            .filter(|e| e.tween.node() == node && e.tween.channel() == channel)
            .count()
    }

    #[must_use]
    pub fn is_tweening(&self, node: NodeHandle) -> bool {
        self.tweens.values().any(|e| e.tween.node() == node)
    }

    /// Number of delayed calls associated with `node`.
    #[must_use]
    pub fn calls_for(&self, node: NodeHandle) -> usize {
        self.calls.values().filter(|c| c.target == Some(node)).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    #[must_use]
    pub fn pending_calls(&self) -> usize {
        self.calls.len()
    }

    /// No tweens and no delayed calls left.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty() && self.calls.is_empty()
    }

    /// Seconds advanced since creation.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Advances every tween and delayed call by `dt` seconds, writing new
    /// values into `scene`. Returns the payloads of everything that
    /// completed during this step.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) -> SmallVec<[E; 4]> {
        self.clock += f64::from(dt);

        let mut finished: SmallVec<[(u64, TweenKey); 8]> = SmallVec::new();
        let mut orphaned: SmallVec<[TweenKey; 4]> = SmallVec::new();

        for (key, entry) in &mut self.tweens {
            match entry.tween.advance(dt, scene) {
                TweenStep::Waiting | TweenStep::Running => {}
                TweenStep::Finished => finished.push((entry.seq, key)),
                TweenStep::Orphaned => orphaned.push(key),
            }
        }

        for key in orphaned {
            if let Some(entry) = self.tweens.remove(key) {
                log::trace!("dropped orphaned tween on {:?}", entry.tween.node());
            }
        }

        finished.sort_unstable_by_key(|&(seq, _)| seq);

        let mut payloads = SmallVec::new();
        for (_, key) in finished {
            if let Some(mut entry) = self.tweens.remove(key)
                && let Some(payload) = entry.tween.take_payload()
            {
                payloads.push(payload);
            }
        }

        let now = self.clock + CLOCK_EPSILON;
        let mut due: SmallVec<[(f64, u64, CallKey); 8]> = self
            .calls
            .iter()
            .filter(|(_, call)| call.fire_at <= now)
            .map(|(key, call)| (call.fire_at, call.seq, key))
            .collect();
        due.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (_, _, key) in due {
            if let Some(call) = self.calls.remove(key) {
                payloads.push(call.payload);
            }
        }

        payloads
    }
}
