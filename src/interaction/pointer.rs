use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::scene::NodeHandle;

new_key_type! {
    pub struct SubscriptionKey;
}

/// Identifies whoever subscribed a node (for example a part controller
/// index), so the host can route events back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub node: NodeHandle,
    pub owner: OwnerId,
}

#[derive(Debug, Clone, Copy)]
struct Subscription {
    node: NodeHandle,
    owner: OwnerId,
}

/// Pointer hover router.
///
/// The host reports the nearest intersected node once per frame through
/// [`update_hover`](PointerHub::update_hover). Events go to that node's
/// subscriber only; ancestors are never notified, which gives the
/// stop-propagation behaviour the hover choreography relies on. An occluding
/// node without a subscription still takes the hover away from whatever is
/// behind it.
#[derive(Default)]
pub struct PointerHub {
    subscriptions: SlotMap<SubscriptionKey, Subscription>,
    by_node: FxHashMap<NodeHandle, SubscriptionKey>,
    hovered: Option<NodeHandle>,
}

impl PointerHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `node` on behalf of `owner`. A node has at most one
    /// subscriber; subscribing again replaces the previous one.
    pub fn subscribe(&mut self, node: NodeHandle, owner: OwnerId) -> SubscriptionKey {
        if let Some(old) = self.by_node.remove(&node) {
            self.subscriptions.remove(old);
        }
        let key = self.subscriptions.insert(Subscription { node, owner });
        self.by_node.insert(node, key);
        key
    }

    /// Removes a subscription. Returns `false` for an unknown or already
    /// removed key.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        let Some(sub) = self.subscriptions.remove(key) else {
            return false;
        };
        if self.by_node.get(&sub.node) == Some(&key) {
            self.by_node.remove(&sub.node);
        }
        if self.hovered == Some(sub.node) {
            self.hovered = None;
        }
        true
    }

    #[must_use]
    pub fn is_subscribed(&self, node: NodeHandle) -> bool {
        self.by_node.contains_key(&node)
    }

    #[must_use]
    pub fn owner_of(&self, node: NodeHandle) -> Option<OwnerId> {
        let key = self.by_node.get(&node)?;
        self.subscriptions.get(*key).map(|s| s.owner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<NodeHandle> {
        self.hovered
    }

    /// Records the node under the pointer and returns the resulting events:
    /// a leave for the previously hovered node, then an enter for the new
    /// one, each only if that node is subscribed.
    pub fn update_hover(&mut self, hit: Option<NodeHandle>) -> SmallVec<[PointerEvent; 2]> {
        let mut events = SmallVec::new();
        if hit == self.hovered {
            return events;
        }

        if let Some(prev) = self.hovered
            && let Some(owner) = self.owner_of(prev)
        {
            events.push(PointerEvent {
                kind: PointerEventKind::Leave,
                node: prev,
                owner,
            });
        }

        if let Some(next) = hit
            && let Some(owner) = self.owner_of(next)
        {
            events.push(PointerEvent {
                kind: PointerEventKind::Enter,
                node: next,
                owner,
            });
        }

        self.hovered = hit;
        events
    }
}
