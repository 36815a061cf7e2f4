/// Lifecycle phase of a part. Ordered: a phase never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Fly-in running. Tunables are remembered but not applied; hover is
    /// ignored.
    Entering,
    /// Fly-in finished. Tunables drive the part root; baseline capture is
    /// pending.
    Settled,
    /// Baseline captured and leaves subscribed. Hover is live.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Entering,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves to `next` if it lies ahead of the current phase. Returns whether
    /// the phase changed.
    pub fn advance(&mut self, next: Phase) -> bool {
        if next <= self.phase {
            return false;
        }
        self.phase = next;
        true
    }

    /// Entry finished: live tunables may write the part root.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.phase >= Phase::Settled
    }

    /// Baseline captured: pointer hover may animate leaves.
    #[must_use]
    pub fn accepts_hover(&self) -> bool {
        self.phase == Phase::Interactive
    }
}
