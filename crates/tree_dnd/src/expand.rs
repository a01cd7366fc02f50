use std::time::{Duration, Instant};

use sortree_core::TreeId;

/// How long the pointer must hover a collapsed folder's middle zone before
/// it auto-expands.
pub const FOLDER_AUTO_OPEN_DELAY: Duration = Duration::from_millis(800);

/// Debounced auto-expand request for hovering over a collapsed folder.
///
/// Holds at most one pending folder at a time; scheduling while one is
/// pending is a no-op. No timers run here: the host polls [`AutoExpand::fire`]
/// from its event loop and applies `set_collapsed(.., false)` itself when a
/// folder id comes back.
#[derive(Debug, Clone, Default)]
pub struct AutoExpand {
    pending: Option<(TreeId, Instant)>,
}

impl AutoExpand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, folder_id: impl Into<TreeId>, now: Instant, delay: Duration) {
        if self.pending.is_none() {
            self.pending = Some((folder_id.into(), now + delay));
        }
    }

    pub fn pending_id(&self) -> Option<&TreeId> {
        self.pending.as_ref().map(|(id, _)| id)
    }

    /// Must be called when the pointer leaves the target or the drag
    /// ends/cancels before the delay elapses.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns the folder to expand once the deadline has passed, clearing
    /// the pending slot.
    pub fn fire(&mut self, now: Instant) -> Option<TreeId> {
        let due = matches!(&self.pending, Some((_, deadline)) if *deadline <= now);
        if due {
            self.pending.take().map(|(id, _)| id)
        } else {
            None
        }
    }
}
