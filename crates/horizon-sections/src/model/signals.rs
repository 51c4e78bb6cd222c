//! Change notifications emitted by a [`SectionAdapter`](super::SectionAdapter).

use horizon_sections_core::Signal;

/// Collection of signals emitted by the adapter.
///
/// A hosting list view connects to these to stay synchronized with the
/// composed list. Positions are always flat positions in the adapter.
///
/// # Signal Usage
///
/// - **Structural changes** (sections added or removed, section data
///   replaced): `everything_changed`
/// - **Single-row edits** reported by collaborators: `item_inserted`,
///   `item_removed`
/// - **Drag progress**: one `item_moved` per adjacent step
/// - **Gesture lifecycle**: `drag_started`, `drag_finished`
pub struct ListSignals {
    /// Emitted after an item moved one row.
    /// Args: (from position, to position)
    pub item_moved: Signal<(usize, usize)>,

    /// Emitted after an item was inserted.
    /// Args: position
    pub item_inserted: Signal<usize>,

    /// Emitted after an item was removed.
    /// Args: position
    pub item_removed: Signal<usize>,

    /// Emitted when any part of the list may have changed.
    pub everything_changed: Signal<()>,

    /// Emitted when a drag gesture starts.
    /// Args: origin position
    pub drag_started: Signal<usize>,

    /// Emitted when a drag gesture was committed or cancelled.
    /// Args: (origin position, final position)
    pub drag_finished: Signal<(usize, usize)>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSignals").finish_non_exhaustive()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            item_moved: Signal::new(),
            item_inserted: Signal::new(),
            item_removed: Signal::new(),
            everything_changed: Signal::new(),
            drag_started: Signal::new(),
            drag_finished: Signal::new(),
        }
    }

    /// Blocks or unblocks every signal in the set.
    pub fn set_blocked(&self, blocked: bool) {
        self.item_moved.set_blocked(blocked);
        self.item_inserted.set_blocked(blocked);
        self.item_removed.set_blocked(blocked);
        self.everything_changed.set_blocked(blocked);
        self.drag_started.set_blocked(blocked);
        self.drag_finished.set_blocked(blocked);
    }

    /// Disconnects every slot from every signal in the set.
    pub fn disconnect_all(&self) {
        self.item_moved.disconnect_all();
        self.item_inserted.disconnect_all();
        self.item_removed.disconnect_all();
        self.everything_changed.disconnect_all();
        self.drag_started.disconnect_all();
        self.drag_finished.disconnect_all();
    }
}

static_assertions::assert_impl_all!(ListSignals: Send, Sync);
