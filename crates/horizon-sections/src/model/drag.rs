//! Drag-to-reorder gestures.
//!
//! A gesture runs `begin_drag` → `drag_to`* → `release_drag` (or
//! `cancel_drag`). While it runs the adapter holds a [`DragSession`]; at most
//! one session exists at a time.
//!
//! Every move reaches the drag section as a series of adjacent steps, so the
//! section can swap two elements instead of shifting its whole list. The
//! section learns where the item finally landed exactly once, through
//! [`DragSection::on_drop`](super::DragSection::on_drop).
//!
//! Calls that arrive without an active session are ignored: UI event races can
//! deliver a stray progress or release event after a gesture ended.

use std::ops::Range;

use horizon_sections_core::logging::targets;

use super::adapter::{SectionAdapter, SectionKey};
use super::index::TypeTag;
use super::view::ViewHolder;

/// The transient state of an active drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Flat position where the dragged item started.
    pub origin: usize,
    /// Flat position the dragged item currently occupies.
    pub current: usize,
}

#[derive(Debug, Default)]
pub(super) struct DragController {
    pub(super) tag: Option<TypeTag>,
    pub(super) session: Option<DragSession>,
}

impl DragController {
    pub(super) fn detach(&mut self) {
        self.tag = None;
        self.session = None;
    }
}

impl SectionAdapter {
    /// Returns the tag of the attached drag section.
    pub fn drag_section_tag(&self) -> Option<TypeTag> {
        self.drag.tag
    }

    /// Returns `true` while a drag gesture is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.session.is_some()
    }

    /// Returns the active drag session.
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag.session
    }

    /// Returns the drag section's key and the flat positions it covers.
    fn drag_range(&self) -> Option<(SectionKey, Range<usize>)> {
        let tag = self.drag.tag?;
        let key = *self.registry.get(&tag)?;
        let slot = self.sections.get(key)?;
        let start = self.leading_count(tag);
        Some((key, start..start + self.slot_size(slot)))
    }

    /// Starts a gesture on the row displayed by `holder`.
    ///
    /// Rejected (returns `false`) when no drag section is attached, a gesture
    /// is already active, the holder shows a different kind of row, or the
    /// holder was never bound to a row of the drag section.
    ///
    /// The origin is the position the holder was last bound at. After
    /// `everything_changed` the host must rebind before starting a gesture;
    /// a holder whose recorded item id no longer matches the item at that
    /// position is rejected.
    pub fn begin_drag(&mut self, holder: &ViewHolder) -> bool {
        let Some(tag) = self.drag.tag else {
            tracing::debug!(target: targets::DRAG, "no drag section attached");
            return false;
        };
        if let Some(session) = self.drag.session {
            tracing::debug!(target: targets::DRAG, ?session, "gesture already active");
            return false;
        }
        if holder.type_tag() != tag {
            tracing::debug!(
                target: targets::DRAG,
                holder = %holder.type_tag(),
                drag = %tag,
                "row is not draggable"
            );
            return false;
        }
        let Some(origin) = holder.position() else {
            tracing::debug!(target: targets::DRAG, "holder was never bound");
            return false;
        };
        let (key, range) = match self.drag_range() {
            Some((key, range)) if range.contains(&origin) => (key, range),
            _ => {
                tracing::debug!(target: targets::DRAG, origin, "holder position outside drag section");
                return false;
            }
        };
        if let Some(bound) = holder.item_id() {
            let live = self
                .sections
                .get(key)
                .and_then(|slot| slot.section.item_id(origin - range.start));
            if live != Some(bound) {
                tracing::debug!(target: targets::DRAG, origin, "holder is stale, rebind before dragging");
                return false;
            }
        }

        self.drag.session = Some(DragSession {
            origin,
            current: origin,
        });
        tracing::debug!(target: targets::DRAG, origin, "drag started");
        self.signals.drag_started.emit(origin);
        true
    }

    /// Moves the dragged item from flat position `from` to `to`.
    ///
    /// `from` must be the dragged item's current position and both positions
    /// must lie inside the drag section. A move of more than one row is
    /// delivered to the section as adjacent steps, each followed by an
    /// `item_moved` notification.
    pub fn drag_to(&mut self, from: usize, to: usize) -> bool {
        let Some(mut session) = self.drag.session else {
            tracing::debug!(target: targets::DRAG, from, to, "drag progress without a gesture");
            return false;
        };
        if from != session.current {
            tracing::debug!(
                target: targets::DRAG,
                from,
                current = session.current,
                "drag progress does not start at the dragged item"
            );
            return false;
        }
        let Some((key, range)) = self.drag_range() else {
            return false;
        };
        if !range.contains(&from) || !range.contains(&to) {
            tracing::debug!(target: targets::DRAG, from, to, ?range, "drag progress outside drag section");
            return false;
        }

        let leading = range.start;
        let Some(slot) = self.sections.get_mut(key) else {
            return false;
        };

        let mut at = from;
        while at != to {
            let next = if to > at { at + 1 } else { at - 1 };
            slot.section.on_move(at - leading, next - leading);
            self.signals.item_moved.emit((at, next));
            at = next;
        }

        session.current = to;
        self.drag.session = Some(session);
        tracing::trace!(target: targets::DRAG, from, to, "drag progressed");
        true
    }

    /// Ends the gesture where the dragged item currently is.
    pub fn release_drag(&mut self) -> bool {
        match self.drag.session {
            Some(session) => self.commit_drag(session.origin, session.current),
            None => {
                tracing::debug!(target: targets::DRAG, "release without a gesture");
                false
            }
        }
    }

    /// Ends the gesture, reporting a move from flat `from` to flat `to`.
    ///
    /// The drag section's `on_drop` receives the local indices, including when
    /// they are equal, and the session is cleared. A commit naming a position
    /// outside the drag section is ignored and the gesture stays active.
    pub fn commit_drag(&mut self, from: usize, to: usize) -> bool {
        let Some(session) = self.drag.session else {
            tracing::debug!(target: targets::DRAG, from, to, "commit without a gesture");
            return false;
        };
        let Some((key, range)) = self.drag_range() else {
            tracing::warn!(target: targets::DRAG, ?session, "drag section vanished during gesture");
            self.drag.session = None;
            return false;
        };
        if !range.contains(&from) || !range.contains(&to) {
            tracing::warn!(target: targets::DRAG, from, to, ?range, "commit outside drag section");
            return false;
        }
        self.drag.session = None;

        let leading = range.start;
        if let Some(slot) = self.sections.get_mut(key) {
            slot.section.on_drop(from - leading, to - leading);
        }

        tracing::debug!(target: targets::DRAG, from, to, "drag finished");
        self.signals.drag_finished.emit((from, to));
        true
    }

    /// Aborts the gesture.
    ///
    /// The dragged item is stepped back to its origin and the section receives
    /// `on_drop(origin, origin)`.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.drag.session else {
            return false;
        };
        if session.current != session.origin {
            self.drag_to(session.current, session.origin);
        }
        tracing::debug!(target: targets::DRAG, origin = session.origin, "drag cancelled");
        self.commit_drag(session.origin, session.origin)
    }
}

/// Returns where `anchor` points after the item at `from` moved to `to`.
///
/// Use this to keep an index into the list (such as the currently playing
/// entry of a queue) on the same item after a reorder.
///
/// ```
/// use horizon_sections::model::adjust_anchor;
///
/// // The anchored item itself moved
/// assert_eq!(adjust_anchor(2, 2, 5), 5);
/// // An item jumped over the anchor from above
/// assert_eq!(adjust_anchor(3, 1, 4), 2);
/// // An item jumped over the anchor from below
/// assert_eq!(adjust_anchor(3, 6, 0), 4);
/// ```
pub fn adjust_anchor(anchor: usize, from: usize, to: usize) -> usize {
    if anchor == from {
        to
    } else if from < anchor && to >= anchor {
        anchor - 1
    } else if from > anchor && to <= anchor {
        anchor + 1
    } else {
        anchor
    }
}
