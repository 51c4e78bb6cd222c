//! Core traits for sections.
//!
//! A section owns one homogeneous run of items. The adapter composes several
//! sections, each producing a different kind of item, into one flat list.

use std::any::Any;

use super::identity::StableId;
use super::index::TypeTag;
use super::view::{ItemView, ViewHolder};

/// A homogeneous run of items inside a [`SectionAdapter`](super::SectionAdapter).
///
/// # Implementation Requirements
///
/// At minimum, you must implement:
/// - [`type_tag`](Section::type_tag) - A tag unique among the adapter's sections
/// - [`len`](Section::len) - Number of items when the section is visible
/// - [`item`](Section::item) - Access to an item by local index
/// - [`create_view`](Section::create_view) - A fresh view for this section's items
///
/// Visibility is controlled by [`is_shown`](Section::is_shown) (the section's
/// own state) and [`dependency`](Section::dependency) (another section that
/// must be non-empty). A hidden section contributes no items.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{ItemView, Section, TypeTag};
///
/// struct HeaderView;
///
/// impl ItemView for HeaderView {
///     type Item = &'static str;
///     fn bind(&mut self, _item: &&'static str, _local_index: usize) {}
/// }
///
/// struct Header {
///     title: &'static str,
/// }
///
/// impl Section for Header {
///     type Item = &'static str;
///     type View = HeaderView;
///
///     fn type_tag(&self) -> TypeTag {
///         TypeTag::new(1)
///     }
///
///     fn len(&self) -> usize {
///         1
///     }
///
///     fn item(&self, local_index: usize) -> Option<&&'static str> {
///         (local_index == 0).then_some(&self.title)
///     }
///
///     fn create_view(&self) -> HeaderView {
///         HeaderView
///     }
///
///     // Only show the header while the songs section has items
///     fn dependency(&self) -> Option<TypeTag> {
///         Some(TypeTag::new(2))
///     }
/// }
/// ```
pub trait Section: Send + 'static {
    /// The kind of item this section holds.
    type Item: 'static;

    /// The view controller this section creates for its items.
    type View: ItemView<Item = Self::Item>;

    /// Returns the tag identifying this section's kind of item.
    fn type_tag(&self) -> TypeTag;

    /// Returns the number of items shown while the section is visible.
    fn len(&self) -> usize;

    /// Returns `true` if the section holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `local_index`.
    fn item(&self, local_index: usize) -> Option<&Self::Item>;

    /// Creates a view for items of this section.
    fn create_view(&self) -> Self::View;

    /// Returns the stable id of the item at `local_index`.
    ///
    /// The default reports no id.
    fn item_id(&self, _local_index: usize) -> Option<StableId> {
        None
    }

    /// Returns the tag of the section whose size decides this section's
    /// visibility.
    ///
    /// A section with a dependency is visible only while the dependency is
    /// attached and non-empty. The dependency is read once, when the section
    /// is attached.
    fn dependency(&self) -> Option<TypeTag> {
        None
    }

    /// Returns `false` to hide the section based on its own state.
    fn is_shown(&self) -> bool {
        true
    }

    /// Returns the fast-scroll label for the item at `local_index`.
    fn section_name(&self, _local_index: usize) -> Option<String> {
        None
    }

    /// Returns a human-readable name used in debug output.
    fn debug_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A section whose items can be reordered by dragging.
///
/// At most one drag section can be attached to an adapter.
pub trait DragSection: Section {
    /// Moves the item at `from` to `to` in the backing data.
    ///
    /// Called repeatedly during a gesture, always with adjacent indices
    /// (`from.abs_diff(to) == 1`), so a swap is sufficient. This must not
    /// persist anything: it can run many times per gesture.
    fn on_move(&mut self, from: usize, to: usize);

    /// Called once when a gesture ends, with the item's origin and final index.
    ///
    /// `from` may equal `to` when nothing moved or the gesture was cancelled.
    /// This is the only place where a new order should be persisted.
    fn on_drop(&mut self, from: usize, to: usize);
}

/// Type-erased section storage used by the adapter.
pub(crate) trait AnySection: Send {
    fn type_tag(&self) -> TypeTag;
    fn raw_len(&self) -> usize;
    fn is_shown(&self) -> bool;
    fn dependency(&self) -> Option<TypeTag>;
    fn item_id(&self, local_index: usize) -> Option<StableId>;
    fn section_name(&self, local_index: usize) -> Option<String>;
    fn debug_name(&self) -> &str;
    fn create_view(&self) -> ViewHolder;
    fn bind(&self, holder: &mut ViewHolder, local_index: usize, position: usize) -> bool;
    fn is_draggable(&self) -> bool;
    fn on_move(&mut self, from: usize, to: usize) -> bool;
    fn on_drop(&mut self, from: usize, to: usize) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct DragHooks<S> {
    on_move: fn(&mut S, usize, usize),
    on_drop: fn(&mut S, usize, usize),
}

/// A section as stored by the adapter, with drag hooks when it was attached
/// as the drag section.
pub(crate) struct Attached<S> {
    section: S,
    drag: Option<DragHooks<S>>,
}

impl<S: Section> Attached<S> {
    pub(crate) fn plain(section: S) -> Self {
        Self {
            section,
            drag: None,
        }
    }
}

impl<S: DragSection> Attached<S> {
    pub(crate) fn draggable(section: S) -> Self {
        Self {
            section,
            drag: Some(DragHooks {
                on_move: <S as DragSection>::on_move,
                on_drop: <S as DragSection>::on_drop,
            }),
        }
    }
}

impl<S: Section> AnySection for Attached<S> {
    fn type_tag(&self) -> TypeTag {
        self.section.type_tag()
    }

    fn raw_len(&self) -> usize {
        self.section.len()
    }

    fn is_shown(&self) -> bool {
        self.section.is_shown()
    }

    fn dependency(&self) -> Option<TypeTag> {
        self.section.dependency()
    }

    fn item_id(&self, local_index: usize) -> Option<StableId> {
        self.section.item_id(local_index)
    }

    fn section_name(&self, local_index: usize) -> Option<String> {
        self.section.section_name(local_index)
    }

    fn debug_name(&self) -> &str {
        self.section.debug_name()
    }

    fn create_view(&self) -> ViewHolder {
        ViewHolder::new(self.section.type_tag(), self.section.create_view())
    }

    fn bind(&self, holder: &mut ViewHolder, local_index: usize, position: usize) -> bool {
        let Some(item) = self.section.item(local_index) else {
            return false;
        };
        if !holder.bind_item(item, local_index, position) {
            return false;
        }
        holder.set_item_id(self.section.item_id(local_index));
        true
    }

    fn is_draggable(&self) -> bool {
        self.drag.is_some()
    }

    fn on_move(&mut self, from: usize, to: usize) -> bool {
        match &self.drag {
            Some(hooks) => {
                (hooks.on_move)(&mut self.section, from, to);
                true
            }
            None => false,
        }
    }

    fn on_drop(&mut self, from: usize, to: usize) -> bool {
        match &self.drag {
            Some(hooks) => {
                (hooks.on_drop)(&mut self.section, from, to);
                true
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        &self.section
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.section
    }
}
