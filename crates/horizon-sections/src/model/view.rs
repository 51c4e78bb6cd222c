//! Per-item view controllers and the type-erased holder the adapter hands out.

use std::any::Any;
use std::fmt;

use super::identity::StableId;
use super::index::TypeTag;

/// A controller for one on-screen row.
///
/// Sections create views through [`Section::create_view`](super::Section::create_view);
/// the adapter later binds them to items of the section, passing the item's
/// *local* index within the section.
pub trait ItemView: Send + 'static {
    /// The kind of item this view displays.
    type Item: 'static;

    /// Updates the view to show `item`, which sits at `local_index` in its section.
    fn bind(&mut self, item: &Self::Item, local_index: usize);
}

trait AnyView: Send {
    fn bind_any(&mut self, item: &dyn Any, local_index: usize) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<V: ItemView> AnyView for V {
    fn bind_any(&mut self, item: &dyn Any, local_index: usize) -> bool {
        match item.downcast_ref::<V::Item>() {
            Some(item) => {
                self.bind(item, local_index);
                true
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A view together with the type tag it was created for.
///
/// The holder also remembers the flat position and the stable id of the item
/// it was last bound to; the drag controller reads them to find where a
/// gesture started and to reject holders bound before a layout change.
pub struct ViewHolder {
    tag: TypeTag,
    position: Option<usize>,
    item_id: Option<StableId>,
    view: Box<dyn AnyView>,
}

impl ViewHolder {
    /// Wraps a view created for items of `tag`.
    pub fn new<V: ItemView>(tag: TypeTag, view: V) -> Self {
        Self {
            tag,
            position: None,
            item_id: None,
            view: Box::new(view),
        }
    }

    /// Returns the type tag this holder was created for.
    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Returns the flat position this holder was last bound at.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns the stable id of the item this holder was last bound to.
    ///
    /// `None` if the owning section reports no ids.
    pub fn item_id(&self) -> Option<StableId> {
        self.item_id
    }

    /// Returns the concrete view, if it is a `V`.
    pub fn downcast_ref<V: ItemView>(&self) -> Option<&V> {
        self.view.as_any().downcast_ref::<V>()
    }

    /// Returns the concrete view mutably, if it is a `V`.
    pub fn downcast_mut<V: ItemView>(&mut self) -> Option<&mut V> {
        self.view.as_any_mut().downcast_mut::<V>()
    }

    /// Binds `item` into the view and records the flat position.
    ///
    /// Returns `false` without touching the view if the item type does not
    /// match the view's item type.
    pub(crate) fn bind_item(&mut self, item: &dyn Any, local_index: usize, position: usize) -> bool {
        let bound = self.view.bind_any(item, local_index);
        if bound {
            self.position = Some(position);
            self.item_id = None;
        }
        bound
    }

    pub(crate) fn set_item_id(&mut self, id: Option<StableId>) {
        self.item_id = id;
    }
}

impl fmt::Debug for ViewHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHolder")
            .field("tag", &self.tag)
            .field("position", &self.position)
            .field("item_id", &self.item_id)
            .finish_non_exhaustive()
    }
}
