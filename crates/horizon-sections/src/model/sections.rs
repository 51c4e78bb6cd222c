//! Ready-made section implementations.
//!
//! Most screens only need three shapes of section:
//!
//! - [`ListSection`] - a run of items backed by a `Vec`
//! - [`SingletonSection`] - exactly one item, such as a header or an action row
//! - [`ListDragSection`] - a `ListSection` whose items can be reordered by drag
//!
//! Each of them creates views through a factory closure, so the same section
//! type works with any [`ItemView`] implementation.

use std::fmt;

use super::identity::{IdMap, IdScheme, StableId};
use super::index::TypeTag;
use super::section::{DragSection, Section};
use super::view::ItemView;

type ViewFactory<V> = Box<dyn Fn() -> V + Send>;
type BaseIdFn<T> = Box<dyn Fn(&T) -> u64 + Send>;
type NameFn<T> = Box<dyn Fn(&T) -> String + Send>;
type Predicate<T> = Box<dyn Fn(&T) -> bool + Send>;
type ReorderFn<T> = Box<dyn FnMut(&[T], usize, usize) + Send>;

/// A section backed by a `Vec` of items.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{IdScheme, ItemView, ListSection, Section, TypeTag};
///
/// #[derive(Default)]
/// struct SongRow {
///     title: String,
/// }
///
/// impl ItemView for SongRow {
///     type Item = (u64, String);
///     fn bind(&mut self, item: &(u64, String), _local_index: usize) {
///         self.title = item.1.clone();
///     }
/// }
///
/// let songs = ListSection::new(TypeTag::new(2), SongRow::default)
///     .with_ids(|song: &(u64, String)| song.0, IdScheme::Mixed)
///     .with_data(vec![(7, "Intro".into()), (7, "Intro".into())]);
///
/// assert_eq!(songs.len(), 2);
/// assert_ne!(songs.item_id(0), songs.item_id(1));
/// ```
pub struct ListSection<T, V> {
    tag: TypeTag,
    data: Vec<T>,
    factory: ViewFactory<V>,
    dependency: Option<TypeTag>,
    shown: bool,
    base_id: Option<BaseIdFn<T>>,
    ids: IdMap,
    name_of: Option<NameFn<T>>,
    debug_name: Option<String>,
}

impl<T, V> ListSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    /// Creates an empty section whose views are made by `factory`.
    pub fn new<F>(tag: TypeTag, factory: F) -> Self
    where
        F: Fn() -> V + Send + 'static,
    {
        Self {
            tag,
            data: Vec::new(),
            factory: Box::new(factory),
            dependency: None,
            shown: true,
            base_id: None,
            ids: IdMap::default(),
            name_of: None,
            debug_name: None,
        }
    }

    /// Sets the initial items.
    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.set_data(data);
        self
    }

    /// Shows this section only while the section tagged `dependency` is non-empty.
    pub fn with_dependency(mut self, dependency: TypeTag) -> Self {
        self.dependency = Some(dependency);
        self
    }

    /// Gives every item a stable id derived from `base_id`.
    ///
    /// Items sharing a base id are disambiguated by occurrence using `scheme`.
    pub fn with_ids<F>(mut self, base_id: F, scheme: IdScheme) -> Self
    where
        F: Fn(&T) -> u64 + Send + 'static,
    {
        self.ids = IdMap::build(&self.data, &base_id, scheme);
        self.base_id = Some(Box::new(base_id));
        self
    }

    /// Labels items for fast scrolling.
    pub fn with_section_names<F>(mut self, name_of: F) -> Self
    where
        F: Fn(&T) -> String + Send + 'static,
    {
        self.name_of = Some(Box::new(name_of));
        self
    }

    /// Sets the name shown in layout debug output.
    pub fn with_debug_name(mut self, name: impl Into<String>) -> Self {
        self.debug_name = Some(name.into());
        self
    }

    /// Returns the items.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replaces all items and rebuilds their stable ids.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        if let Some(base_id) = &self.base_id {
            self.ids.rebuild(&self.data, base_id);
        }
    }

    /// Takes the items out of the section, leaving it empty.
    pub fn take_data(&mut self) -> Vec<T> {
        let data = std::mem::take(&mut self.data);
        if let Some(base_id) = &self.base_id {
            self.ids.rebuild(&self.data, base_id);
        }
        data
    }

    /// Shows or hides the section regardless of its contents.
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    /// Moves the item at `from` to `to`, keeping ids attached to their items.
    ///
    /// Adjacent moves are a swap. Out-of-range positions are ignored.
    pub fn move_item(&mut self, from: usize, to: usize) {
        let len = self.data.len();
        if from >= len || to >= len || from == to {
            return;
        }

        if from.abs_diff(to) == 1 {
            self.data.swap(from, to);
            if self.base_id.is_some() {
                self.ids.swap(from, to);
            }
        } else {
            let item = self.data.remove(from);
            self.data.insert(to, item);
            if self.base_id.is_some() {
                self.ids.move_item(from, to);
            }
        }
    }
}

impl<T, V> Section for ListSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    type Item = T;
    type View = V;

    fn type_tag(&self) -> TypeTag {
        self.tag
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn item(&self, local_index: usize) -> Option<&T> {
        self.data.get(local_index)
    }

    fn create_view(&self) -> V {
        (self.factory)()
    }

    fn item_id(&self, local_index: usize) -> Option<StableId> {
        if self.base_id.is_none() {
            return None;
        }
        self.ids.get(local_index)
    }

    fn dependency(&self) -> Option<TypeTag> {
        self.dependency
    }

    fn is_shown(&self) -> bool {
        self.shown
    }

    fn section_name(&self, local_index: usize) -> Option<String> {
        let name_of = self.name_of.as_ref()?;
        self.data.get(local_index).map(|item| name_of(item))
    }

    fn debug_name(&self) -> &str {
        self.debug_name.as_deref().unwrap_or("list")
    }
}

impl<T, V> fmt::Debug for ListSection<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSection")
            .field("tag", &self.tag)
            .field("len", &self.data.len())
            .field("dependency", &self.dependency)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

/// A section holding exactly one item.
///
/// Typical uses are headers, spacers and action rows. The item can be hidden
/// explicitly with [`set_shown`](Self::set_shown), by a predicate over the
/// item, or by a dependency on another section.
pub struct SingletonSection<T, V> {
    tag: TypeTag,
    item: T,
    factory: ViewFactory<V>,
    dependency: Option<TypeTag>,
    shown: bool,
    predicate: Option<Predicate<T>>,
    id: Option<StableId>,
    name: Option<String>,
    debug_name: Option<String>,
}

impl<T, V> SingletonSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    /// Creates a section showing `item`.
    pub fn new<F>(tag: TypeTag, item: T, factory: F) -> Self
    where
        F: Fn() -> V + Send + 'static,
    {
        Self {
            tag,
            item,
            factory: Box::new(factory),
            dependency: None,
            shown: true,
            predicate: None,
            id: None,
            name: None,
            debug_name: None,
        }
    }

    /// Shows this section only while the section tagged `dependency` is non-empty.
    pub fn with_dependency(mut self, dependency: TypeTag) -> Self {
        self.dependency = Some(dependency);
        self
    }

    /// Shows the item only while `predicate` holds for it.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Gives the item a fixed stable id.
    pub fn with_id(mut self, id: StableId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the fast-scroll label of the item.
    pub fn with_section_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the name shown in layout debug output.
    pub fn with_debug_name(mut self, name: impl Into<String>) -> Self {
        self.debug_name = Some(name.into());
        self
    }

    /// Returns the item.
    pub fn get(&self) -> &T {
        &self.item
    }

    /// Replaces the item.
    pub fn set(&mut self, item: T) {
        self.item = item;
    }

    /// Shows or hides the item.
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }
}

impl<T, V> Section for SingletonSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    type Item = T;
    type View = V;

    fn type_tag(&self) -> TypeTag {
        self.tag
    }

    fn len(&self) -> usize {
        1
    }

    fn item(&self, local_index: usize) -> Option<&T> {
        (local_index == 0).then_some(&self.item)
    }

    fn create_view(&self) -> V {
        (self.factory)()
    }

    fn item_id(&self, local_index: usize) -> Option<StableId> {
        if local_index == 0 { self.id } else { None }
    }

    fn dependency(&self) -> Option<TypeTag> {
        self.dependency
    }

    fn is_shown(&self) -> bool {
        self.shown && self.predicate.as_ref().is_none_or(|p| p(&self.item))
    }

    fn section_name(&self, local_index: usize) -> Option<String> {
        if local_index == 0 { self.name.clone() } else { None }
    }

    fn debug_name(&self) -> &str {
        self.debug_name.as_deref().unwrap_or("singleton")
    }
}

impl<T, V> fmt::Debug for SingletonSection<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonSection")
            .field("tag", &self.tag)
            .field("dependency", &self.dependency)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

/// A [`ListSection`] whose items can be reordered by dragging.
///
/// Moves during a gesture only touch the in-memory list. When the gesture
/// ends with the item somewhere new, the reorder callback receives the final
/// list together with the origin and destination indices; that is where the
/// new order should be saved.
///
/// All list accessors are available through `Deref`.
pub struct ListDragSection<T, V> {
    inner: ListSection<T, V>,
    on_reorder: Option<ReorderFn<T>>,
}

impl<T, V> ListDragSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    /// Wraps a list section.
    pub fn new(inner: ListSection<T, V>) -> Self {
        Self {
            inner,
            on_reorder: None,
        }
    }

    /// Sets the callback invoked once per completed reorder.
    ///
    /// Args: (items in their new order, origin index, final index)
    pub fn on_reorder<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[T], usize, usize) + Send + 'static,
    {
        self.on_reorder = Some(Box::new(callback));
        self
    }

    /// Returns the wrapped list section.
    pub fn inner(&self) -> &ListSection<T, V> {
        &self.inner
    }

    /// Unwraps the list section.
    pub fn into_inner(self) -> ListSection<T, V> {
        self.inner
    }
}

impl<T, V> Section for ListDragSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    type Item = T;
    type View = V;

    fn type_tag(&self) -> TypeTag {
        self.inner.type_tag()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn item(&self, local_index: usize) -> Option<&T> {
        self.inner.item(local_index)
    }

    fn create_view(&self) -> V {
        self.inner.create_view()
    }

    fn item_id(&self, local_index: usize) -> Option<StableId> {
        self.inner.item_id(local_index)
    }

    fn dependency(&self) -> Option<TypeTag> {
        self.inner.dependency()
    }

    fn is_shown(&self) -> bool {
        self.inner.is_shown()
    }

    fn section_name(&self, local_index: usize) -> Option<String> {
        self.inner.section_name(local_index)
    }

    fn debug_name(&self) -> &str {
        self.inner.debug_name()
    }
}

impl<T, V> DragSection for ListDragSection<T, V>
where
    T: Send + 'static,
    V: ItemView<Item = T>,
{
    fn on_move(&mut self, from: usize, to: usize) {
        self.inner.move_item(from, to);
    }

    fn on_drop(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        if let Some(callback) = self.on_reorder.as_mut() {
            callback(&self.inner.data, from, to);
        }
    }
}

impl<T, V> std::ops::Deref for ListDragSection<T, V> {
    type Target = ListSection<T, V>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T, V> std::ops::DerefMut for ListDragSection<T, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T, V> fmt::Debug for ListDragSection<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDragSection")
            .field("inner", &self.inner)
            .field("has_reorder_callback", &self.on_reorder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Row;

    impl ItemView for Row {
        type Item = u64;
        fn bind(&mut self, _item: &u64, _local_index: usize) {}
    }

    fn list(data: Vec<u64>) -> ListSection<u64, Row> {
        ListSection::new(TypeTag::new(1), Row::default)
            .with_ids(|&id| id, IdScheme::Mixed)
            .with_data(data)
    }

    #[test]
    fn test_list_section_basics() {
        let section = list(vec![3, 4, 5]);
        assert_eq!(section.len(), 3);
        assert_eq!(section.item(1), Some(&4));
        assert_eq!(section.item(3), None);
        assert!(section.item_id(0).is_some());
        assert!(section.item_id(3).is_none());
    }

    #[test]
    fn test_list_without_ids_reports_none() {
        let section: ListSection<u64, Row> =
            ListSection::new(TypeTag::new(1), Row::default).with_data(vec![1]);
        assert_eq!(section.item_id(0), None);
    }

    #[test]
    fn test_set_data_rebuilds_ids() {
        let mut section = list(vec![1, 1]);
        let before = section.item_id(1);
        section.set_data(vec![2, 1, 1]);
        assert_eq!(section.item_id(2), before);
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn test_move_item_keeps_ids_with_items() {
        let mut section = list(vec![10, 20, 30]);
        let id_of_10 = section.item_id(0);

        section.move_item(0, 1);
        assert_eq!(section.data(), &[20, 10, 30]);
        assert_eq!(section.item_id(1), id_of_10);

        section.move_item(1, 0);
        section.move_item(0, 2);
        assert_eq!(section.data(), &[20, 30, 10]);
        assert_eq!(section.item_id(2), id_of_10);
    }

    #[test]
    fn test_section_names() {
        let section = ListSection::new(TypeTag::new(1), Row::default)
            .with_data(vec![42])
            .with_section_names(|n| format!("n{n}"));
        assert_eq!(section.section_name(0).as_deref(), Some("n42"));
        assert_eq!(section.section_name(1), None);
    }

    #[test]
    fn test_singleton_predicate_and_shown() {
        let mut single = SingletonSection::new(TypeTag::new(9), 0_u64, Row::default)
            .with_predicate(|&count| count > 0);
        assert_eq!(single.len(), 1);
        assert!(!single.is_shown());

        single.set(2);
        assert!(single.is_shown());

        single.set_shown(false);
        assert!(!single.is_shown());
        assert_eq!(single.item(0), Some(&2));
        assert_eq!(single.item(1), None);
    }

    #[test]
    fn test_drag_section_drop_same_index_skips_callback() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let c = calls.clone();
        let mut drag = ListDragSection::new(list(vec![1, 2, 3]))
            .on_reorder(move |items, from, to| c.lock().push((items.to_vec(), from, to)));

        drag.on_drop(1, 1);
        assert!(calls.lock().is_empty());

        drag.on_move(0, 1);
        drag.on_move(1, 2);
        drag.on_drop(0, 2);
        assert_eq!(*calls.lock(), vec![(vec![2, 3, 1], 0, 2)]);
    }

    #[test]
    fn test_drag_section_derefs_to_list() {
        let mut drag = ListDragSection::new(list(vec![1]));
        drag.set_data(vec![5, 6]);
        assert_eq!(drag.data(), &[5, 6]);
        assert_eq!(drag.inner().len(), 2);
    }
}
