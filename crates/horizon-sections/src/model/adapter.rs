//! The adapter that composes sections into one flat list.
//!
//! [`SectionAdapter`] owns an ordered list of sections and answers the
//! questions a hosting list view asks: how many rows there are, which kind of
//! row sits at a position, which id it has, and how to bind it. Positions are
//! resolved by walking the sections in display order and accumulating their
//! visible sizes. Nothing is cached, since a section's visibility can depend
//! on the live size of a sibling.
//!
//! # Example
//!
//! ```
//! use horizon_sections::model::{ItemView, ListSection, SingletonSection, TypeTag};
//! use horizon_sections::SectionAdapter;
//!
//! #[derive(Default)]
//! struct TextRow(String);
//!
//! impl ItemView for TextRow {
//!     type Item = String;
//!     fn bind(&mut self, item: &String, _local_index: usize) {
//!         self.0 = item.clone();
//!     }
//! }
//!
//! const HEADER: TypeTag = TypeTag::new(1);
//! const SONGS: TypeTag = TypeTag::new(2);
//!
//! let mut adapter = SectionAdapter::new();
//! adapter
//!     .add_section(ListSection::new(SONGS, TextRow::default).with_data(vec!["a".into(), "b".into()]))
//!     .unwrap();
//! adapter
//!     .add_section_at(0, SingletonSection::new(HEADER, "Songs".to_string(), TextRow::default).with_dependency(SONGS))
//!     .unwrap();
//!
//! assert_eq!(adapter.item_count(), 3);
//! assert_eq!(adapter.type_at(0).unwrap(), HEADER);
//!
//! let mut row = adapter.create_view(SONGS).unwrap();
//! adapter.bind(&mut row, 2).unwrap();
//! assert_eq!(row.downcast_ref::<TextRow>().unwrap().0, "b");
//! ```

use std::collections::HashMap;
use std::fmt;

use horizon_sections_core::logging::targets;
use slotmap::{SlotMap, new_key_type};

use super::drag::DragController;
use super::empty_state::{AnyEmptyState, EmptyAction, EmptyState};
use super::index::{Coordinate, ItemId, TypeTag};
use super::section::{AnySection, Attached, DragSection, Section};
use super::signals::ListSignals;
use super::view::ViewHolder;
use crate::config::{AdapterConfig, OutOfRangePolicy};
use crate::error::{Result, SectionError};

new_key_type! {
    /// Key of an attached section.
    pub(super) struct SectionKey;
}

pub(super) struct SectionSlot {
    pub(super) tag: TypeTag,
    pub(super) dependency: Option<TypeTag>,
    pub(super) section: Box<dyn AnySection>,
}

/// A snapshot of one attached section, as used by the layout debugger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    /// Index of the section in display order.
    pub index: usize,
    /// The section's type tag.
    pub tag: TypeTag,
    /// The section's debug name.
    pub name: String,
    /// Whether the section currently contributes items.
    pub visible: bool,
    /// Number of items the section currently contributes.
    pub size: usize,
    /// Number of items contributed by the sections before it.
    pub leading: usize,
    /// The section this one's visibility depends on.
    pub dependency: Option<TypeTag>,
    /// Whether this is the drag section.
    pub draggable: bool,
}

/// Composes independently owned sections into one addressable list.
///
/// Display order is attachment order, unless a section is inserted at an
/// explicit index. Every structural change emits
/// [`everything_changed`](ListSignals::everything_changed).
///
/// When no section has visible items and an [`EmptyState`] is registered, the
/// adapter reports exactly one item of type [`TypeTag::EMPTY_STATE`].
pub struct SectionAdapter {
    pub(super) sections: SlotMap<SectionKey, SectionSlot>,
    pub(super) order: Vec<SectionKey>,
    pub(super) registry: HashMap<TypeTag, SectionKey>,
    empty_state: Option<Box<dyn AnyEmptyState>>,
    pub(super) drag: DragController,
    pub(super) signals: ListSignals,
    config: AdapterConfig,
}

impl Default for SectionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionAdapter {
    /// Creates an empty adapter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AdapterConfig::default())
    }

    /// Creates an empty adapter with the given configuration.
    pub fn with_config(config: AdapterConfig) -> Self {
        Self {
            sections: SlotMap::with_key(),
            order: Vec::new(),
            registry: HashMap::new(),
            empty_state: None,
            drag: DragController::default(),
            signals: ListSignals::new(),
            config,
        }
    }

    /// Returns the adapter's configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns the signals a hosting view connects to.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Appends a section.
    pub fn add_section<S: Section>(&mut self, section: S) -> Result<()> {
        self.add_section_at(self.order.len(), section)
    }

    /// Inserts a section at `index` in display order.
    ///
    /// # Errors
    ///
    /// - [`SectionError::DragInProgress`] while a drag is active (if locked)
    /// - [`SectionError::ReservedTypeTag`] for [`TypeTag::EMPTY_STATE`]
    /// - [`SectionError::DuplicateTypeKind`] if the tag is already attached
    /// - [`SectionError::InvalidDependency`] for self-dependencies, chains and cycles
    /// - [`SectionError::OutOfRange`] if `index > section_count()`
    ///
    /// The adapter is unchanged on error.
    pub fn add_section_at<S: Section>(&mut self, index: usize, section: S) -> Result<()> {
        self.attach(index, Box::new(Attached::plain(section)))
    }

    /// Appends the drag section.
    pub fn set_drag_section<S: DragSection>(&mut self, section: S) -> Result<()> {
        self.set_drag_section_at(self.order.len(), section)
    }

    /// Inserts the drag section at `index` in display order.
    ///
    /// Only one drag section can be attached at a time. Fails with
    /// [`SectionError::DragSectionAlreadyAttached`] otherwise, in addition to
    /// the errors of [`add_section_at`](Self::add_section_at).
    pub fn set_drag_section_at<S: DragSection>(&mut self, index: usize, section: S) -> Result<()> {
        self.ensure_unlocked()?;
        if let Some(existing) = self.drag.tag {
            return Err(SectionError::DragSectionAlreadyAttached(existing));
        }

        let tag = section.type_tag();
        self.attach(index, Box::new(Attached::draggable(section)))?;
        self.drag.tag = Some(tag);
        tracing::debug!(target: targets::DRAG, %tag, "drag section attached");
        Ok(())
    }

    fn attach(&mut self, index: usize, section: Box<dyn AnySection>) -> Result<()> {
        self.ensure_unlocked()?;

        let tag = section.type_tag();
        if tag.is_empty_state() {
            return Err(SectionError::ReservedTypeTag(tag));
        }
        if self.registry.contains_key(&tag) {
            return Err(SectionError::DuplicateTypeKind(tag));
        }
        let dependency = section.dependency();
        if let Some(dependency) = dependency {
            self.validate_dependency(tag, dependency)?;
        }
        if index > self.order.len() {
            return Err(SectionError::out_of_range(index, self.order.len()));
        }

        tracing::debug!(
            target: targets::ADAPTER,
            %tag,
            index,
            name = section.debug_name(),
            ?dependency,
            "section attached"
        );

        let key = self.sections.insert(SectionSlot {
            tag,
            dependency,
            section,
        });
        self.order.insert(index, key);
        self.registry.insert(tag, key);

        self.signals.everything_changed.emit(());
        Ok(())
    }

    fn validate_dependency(&self, tag: TypeTag, dependency: TypeTag) -> Result<()> {
        if dependency == tag {
            return Err(SectionError::invalid_dependency(
                tag,
                dependency,
                "a section cannot depend on itself",
            ));
        }

        let target_has_dependency = self
            .registry
            .get(&dependency)
            .and_then(|key| self.sections.get(*key))
            .is_some_and(|slot| slot.dependency.is_some());
        if target_has_dependency {
            return Err(SectionError::invalid_dependency(
                tag,
                dependency,
                "the dependency itself depends on another section",
            ));
        }

        if self.sections.values().any(|slot| slot.dependency == Some(tag)) {
            return Err(SectionError::invalid_dependency(
                tag,
                dependency,
                "other sections already depend on this section",
            ));
        }

        Ok(())
    }

    /// Removes the section at `index` in display order.
    ///
    /// Returns `Ok(false)` if there is no section at `index`. Removing the drag
    /// section detaches it, so another one can be attached afterwards.
    pub fn remove_section(&mut self, index: usize) -> Result<bool> {
        self.ensure_unlocked()?;
        if index >= self.order.len() {
            return Ok(false);
        }

        let key = self.order.remove(index);
        if let Some(slot) = self.sections.remove(key) {
            self.registry.remove(&slot.tag);
            if self.drag.tag == Some(slot.tag) {
                self.drag.detach();
                tracing::debug!(target: targets::DRAG, tag = %slot.tag, "drag section detached");
            }
            tracing::debug!(target: targets::ADAPTER, tag = %slot.tag, index, "section removed");
        }

        self.signals.everything_changed.emit(());
        Ok(true)
    }

    /// Removes the section with the given tag.
    ///
    /// Returns `Ok(false)` if no such section is attached.
    pub fn remove_section_by_tag(&mut self, tag: TypeTag) -> Result<bool> {
        self.ensure_unlocked()?;
        match self.section_index(tag) {
            Some(index) => self.remove_section(index),
            None => Ok(false),
        }
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.config.lock_structure_while_dragging && self.drag.session.is_some() {
            tracing::debug!(target: targets::ADAPTER, "structural change rejected during drag");
            return Err(SectionError::DragInProgress);
        }
        Ok(())
    }

    /// Returns the number of attached sections, visible or not.
    pub fn section_count(&self) -> usize {
        self.order.len()
    }

    /// Returns the tag of the section at `index` in display order.
    pub fn section_tag_at(&self, index: usize) -> Option<TypeTag> {
        let key = self.order.get(index)?;
        self.sections.get(*key).map(|slot| slot.tag)
    }

    /// Returns the display index of the section with the given tag.
    pub fn section_index(&self, tag: TypeTag) -> Option<usize> {
        let key = self.registry.get(&tag)?;
        self.order.iter().position(|k| k == key)
    }

    /// Returns `true` if a section with the given tag is attached.
    pub fn contains_section(&self, tag: TypeTag) -> bool {
        self.registry.contains_key(&tag)
    }

    /// Returns the attached section with the given tag as its concrete type.
    pub fn section<S: Section>(&self, tag: TypeTag) -> Result<&S> {
        let slot = self.slot(tag).ok_or(SectionError::UnknownTypeTag(tag))?;
        slot.section
            .as_any()
            .downcast_ref::<S>()
            .ok_or(SectionError::SectionTypeMismatch(tag))
    }

    /// Mutates the section with the given tag and resynchronizes the list.
    ///
    /// This is the way to replace a section's data after it was attached.
    /// The section's dependency and tag are fixed at attach time.
    pub fn update_section<S, R>(&mut self, tag: TypeTag, f: impl FnOnce(&mut S) -> R) -> Result<R>
    where
        S: Section,
    {
        self.ensure_unlocked()?;
        let key = *self
            .registry
            .get(&tag)
            .ok_or(SectionError::UnknownTypeTag(tag))?;
        let section = self
            .sections
            .get_mut(key)
            .and_then(|slot| slot.section.as_any_mut().downcast_mut::<S>())
            .ok_or(SectionError::SectionTypeMismatch(tag))?;

        let result = f(section);
        tracing::debug!(target: targets::ADAPTER, %tag, "section updated");
        self.signals.everything_changed.emit(());
        Ok(result)
    }

    // =========================================================================
    // Empty state
    // =========================================================================

    /// Registers the provider shown while no section has visible items.
    ///
    /// Replaces any previous provider.
    pub fn set_empty_state<E: EmptyState>(&mut self, empty_state: E) {
        self.empty_state = Some(Box::new(empty_state));
        self.signals.everything_changed.emit(());
    }

    /// Removes the empty-state provider. Returns whether one was registered.
    pub fn clear_empty_state(&mut self) -> bool {
        let had = self.empty_state.take().is_some();
        if had {
            self.signals.everything_changed.emit(());
        }
        had
    }

    /// Returns `true` if an empty-state provider is registered.
    pub fn has_empty_state(&self) -> bool {
        self.empty_state.is_some()
    }

    /// Returns `true` if the list currently consists of the empty-state item.
    pub fn is_showing_empty_state(&self) -> bool {
        self.empty_state.is_some() && self.visible_size() == 0
    }

    /// Forwards a press on one of the empty state's buttons to the provider.
    pub fn trigger_empty_action(&self, action: EmptyAction) -> Result<()> {
        let empty_state = self.empty_state.as_ref().ok_or(SectionError::NoEmptyState)?;
        empty_state.on_action(action);
        Ok(())
    }

    // =========================================================================
    // Sizes and visibility
    // =========================================================================

    fn slot(&self, tag: TypeTag) -> Option<&SectionSlot> {
        self.registry.get(&tag).and_then(|key| self.sections.get(*key))
    }

    fn slot_visible(&self, slot: &SectionSlot) -> bool {
        if !slot.section.is_shown() {
            return false;
        }
        match slot.dependency {
            None => true,
            Some(dependency) => self
                .slot(dependency)
                .is_some_and(|target| target.section.is_shown() && target.section.raw_len() > 0),
        }
    }

    pub(super) fn slot_size(&self, slot: &SectionSlot) -> usize {
        if self.slot_visible(slot) {
            slot.section.raw_len()
        } else {
            0
        }
    }

    fn key_size(&self, key: SectionKey) -> usize {
        self.sections.get(key).map_or(0, |slot| self.slot_size(slot))
    }

    /// Returns `true` if the section with the given tag currently contributes items.
    ///
    /// A section is visible when it is shown and, if it has a dependency, the
    /// dependency is attached, shown and non-empty.
    pub fn is_section_visible(&self, tag: TypeTag) -> bool {
        self.slot(tag).is_some_and(|slot| self.slot_visible(slot))
    }

    /// Returns the number of items the section with the given tag contributes.
    pub fn section_size(&self, tag: TypeTag) -> usize {
        self.slot(tag).map_or(0, |slot| self.slot_size(slot))
    }

    /// Returns the number of items contributed by all sections.
    pub fn visible_size(&self) -> usize {
        self.order.iter().map(|key| self.key_size(*key)).sum()
    }

    /// Returns the number of rows the hosting view should display.
    ///
    /// This is [`visible_size`](Self::visible_size), or 1 when that is zero and
    /// an empty state is registered.
    pub fn item_count(&self) -> usize {
        match self.visible_size() {
            0 if self.empty_state.is_some() => 1,
            size => size,
        }
    }

    /// Returns the number of items contributed by the sections before the
    /// first section with the given tag.
    ///
    /// Returns 0 if the section is first or not attached.
    pub fn leading_count(&self, tag: TypeTag) -> usize {
        let mut leading = 0;
        for key in &self.order {
            let Some(slot) = self.sections.get(*key) else {
                continue;
            };
            if slot.tag == tag {
                return leading;
            }
            leading += self.slot_size(slot);
        }
        0
    }

    // =========================================================================
    // Position queries
    // =========================================================================

    /// Finds the section slot owning `position`, with the position's local index.
    fn locate(&self, position: usize) -> Option<(usize, &SectionSlot, usize)> {
        let mut start = 0;
        for (index, key) in self.order.iter().enumerate() {
            let Some(slot) = self.sections.get(*key) else {
                continue;
            };
            let size = self.slot_size(slot);
            if position < start + size {
                return Some((index, slot, position - start));
            }
            start += size;
        }
        None
    }

    /// Maps a flat position to the section and local index that own it.
    ///
    /// Only section items resolve. While the empty state is shown,
    /// [`item_count`](Self::item_count) is 1 but no position resolves: the
    /// result is `OutOfRange` with `count` equal to
    /// [`visible_size`](Self::visible_size), which is 0. Check
    /// [`is_showing_empty_state`](Self::is_showing_empty_state) or use
    /// [`type_at`](Self::type_at) to address the placeholder.
    pub fn resolve_position(&self, position: usize) -> Result<Coordinate> {
        self.locate(position)
            .map(|(section, _, local)| Coordinate::new(section, local))
            .ok_or_else(|| SectionError::out_of_range(position, self.visible_size()))
    }

    fn stale_position(&self, position: usize, count: usize, operation: &'static str) -> SectionError {
        match self.config.out_of_range {
            OutOfRangePolicy::Panic => {
                panic!("{operation}: position {position} is out of range (item count {count})")
            }
            OutOfRangePolicy::Ignore => {
                tracing::warn!(target: targets::ADAPTER, operation, position, count, "stale position ignored");
                SectionError::out_of_range(position, count)
            }
        }
    }

    /// Returns the type tag of the row at `position`.
    pub fn type_at(&self, position: usize) -> Result<TypeTag> {
        if self.is_showing_empty_state() {
            return match position {
                0 => Ok(TypeTag::EMPTY_STATE),
                _ => Err(self.stale_position(position, 1, "type_at")),
            };
        }
        match self.locate(position) {
            Some((_, slot, _)) => Ok(slot.tag),
            None => Err(self.stale_position(position, self.visible_size(), "type_at")),
        }
    }

    /// Returns the adapter-wide id of the row at `position`.
    ///
    /// `Ok(None)` means the owning section reports no stable id for the item.
    pub fn identity_at(&self, position: usize) -> Result<Option<ItemId>> {
        if self.is_showing_empty_state() {
            return match position {
                0 => Ok(Some(ItemId::EMPTY_STATE)),
                _ => Err(self.stale_position(position, 1, "identity_at")),
            };
        }
        match self.locate(position) {
            Some((_, slot, local)) => Ok(slot
                .section
                .item_id(local)
                .map(|id| ItemId::new(slot.tag, id))),
            None => Err(self.stale_position(position, self.visible_size(), "identity_at")),
        }
    }

    /// Returns the fast-scroll label of the row at `position`.
    pub fn section_name_at(&self, position: usize) -> Result<Option<String>> {
        if self.is_showing_empty_state() {
            return match position {
                0 => Ok(None),
                _ => Err(self.stale_position(position, 1, "section_name_at")),
            };
        }
        match self.locate(position) {
            Some((_, slot, local)) => Ok(slot.section.section_name(local)),
            None => Err(self.stale_position(position, self.visible_size(), "section_name_at")),
        }
    }

    /// Creates a view for rows of the given type.
    pub fn create_view(&self, tag: TypeTag) -> Result<ViewHolder> {
        if tag.is_empty_state() {
            return self
                .empty_state
                .as_ref()
                .map(|empty| empty.create_view())
                .ok_or(SectionError::NoEmptyState);
        }
        self.slot(tag)
            .map(|slot| slot.section.create_view())
            .ok_or(SectionError::UnknownTypeTag(tag))
    }

    /// Binds the row at `position` into `holder`.
    ///
    /// The owning section receives the local index of the item, never the
    /// flat position.
    pub fn bind(&self, holder: &mut ViewHolder, position: usize) -> Result<()> {
        if self.is_showing_empty_state() {
            if position != 0 {
                return Err(self.stale_position(position, 1, "bind"));
            }
            let mismatch = SectionError::ViewTypeMismatch {
                view: holder.type_tag(),
                item: TypeTag::EMPTY_STATE,
            };
            if !holder.type_tag().is_empty_state() {
                return Err(mismatch);
            }
            return match &self.empty_state {
                Some(empty) if empty.bind(holder, position) => Ok(()),
                _ => Err(mismatch),
            };
        }

        let Some((_, slot, local)) = self.locate(position) else {
            return Err(self.stale_position(position, self.visible_size(), "bind"));
        };
        let mismatch = SectionError::ViewTypeMismatch {
            view: holder.type_tag(),
            item: slot.tag,
        };
        if holder.type_tag() != slot.tag {
            return Err(mismatch);
        }
        if slot.section.bind(holder, local, position) {
            Ok(())
        } else {
            Err(mismatch)
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Reports that a collaborator inserted an item at `local_index` of a section.
    ///
    /// Emits `item_inserted` with the flat position and returns it.
    pub fn notify_item_inserted(&self, tag: TypeTag, local_index: usize) -> Result<usize> {
        let position = self.flat_position(tag, local_index)?;
        self.signals.item_inserted.emit(position);
        Ok(position)
    }

    /// Reports that a collaborator removed the item at `local_index` of a section.
    ///
    /// Emits `item_removed` with the flat position and returns it.
    pub fn notify_item_removed(&self, tag: TypeTag, local_index: usize) -> Result<usize> {
        let position = self.flat_position(tag, local_index)?;
        self.signals.item_removed.emit(position);
        Ok(position)
    }

    /// Tells the hosting view that any part of the list may have changed.
    pub fn notify_everything_changed(&self) {
        self.signals.everything_changed.emit(());
    }

    fn flat_position(&self, tag: TypeTag, local_index: usize) -> Result<usize> {
        if !self.contains_section(tag) {
            return Err(SectionError::UnknownTypeTag(tag));
        }
        Ok(self.leading_count(tag) + local_index)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns a snapshot of every attached section in display order.
    pub fn section_infos(&self) -> Vec<SectionInfo> {
        let mut leading = 0;
        let mut infos = Vec::with_capacity(self.order.len());
        for (index, key) in self.order.iter().enumerate() {
            let Some(slot) = self.sections.get(*key) else {
                continue;
            };
            let size = self.slot_size(slot);
            infos.push(SectionInfo {
                index,
                tag: slot.tag,
                name: slot.section.debug_name().to_string(),
                visible: self.slot_visible(slot),
                size,
                leading,
                dependency: slot.dependency,
                draggable: slot.section.is_draggable(),
            });
            leading += size;
        }
        infos
    }
}

impl fmt::Debug for SectionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionAdapter")
            .field("sections", &self.section_infos())
            .field("has_empty_state", &self.empty_state.is_some())
            .field("drag", &self.drag)
            .field("config", &self.config)
            .finish()
    }
}

static_assertions::assert_impl_all!(SectionAdapter: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BasicEmptyState, EmptyContent, ItemView, ListSection, SingletonSection};
    use parking_lot::Mutex;
    use std::sync::Arc;

    const HEADER: TypeTag = TypeTag::new(1);
    const SONGS: TypeTag = TypeTag::new(2);
    const FOOTER: TypeTag = TypeTag::new(3);

    #[derive(Default)]
    struct Row {
        text: String,
        local: usize,
    }

    impl ItemView for Row {
        type Item = String;

        fn bind(&mut self, item: &String, local_index: usize) {
            self.text = item.clone();
            self.local = local_index;
        }
    }

    #[derive(Default)]
    struct Placeholder(String);

    impl ItemView for Placeholder {
        type Item = EmptyContent;

        fn bind(&mut self, item: &EmptyContent, _local_index: usize) {
            self.0 = item.message.clone();
        }
    }

    fn songs(n: usize) -> ListSection<String, Row> {
        ListSection::new(SONGS, Row::default).with_data((0..n).map(|i| format!("song {i}")).collect())
    }

    fn header() -> SingletonSection<String, Row> {
        SingletonSection::new(HEADER, "Header".to_string(), Row::default).with_dependency(SONGS)
    }

    fn ignoring() -> SectionAdapter {
        SectionAdapter::with_config(AdapterConfig::new().with_out_of_range(OutOfRangePolicy::Ignore))
    }

    #[test]
    fn test_empty_adapter() {
        let adapter = SectionAdapter::new();
        assert_eq!(adapter.item_count(), 0);
        assert_eq!(adapter.section_count(), 0);
        assert!(adapter.resolve_position(0).is_err());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(songs(2)).unwrap();

        let err = adapter.add_section(songs(3)).unwrap_err();
        assert_eq!(err, SectionError::DuplicateTypeKind(SONGS));
        assert!(err.is_rejection());
        assert_eq!(adapter.item_count(), 2);
    }

    #[test]
    fn test_reserved_tag_rejected() {
        let mut adapter = SectionAdapter::new();
        let section = ListSection::<String, Row>::new(TypeTag::EMPTY_STATE, Row::default);
        assert_eq!(
            adapter.add_section(section).unwrap_err(),
            SectionError::ReservedTypeTag(TypeTag::EMPTY_STATE)
        );
    }

    #[test]
    fn test_insert_index_out_of_range() {
        let mut adapter = SectionAdapter::new();
        assert!(matches!(
            adapter.add_section_at(1, songs(1)),
            Err(SectionError::OutOfRange { position: 1, count: 0 })
        ));
        assert!(!adapter.contains_section(SONGS));
    }

    #[test]
    fn test_dependency_validation() {
        let mut adapter = SectionAdapter::new();

        let selfish = ListSection::<String, Row>::new(SONGS, Row::default).with_dependency(SONGS);
        assert!(matches!(
            adapter.add_section(selfish),
            Err(SectionError::InvalidDependency { .. })
        ));

        adapter.add_section(songs(1)).unwrap();
        adapter.add_section(header()).unwrap();

        // FOOTER -> HEADER -> SONGS is a chain
        let footer = SingletonSection::new(FOOTER, String::new(), Row::default).with_dependency(HEADER);
        assert!(matches!(
            adapter.add_section(footer),
            Err(SectionError::InvalidDependency { .. })
        ));
        assert_eq!(adapter.section_count(), 2);
    }

    #[test]
    fn test_dependent_section_rejected_when_depended_upon() {
        let mut adapter = SectionAdapter::new();
        // HEADER depends on SONGS, which is not attached yet
        adapter.add_section(header()).unwrap();

        let cyclic = ListSection::<String, Row>::new(SONGS, Row::default).with_dependency(HEADER);
        assert!(matches!(
            adapter.add_section(cyclic),
            Err(SectionError::InvalidDependency { .. })
        ));
        adapter.add_section(songs(2)).unwrap();
        assert_eq!(adapter.item_count(), 3);
    }

    #[test]
    fn test_missing_dependency_hides_section() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(header()).unwrap();
        assert!(!adapter.is_section_visible(HEADER));
        assert_eq!(adapter.item_count(), 0);
    }

    #[test]
    fn test_resolve_and_bind_use_local_index() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(header()).unwrap();
        adapter.add_section(songs(3)).unwrap();

        assert_eq!(adapter.resolve_position(0).unwrap(), Coordinate::new(0, 0));
        assert_eq!(adapter.resolve_position(2).unwrap(), Coordinate::new(1, 1));
        assert_eq!(adapter.leading_count(SONGS), 1);
        assert_eq!(adapter.leading_count(HEADER), 0);
        assert_eq!(adapter.leading_count(FOOTER), 0);

        let mut view = adapter.create_view(SONGS).unwrap();
        adapter.bind(&mut view, 3).unwrap();
        let row = view.downcast_ref::<Row>().unwrap();
        assert_eq!(row.text, "song 2");
        assert_eq!(row.local, 2);
        assert_eq!(view.position(), Some(3));
    }

    #[test]
    fn test_bind_rejects_wrong_view() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(header()).unwrap();
        adapter.add_section(songs(1)).unwrap();

        let mut view = adapter.create_view(HEADER).unwrap();
        assert_eq!(
            adapter.bind(&mut view, 1).unwrap_err(),
            SectionError::ViewTypeMismatch { view: HEADER, item: SONGS }
        );
    }

    #[test]
    fn test_create_view_errors() {
        let adapter = SectionAdapter::new();
        assert_eq!(
            adapter.create_view(SONGS).unwrap_err(),
            SectionError::UnknownTypeTag(SONGS)
        );
        assert_eq!(
            adapter.create_view(TypeTag::EMPTY_STATE).unwrap_err(),
            SectionError::NoEmptyState
        );
    }

    #[test]
    fn test_stale_positions_ignored() {
        let mut adapter = ignoring();
        adapter.add_section(songs(2)).unwrap();

        assert!(matches!(
            adapter.type_at(2),
            Err(SectionError::OutOfRange { position: 2, count: 2 })
        ));
        assert!(adapter.identity_at(5).is_err());
        assert!(adapter.section_name_at(2).is_err());

        let mut view = adapter.create_view(SONGS).unwrap();
        assert!(adapter.bind(&mut view, 9).is_err());
        assert_eq!(view.position(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_stale_positions_panic() {
        let mut adapter =
            SectionAdapter::with_config(AdapterConfig::new().with_out_of_range(OutOfRangePolicy::Panic));
        adapter.add_section(songs(1)).unwrap();
        let _ = adapter.type_at(1);
    }

    #[test]
    fn test_empty_state_substitution() {
        let mut adapter = ignoring();
        adapter.add_section(songs(0)).unwrap();
        adapter.set_empty_state(BasicEmptyState::new(Placeholder::default).with_message("No songs"));

        assert!(adapter.is_showing_empty_state());
        assert_eq!(adapter.item_count(), 1);
        assert_eq!(adapter.type_at(0).unwrap(), TypeTag::EMPTY_STATE);
        assert_eq!(adapter.identity_at(0).unwrap(), Some(ItemId::EMPTY_STATE));
        assert!(adapter.type_at(1).is_err());

        assert_eq!(
            adapter.resolve_position(0).unwrap_err(),
            SectionError::OutOfRange { position: 0, count: 0 }
        );

        let mut view = adapter.create_view(TypeTag::EMPTY_STATE).unwrap();
        adapter.bind(&mut view, 0).unwrap();
        assert_eq!(view.downcast_ref::<Placeholder>().unwrap().0, "No songs");

        adapter.update_section::<ListSection<String, Row>, _>(SONGS, |s| s.set_data(vec!["x".into()])).unwrap();
        assert!(!adapter.is_showing_empty_state());
        assert_eq!(adapter.type_at(0).unwrap(), SONGS);

        assert!(adapter.clear_empty_state());
        assert!(!adapter.clear_empty_state());
    }

    #[test]
    fn test_trigger_empty_action() {
        let mut adapter = SectionAdapter::new();
        assert_eq!(
            adapter.trigger_empty_action(EmptyAction::Primary).unwrap_err(),
            SectionError::NoEmptyState
        );

        let pressed = Arc::new(Mutex::new(0));
        let p = pressed.clone();
        adapter.set_empty_state(
            BasicEmptyState::new(Placeholder::default).with_primary_action("Scan", move || *p.lock() += 1),
        );
        adapter.trigger_empty_action(EmptyAction::Primary).unwrap();
        assert_eq!(*pressed.lock(), 1);
    }

    #[test]
    fn test_structural_changes_emit_everything_changed() {
        let mut adapter = SectionAdapter::new();
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        adapter.signals().everything_changed.connect(move |_| *c.lock() += 1);

        adapter.add_section(songs(1)).unwrap();
        adapter.add_section_at(0, header()).unwrap();
        assert!(adapter.remove_section_by_tag(HEADER).unwrap());
        assert!(!adapter.remove_section_by_tag(HEADER).unwrap());
        assert!(!adapter.remove_section(4).unwrap());
        let _ = adapter.add_section(songs(1));

        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn test_typed_section_access() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(songs(2)).unwrap();

        let section = adapter.section::<ListSection<String, Row>>(SONGS).unwrap();
        assert_eq!(section.data().len(), 2);

        assert_eq!(
            adapter.section::<SingletonSection<String, Row>>(SONGS).unwrap_err(),
            SectionError::SectionTypeMismatch(SONGS)
        );
        assert_eq!(
            adapter
                .update_section::<ListSection<String, Row>, _>(HEADER, |_| ())
                .unwrap_err(),
            SectionError::UnknownTypeTag(HEADER)
        );
    }

    #[test]
    fn test_notify_item_inserted_uses_leading_count() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(header()).unwrap();
        adapter.add_section(songs(2)).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        adapter.signals().item_inserted.connect(move |&pos| s.lock().push(pos));
        let r = seen.clone();
        adapter.signals().item_removed.connect(move |&pos| r.lock().push(pos + 100));

        assert_eq!(adapter.notify_item_inserted(SONGS, 1).unwrap(), 2);
        assert_eq!(adapter.notify_item_removed(SONGS, 0).unwrap(), 1);
        assert!(adapter.notify_item_inserted(FOOTER, 0).is_err());
        assert_eq!(*seen.lock(), vec![2, 101]);
    }

    #[test]
    fn test_section_infos() {
        let mut adapter = SectionAdapter::new();
        adapter.add_section(header()).unwrap();
        adapter.add_section(songs(0)).unwrap();

        let infos = adapter.section_infos();
        assert_eq!(infos.len(), 2);
        assert!(!infos[0].visible);
        assert_eq!(infos[0].dependency, Some(SONGS));
        assert_eq!(infos[1].leading, 0);
        assert_eq!(infos[1].size, 0);
        assert!(infos[1].visible);
    }
}
