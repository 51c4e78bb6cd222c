//! Tags and coordinates used to address items in a sectioned list.

use std::fmt;

use super::identity::StableId;

/// Identifies the kind of item (and view) a section produces.
///
/// Every section attached to one adapter must have a distinct tag. The tag is
/// what a hosting view uses to pick a view factory and to decide whether a
/// recycled view can display a given row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(u32);

impl TypeTag {
    /// The tag reported for the synthetic empty-state item.
    ///
    /// No section may use this tag.
    pub const EMPTY_STATE: Self = Self(u32::MAX);

    /// Creates a tag from a raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this tag.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` if this is the reserved empty-state tag.
    pub const fn is_empty_state(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty_state() {
            write!(f, "#empty")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// An adapter-wide item identity.
///
/// Pairs the owning section's tag with the section-local stable id, so equal
/// ids reported by two different sections never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId {
    /// The tag of the section that owns the item.
    pub tag: TypeTag,
    /// The item's stable id within its section.
    pub id: StableId,
}

impl ItemId {
    /// The fixed identity of the empty-state item.
    pub const EMPTY_STATE: Self = Self {
        tag: TypeTag::EMPTY_STATE,
        id: StableId::new(u64::MAX),
    };

    /// Creates an item id.
    pub const fn new(tag: TypeTag, id: StableId) -> Self {
        Self { tag, id }
    }
}

/// The `(section, local index)` pair a flat position resolves to.
///
/// Coordinates are computed on demand and never stored: any structural change
/// to the adapter invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Index of the section in display order.
    pub section: usize,
    /// Index of the item within that section.
    pub local: usize,
}

impl Coordinate {
    /// Creates a coordinate.
    pub const fn new(section: usize, local: usize) -> Self {
        Self { section, local }
    }
}
