//! Error types for the sectioned list model.

use crate::model::TypeTag;

/// Result type alias for section operations.
pub type Result<T> = std::result::Result<T, SectionError>;

/// Errors that can occur while composing or querying a sectioned list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// Another attached section already owns this type tag.
    #[error("A section with type tag {0} is already attached")]
    DuplicateTypeKind(TypeTag),

    /// The type tag is reserved for the empty-state item.
    #[error("Type tag {0} is reserved for the empty state")]
    ReservedTypeTag(TypeTag),

    /// The section's visibility dependency would form a chain or a cycle.
    #[error("Section {tag} cannot depend on {dependency}: {reason}")]
    InvalidDependency {
        tag: TypeTag,
        dependency: TypeTag,
        reason: &'static str,
    },

    /// A drag-capable section is already attached to this adapter.
    #[error("Drag section {0} is already attached; remove it before attaching another")]
    DragSectionAlreadyAttached(TypeTag),

    /// A flat position past the end of the list was requested.
    #[error("Position {position} is out of range (item count {count})")]
    OutOfRange { position: usize, count: usize },

    /// No attached section owns this type tag.
    #[error("No section with type tag {0} is attached")]
    UnknownTypeTag(TypeTag),

    /// The view holder was created for a different kind of item.
    #[error("View created for type tag {view} cannot bind an item of type tag {item}")]
    ViewTypeMismatch { view: TypeTag, item: TypeTag },

    /// The section attached under this tag is not of the requested type.
    #[error("Section with type tag {0} is not of the requested type")]
    SectionTypeMismatch(TypeTag),

    /// A structural change was attempted while a drag gesture is active.
    #[error("Cannot change the section layout while a drag is in progress")]
    DragInProgress,

    /// The empty-state view was requested but no provider is registered.
    #[error("No empty state is registered")]
    NoEmptyState,

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SectionError {
    /// Create an out-of-range error.
    pub fn out_of_range(position: usize, count: usize) -> Self {
        Self::OutOfRange { position, count }
    }

    /// Create a dependency error.
    pub fn invalid_dependency(tag: TypeTag, dependency: TypeTag, reason: &'static str) -> Self {
        Self::InvalidDependency {
            tag,
            dependency,
            reason,
        }
    }

    /// Returns `true` if the operation was rejected and left the adapter unchanged.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTypeKind(_)
                | Self::ReservedTypeTag(_)
                | Self::InvalidDependency { .. }
                | Self::DragSectionAlreadyAttached(_)
                | Self::DragInProgress
        )
    }
}
