//! The sectioned list model.
//!
//! A single scrollable list is often made of several unrelated runs of rows:
//! a header, a "shuffle all" action, the songs themselves, a footer. This
//! module composes such runs ("sections") into one addressable list.
//!
//! # Core Types
//!
//! - `Section`: A homogeneous run of items with its own view factory
//! - `DragSection`: A section whose items can be reordered by dragging
//! - `SectionAdapter`: Composes sections and maps flat positions to them
//! - `EmptyState`: The placeholder shown when no section has items
//! - `IdMap`: Stable per-item ids that stay distinct under duplicates
//! - `ListSignals`: Signals a hosting view connects to
//!
//! # Section Implementations
//!
//! - `ListSection`: A `Vec` of items
//! - `SingletonSection`: Exactly one item, such as a header
//! - `ListDragSection`: A reorderable `ListSection`
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  type_at / bind   ┌────────────────┐
//! │  List view   │──────────────────>│ SectionAdapter │
//! │              │<──────────────────│                │
//! └──────────────┘    ListSignals    └────────────────┘
//!        │                             │     │     │
//!        │ begin_drag / drag_to        v     v     v
//!        └──────────────────────>  Section Section DragSection
//!                                                     │ on_drop
//!                                                     v
//!                                               persistence
//! ```

mod adapter;
mod drag;
mod empty_state;
mod identity;
mod index;
mod section;
mod sections;
mod signals;
mod view;

pub use adapter::{SectionAdapter, SectionInfo};
pub use drag::{DragSession, adjust_anchor};
pub use empty_state::{BasicEmptyState, EmptyAction, EmptyContent, EmptyState};
pub use identity::{IdMap, IdScheme, StableId};
pub use index::{Coordinate, ItemId, TypeTag};
pub use section::{DragSection, Section};
pub use sections::{ListDragSection, ListSection, SingletonSection};
pub use signals::ListSignals;
pub use view::{ItemView, ViewHolder};
