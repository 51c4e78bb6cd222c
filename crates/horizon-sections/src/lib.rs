//! Horizon Sections - heterogeneous sectioned lists with drag-to-reorder.
//!
//! This crate backs a single scrollable list control with several
//! independently owned sections of differently typed items:
//!
//! - **Sections**: Homogeneous runs of items, each with its own view factory
//! - **Adapter**: Maps flat list positions to sections and local indices
//! - **Dependent visibility**: Headers that only show while another section has items
//! - **Empty state**: A placeholder row when nothing else is visible
//! - **Stable identity**: Distinct ids even when the same entity repeats
//! - **Drag and drop**: One reorderable section per adapter
//!
//! # Example
//!
//! ```
//! use horizon_sections::model::{ItemView, ListDragSection, ListSection, TypeTag};
//! use horizon_sections::SectionAdapter;
//!
//! #[derive(Default)]
//! struct TrackRow;
//!
//! impl ItemView for TrackRow {
//!     type Item = &'static str;
//!     fn bind(&mut self, _item: &&'static str, _local_index: usize) {}
//! }
//!
//! const QUEUE: TypeTag = TypeTag::new(1);
//!
//! let mut adapter = SectionAdapter::new();
//! let queue = ListSection::new(QUEUE, TrackRow::default).with_data(vec!["a", "b", "c"]);
//! adapter
//!     .set_drag_section(ListDragSection::new(queue).on_reorder(|tracks, _from, _to| {
//!         println!("save {:?}", tracks);
//!     }))
//!     .unwrap();
//!
//! let mut row = adapter.create_view(QUEUE).unwrap();
//! adapter.bind(&mut row, 0).unwrap();
//!
//! assert!(adapter.begin_drag(&row));
//! assert!(adapter.drag_to(0, 2));
//! assert!(adapter.release_drag());
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod model;

pub use config::{AdapterConfig, OutOfRangePolicy};
pub use debug::LayoutDebug;
pub use error::{Result, SectionError};
pub use model::SectionAdapter;

// Re-export core types
pub use horizon_sections_core::{ConnectionId, PerfSpan, Signal, TreeStyle};
