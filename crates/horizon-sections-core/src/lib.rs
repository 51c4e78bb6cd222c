//! Core systems for Horizon Sections.
//!
//! This crate provides the foundational pieces shared by the sectioned list
//! model:
//!
//! - **Signal/Slot System**: Type-safe change notifications
//! - **Logging**: `tracing` targets, tree styles and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_sections_core::Signal;
//!
//! // Create a signal that notifies when an item moves
//! let item_moved = Signal::<(usize, usize)>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = item_moved.connect(|(from, to)| {
//!     println!("Item moved from {} to {}", from, to);
//! });
//!
//! // Emit the signal
//! item_moved.emit((2, 3));
//!
//! // Disconnect when done
//! item_moved.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::{PerfSpan, TreeStyle};
pub use signal::{ConnectionId, Signal};
