//! Logging and debugging facilities for Horizon Sections.
//!
//! This module provides:
//! - Target names for the `tracing` crate, one per subsystem
//! - Tree styles shared by the debug formatters
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Horizon Sections uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("horizon_sections::drag=debug"))
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_sections_core::signal";
    /// Section registry and position mapping target.
    pub const ADAPTER: &str = "horizon_sections::adapter";
    /// Drag gesture target.
    pub const DRAG: &str = "horizon_sections::drag";
    /// Stable identity map target.
    pub const IDENTITY: &str = "horizon_sections::identity";
    /// Performance spans target.
    pub const PERF: &str = "horizon_sections::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

impl TreeStyle {
    /// Returns the connector drawn before a child node.
    pub fn connector(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (Self::Ascii, false) => "+-- ",
            (Self::Ascii, true) => "`-- ",
            (Self::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (Self::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (Self::Compact, _) => "- ",
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectors() {
        assert_eq!(TreeStyle::Ascii.connector(false), "+-- ");
        assert_eq!(TreeStyle::Ascii.connector(true), "`-- ");
        assert_eq!(TreeStyle::Compact.connector(true), "- ");
        assert!(TreeStyle::Unicode.connector(true).starts_with('\u{2514}'));
    }

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("horizon_sections::perf=info")
            .with_test_writer()
            .try_init();
        // Just ensure it doesn't panic with a subscriber installed
        let _span = PerfSpan::new("test_operation");
    }
}
