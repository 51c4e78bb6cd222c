//! Human-readable dumps of an adapter's section layout.
//!
//! ```
//! use horizon_sections::{LayoutDebug, SectionAdapter, TreeStyle};
//!
//! let adapter = SectionAdapter::new();
//! let text = LayoutDebug::new(&adapter).with_style(TreeStyle::Ascii).format();
//! assert!(text.starts_with("Sections (0 attached, 0 items)"));
//! ```

use std::fmt;

use horizon_sections_core::TreeStyle;

use crate::model::{SectionAdapter, SectionInfo};

/// Formats the section list of a [`SectionAdapter`] as a tree.
///
/// Each line shows the section's tag, debug name, size and leading count,
/// plus markers for hidden sections, dependencies and the drag section.
pub struct LayoutDebug<'a> {
    adapter: &'a SectionAdapter,
    style: TreeStyle,
    show_hidden: bool,
}

impl<'a> LayoutDebug<'a> {
    /// Creates a formatter with the default tree style.
    pub fn new(adapter: &'a SectionAdapter) -> Self {
        Self {
            adapter,
            style: TreeStyle::default(),
            show_hidden: true,
        }
    }

    /// Sets the tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Omits sections that currently contribute no items.
    pub fn visible_only(mut self) -> Self {
        self.show_hidden = false;
        self
    }

    /// Renders the layout to a string.
    pub fn format(&self) -> String {
        self.to_string()
    }

    fn write_section(&self, f: &mut fmt::Formatter<'_>, info: &SectionInfo, is_last: bool) -> fmt::Result {
        if self.style != TreeStyle::Compact {
            f.write_str("  ")?;
        }
        f.write_str(self.style.connector(is_last))?;
        write!(f, "{} {}", info.tag, info.name)?;

        if info.visible {
            write!(f, " [{}..{})", info.leading, info.leading + info.size)?;
        } else {
            f.write_str(" (hidden)")?;
        }
        if let Some(dependency) = info.dependency {
            write!(f, " depends on {dependency}")?;
        }
        if info.draggable {
            f.write_str(" [drag]")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for LayoutDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let infos: Vec<SectionInfo> = self
            .adapter
            .section_infos()
            .into_iter()
            .filter(|info| self.show_hidden || info.visible)
            .collect();

        writeln!(
            f,
            "Sections ({} attached, {} items)",
            self.adapter.section_count(),
            self.adapter.item_count()
        )?;

        if self.adapter.is_showing_empty_state() {
            writeln!(f, "  (showing empty state)")?;
        } else if infos.is_empty() {
            writeln!(f, "  (empty)")?;
        }

        for (i, info) in infos.iter().enumerate() {
            self.write_section(f, info, i + 1 == infos.len())?;
        }

        if let Some(session) = self.adapter.drag_session() {
            writeln!(f, "  dragging {} -> {}", session.origin, session.current)?;
        }
        Ok(())
    }
}
