//! The placeholder shown when no section has visible items.

use std::fmt;

use super::index::TypeTag;
use super::view::{ItemView, ViewHolder};

/// Which button of an empty state was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyAction {
    /// The first action button.
    Primary,
    /// The second action button.
    Secondary,
}

/// What an empty-state view displays.
///
/// An action without a label is not shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyContent {
    /// The headline, such as "No songs".
    pub message: String,
    /// A longer explanation below the message.
    pub detail: String,
    /// Label of the primary button.
    pub primary_action: Option<String>,
    /// Label of the secondary button.
    pub secondary_action: Option<String>,
}

/// Supplies the single placeholder item shown while the adapter is empty.
pub trait EmptyState: Send + 'static {
    /// The view that displays [`EmptyContent`].
    type View: ItemView<Item = EmptyContent>;

    /// Returns the content to display.
    fn content(&self) -> EmptyContent;

    /// Creates the placeholder view.
    fn create_view(&self) -> Self::View;

    /// Handles a press on one of the action buttons.
    fn on_action(&self, _action: EmptyAction) {}
}

pub(crate) trait AnyEmptyState: Send {
    fn create_view(&self) -> ViewHolder;
    fn bind(&self, holder: &mut ViewHolder, position: usize) -> bool;
    fn on_action(&self, action: EmptyAction);
}

impl<E: EmptyState> AnyEmptyState for E {
    fn create_view(&self) -> ViewHolder {
        ViewHolder::new(TypeTag::EMPTY_STATE, EmptyState::create_view(self))
    }

    fn bind(&self, holder: &mut ViewHolder, position: usize) -> bool {
        holder.bind_item(&self.content(), 0, position)
    }

    fn on_action(&self, action: EmptyAction) {
        EmptyState::on_action(self, action);
    }
}

type ActionFn = Box<dyn Fn() + Send>;

/// An [`EmptyState`] built from fixed strings and button callbacks.
///
/// ```
/// use horizon_sections::model::{BasicEmptyState, EmptyContent, EmptyState, ItemView};
///
/// #[derive(Default)]
/// struct Placeholder;
///
/// impl ItemView for Placeholder {
///     type Item = EmptyContent;
///     fn bind(&mut self, _item: &EmptyContent, _local_index: usize) {}
/// }
///
/// let empty = BasicEmptyState::new(Placeholder::default)
///     .with_message("No songs")
///     .with_primary_action("Scan library", || {});
///
/// let content = empty.content();
/// assert_eq!(content.message, "No songs");
/// assert_eq!(content.primary_action.as_deref(), Some("Scan library"));
/// assert_eq!(content.secondary_action, None);
/// ```
pub struct BasicEmptyState<V> {
    factory: Box<dyn Fn() -> V + Send>,
    message: String,
    detail: String,
    primary: Option<(String, ActionFn)>,
    secondary: Option<(String, ActionFn)>,
}

impl<V: ItemView<Item = EmptyContent>> BasicEmptyState<V> {
    /// Creates an empty state with no text and no actions.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> V + Send + 'static,
    {
        Self {
            factory: Box::new(factory),
            message: String::new(),
            detail: String::new(),
            primary: None,
            secondary: None,
        }
    }

    /// Sets the headline.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the explanation text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Adds the primary button. An empty label hides it.
    pub fn with_primary_action<F>(mut self, label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        self.primary = labeled(label.into(), Box::new(action));
        self
    }

    /// Adds the secondary button. An empty label hides it.
    pub fn with_secondary_action<F>(mut self, label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        self.secondary = labeled(label.into(), Box::new(action));
        self
    }
}

fn labeled(label: String, action: ActionFn) -> Option<(String, ActionFn)> {
    (!label.is_empty()).then_some((label, action))
}

impl<V: ItemView<Item = EmptyContent>> EmptyState for BasicEmptyState<V> {
    type View = V;

    fn content(&self) -> EmptyContent {
        EmptyContent {
            message: self.message.clone(),
            detail: self.detail.clone(),
            primary_action: self.primary.as_ref().map(|(label, _)| label.clone()),
            secondary_action: self.secondary.as_ref().map(|(label, _)| label.clone()),
        }
    }

    fn create_view(&self) -> V {
        (self.factory)()
    }

    fn on_action(&self, action: EmptyAction) {
        let slot = match action {
            EmptyAction::Primary => &self.primary,
            EmptyAction::Secondary => &self.secondary,
        };
        if let Some((_, callback)) = slot {
            callback();
        }
    }
}

impl<V> fmt::Debug for BasicEmptyState<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicEmptyState")
            .field("message", &self.message)
            .field("detail", &self.detail)
            .field("primary", &self.primary.as_ref().map(|(l, _)| l))
            .field("secondary", &self.secondary.as_ref().map(|(l, _)| l))
            .finish_non_exhaustive()
    }
}
