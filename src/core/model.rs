// Model types for page elements and dismissal events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier used to resolve elements within a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Binary visibility state. Only ever mutated forward (visible -> hidden).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_hidden(self) -> bool {
        self == Self::Hidden
    }
}

/// Close control nested inside an alert. The target is resolved by
/// identifier at activation time, not when the handler is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseControl {
    pub target: ElementId,
}

impl CloseControl {
    pub fn targeting(target: impl Into<ElementId>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// A transient, environment-owned UI element. The page renderer creates
/// these before the dismisser runs; the dismisser only mutates visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: Option<ElementId>,
    /// Marker classes, e.g. "alert" on dismissible containers.
    pub classes: Vec<String>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Present only on alerts that offer manual dismissal.
    pub close_control: Option<CloseControl>,
}

impl Element {
    /// A visible element with no id, no markers and no close control.
    pub fn new() -> Self {
        Self {
            id: None,
            classes: Vec::new(),
            visibility: Visibility::Visible,
            close_control: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_close_control(mut self, control: CloseControl) -> Self {
        self.close_control = Some(control);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

/// What caused an element to be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissCause {
    /// The auto-dismiss timer fired.
    Timer,
    /// A close control was activated.
    Close,
}

/// Emitted when an element actually transitions from visible to hidden.
/// No event is emitted for no-op paths (already hidden, unresolvable target).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissEvent {
    /// Page handle of the element that was hidden.
    pub element: usize,
    pub id: Option<ElementId>,
    pub cause: DismissCause,
    pub timestamp: Duration,
}
