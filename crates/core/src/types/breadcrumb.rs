//! Breadcrumb trail items.

use serde::{Deserialize, Serialize};

/// One step in an admin breadcrumb trail.
///
/// `href` is the navigation target shown when the item is not the current
/// page. The last item of a trail is always rendered as the current page,
/// whether or not it has an `href`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    /// Display label.
    pub label: String,
    /// Navigation target, if the step is clickable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl BreadcrumbItem {
    /// Create a non-clickable item.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }

    /// Create an item that navigates to `href` when clicked.
    #[must_use]
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }
}
