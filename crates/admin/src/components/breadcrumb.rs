//! Breadcrumb navigation state for admin pages.
//!
//! A [`BreadcrumbContext`] holds the trail for one page render. The page sets
//! its trail during setup through [`BreadcrumbContext::update_breadcrumb`] (or
//! a [`BreadcrumbUpdater`] handle) and the layout renders it with
//! [`BreadcrumbContext::render`].

use std::sync::{Arc, RwLock};

use menuboard_core::BreadcrumbItem;

#[derive(Debug, Default)]
struct Trail {
    items: Vec<BreadcrumbItem>,
    revision: u64,
}

/// Shared breadcrumb trail.
///
/// Cheap to clone; clones share the same trail.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbContext {
    inner: Arc<RwLock<Trail>>,
}

impl BreadcrumbContext {
    /// Create a context with an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole trail.
    ///
    /// Returns `false` (and leaves the revision alone) when `items` equals the
    /// current trail, so dependents need not re-render.
    pub fn update_breadcrumb(&self, items: Vec<BreadcrumbItem>) -> bool {
        let Ok(mut trail) = self.inner.write() else {
            tracing::warn!("breadcrumb trail lock poisoned, update dropped");
            return false;
        };

        if trail.items == items {
            return false;
        }

        trail.items = items;
        trail.revision += 1;
        true
    }

    /// Current trail, in display order.
    #[must_use]
    pub fn breadcrumb_items(&self) -> Vec<BreadcrumbItem> {
        self.inner
            .read()
            .map(|trail| trail.items.clone())
            .unwrap_or_default()
    }

    /// Number of effective updates so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.read().map(|trail| trail.revision).unwrap_or(0)
    }

    /// Whether no page has set a trail.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|trail| trail.items.is_empty())
            .unwrap_or(true)
    }

    /// Write-only handle to this context.
    ///
    /// Every call returns a handle equal to the previous ones for as long as
    /// the context lives.
    #[must_use]
    pub fn updater(&self) -> BreadcrumbUpdater {
        BreadcrumbUpdater {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Trail prepared for display.
    ///
    /// Empty for an empty trail. Otherwise the last item is the current page
    /// and is never clickable; earlier items are clickable when they have an
    /// `href`.
    #[must_use]
    pub fn render(&self) -> Vec<RenderedCrumb> {
        let items = self.breadcrumb_items();
        let last = items.len().saturating_sub(1);

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let current = index == last;
                let href = if current { None } else { item.href };
                RenderedCrumb {
                    label: item.label,
                    clickable: href.is_some(),
                    href: href.unwrap_or_default(),
                    current,
                }
            })
            .collect()
    }
}

/// Stable write handle for a [`BreadcrumbContext`].
///
/// Two updaters compare equal when they write to the same context.
#[derive(Debug, Clone)]
pub struct BreadcrumbUpdater {
    inner: Arc<RwLock<Trail>>,
}

impl BreadcrumbUpdater {
    /// Same as [`BreadcrumbContext::update_breadcrumb`].
    pub fn update_breadcrumb(&self, items: Vec<BreadcrumbItem>) -> bool {
        BreadcrumbContext {
            inner: Arc::clone(&self.inner),
        }
        .update_breadcrumb(items)
    }
}

impl PartialEq for BreadcrumbUpdater {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for BreadcrumbUpdater {}

/// One breadcrumb as the template draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCrumb {
    pub label: String,
    /// Link target; empty unless `clickable`.
    pub href: String,
    pub clickable: bool,
    /// The page being shown.
    pub current: bool,
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let context = BreadcrumbContext::new();
        assert!(context.is_empty());
        assert!(context.breadcrumb_items().is_empty());
        assert!(context.render().is_empty());
        assert_eq!(context.revision(), 0);
    }

    #[test]
    fn test_update_keeps_order_and_marks_last_current() {
        let context = BreadcrumbContext::new();
        context.update_breadcrumb(vec![BreadcrumbItem::new("A"), BreadcrumbItem::new("B")]);

        let items = context.breadcrumb_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "A");
        assert_eq!(items[1].label, "B");

        let rendered = context.render();
        assert_eq!(
            rendered.iter().map(|c| c.current).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert_eq!(rendered[1].label, "B");
    }

    #[test]
    fn test_last_item_is_never_clickable() {
        let context = BreadcrumbContext::new();
        context.update_breadcrumb(vec![
            BreadcrumbItem::link("Dashboard", "/admin"),
            BreadcrumbItem::new("Menu"),
            BreadcrumbItem::link("Items", "/admin/items"),
        ]);

        let rendered = context.render();
        assert!(rendered[0].clickable);
        assert_eq!(rendered[0].href, "/admin");
        assert!(!rendered[1].clickable);
        assert!(!rendered[1].current);
        assert!(rendered[2].current);
        assert!(!rendered[2].clickable);
        assert!(rendered[2].href.is_empty());
    }

    #[test]
    fn test_empty_update_clears_trail() {
        let context = BreadcrumbContext::new();
        context.update_breadcrumb(vec![BreadcrumbItem::new("A")]);
        assert!(context.update_breadcrumb(Vec::new()));
        assert!(context.is_empty());
        assert!(context.render().is_empty());
    }

    #[test]
    fn test_equal_update_does_not_bump_revision() {
        let context = BreadcrumbContext::new();
        let trail = vec![BreadcrumbItem::link("Dashboard", "/admin"), BreadcrumbItem::new("Events")];

        assert!(context.update_breadcrumb(trail.clone()));
        assert_eq!(context.revision(), 1);

        assert!(!context.update_breadcrumb(trail));
        assert_eq!(context.revision(), 1);

        assert!(context.update_breadcrumb(vec![BreadcrumbItem::new("Dashboard")]));
        assert_eq!(context.revision(), 2);
    }

    #[test]
    fn test_updater_is_stable() {
        let context = BreadcrumbContext::new();
        let first = context.updater();
        let second = context.updater();
        assert_eq!(first, second);
        assert_eq!(context.clone().updater(), first);

        let other = BreadcrumbContext::new();
        assert_ne!(other.updater(), first);
    }

    #[test]
    fn test_updater_writes_through_to_context() {
        let context = BreadcrumbContext::new();
        let updater = context.updater();
        updater.update_breadcrumb(vec![BreadcrumbItem::new("Orders")]);
        assert_eq!(context.breadcrumb_items(), vec![BreadcrumbItem::new("Orders")]);
    }
}
