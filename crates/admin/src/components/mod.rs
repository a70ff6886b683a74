//! Reusable UI state for admin pages.

pub mod breadcrumb;

pub use breadcrumb::{BreadcrumbContext, BreadcrumbUpdater, RenderedCrumb};
