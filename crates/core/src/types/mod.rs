//! Core types for Menuboard.
//!
//! This module provides type-safe wrappers for the admin session domain.

pub mod breadcrumb;
pub mod features;
pub mod id;

pub use breadcrumb::BreadcrumbItem;
pub use features::{FeatureFlag, FeatureFlagError, FeatureFlags};
pub use id::AdminId;
