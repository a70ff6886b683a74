//! Menuboard Core - Shared types library.
//!
//! This crate provides common types used across the Menuboard components:
//! - `admin` - Restaurant back-office (menu, offers, events)
//! - `integration-tests` - End-to-end checks against the admin router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no cookie access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Admin identifiers, feature flags and breadcrumb items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
