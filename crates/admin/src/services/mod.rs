//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - client for the restaurant authentication API

pub mod auth;

pub use auth::{AuthApiError, AuthClient, LoginGrant};
