//! Domain models for admin.

pub mod session;

pub use session::{AdminData, AdminSession, keys as session_keys};
