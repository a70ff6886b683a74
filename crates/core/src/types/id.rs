//! Admin identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a logged-in admin.
///
/// Issued by the authentication API alongside the token. The value is never
/// interpreted, only stored and echoed back.
///
/// ```
/// use menuboard_core::AdminId;
///
/// let id = AdminId::new("64f1c2a9e3");
/// assert_eq!(id.as_str(), "64f1c2a9e3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminId(String);

impl AdminId {
    /// Create a new admin ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AdminId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AdminId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AdminId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<AdminId> for String {
    fn from(id: AdminId) -> Self {
        id.0
    }
}
