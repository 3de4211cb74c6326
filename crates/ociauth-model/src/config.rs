//! The backend configuration record.

use serde::{Deserialize, Serialize};

use crate::identity::AuthType;

/// Backend-wide login configuration. There is at most one per mount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Tenancy every authenticating principal must belong to.
    #[serde(default)]
    pub home_tenancy_id: String,
    /// Credential source suggested to clients that do not pick one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auth_type: Option<AuthType>,
}

impl ConfigEntry {
    /// Create a config entry for the given home tenancy.
    #[must_use]
    pub fn new(home_tenancy_id: impl Into<String>) -> Self {
        Self {
            home_tenancy_id: home_tenancy_id.into(),
            default_auth_type: None,
        }
    }

    /// Whether a non-empty home tenancy is set.
    #[must_use]
    pub fn has_home_tenancy(&self) -> bool {
        !self.home_tenancy_id.is_empty()
    }
}
