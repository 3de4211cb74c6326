//! Role records.
//!
//! A role names the groups and dynamic groups whose members may log in with
//! it, and the attributes of the token issued on success. Roles are written
//! by the role management endpoints and only read by the login pipeline.

use ociauth_core::{OciAuthResult, Ocid};
use serde::{Deserialize, Serialize};

/// A stored login role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    /// Unique role name.
    pub name: String,
    /// Group and dynamic-group OCIDs allowed to use this role.
    #[serde(default)]
    pub ocid_list: Vec<Ocid>,
    /// Token attributes bound to logins through this role.
    #[serde(flatten)]
    pub token: TokenSettings,
}

impl RoleEntry {
    /// Create a role with default token settings, validating every OCID.
    ///
    /// # Errors
    /// Returns an error if any entry of `ocids` is not a well-formed OCID.
    pub fn new<I, S>(name: impl Into<String>, ocids: I) -> OciAuthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ocid_list = ocids
            .into_iter()
            .map(Ocid::new)
            .collect::<OciAuthResult<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            ocid_list,
            token: TokenSettings::default(),
        })
    }

    /// Replace the token settings.
    #[must_use]
    pub fn with_token(mut self, token: TokenSettings) -> Self {
        self.token = token;
        self
    }
}

/// Kind of token issued for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    /// Whatever the mount's default is.
    #[default]
    Default,
    /// Service token.
    Service,
    /// Batch token.
    Batch,
    /// Service unless the mount overrides it.
    DefaultService,
    /// Batch unless the mount overrides it.
    DefaultBatch,
}

/// Token attributes carried by a role. Durations are in seconds; zero means
/// "use the mount default".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    /// Policies attached to the issued token.
    #[serde(rename = "token_policies")]
    pub policies: Vec<String>,
    /// Initial TTL.
    #[serde(rename = "token_ttl")]
    pub ttl: u64,
    /// Maximum TTL the token may be renewed to.
    #[serde(rename = "token_max_ttl")]
    pub max_ttl: u64,
    /// Hard cap on the token lifetime.
    #[serde(rename = "token_explicit_max_ttl")]
    pub explicit_max_ttl: u64,
    /// Periodic token renewal period.
    #[serde(rename = "token_period")]
    pub period: u64,
    /// Number of uses before the token is revoked; zero is unlimited.
    #[serde(rename = "token_num_uses")]
    pub num_uses: u32,
    /// Do not attach the `default` policy.
    #[serde(rename = "token_no_default_policy")]
    pub no_default_policy: bool,
    /// CIDR blocks the token may be used from.
    #[serde(rename = "token_bound_cidrs")]
    pub bound_cidrs: Vec<String>,
    /// Token type.
    #[serde(rename = "token_type")]
    pub token_type: TokenType,
}
