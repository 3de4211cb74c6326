//! Identity provider request and response shapes.
//!
//! These mirror the provider's `authenticateClient` and
//! `filterGroupMembership` operations. Request bodies serialize to the
//! provider's camelCase JSON; the `opc_*` fields travel as request headers.

use std::fmt;
use std::str::FromStr;

use ociauth_core::Ocid;
use serde::{Deserialize, Serialize};

use crate::headers::SignedHeaders;
use crate::principal::Principal;

/// Credential source the backend uses to talk to the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthType {
    /// Instance principal (`ip` / `instance`).
    Instance,
    /// Resource principal (`rp` / `resource`).
    Resource,
}

impl AuthType {
    /// Canonical name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `auth_type` value that names no principal-based credential source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("auth_type {0:?} is not a principal-based type")]
pub struct UnsupportedAuthType(pub String);

impl FromStr for AuthType {
    type Err = UnsupportedAuthType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ip" | "instance" => Ok(Self::Instance),
            "rp" | "resource" => Ok(Self::Resource),
            _ => Err(UnsupportedAuthType(s.to_owned())),
        }
    }
}

impl TryFrom<String> for AuthType {
    type Error = UnsupportedAuthType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AuthType> for String {
    fn from(value: AuthType) -> Self {
        value.as_str().to_owned()
    }
}

/// Body of an `authenticateClient` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateClientDetails {
    /// The complete signed header set of the login request.
    pub request_headers: SignedHeaders,
}

/// An `authenticateClient` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateClientRequest {
    /// Request body.
    pub details: AuthenticateClientDetails,
    /// Correlation id sent as `opc-request-id`.
    pub opc_request_id: Option<String>,
    /// Idempotency token sent as `opc-retry-token`. Logins never set it.
    pub opc_retry_token: Option<String>,
}

/// Response of an `authenticateClient` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateClientResult {
    /// The authenticated principal.
    #[serde(default)]
    pub principal: Option<Principal>,
    /// Provider-supplied reason when authentication did not succeed.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Whether the signature was accepted.
    #[serde(default)]
    pub is_success: Option<bool>,
}

/// Body of a `filterGroupMembership` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroupMembershipDetails {
    /// Principal whose memberships are tested.
    pub principal: Principal,
    /// Candidate group and dynamic-group OCIDs.
    pub group_ids: Vec<Ocid>,
}

/// A `filterGroupMembership` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroupMembershipRequest {
    /// Request body.
    pub details: FilterGroupMembershipDetails,
    /// Correlation id sent as `opc-request-id`.
    pub opc_request_id: Option<String>,
    /// Idempotency token sent as `opc-retry-token`. Logins never set it.
    pub opc_retry_token: Option<String>,
}

/// Response of a `filterGroupMembership` call.
///
/// `group_ids` is the subset of the submitted candidates the principal
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroupMembershipResult {
    /// Matching group OCIDs.
    #[serde(default)]
    pub group_ids: Option<Vec<Ocid>>,
    /// Principal the result is for.
    #[serde(default)]
    pub principal_id: Option<String>,
    /// Tenancy of that principal.
    #[serde(default)]
    pub tenant_id: Option<String>,
}
