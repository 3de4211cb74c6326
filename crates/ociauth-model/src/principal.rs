//! Authenticated principals and their claims.

use serde::{Deserialize, Serialize};

/// Claim key carrying the principal type.
pub const CLAIM_PRINCIPAL_TYPE: &str = "ptype";

/// One claim asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Claim type.
    #[serde(default)]
    pub key: String,
    /// Claim value.
    #[serde(default)]
    pub value: String,
    /// Issuer of the claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl Claim {
    /// Create a claim without an issuer.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            issuer: None,
        }
    }
}

/// An identity authenticated by the provider.
///
/// Every field is optional on the wire; the login pipeline checks the ones it
/// relies on before trusting them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Principal identifier (user, instance, or resource OCID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    /// Tenancy the principal belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Claims in the order the provider returned them.
    #[serde(default)]
    pub claims: Vec<Claim>,
}

/// Kind of principal, taken from the `ptype` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalType {
    /// A resource principal (functions, other managed services).
    Resource,
    /// An instance principal (compute instances).
    Instance,
    /// A user authenticated with an API key.
    User,
}

impl PrincipalType {
    /// Match a claim value exactly against the provider's principal types.
    #[must_use]
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "resource" => Some(Self::Resource),
            "instance" => Some(Self::Instance),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Claim value for this principal type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Instance => "instance",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
