//! Strongly typed login inputs and outputs.
//!
//! Every field is optional at this layer: the login pipeline checks each one
//! at its own stage so that failures are reported in pipeline order. A field
//! that is present but blank counts as missing.

use serde::{Deserialize, Serialize};

use crate::headers::SignedHeaders;
use crate::output::AuthorizationResult;

/// Names of the login request fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `role`
    Role,
    /// `auth_type`
    AuthType,
    /// `request_headers`
    RequestHeaders,
}

impl Field {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::AuthType => "auth_type",
            Self::RequestHeaders => "request_headers",
        }
    }

    /// Message reported when the field is absent or blank.
    #[must_use]
    pub fn missing_message(self) -> &'static str {
        match self {
            Self::Role => "Role is not specified",
            Self::AuthType => "Auth type is not specified",
            Self::RequestHeaders => "request_headers is not specified",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a login request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginFields {
    /// Name of the role to log in with.
    #[serde(default)]
    pub role: Option<String>,
    /// Credential source for the backend's identity client.
    #[serde(default)]
    pub auth_type: Option<String>,
    /// The signed headers of the client.
    #[serde(default)]
    pub request_headers: Option<SignedHeaders>,
}

impl LoginFields {
    /// The role name, if present and not blank.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        non_blank(self.role.as_deref())
    }

    /// The auth type, if present and not blank.
    #[must_use]
    pub fn auth_type(&self) -> Option<&str> {
        non_blank(self.auth_type.as_deref())
    }

    /// The signed headers, if present and not empty.
    #[must_use]
    pub fn request_headers(&self) -> Option<&SignedHeaders> {
        self.request_headers.as_ref().filter(|h| !h.is_empty())
    }
}

/// Fields of a resolve-role request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRoleFields {
    /// Name of the role to resolve.
    #[serde(default)]
    pub role: Option<String>,
}

impl ResolveRoleFields {
    /// The role name, if present and not blank.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        non_blank(self.role.as_deref())
    }
}

impl From<&LoginFields> for ResolveRoleFields {
    fn from(fields: &LoginFields) -> Self {
        Self {
            role: fields.role.clone(),
        }
    }
}

/// Output of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutput {
    /// The authorization granted.
    pub auth: AuthorizationResult,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
