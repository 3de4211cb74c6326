//! Login errors and how they are reported.
//!
//! Every [`LoginError`] belongs to one [`ErrorKind`], which fixes the HTTP
//! status it is reported with and whether its text reaches the caller.

use std::time::Duration;

use http::StatusCode;
use ociauth_auth::{TargetError, UnrecognizedPrincipalType};
use ociauth_model::Field;

use crate::client::{ClientError, IdentityError};
use crate::storage::StorageError;
use crate::tenancy::TenancyError;

/// Message returned in place of provisioning failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Broad classes of login failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request or the caller's identity does not allow the login.
    CallerInput,
    /// Storage or the identity provider failed.
    Collaborator,
    /// The backend could not build its identity client.
    Provisioning,
    /// The request was cancelled or ran out of time.
    Interrupted,
}

/// Why a login or resolve-role request failed.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// A required field is absent or empty.
    #[error("{}", .0.missing_message())]
    MissingField(Field),

    /// The login names a role that does not exist.
    #[error("role is not found")]
    RoleNotFound(String),

    /// The resolve-role request names a role that does not exist.
    #[error("invalid role name {0:?}")]
    InvalidRoleName(String),

    /// The `(request-target)` is missing or does not match the login.
    #[error(transparent)]
    RequestTarget(#[from] TargetError),

    /// The provider did not vouch for the signature.
    #[error("OCI authentication failed")]
    AuthenticationFailed {
        /// Reason supplied by the provider, if any.
        reason: Option<String>,
    },

    /// The principal type is not one the backend accepts.
    #[error(transparent)]
    PrincipalType(#[from] UnrecognizedPrincipalType),

    /// The principal is not in the home tenancy.
    #[error(transparent)]
    Tenancy(#[from] TenancyError),

    /// The provider found no membership among the role's groups.
    #[error("no membership OCIDs found")]
    NoMembershipFound,

    /// None of the returned memberships is one of the role's groups.
    #[error("entity not a part of any of the Role OCIDs")]
    NotRoleMember,

    /// Reading a role or the config failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The authenticate call failed.
    #[error(transparent)]
    Authenticate(IdentityError),

    /// The membership query failed.
    #[error(transparent)]
    MembershipQueryFailed(IdentityError),

    /// The identity client could not be built.
    #[error(transparent)]
    ClientCreationFailed(#[from] ClientError),

    /// The request was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// A collaborator call did not finish in time.
    #[error("identity call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl LoginError {
    /// The class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::RoleNotFound(_)
            | Self::InvalidRoleName(_)
            | Self::RequestTarget(_)
            | Self::AuthenticationFailed { .. }
            | Self::PrincipalType(_)
            | Self::Tenancy(_)
            | Self::NoMembershipFound
            | Self::NotRoleMember => ErrorKind::CallerInput,
            Self::Storage(_) | Self::Authenticate(_) | Self::MembershipQueryFailed(_) => {
                ErrorKind::Collaborator
            }
            Self::ClientCreationFailed(_) => ErrorKind::Provisioning,
            Self::Cancelled | Self::Timeout(_) => ErrorKind::Interrupted,
        }
    }

    /// HTTP status this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ClientCreationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Text shown to the caller. Provisioning details are withheld.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Provisioning => INTERNAL_ERROR_MESSAGE.to_owned(),
            _ => self.to_string(),
        }
    }
}
