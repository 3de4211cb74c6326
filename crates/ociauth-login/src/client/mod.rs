//! The identity provider boundary.
//!
//! The provider verifies request signatures and answers group membership
//! queries. The backend talks to it through one [`IdentityClient`], built on
//! first use by an [`IdentityClientFactory`] and held in an
//! [`IdentityClientCell`] for the rest of the backend's life.

mod cell;
mod static_client;

use std::sync::Arc;

use async_trait::async_trait;
use ociauth_model::{
    AuthType, AuthenticateClientRequest, AuthenticateClientResult, FilterGroupMembershipRequest,
    FilterGroupMembershipResult, UnsupportedAuthType,
};

pub use cell::IdentityClientCell;
pub use static_client::{StaticIdentityClient, StaticIdentityClientFactory};

/// Errors returned by identity provider calls.
///
/// The message is the provider's own text and is passed on to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The provider answered with an error status.
    #[error("Error returned by Identity Service. Http Status Code: {status}. Error Code: {code}. Message: {message}")]
    Service {
        /// HTTP status of the provider response.
        status: u16,
        /// Provider error code.
        code: String,
        /// Provider error message.
        message: String,
    },

    /// The provider could not be reached.
    #[error("{0}")]
    Transport(String),
}

/// Errors building the identity client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// `auth_type` names no principal-based credential source.
    #[error(transparent)]
    UnsupportedAuthType(#[from] UnsupportedAuthType),

    /// Principal credentials could not be obtained.
    #[error("unable to create a principal-based configuration provider: {0}")]
    Provider(String),

    /// The client could not be built from the credentials.
    #[error("unable to create the authentication client: {0}")]
    Client(String),
}

/// Calls the backend makes to the identity provider.
#[async_trait]
pub trait IdentityClient: Send + Sync + std::fmt::Debug {
    /// Verify the signature over a request's signed headers and return the
    /// principal that made it.
    async fn authenticate_client(
        &self,
        request: AuthenticateClientRequest,
    ) -> Result<AuthenticateClientResult, IdentityError>;

    /// Return the subset of the submitted groups the principal belongs to.
    async fn filter_group_membership(
        &self,
        request: FilterGroupMembershipRequest,
    ) -> Result<FilterGroupMembershipResult, IdentityError>;
}

/// Builds the identity client for a credential source.
#[async_trait]
pub trait IdentityClientFactory: Send + Sync + std::fmt::Debug {
    /// Build a client that authenticates to the provider as `auth_type`.
    async fn create(&self, auth_type: AuthType) -> Result<Arc<dyn IdentityClient>, ClientError>;
}
