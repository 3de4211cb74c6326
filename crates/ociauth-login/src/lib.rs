//! Login authorization for the OCI auth backend.
//!
//! [`OciAuthBackend`] runs a signed login through a fixed sequence of gates:
//! role lookup, `(request-target)` validation, signature verification by the
//! identity provider, principal type and home tenancy checks, and group
//! membership against the role's allow-list. The first gate that fails ends
//! the login with a [`LoginError`]; a login that passes all of them yields an
//! [`AuthorizationResult`](ociauth_model::AuthorizationResult) bound to the
//! role.
//!
//! Storage and the identity provider are collaborators behind the
//! [`Storage`] and [`IdentityClient`] traits. In-memory implementations of
//! both are provided for tests and development.
//!
//! # Modules
//!
//! - [`backend`] - the login and resolve-role operations
//! - [`client`] - the identity provider boundary and its lazily built client
//! - [`context`] - per-request id and cancellation
//! - [`error`] - login errors and their classification
//! - [`help`] - help text for the login paths
//! - [`response`] - rendering of login errors and results as HTTP responses
//! - [`storage`] - role and config accessors over a key/value store
//! - [`tenancy`] - home tenancy validation

pub mod backend;
pub mod client;
pub mod context;
pub mod error;
pub mod help;
pub mod response;
pub mod storage;
pub mod tenancy;

pub use backend::OciAuthBackend;
pub use client::{
    ClientError, IdentityClient, IdentityClientCell, IdentityClientFactory, IdentityError,
    StaticIdentityClient, StaticIdentityClientFactory,
};
pub use context::RequestContext;
pub use error::{ErrorKind, LoginError};
pub use storage::{InMemoryStorage, Storage, StorageError, get_oci_config, get_oci_role};
pub use tenancy::{TenancyError, validate_home_tenancy};
