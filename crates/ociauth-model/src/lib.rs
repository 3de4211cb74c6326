//! Data model for the OCI login backend.
//!
//! Everything that crosses a boundary lives here: the stored [`RoleEntry`]
//! and [`ConfigEntry`] records, the strongly typed login inputs, the
//! identity provider request and response shapes, and the
//! [`AuthorizationResult`] produced by a successful login.

pub mod config;
pub mod headers;
pub mod identity;
pub mod login;
pub mod output;
pub mod principal;
pub mod role;

pub use config::ConfigEntry;
pub use headers::SignedHeaders;
pub use identity::{
    AuthType, AuthenticateClientDetails, AuthenticateClientRequest, AuthenticateClientResult,
    FilterGroupMembershipDetails, FilterGroupMembershipRequest, FilterGroupMembershipResult,
    UnsupportedAuthType,
};
pub use login::{Field, LoginFields, LoginOutput, ResolveRoleFields};
pub use output::AuthorizationResult;
pub use principal::{Claim, Principal, PrincipalType};
pub use role::{RoleEntry, TokenSettings, TokenType};
