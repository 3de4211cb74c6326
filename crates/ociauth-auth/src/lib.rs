//! Signed-login request checks for the OCI login backend.
//!
//! Signature verification itself belongs to the identity provider. This crate
//! covers the checks the backend performs on its own side of that call:
//!
//! - [`request_target`] - validation of the `(request-target)` signing line
//!   against the login route and the requested role
//! - [`claims`] - a lookup table over the claims of an authenticated principal
//! - [`error`] - error types for both
//!
//! ```rust
//! use ociauth_auth::request_target::parse_request_target;
//!
//! let lines = vec!["get /v1/auth/oci/login/dev".to_owned()];
//! let target = parse_request_target(&lines, "dev").unwrap();
//! assert_eq!(target.mount(), "oci");
//! ```

pub mod claims;
pub mod error;
pub mod request_target;

pub use claims::ClaimsCollection;
pub use error::{MalformedReason, TargetError, UnrecognizedPrincipalType};
pub use request_target::{REQUEST_TARGET_HEADER, RequestTarget, parse_request_target};
