//! Core types, configuration, and errors for the OCI login pipeline.
//!
//! This crate holds the pieces shared by every other `ociauth-*` crate:
//! process-wide configuration loaded from the environment, the core error
//! type, and the [`Ocid`] identifier type used for tenancies and groups.

mod config;
mod error;
mod types;

pub use config::OciAuthConfig;
pub use error::{OciAuthError, OciAuthResult};
pub use types::Ocid;
