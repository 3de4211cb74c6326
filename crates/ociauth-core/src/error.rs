//! Error types for the OCI auth core.

/// Core error type for OCI auth infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum OciAuthError {
    /// Invalid OCID format.
    #[error("invalid OCID: {0:?} (expected `ocid1.<type>.<realm>.[region].<unique-id>`)")]
    InvalidOcid(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for OCI auth operations.
pub type OciAuthResult<T> = Result<T, OciAuthError>;
