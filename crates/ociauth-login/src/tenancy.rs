//! Home tenancy validation.

use ociauth_model::ConfigEntry;

/// Why a principal's tenancy was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenancyError {
    /// No config, or a config without a home tenancy.
    #[error("home Tenancy is invalid")]
    NotConfigured,

    /// The principal belongs to another tenancy.
    #[error("invalid Tenancy")]
    Mismatch {
        /// Configured home tenancy.
        expected: String,
        /// Tenancy of the principal.
        found: String,
    },
}

/// Check that `tenant_id` is the configured home tenancy.
///
/// # Errors
///
/// Returns [`TenancyError::NotConfigured`] when `config` is absent or has an
/// empty home tenancy, and [`TenancyError::Mismatch`] when `tenant_id` is not
/// exactly equal to it.
pub fn validate_home_tenancy(
    config: Option<&ConfigEntry>,
    tenant_id: &str,
) -> Result<(), TenancyError> {
    let config = config
        .filter(|c| c.has_home_tenancy())
        .ok_or(TenancyError::NotConfigured)?;
    if config.home_tenancy_id != tenant_id {
        return Err(TenancyError::Mismatch {
            expected: config.home_tenancy_id.clone(),
            found: tenant_id.to_owned(),
        });
    }
    Ok(())
}
