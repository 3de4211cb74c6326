//! Common OCI type definitions shared across crates.

use std::fmt;

/// Oracle Cloud Identifier.
///
/// OCIDs name tenancies, groups, dynamic groups and every other OCI resource.
/// The value is opaque to the login pipeline: two OCIDs are the same resource
/// only when the strings are equal.
///
/// Deserialization does not re-validate, so entries written by older tooling
/// still load; [`Ocid::new`] is the validating constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Ocid(String);

impl Ocid {
    /// Prefix shared by every version-1 OCID.
    pub const PREFIX: &'static str = "ocid1.";

    /// Create a new OCID from a string.
    ///
    /// # Errors
    /// Returns an error if the value does not start with `ocid1.` or has fewer
    /// than the five dot-separated fields of the OCID syntax.
    pub fn new(id: impl Into<String>) -> Result<Self, crate::OciAuthError> {
        let id = id.into();
        let well_formed = id.starts_with(Self::PREFIX)
            && id.split('.').count() >= 5
            && !id.chars().any(char::is_whitespace);
        if !well_formed {
            return Err(crate::OciAuthError::InvalidOcid(id));
        }
        Ok(Self(id))
    }

    /// Get the OCID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource type segment (`tenancy`, `group`, `dynamicgroup`, ...).
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.0.split('.').nth(1)
    }
}

impl fmt::Display for Ocid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ocid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
