//! Claim lookup over an authenticated principal.

use std::collections::HashMap;

use ociauth_model::principal::CLAIM_PRINCIPAL_TYPE;
use ociauth_model::{Claim, Principal, PrincipalType};

use crate::error::UnrecognizedPrincipalType;

/// Claims indexed by type. Every value of a repeated claim type is kept in
/// the order the provider returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsCollection {
    by_key: HashMap<String, Vec<String>>,
}

impl ClaimsCollection {
    /// Index a list of claims.
    #[must_use]
    pub fn from_claims(claims: &[Claim]) -> Self {
        let mut by_key: HashMap<String, Vec<String>> = HashMap::new();
        for claim in claims {
            by_key
                .entry(claim.key.clone())
                .or_default()
                .push(claim.value.clone());
        }
        Self { by_key }
    }

    /// First value of `claim_type`, or `""` when the principal has none.
    #[must_use]
    pub fn get_string(&self, claim_type: &str) -> &str {
        self.get_all(claim_type).first().map_or("", String::as_str)
    }

    /// Every value of `claim_type`.
    #[must_use]
    pub fn get_all(&self, claim_type: &str) -> &[String] {
        self.by_key.get(claim_type).map_or(&[][..], Vec::as_slice)
    }

    /// Number of distinct claim types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no claims were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// The principal type named by the `ptype` claim.
    ///
    /// # Errors
    ///
    /// Returns [`UnrecognizedPrincipalType`] carrying the raw claim value
    /// (empty if the claim is absent) when it is not exactly `resource`,
    /// `instance`, or `user`.
    pub fn principal_type(&self) -> Result<PrincipalType, UnrecognizedPrincipalType> {
        let value = self.get_string(CLAIM_PRINCIPAL_TYPE);
        PrincipalType::from_claim(value).ok_or_else(|| UnrecognizedPrincipalType(value.to_owned()))
    }
}

impl From<&Principal> for ClaimsCollection {
    fn from(principal: &Principal) -> Self {
        Self::from_claims(&principal.claims)
    }
}
