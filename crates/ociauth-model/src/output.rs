//! The authorization granted by a successful login.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::role::{RoleEntry, TokenType};

/// Metadata key holding the role name.
pub const META_ROLE_NAME: &str = "role_name";

/// Role-bound authorization produced at the end of the login pipeline.
///
/// Built in one step by [`AuthorizationResult::for_role`] and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationResult {
    role_name: String,
    display_name: String,
    alias_name: String,
    renewable: bool,
    metadata: BTreeMap<String, String>,
    internal_data: BTreeMap<String, String>,
    policies: Vec<String>,
    no_default_policy: bool,
    ttl: u64,
    max_ttl: u64,
    explicit_max_ttl: u64,
    period: u64,
    num_uses: u32,
    bound_cidrs: Vec<String>,
    token_type: TokenType,
}

impl AuthorizationResult {
    /// Bind an authorization to `role`: the role name becomes the display
    /// name and alias, the role's token settings are attached, and the
    /// result is never renewable.
    #[must_use]
    pub fn for_role(role: &RoleEntry) -> Self {
        let name = role.name.clone();
        let token = &role.token;
        let data = BTreeMap::from([(META_ROLE_NAME.to_owned(), name.clone())]);
        Self {
            display_name: name.clone(),
            alias_name: name.clone(),
            role_name: name,
            renewable: false,
            metadata: data.clone(),
            internal_data: data,
            policies: token.policies.clone(),
            no_default_policy: token.no_default_policy,
            ttl: token.ttl,
            max_ttl: token.max_ttl,
            explicit_max_ttl: token.explicit_max_ttl,
            period: token.period,
            num_uses: token.num_uses,
            bound_cidrs: token.bound_cidrs.clone(),
            token_type: token.token_type,
        }
    }

    /// Name of the role the login was authorized for.
    #[must_use]
    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    /// Display name of the issued token.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Entity alias name.
    #[must_use]
    pub fn alias_name(&self) -> &str {
        &self.alias_name
    }

    /// Always `false` for logins.
    #[must_use]
    pub fn renewable(&self) -> bool {
        self.renewable
    }

    /// Metadata visible on the token.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Data kept with the token but not shown to clients.
    #[must_use]
    pub fn internal_data(&self) -> &BTreeMap<String, String> {
        &self.internal_data
    }

    /// Token policies.
    #[must_use]
    pub fn policies(&self) -> &[String] {
        &self.policies
    }

    /// Whether the `default` policy is left off.
    #[must_use]
    pub fn no_default_policy(&self) -> bool {
        self.no_default_policy
    }

    /// Initial TTL in seconds.
    #[must_use]
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Maximum TTL in seconds.
    #[must_use]
    pub fn max_ttl(&self) -> u64 {
        self.max_ttl
    }

    /// Explicit maximum TTL in seconds.
    #[must_use]
    pub fn explicit_max_ttl(&self) -> u64 {
        self.explicit_max_ttl
    }

    /// Renewal period in seconds.
    #[must_use]
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Number of uses allowed.
    #[must_use]
    pub fn num_uses(&self) -> u32 {
        self.num_uses
    }

    /// Allowed source CIDR blocks.
    #[must_use]
    pub fn bound_cidrs(&self) -> &[String] {
        &self.bound_cidrs
    }

    /// Token type.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }
}
