//! The login and resolve-role operations.
//!
//! A login passes through these gates in order; the first one that fails
//! decides the response:
//!
//! 1. `role` is present
//! 2. the role exists
//! 3. `request_headers` is present and its `(request-target)` is a GET of
//!    this login path for that role
//! 4. `auth_type` is present
//! 5. the identity client exists or can be built
//! 6. the provider authenticates the signed headers
//! 7. the principal type is recognized
//! 8. the principal is in the home tenancy
//! 9. the provider reports at least one membership among the role's groups
//! 10. one of those memberships is one of the role's groups
//!
//! after which the login is authorized for the role.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ociauth_auth::{ClaimsCollection, REQUEST_TARGET_HEADER, parse_request_target};
use ociauth_core::{OciAuthConfig, OciAuthResult, Ocid};
use ociauth_model::{
    AuthenticateClientDetails, AuthenticateClientRequest, AuthenticateClientResult,
    AuthorizationResult, Field, FilterGroupMembershipDetails, FilterGroupMembershipRequest,
    LoginFields, LoginOutput, Principal, ResolveRoleFields, RoleEntry,
};
use tracing::{debug, error, trace};

use crate::client::{IdentityClientCell, IdentityClientFactory};
use crate::context::RequestContext;
use crate::error::{ErrorKind, LoginError};
use crate::help::{BACKEND_HELP, LOGIN_HELP, PathHelp, RESOLVE_ROLE_HELP};
use crate::storage::{Storage, get_oci_config, get_oci_role};
use crate::tenancy::validate_home_tenancy;

/// The OCI login backend.
///
/// Shared across requests behind an `Arc`. The only state it mutates is its
/// identity client, built on the first login that gets that far.
#[derive(Debug)]
pub struct OciAuthBackend {
    config: OciAuthConfig,
    factory: Arc<dyn IdentityClientFactory>,
    client: IdentityClientCell,
}

impl OciAuthBackend {
    /// Create a backend that builds its identity client with `factory`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(
        config: OciAuthConfig,
        factory: Arc<dyn IdentityClientFactory>,
    ) -> OciAuthResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            client: IdentityClientCell::new(),
        })
    }

    /// The backend configuration.
    #[must_use]
    pub fn config(&self) -> &OciAuthConfig {
        &self.config
    }

    /// Help for the backend as a whole.
    #[must_use]
    pub fn help() -> &'static str {
        BACKEND_HELP
    }

    /// Help for `login/<role>`.
    #[must_use]
    pub fn login_help() -> PathHelp {
        LOGIN_HELP
    }

    /// Help for the role-resolving `login` path.
    #[must_use]
    pub fn resolve_role_help() -> PathHelp {
        RESOLVE_ROLE_HELP
    }

    /// Whether the identity client has been built.
    pub async fn client_initialized(&self) -> bool {
        self.client.is_initialized().await
    }

    /// Release the identity client. A later login builds a new one.
    pub async fn shutdown(&self) {
        if self.client.clear().await {
            debug!("identity client released");
        }
    }

    /// Authorize a signed login.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        storage: &dyn Storage,
        fields: &LoginFields,
    ) -> Result<LoginOutput, LoginError> {
        trace!(request_id = %ctx.request_id(), role = ?fields.role(), "login called");
        let result = self.authorize(ctx, storage, fields).await;
        match &result {
            Ok(output) => debug!(
                request_id = %ctx.request_id(),
                role = %output.auth.role_name(),
                "login ok"
            ),
            Err(err) => log_failure(ctx, err),
        }
        result
    }

    /// Report which role a login would use, without authenticating.
    pub async fn resolve_role(
        &self,
        ctx: &RequestContext,
        storage: &dyn Storage,
        fields: &ResolveRoleFields,
    ) -> Result<String, LoginError> {
        let result = resolve(ctx, storage, fields).await;
        if let Err(err) = &result {
            log_failure(ctx, err);
        }
        result
    }

    async fn authorize(
        &self,
        ctx: &RequestContext,
        storage: &dyn Storage,
        fields: &LoginFields,
    ) -> Result<LoginOutput, LoginError> {
        let timeout = Some(self.config.identity_timeout());

        let role_name = fields.role().ok_or(LoginError::MissingField(Field::Role))?;
        let role = guarded(ctx, None, get_oci_role(storage, role_name))
            .await??
            .ok_or_else(|| LoginError::RoleNotFound(role_name.to_owned()))?;

        let headers = fields
            .request_headers()
            .ok_or(LoginError::MissingField(Field::RequestHeaders))?;
        let target = parse_request_target(headers.get_all(REQUEST_TARGET_HEADER), role_name)?;
        trace!(
            request_id = %ctx.request_id(),
            method = %target.method(),
            path = %target.path(),
            "request target ok"
        );

        let auth_type = fields
            .auth_type()
            .ok_or(LoginError::MissingField(Field::AuthType))?;
        let client = guarded(
            ctx,
            timeout,
            self.client.get_or_create(auth_type, self.factory.as_ref()),
        )
        .await??;

        let request = AuthenticateClientRequest {
            details: AuthenticateClientDetails {
                request_headers: headers.clone(),
            },
            opc_request_id: Some(ctx.request_id().to_owned()),
            opc_retry_token: None,
        };
        let outcome = guarded(ctx, timeout, client.authenticate_client(request))
            .await?
            .map_err(LoginError::Authenticate)?;
        let principal = authenticated_principal(outcome)?;

        let principal_type = ClaimsCollection::from(&principal).principal_type()?;
        trace!(
            request_id = %ctx.request_id(),
            %principal_type,
            "authentication ok"
        );

        let config = guarded(ctx, None, get_oci_config(storage)).await??;
        validate_home_tenancy(
            config.as_ref(),
            principal.tenant_id.as_deref().unwrap_or_default(),
        )?;

        let request = FilterGroupMembershipRequest {
            details: FilterGroupMembershipDetails {
                principal,
                group_ids: role.ocid_list.clone(),
            },
            opc_request_id: Some(ctx.request_id().to_owned()),
            opc_retry_token: None,
        };
        let membership = guarded(ctx, timeout, client.filter_group_membership(request))
            .await?
            .map_err(LoginError::MembershipQueryFailed)?;
        let groups = membership
            .group_ids
            .filter(|ids| !ids.is_empty())
            .ok_or(LoginError::NoMembershipFound)?;
        ensure_role_member(&role, &groups)?;

        Ok(LoginOutput {
            auth: AuthorizationResult::for_role(&role),
        })
    }
}

async fn resolve(
    ctx: &RequestContext,
    storage: &dyn Storage,
    fields: &ResolveRoleFields,
) -> Result<String, LoginError> {
    let role = fields.role().ok_or(LoginError::MissingField(Field::Role))?;
    match guarded(ctx, None, get_oci_role(storage, role)).await?? {
        Some(_) => Ok(role.to_owned()),
        None => Err(LoginError::InvalidRoleName(role.to_owned())),
    }
}

/// Accept an authenticate outcome only if it explicitly succeeded and names
/// a principal with claims.
fn authenticated_principal(outcome: AuthenticateClientResult) -> Result<Principal, LoginError> {
    match outcome {
        AuthenticateClientResult {
            is_success: Some(true),
            principal: Some(principal),
            ..
        } if !principal.claims.is_empty() => Ok(principal),
        AuthenticateClientResult { error_message, .. } => Err(LoginError::AuthenticationFailed {
            reason: error_message,
        }),
    }
}

/// The provider only returns submitted groups, but the intersection with the
/// role's allow-list is checked here regardless.
fn ensure_role_member(role: &RoleEntry, groups: &[Ocid]) -> Result<(), LoginError> {
    let groups: HashSet<&Ocid> = groups.iter().collect();
    if role.ocid_list.iter().any(|id| groups.contains(id)) {
        Ok(())
    } else {
        Err(LoginError::NotRoleMember)
    }
}

/// Run one collaborator call, abandoning it when the request is cancelled
/// or `limit` elapses.
async fn guarded<F: Future>(
    ctx: &RequestContext,
    limit: Option<Duration>,
    call: F,
) -> Result<F::Output, LoginError> {
    let bounded = async {
        match limit {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| LoginError::Timeout(limit)),
            None => Ok(call.await),
        }
    };
    tokio::select! {
        biased;
        () = ctx.cancellation_token().cancelled() => Err(LoginError::Cancelled),
        output = bounded => output,
    }
}

fn log_failure(ctx: &RequestContext, err: &LoginError) {
    let request_id = ctx.request_id();
    match err.kind() {
        ErrorKind::Provisioning => error!(%request_id, error = %err, "identity client unavailable"),
        ErrorKind::Interrupted => debug!(%request_id, error = %err, "request interrupted"),
        ErrorKind::CallerInput | ErrorKind::Collaborator => {
            if let LoginError::AuthenticationFailed {
                reason: Some(reason),
            } = err
            {
                trace!(%request_id, %reason, "provider rejected signature");
            }
            trace!(%request_id, error = %err, "failed with error");
        }
    }
}
