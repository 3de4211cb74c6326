//! In-memory identity provider for tests and development.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ociauth_core::Ocid;
use ociauth_model::{
    AuthType, AuthenticateClientRequest, AuthenticateClientResult, FilterGroupMembershipRequest,
    FilterGroupMembershipResult, Principal,
};
use parking_lot::Mutex;

use super::{ClientError, IdentityClient, IdentityClientFactory, IdentityError};

/// Header whose value identifies the signer to the static client.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// An identity provider backed by fixed tables.
///
/// A request authenticates when its `authorization` header matches a
/// registered signature, yielding that signature's principal. Membership
/// answers are drawn from the groups registered for the principal's subject
/// id, restricted to the groups submitted in the request.
#[derive(Debug, Default)]
pub struct StaticIdentityClient {
    principals: HashMap<String, Principal>,
    memberships: HashMap<String, Vec<Ocid>>,
    authenticate_calls: AtomicUsize,
    filter_calls: AtomicUsize,
    request_ids: Mutex<Vec<String>>,
}

impl StaticIdentityClient {
    /// Create a client that recognizes no signatures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept requests whose `authorization` header is `signature` as
    /// coming from `principal`.
    #[must_use]
    pub fn with_principal(mut self, signature: impl Into<String>, principal: Principal) -> Self {
        self.principals.insert(signature.into(), principal);
        self
    }

    /// Make the principal with `subject_id` a member of `groups`.
    #[must_use]
    pub fn with_memberships(
        mut self,
        subject_id: impl Into<String>,
        groups: impl IntoIterator<Item = Ocid>,
    ) -> Self {
        self.memberships
            .entry(subject_id.into())
            .or_default()
            .extend(groups);
        self
    }

    /// Number of `authenticate_client` calls served.
    #[must_use]
    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    /// Number of `filter_group_membership` calls served.
    #[must_use]
    pub fn filter_calls(&self) -> usize {
        self.filter_calls.load(Ordering::SeqCst)
    }

    /// `opc-request-id` values received, in call order.
    #[must_use]
    pub fn request_ids(&self) -> Vec<String> {
        self.request_ids.lock().clone()
    }

    fn record(&self, request_id: Option<&String>) {
        if let Some(id) = request_id {
            self.request_ids.lock().push(id.clone());
        }
    }
}

#[async_trait]
impl IdentityClient for StaticIdentityClient {
    async fn authenticate_client(
        &self,
        request: AuthenticateClientRequest,
    ) -> Result<AuthenticateClientResult, IdentityError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        self.record(request.opc_request_id.as_ref());

        let principal = request
            .details
            .request_headers
            .get(AUTHORIZATION_HEADER)
            .and_then(|signature| self.principals.get(signature));
        Ok(match principal {
            Some(principal) => AuthenticateClientResult {
                principal: Some(principal.clone()),
                error_message: None,
                is_success: Some(true),
            },
            None => AuthenticateClientResult {
                principal: None,
                error_message: Some("signature not recognized".to_owned()),
                is_success: Some(false),
            },
        })
    }

    async fn filter_group_membership(
        &self,
        request: FilterGroupMembershipRequest,
    ) -> Result<FilterGroupMembershipResult, IdentityError> {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);
        self.record(request.opc_request_id.as_ref());

        let principal = request.details.principal;
        let member_of: HashSet<&Ocid> = principal
            .subject_id
            .as_ref()
            .and_then(|id| self.memberships.get(id))
            .map(|groups| groups.iter().collect())
            .unwrap_or_default();
        let group_ids = request
            .details
            .group_ids
            .into_iter()
            .filter(|id| member_of.contains(id))
            .collect();

        Ok(FilterGroupMembershipResult {
            group_ids: Some(group_ids),
            principal_id: principal.subject_id,
            tenant_id: principal.tenant_id,
        })
    }
}

/// Factory handing out one shared [`StaticIdentityClient`].
#[derive(Debug)]
pub struct StaticIdentityClientFactory {
    client: Arc<StaticIdentityClient>,
    accepted: Option<AuthType>,
    delay: Option<Duration>,
    attempts: AtomicUsize,
    creations: AtomicUsize,
}

impl StaticIdentityClientFactory {
    /// Create a factory that builds `client` for any auth type.
    #[must_use]
    pub fn new(client: StaticIdentityClient) -> Self {
        Self::from_shared(Arc::new(client))
    }

    /// Create a factory around an already shared client.
    #[must_use]
    pub fn from_shared(client: Arc<StaticIdentityClient>) -> Self {
        Self {
            client,
            accepted: None,
            delay: None,
            attempts: AtomicUsize::new(0),
            creations: AtomicUsize::new(0),
        }
    }

    /// Fail every build except for `auth_type`.
    #[must_use]
    pub fn only(mut self, auth_type: AuthType) -> Self {
        self.accepted = Some(auth_type);
        self
    }

    /// Wait `delay` before each build.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The client this factory hands out.
    #[must_use]
    pub fn client(&self) -> &Arc<StaticIdentityClient> {
        &self.client
    }

    /// Number of builds attempted.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Number of builds that succeeded.
    #[must_use]
    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityClientFactory for StaticIdentityClientFactory {
    async fn create(&self, auth_type: AuthType) -> Result<Arc<dyn IdentityClient>, ClientError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.accepted.is_some_and(|accepted| accepted != auth_type) {
            return Err(ClientError::Provider(format!(
                "no {auth_type} principal credentials available"
            )));
        }
        self.creations.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.client) as Arc<dyn IdentityClient>)
    }
}
