//! Per-request context.

use tokio_util::sync::CancellationToken;

/// Request id and cancellation for one login or resolve-role call.
///
/// The request id is forwarded to the identity provider as
/// `opc-request-id` and attached to every log line of the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    cancel: CancellationToken,
}

impl RequestContext {
    /// Create a context with a fresh request id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create a context for a request id assigned by the host.
    #[must_use]
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            cancel: CancellationToken::new(),
        }
    }

    /// Tie this request to an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Token that is cancelled when the request is abandoned.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Abandon the request.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the request has been abandoned.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
