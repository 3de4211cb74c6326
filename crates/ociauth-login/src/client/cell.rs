//! The backend's lazily built identity client.

use std::sync::Arc;

use ociauth_model::AuthType;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::{ClientError, IdentityClient, IdentityClientFactory};

/// Holds at most one identity client.
///
/// Reads share a read lock. Builds are single-flight: callers that find the
/// cell empty queue on the build lock, and the first of them builds. Callers
/// queued behind a build take its outcome, the client or the failure, without
/// building again. A failure is not kept for callers that arrive after it,
/// so the next request tries again. If the building future is dropped,
/// nothing is published and the next queued caller builds.
#[derive(Debug, Default)]
pub struct IdentityClientCell {
    slot: RwLock<Slot>,
    build: Mutex<()>,
}

#[derive(Debug, Default)]
struct Slot {
    client: Option<Arc<dyn IdentityClient>>,
    /// Completed builds, successful or not.
    builds: u64,
    last_failure: Option<ClientError>,
}

impl IdentityClientCell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The client, if one has been built.
    pub async fn get(&self) -> Option<Arc<dyn IdentityClient>> {
        self.slot.read().await.client.clone()
    }

    /// Return the client, building it for `auth_type` if the cell is empty.
    ///
    /// `auth_type` is only looked at when a client has to be built.
    pub async fn get_or_create(
        &self,
        auth_type: &str,
        factory: &dyn IdentityClientFactory,
    ) -> Result<Arc<dyn IdentityClient>, ClientError> {
        let seen = {
            let slot = self.slot.read().await;
            if let Some(client) = slot.client.as_ref() {
                return Ok(Arc::clone(client));
            }
            slot.builds
        };

        let auth_type: AuthType = auth_type.parse().map_err(|e| {
            debug!(error = %e, "unable to create a principal-based configuration provider");
            ClientError::from(e)
        })?;

        let _build = self.build.lock().await;
        {
            let slot = self.slot.read().await;
            if let Some(client) = slot.client.as_ref() {
                return Ok(Arc::clone(client));
            }
            // a build finished while this caller was queued
            if slot.builds != seen {
                if let Some(err) = slot.last_failure.clone() {
                    return Err(err);
                }
            }
        }

        let built = factory.create(auth_type).await;
        let mut slot = self.slot.write().await;
        slot.builds += 1;
        match built {
            Ok(client) => {
                debug!(%auth_type, "identity client created");
                slot.client = Some(Arc::clone(&client));
                slot.last_failure = None;
                Ok(client)
            }
            Err(e) => {
                debug!(%auth_type, error = %e, "unable to create identity client");
                slot.last_failure = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Drop the client. Returns whether there was one.
    pub async fn clear(&self) -> bool {
        self.slot.write().await.client.take().is_some()
    }

    /// Whether a client has been built.
    pub async fn is_initialized(&self) -> bool {
        self.slot.read().await.client.is_some()
    }
}
