//! Role and config accessors over the host's key/value storage.
//!
//! Records are stored as JSON: the backend config under [`CONFIG_KEY`] and
//! each role under [`ROLE_PREFIX`] followed by its name. Writing them is the
//! job of the role and config management endpoints; the login pipeline only
//! reads.

use async_trait::async_trait;
use dashmap::DashMap;
use ociauth_model::{ConfigEntry, RoleEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage key of the backend config.
pub const CONFIG_KEY: &str = "config";

/// Storage key prefix of role records.
pub const ROLE_PREFIX: &str = "role/";

/// Errors from the storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage backend failed to serve the read.
    #[error("storage read failed for {key}: {message}")]
    Backend {
        /// Key being read.
        key: String,
        /// Backend-supplied reason.
        message: String,
    },

    /// A stored record is not valid JSON for its type.
    #[error("stored entry {key} is corrupt: {source}")]
    Corrupt {
        /// Key of the record.
        key: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded.
    #[error("failed to encode entry {key}: {source}")]
    Encode {
        /// Key of the record.
        key: String,
        /// Encoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// Raw key/value storage handle supplied by the host for one request.
#[async_trait]
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}

/// Storage key of the role named `name`.
#[must_use]
pub fn role_key(name: &str) -> String {
    format!("{ROLE_PREFIX}{name}")
}

/// Read the backend config, if one has been written.
pub async fn get_oci_config(storage: &dyn Storage) -> Result<Option<ConfigEntry>, StorageError> {
    get_json(storage, CONFIG_KEY).await
}

/// Read the role named `name`, if it exists.
pub async fn get_oci_role(
    storage: &dyn Storage,
    name: &str,
) -> Result<Option<RoleEntry>, StorageError> {
    get_json(storage, &role_key(name)).await
}

async fn get_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_owned(),
            source,
        })
}

/// In-memory [`Storage`] for tests and development seeding.
///
/// ```
/// use ociauth_login::storage::{InMemoryStorage, get_oci_role};
/// use ociauth_model::RoleEntry;
///
/// # tokio_test::block_on(async {
/// let storage = InMemoryStorage::new();
/// storage.put_role(&RoleEntry::new("dev", ["ocid1.group.oc1..aaaa"]).unwrap()).unwrap();
/// let role = get_oci_role(&storage, "dev").await.unwrap().unwrap();
/// assert_eq!(role.ocid_list.len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: DashMap<String, Vec<u8>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `key`.
    pub fn put_raw(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Store `value` as JSON under `key`.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_vec(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.put_raw(key, raw);
        Ok(())
    }

    /// Store the backend config.
    pub fn put_config(&self, config: &ConfigEntry) -> Result<(), StorageError> {
        self.put_json(CONFIG_KEY, config)
    }

    /// Store a role under its name.
    pub fn put_role(&self, role: &RoleEntry) -> Result<(), StorageError> {
        self.put_json(&role_key(&role.name), role)
    }

    /// Remove the value under `key`.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }
}
