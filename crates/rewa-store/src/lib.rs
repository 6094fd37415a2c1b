//! REWA Store - single-key persistence gateway
//!
//! The full account snapshot lives under one durable key, written through
//! unconditionally on every ledger mutation. Loads never fail outward: a
//! missing or malformed snapshot falls back to a freshly generated default
//! account, and fields absent from an older snapshot take their defaults
//! (forward compatibility, not a real migration).

use rewa_types::{token, AccountState, Result, RewaError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Gateway the ledger persists through after every mutation.
///
/// Writes are fire-and-forget from the ledger's perspective and never
/// transactionally coupled to the confirmation sweep.
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Serialize the full state to the fixed key, overwriting unconditionally.
    async fn save(&self, state: &AccountState) -> Result<()>;

    /// Read the key; on missing key or malformed content return a freshly
    /// generated default account. Never raises to the caller.
    async fn load(&self) -> AccountState;
}

/// JSON file store under a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.rewa/charmrewards_v5.json`. The file name carries
    /// the snapshot schema tag.
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rewa")
            .join(format!("{}_v5.json", token::APP_ID))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait::async_trait]
impl SnapshotStore for JsonFileStore {
    async fn save(&self, state: &AccountState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RewaError::PersistenceWriteFailure {
                message: e.to_string(),
            })?;
        }
        let bytes =
            serde_json::to_vec_pretty(state).map_err(|e| RewaError::PersistenceWriteFailure {
                message: e.to_string(),
            })?;
        std::fs::write(&self.path, bytes).map_err(|e| RewaError::PersistenceWriteFailure {
            message: e.to_string(),
        })?;
        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    async fn load(&self) -> AccountState {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => {
                debug!(path = %self.path.display(), "no snapshot, generating default account");
                return AccountState::generate();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "malformed snapshot, falling back to default");
                AccountState::generate()
            }
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    snapshot: Arc<RwLock<Option<AccountState>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed saves is not tracked; tests inspect the snapshot.
    pub async fn snapshot(&self) -> Option<AccountState> {
        self.snapshot.read().await.clone()
    }
}

#[async_trait::async_trait]
impl SnapshotStore for InMemoryStore {
    async fn save(&self, state: &AccountState) -> Result<()> {
        *self.snapshot.write().await = Some(state.clone());
        Ok(())
    }

    async fn load(&self) -> AccountState {
        self.snapshot
            .read()
            .await
            .clone()
            .unwrap_or_else(AccountState::generate)
    }
}
