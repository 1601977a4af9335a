//! # Credential Store
//!
//! Holds the bearer credential in a persisted slot. The slot is re-read on every
//! [`CredentialStore::get`], never cached, so a login or logout performed out of band
//! (another view, another process sharing the state dir) is observed by the next request.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::service::SlotStorage;

/// Slot name holding the bearer credential
pub const CREDENTIAL_SLOT: &str = "auth_token";

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank tokens: an empty slot is not a credential.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        (!token.is_empty()).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Reads, writes, and clears the persisted credential.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn SlotStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self { storage }
    }

    /// Store backed by an in-memory slot map (tests, embedding).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySlotStorage::default()))
    }

    /// Current credential, read fresh from storage. Absence is a valid state.
    pub fn get(&self) -> Option<Credential> {
        self.storage
            .read(CREDENTIAL_SLOT)
            .and_then(|raw| Credential::parse(&raw))
    }

    /// Persist a credential after a successful login.
    pub fn set(&self, token: &str) -> std::io::Result<()> {
        self.storage.write(CREDENTIAL_SLOT, token.trim())?;
        tracing::info!("Credential stored");
        Ok(())
    }

    /// Clear the credential after the backend rejected it.
    pub fn invalidate(&self) {
        self.clear("rejected by backend");
    }

    /// Clear the credential on explicit logout.
    pub fn logout(&self) {
        self.clear("logout");
    }

    fn clear(&self, reason: &'static str) {
        match self.storage.remove(CREDENTIAL_SLOT) {
            Ok(()) => tracing::info!(reason, "Credential cleared"),
            // A slot we can't delete still must not be sent again
            Err(e) => {
                tracing::error!(reason, error = %e, "Failed to remove credential slot, blanking it");
                if let Err(e) = self.storage.write(CREDENTIAL_SLOT, "") {
                    tracing::error!(error = %e, "Failed to blank credential slot");
                }
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("present", &self.get().is_some())
            .finish()
    }
}

/// One file per slot inside a state directory.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, slot: &str) -> Option<String> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(slot, error = %e, "Failed to read slot, treating as empty");
                None
            }
        }
    }

    fn write(&self, slot: &str, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(slot), value)
    }

    fn remove(&self, slot: &str) -> std::io::Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Slot map held in memory.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, slot: &str) -> Option<String> {
        self.slots.read().get(slot).cloned()
    }

    fn write(&self, slot: &str, value: &str) -> std::io::Result<()> {
        self.slots.write().insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> std::io::Result<()> {
        self.slots.write().remove(slot);
        Ok(())
    }
}
