// ============================================================================
// CREDENTIAL STORAGE - Durable (localStorage) and ephemeral (sessionStorage)
// ============================================================================
// Exactly one backend holds the serialized credential at a time; the session
// store enforces that by clearing the other backend on every write.
// ============================================================================

use std::cell::RefCell;

use crate::models::Credential;
use crate::services::error::StorageError;

pub const CREDENTIAL_KEY: &str = "transitCompanion_credential";

/// One persistence backend for the session credential
pub trait CredentialStore {
    fn load(&self) -> Option<Credential>;
    fn save(&self, credential: &Credential) -> Result<(), StorageError>;
    fn clear(&self);
}

/// In-memory backend. Used by tests and as a fallback where browser storage
/// is unavailable; contents vanish with the process.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: RefCell<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.slot.borrow().clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{window, Storage};

    use super::{CredentialStore, CREDENTIAL_KEY};
    use crate::models::Credential;
    use crate::services::error::StorageError;

    fn local_storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }

    fn session_storage() -> Option<Storage> {
        window()?.session_storage().ok()?
    }

    fn load_from(storage: Option<Storage>) -> Option<Credential> {
        let json = storage?.get_item(CREDENTIAL_KEY).ok()??;
        serde_json::from_str(&json).ok()
    }

    fn save_to(storage: Option<Storage>, credential: &Credential) -> Result<(), StorageError> {
        let storage = storage.ok_or(StorageError::Unavailable)?;
        let json = serde_json::to_string(credential)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        storage
            .set_item(CREDENTIAL_KEY, &json)
            .map_err(|_| StorageError::Write)
    }

    fn clear_from(storage: Option<Storage>) {
        if let Some(storage) = storage {
            let _ = storage.remove_item(CREDENTIAL_KEY);
        }
    }

    /// Survives restarts ("remember me")
    #[derive(Default)]
    pub struct DurableCredentialStore;

    impl CredentialStore for DurableCredentialStore {
        fn load(&self) -> Option<Credential> {
            load_from(local_storage())
        }

        fn save(&self, credential: &Credential) -> Result<(), StorageError> {
            save_to(local_storage(), credential)
        }

        fn clear(&self) {
            clear_from(local_storage());
        }
    }

    /// Cleared when the browser session ends
    #[derive(Default)]
    pub struct EphemeralCredentialStore;

    impl CredentialStore for EphemeralCredentialStore {
        fn load(&self) -> Option<Credential> {
            load_from(session_storage())
        }

        fn save(&self, credential: &Credential) -> Result<(), StorageError> {
            save_to(session_storage(), credential)
        }

        fn clear(&self) {
            clear_from(session_storage());
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{DurableCredentialStore, EphemeralCredentialStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_clears() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().is_none());

        let credential = Credential {
            token: "tok".to_string(),
            subject_name: "manu".to_string(),
        };
        store.save(&credential).unwrap();
        assert_eq!(store.load(), Some(credential));

        store.clear();
        assert!(store.load().is_none());
    }
}
