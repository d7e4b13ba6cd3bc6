//! Persistent user settings: remembered login credentials and the logged-in flag

use contracts::system::auth::RememberedCredentials;

const REMEMBERED_KEY: &str = "rememberedCredentials";
const LOGGED_IN_KEY: &str = "isLoggedIn";

/// String key/value backend, e.g. browser localStorage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub remembered: Option<RememberedCredentials>,
    pub logged_in: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Settings {
        let remembered = self.store.get(REMEMBERED_KEY).and_then(|raw| {
            serde_json::from_str::<RememberedCredentials>(&raw)
                .map_err(|e| log::warn!("Ignoring unreadable remembered credentials: {}", e))
                .ok()
        });
        let logged_in = self.store.get(LOGGED_IN_KEY).as_deref() == Some("true");
        Settings {
            remembered,
            logged_in,
        }
    }

    pub fn save(&self, settings: &Settings) {
        match &settings.remembered {
            Some(creds) => match serde_json::to_string(creds) {
                Ok(raw) => self.store.set(REMEMBERED_KEY, &raw),
                Err(e) => log::error!("Failed to store credentials: {}", e),
            },
            None => self.store.remove(REMEMBERED_KEY),
        }
        if settings.logged_in {
            self.store.set(LOGGED_IN_KEY, "true");
        } else {
            self.store.remove(LOGGED_IN_KEY);
        }
    }

    pub fn clear(&self) {
        self.store.remove(REMEMBERED_KEY);
        self.store.remove(LOGGED_IN_KEY);
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;

    fn creds() -> RememberedCredentials {
        RememberedCredentials {
            username: "admin".into(),
            password: "pw".into(),
        }
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = SettingsStore::new(MemoryStore::default());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mem = MemoryStore::default();
        let store = SettingsStore::new(mem.clone());
        store.save(&Settings {
            remembered: Some(creds()),
            logged_in: true,
        });
        assert_eq!(mem.get(LOGGED_IN_KEY).as_deref(), Some("true"));
        let loaded = store.load();
        assert_eq!(loaded.remembered, Some(creds()));
        assert!(loaded.logged_in);
    }

    #[test]
    fn test_save_without_remember_removes_credentials() {
        let mem = MemoryStore::default();
        let store = SettingsStore::new(mem.clone());
        store.save(&Settings {
            remembered: Some(creds()),
            logged_in: true,
        });
        store.save(&Settings {
            remembered: None,
            logged_in: true,
        });
        assert!(mem.get(REMEMBERED_KEY).is_none());
        assert!(store.load().logged_in);
    }

    #[test]
    fn test_clear() {
        let mem = MemoryStore::default();
        let store = SettingsStore::new(mem.clone());
        store.save(&Settings {
            remembered: Some(creds()),
            logged_in: true,
        });
        store.clear();
        assert!(mem.map.borrow().is_empty());
    }

    #[test]
    fn test_corrupt_credentials_are_ignored() {
        let mem = MemoryStore::default();
        mem.set(REMEMBERED_KEY, "{not json");
        let store = SettingsStore::new(mem);
        assert_eq!(store.load().remembered, None);
    }
}
