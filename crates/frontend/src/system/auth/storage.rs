use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Bearer token persisted in localStorage under the configured key.
#[derive(Debug, Clone)]
pub struct TokenStorage {
    key: String,
}

impl TokenStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn load(&self) -> Option<String> {
        get_local_storage()?
            .get_item(&self.key)
            .ok()?
            .filter(|t| !t.trim().is_empty())
    }

    pub fn save(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("could not persist session token");
            }
        }
    }

    pub fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
