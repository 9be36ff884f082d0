//! LocalStorage-backed best score (WASM only)

use super::{HighScoreStore, parse_high_score};
use crate::consts::HIGH_SCORE_KEY;

/// Best score in the browser's LocalStorage
#[derive(Debug, Default)]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    /// Open LocalStorage; a missing or blocked store acts as empty
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - best score will not persist");
        }
        Self { storage }
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let raw = self
            .storage
            .as_ref()
            .and_then(|s| s.get_item(HIGH_SCORE_KEY).ok().flatten());

        match raw {
            Some(raw) => {
                let score = parse_high_score(&raw);
                log::info!("Loaded best score {}", score);
                score
            }
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        if let Some(storage) = &self.storage {
            match storage.set_item(HIGH_SCORE_KEY, &score.to_string()) {
                Ok(()) => log::info!("Best score saved ({})", score),
                Err(e) => log::warn!("Failed to save best score: {:?}", e),
            }
        }
    }
}
