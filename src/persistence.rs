//! Best-score persistence boundary
//!
//! Storage is best-effort: failures read as "no stored value" and writes
//! are silently skipped. A malformed stored value is discarded.

/// Persists the best score across runs
pub trait ScoreStore {
    fn load(&self) -> Option<u32>;
    fn save(&mut self, score: u32);
}

/// LocalStorage key for the best score
pub const BEST_SCORE_KEY: &str = "survivorBest";

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalScoreStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<u32> {
        let stored = Self::storage()?.get_item(BEST_SCORE_KEY).ok()??;
        stored.trim().parse().ok()
    }

    fn save(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(BEST_SCORE_KEY, &score.to_string());
            log::info!("Best score saved: {score}");
        }
    }
}

/// In-memory store used on native and in tests
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: Option<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best: Some(best) }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<u32> {
        self.best
    }

    fn save(&mut self, score: u32) {
        self.best = Some(score);
    }
}
