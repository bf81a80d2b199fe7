//! Best-score persistence
//!
//! A single scalar, persisted to LocalStorage as JSON. The session only touches
//! it on the transition into game over.

use serde::{Deserialize, Serialize};

/// Persistence hook consumed by the session
pub trait HighScoreStore {
    fn high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64);

    /// True if `score` would replace the current best
    fn qualifies(&self, score: u64) -> bool {
        score > self.high_score()
    }
}

/// Best score on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sinkhole-highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(score) = serde_json::from_str::<HighScore>(&json) {
                    log::info!("Loaded high score {}", score.best);
                    return score;
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

impl HighScoreStore for HighScore {
    fn high_score(&self) -> u64 {
        self.best
    }

    fn set_high_score(&mut self, score: u64) {
        self.best = score;
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifies() {
        let hs = HighScore::new(500);
        assert!(!hs.qualifies(0));
        assert!(!hs.qualifies(500));
        assert!(hs.qualifies(501));
        assert!(HighScore::default().qualifies(1));
    }

    #[test]
    fn test_store_round_trip() {
        let mut hs = HighScore::default();
        hs.set_high_score(1234);
        assert_eq!(hs.high_score(), 1234);
    }

    #[test]
    fn test_json_is_bare_number() {
        // Same text the storage key has always held
        assert_eq!(serde_json::to_string(&HighScore::new(42)).unwrap(), "42");
        let hs: HighScore = serde_json::from_str("1500").unwrap();
        assert_eq!(hs.best, 1500);
    }
}
