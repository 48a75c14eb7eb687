//! Spin history
//!
//! Persisted to LocalStorage, keeps the most recent results.

use serde::{Deserialize, Serialize};

/// Maximum number of spins to keep
pub const MAX_HISTORY: usize = 20;

/// A single spin result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Winning slice
    pub slice: usize,
    /// Torque the spin started with
    pub torque: f32,
    /// Unix timestamp (ms) when the wheel settled
    pub timestamp: f64,
}

/// Recent spin results, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpinHistory {
    pub entries: Vec<SpinRecord>,
}

impl SpinHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "prize_wheel_history";

    /// Create empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a spin result, dropping the oldest beyond `MAX_HISTORY`
    pub fn record(&mut self, slice: usize, torque: f32, timestamp: f64) {
        self.entries.insert(
            0,
            SpinRecord {
                slice,
                torque,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HISTORY);
    }

    /// Most recent result
    pub fn last(&self) -> Option<&SpinRecord> {
        self.entries.first()
    }

    /// How often each slice won, for a wheel of `number_of_slices`
    ///
    /// Records for slices outside the wheel (e.g. after a config change) are skipped.
    pub fn tally(&self, number_of_slices: usize) -> Vec<u32> {
        let mut counts = vec![0; number_of_slices];
        for entry in &self.entries {
            if let Some(count) = counts.get_mut(entry.slice) {
                *count += 1;
            }
        }
        counts
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(history) = serde_json::from_str::<SpinHistory>(&json) {
                    log::info!("Loaded {} past spins", history.entries.len());
                    return history;
                }
            }
        }

        log::info!("No spin history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Spin history saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut history = SpinHistory::new();
        assert!(history.is_empty());
        history.record(3, -12.0, 1.0);
        history.record(5, -11.0, 2.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|r| r.slice), Some(5));
    }

    #[test]
    fn test_capped() {
        let mut history = SpinHistory::new();
        for i in 0..(MAX_HISTORY + 5) {
            history.record(i % 8, -12.0, i as f64);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        // Oldest entries dropped
        assert_eq!(history.entries.last().map(|r| r.timestamp), Some(5.0));
    }

    #[test]
    fn test_tally() {
        let mut history = SpinHistory::new();
        for slice in [0, 2, 2, 7, 9] {
            history.record(slice, -12.0, 0.0);
        }
        let counts = history.tally(8);
        assert_eq!(counts, vec![1, 0, 2, 0, 0, 0, 0, 1]);
    }
}
