//! Best-score persistence
//!
//! A single integer kept under a fixed key. Stored as a decimal string and
//! read back leniently: anything unparseable counts as no score.

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Where the best score lives between runs
pub trait HighScoreStore {
    /// Stored best score, 0 if absent or malformed
    fn load(&self) -> u64;
    /// Overwrite the stored best score
    fn save(&mut self, score: u64);
}

/// Volatile store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    /// Number of writes, for callers that care
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw stored string
    pub fn with_raw(raw: &str) -> Self {
        Self {
            value: Some(raw.to_string()),
            writes: 0,
        }
    }

    /// Raw stored string, if any
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value.as_deref().map(parse_high_score).unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        self.value = Some(score.to_string());
        self.writes += 1;
    }
}

/// Parse a stored score like the browser's `parseInt(s, 10)`:
/// skip leading whitespace, read leading digits, ignore the rest.
/// No digits or a negative value yields 0.
pub fn parse_high_score(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    // Saturate absurdly long digit runs instead of failing
    digits[..end].parse::<u64>().unwrap_or(if end > 0 { u64::MAX } else { 0 })
}
