//! Sky Flyer - A parachute arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (spawning, motion, collisions, scoring)
//! - `session`: Host-owned game loop object (state + high score store)
//! - `platform`: Presentation adapters (entity handle table, DOM on web)
//! - `persistence`: Single high score value storage
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

/// Fixed identifiers and thresholds (not tunable)
pub mod consts {
    /// LocalStorage key for the best score
    pub const HIGH_SCORE_KEY: &str = "skyFlyerHighScore";
    /// LocalStorage key for an optional tuning override (JSON)
    pub const TUNING_KEY: &str = "skyFlyerTuning";

    /// Final scores below this land in the low feedback band
    pub const MID_BAND_START: u64 = 50;
    /// Final scores at or above this land in the high feedback band
    pub const HIGH_BAND_START: u64 = 150;

    /// Nominal frame period used by headless runs (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
