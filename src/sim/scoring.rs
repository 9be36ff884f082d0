//! Scoring, badges and the game-over transition

use serde::{Deserialize, Serialize};

use super::state::{CoinTier, GamePhase, GameState};
use crate::consts::{HIGH_BAND_START, MID_BAND_START};

/// Score as shown to the player
#[inline]
pub fn displayed(score: f64) -> u64 {
    // Negative scores are unreachable; `as` saturates them to 0
    score.floor() as u64
}

/// Milestone badges, ascending by threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    StarFlyer,
    CloudSkipper,
    SkyChampion,
}

impl Badge {
    pub const ALL: [Badge; 3] = [Badge::StarFlyer, Badge::CloudSkipper, Badge::SkyChampion];

    /// Displayed score needed to earn the badge
    pub fn threshold(&self) -> u64 {
        match self {
            Badge::StarFlyer => 50,
            Badge::CloudSkipper => 100,
            Badge::SkyChampion => 250,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::StarFlyer => "Star Flyer",
            Badge::CloudSkipper => "Cloud Skipper",
            Badge::SkyChampion => "Sky Champion",
        }
    }

    /// Every badge earned at `displayed_score`, lowest threshold first
    pub fn earned(displayed_score: u64) -> impl Iterator<Item = Badge> {
        Self::ALL
            .into_iter()
            .filter(move |b| b.threshold() <= displayed_score)
    }
}

/// End-of-run feedback band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackBand {
    Low,
    Mid,
    High,
}

impl FeedbackBand {
    pub fn from_score(final_score: u64) -> Self {
        if final_score < MID_BAND_START {
            FeedbackBand::Low
        } else if final_score < HIGH_BAND_START {
            FeedbackBand::Mid
        } else {
            FeedbackBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackBand::Low => "low",
            FeedbackBand::Mid => "mid",
            FeedbackBand::High => "high",
        }
    }
}

/// What the presentation layer needs for the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub final_score: u64,
    pub coin_count: u32,
    pub band: FeedbackBand,
    /// Final score beat the stored best
    pub new_high_score: bool,
}

/// Per-frame survival points
pub fn accrue_time(state: &mut GameState) {
    state.score += state.tuning.score_per_frame;
}

/// Apply a collected coin
pub fn collect_coin(state: &mut GameState, tier: CoinTier) {
    let multiplier = tier.multiplier();
    state.score += state.tuning.coin_base_value * f64::from(multiplier);
    state.coin_count += multiplier;
}

/// End the run. Returns `None` if it had already ended.
pub fn end_game(state: &mut GameState) -> Option<GameOverSummary> {
    if !state.is_running() {
        return None;
    }
    state.phase = GamePhase::GameOver;

    let final_score = state.displayed_score();
    let new_high_score = state.record_high_score(state.score);
    let summary = GameOverSummary {
        final_score,
        coin_count: state.coin_count,
        band: FeedbackBand::from_score(final_score),
        new_high_score,
    };

    log::info!(
        "Game over: score {} coins {} band {}{}",
        final_score,
        summary.coin_count,
        summary.band.as_str(),
        if new_high_score { " (new best)" } else { "" }
    );

    Some(summary)
}
