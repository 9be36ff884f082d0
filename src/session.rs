//! Host-owned game session
//!
//! Wraps one `GameState` plus the best-score store. The host calls
//! `frame` once per animation frame and stops when it reports not running.

use glam::Vec2;

use crate::persistence::HighScoreStore;
use crate::sim::{FrameResult, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// A run in progress plus everything that outlives it
pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    /// Pointer position received since the last frame
    pending_pointer: Option<Vec2>,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a run, reading the stored best score once
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let high_score = store.load();
        log::info!("Session started (seed {}, best {})", seed, high_score);
        Self {
            state: GameState::new(seed, tuning, high_score),
            store,
            pending_pointer: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pointer moved; applied at the start of the next frame
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if self.state.is_running() {
            self.pending_pointer = Some(pointer);
        }
    }

    /// Run one frame at host timestamp `now` (ms)
    pub fn frame(&mut self, now: f64) -> FrameResult {
        let input = TickInput {
            now,
            pointer: self.pending_pointer.take(),
        };
        let result = tick(&mut self.state, &input);

        if result.game_over().is_some_and(|s| s.new_high_score) {
            self.store.save(self.state.high_score());
        }

        result
    }

    /// Fresh run with the same tuning; the best score carries over
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        let high_score = self.state.high_score();
        self.state = GameState::new(seed, tuning, high_score);
        self.pending_pointer = None;
        log::info!("Session restarted (seed {})", seed);
    }
}
