//! Game state and core simulation types
//!
//! One `GameState` per run. Every component takes it by `&mut` reference;
//! there is no other shared state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::scoring::{self, Badge};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Flying,
    /// Run ended (terminal)
    GameOver,
}

/// Stable identity of a spawned entity (keys the presentation handle table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Coin value tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoinTier {
    #[default]
    Normal,
    Double,
    Triple,
}

impl CoinTier {
    /// Score and coin-count multiplier
    pub fn multiplier(&self) -> u32 {
        match self {
            CoinTier::Normal => 1,
            CoinTier::Double => 2,
            CoinTier::Triple => 3,
        }
    }

    /// Pick a tier from a uniform roll in [0, 1)
    pub fn from_roll(roll: f64, tuning: &Tuning) -> Self {
        if roll < tuning.triple_chance {
            CoinTier::Triple
        } else if roll < tuning.double_cutoff {
            CoinTier::Double
        } else {
            CoinTier::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoinTier::Normal => "normal",
            CoinTier::Double => "double",
            CoinTier::Triple => "triple",
        }
    }
}

/// A falling block. Touching it with the parachute ends the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A falling coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: CoinTier,
}

impl Coin {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The player's sprite. Only the parachute region collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: Vec2,
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
}

impl Player {
    /// Player centred in the arena
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            pos: ((tuning.arena_size() - tuning.player_size) / 2.0).max(Vec2::ZERO),
            size: tuning.player_size,
            hitbox_offset: tuning.hitbox_offset,
            hitbox_size: tuning.hitbox_size,
        }
    }

    /// Collidable parachute rectangle
    #[inline]
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos + self.hitbox_offset, self.hitbox_size)
    }

    /// Centre the sprite on `pointer`, clamped inside the arena
    pub fn follow_pointer(&mut self, pointer: Vec2, arena: Vec2) {
        let max = (arena - self.size).max(Vec2::ZERO);
        self.pos = (pointer - self.size / 2.0).clamp(Vec2::ZERO, max);
    }
}

/// Presentation summary for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub coins: u32,
    pub high_score: u64,
    pub badges: Vec<Badge>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Spawner RNG
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Accumulated score (fractional; displayed floored)
    pub(crate) score: f64,
    pub(crate) coin_count: u32,
    /// Best score seen so far, including earlier runs
    pub(crate) high_score: u64,
    pub player: Player,
    /// Live obstacles, in spawn order
    pub(crate) obstacles: Vec<Obstacle>,
    /// Live coins, in spawn order
    pub(crate) coins: Vec<Coin>,
    /// Timestamp (ms) of the last obstacle spawn
    pub(crate) last_obstacle_spawn: f64,
    /// Timestamp (ms) of the last coin spawn
    pub(crate) last_coin_spawn: f64,
    /// Frames simulated while flying
    pub frame_count: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed and a previously stored best score
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Flying,
            score: 0.0,
            coin_count: 0,
            high_score,
            player: Player::centered(&tuning),
            obstacles: Vec::new(),
            coins: Vec::new(),
            last_obstacle_spawn: 0.0,
            last_coin_spawn: 0.0,
            frame_count: 0,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Flying
    }

    /// Raw accumulated score
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Score as shown to the player
    #[inline]
    pub fn displayed_score(&self) -> u64 {
        scoring::displayed(self.score)
    }

    #[inline]
    pub fn coin_count(&self) -> u32 {
        self.coin_count
    }

    #[inline]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Raise the best score to `floor(candidate)` if higher.
    /// Returns true when the best score changed (caller persists it).
    pub fn record_high_score(&mut self, candidate: f64) -> bool {
        let candidate = scoring::displayed(candidate);
        if candidate > self.high_score {
            self.high_score = candidate;
            true
        } else {
            false
        }
    }

    /// Pointer moved (arena-local coordinates). Ignored after game over.
    pub fn move_player(&mut self, pointer: Vec2) {
        if !self.is_running() {
            return;
        }
        let arena = self.tuning.arena_size();
        self.player.follow_pointer(pointer, arena);
    }

    /// Current HUD values
    pub fn hud(&self) -> Hud {
        let score = self.displayed_score();
        Hud {
            score,
            coins: self.coin_count,
            high_score: self.high_score,
            badges: Badge::earned(score).collect(),
        }
    }

    /// Test helper: place an obstacle directly
    #[cfg(test)]
    pub(crate) fn push_obstacle(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let size = self.tuning.obstacle_size;
        self.obstacles.push(Obstacle { id, pos, size });
        id
    }

    /// Test helper: place a coin directly
    #[cfg(test)]
    pub(crate) fn push_coin(&mut self, pos: Vec2, tier: CoinTier) -> EntityId {
        let id = self.next_entity_id();
        let size = self.tuning.coin_size;
        self.coins.push(Coin { id, pos, size, tier });
        id
    }
}
