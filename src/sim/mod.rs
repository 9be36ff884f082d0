//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Explicit `&mut GameState`, no globals
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use scoring::{Badge, FeedbackBand, GameOverSummary};
pub use spawn::{try_spawn_coin, try_spawn_obstacle};
pub use state::{Coin, CoinTier, EntityId, GamePhase, GameState, Hud, Obstacle, Player};
pub use tick::{FrameResult, GameEvent, TickInput, tick};
