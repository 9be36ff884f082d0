//! Per-frame simulation step
//!
//! One call per host frame: spawn, move and cull, accrue score, then test
//! the parachute hitbox against obstacles and coins.

use glam::Vec2;

use super::scoring::{self, GameOverSummary};
use super::spawn::{try_spawn_coin, try_spawn_obstacle};
use super::state::{CoinTier, EntityId, GameState};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host timestamp (ms, monotonically increasing)
    pub now: f64,
    /// Latest pointer position in arena coordinates, if it moved
    pub pointer: Option<Vec2>,
}

impl TickInput {
    pub fn at(now: f64) -> Self {
        Self { now, pointer: None }
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned(EntityId),
    CoinSpawned { id: EntityId, tier: CoinTier },
    /// Fell past the bottom edge
    Despawned(EntityId),
    CoinCollected { id: EntityId, tier: CoinTier },
    GameOver(GameOverSummary),
}

/// Outcome of one frame
#[derive(Debug, Clone, Default)]
pub struct FrameResult {
    /// Host should request another frame
    pub running: bool,
    pub events: Vec<GameEvent>,
}

impl FrameResult {
    /// Game-over summary, if the run ended this frame
    pub fn game_over(&self) -> Option<&GameOverSummary> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver(summary) => Some(summary),
            _ => None,
        })
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameResult {
    let mut events = Vec::new();

    // Terminal: nothing moves, nothing scores
    if !state.is_running() {
        return FrameResult {
            running: false,
            events,
        };
    }

    if let Some(pointer) = input.pointer {
        state.move_player(pointer);
    }

    state.frame_count += 1;

    // --- Spawning ---
    if let Some(id) = try_spawn_obstacle(state, input.now) {
        events.push(GameEvent::ObstacleSpawned(id));
    }
    if let Some((id, tier)) = try_spawn_coin(state, input.now) {
        events.push(GameEvent::CoinSpawned { id, tier });
    }

    // --- Motion & culling ---
    advance_entities(state, &mut events);

    // --- Survival score ---
    scoring::accrue_time(state);

    // --- Collisions ---
    let hitbox = state.player.hitbox();

    // First obstacle hit (front to back) ends the run
    if state.obstacles.iter().any(|o| hitbox.overlaps(&o.rect())) {
        if let Some(summary) = scoring::end_game(state) {
            events.push(GameEvent::GameOver(summary));
        }
    }

    // Coins: back to front so removal keeps earlier indices valid
    if state.is_running() {
        for i in (0..state.coins.len()).rev() {
            if hitbox.overlaps(&state.coins[i].rect()) {
                let coin = state.coins.remove(i);
                scoring::collect_coin(state, coin.tier);
                log::debug!("Collected {} coin {}", coin.tier.as_str(), coin.id.0);
                events.push(GameEvent::CoinCollected {
                    id: coin.id,
                    tier: coin.tier,
                });
            }
        }
    }

    FrameResult {
        running: state.is_running(),
        events,
    }
}

/// Move every entity down one frame and drop those below the arena
fn advance_entities(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let floor = state.tuning.arena_height;

    let speed = state.tuning.obstacle_speed;
    state.obstacles.retain_mut(|o| {
        o.pos.y += speed;
        let keep = o.pos.y <= floor;
        if !keep {
            events.push(GameEvent::Despawned(o.id));
        }
        keep
    });

    let speed = state.tuning.coin_speed;
    state.coins.retain_mut(|c| {
        c.pos.y += speed;
        let keep = c.pos.y <= floor;
        if !keep {
            events.push(GameEvent::Despawned(c.id));
        }
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scoring::FeedbackBand;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default(), 0)
    }

    /// Top-left of the parachute hitbox for a freshly centred player
    const HITBOX_MIN: Vec2 = Vec2::new(216.0, 272.0);

    #[test]
    fn test_time_accrual_accumulates() {
        let mut s = state();
        let mut expected = 0.0f64;
        // Timestamp stays below both intervals, so nothing spawns
        for _ in 0..500 {
            let result = tick(&mut s, &TickInput::at(100.0));
            assert!(result.running);
            expected += 0.08;
        }
        assert_eq!(s.score(), expected);
        assert_eq!(s.displayed_score(), expected.floor() as u64);
        assert_eq!(s.frame_count, 500);
    }

    #[test]
    fn test_spawns_follow_timestamps() {
        let mut s = state();
        let result = tick(&mut s, &TickInput::at(16.0));
        assert!(result.events.is_empty());

        let result = tick(&mut s, &TickInput::at(950.0));
        assert!(result.events.iter().any(|e| matches!(e, GameEvent::ObstacleSpawned(_))));
        assert!(result.events.iter().any(|e| matches!(e, GameEvent::CoinSpawned { .. })));
        // Spawned entities have already moved once
        assert_eq!(s.obstacles()[0].pos.y, -27.0);
        assert_eq!(s.coins()[0].pos.y, -37.5);

        // Irregular gap: one spawn each, no catch-up burst
        tick(&mut s, &TickInput::at(5000.0));
        assert_eq!(s.obstacles().len(), 2);
        assert_eq!(s.coins().len(), 2);
    }

    #[test]
    fn test_entities_fall_at_their_speeds() {
        let mut s = state();
        s.push_obstacle(Vec2::new(0.0, 0.0));
        s.push_coin(Vec2::new(400.0, 0.0), CoinTier::Normal);
        for _ in 0..4 {
            tick(&mut s, &TickInput::at(0.0));
        }
        assert_eq!(s.obstacles()[0].pos.y, 12.0);
        assert_eq!(s.coins()[0].pos.y, 10.0);
    }

    #[test]
    fn test_offscreen_entities_removed() {
        let mut s = state();
        let gone = s.push_obstacle(Vec2::new(0.0, 639.0));
        let stays = s.push_coin(Vec2::new(0.0, 637.5), CoinTier::Normal);
        let result = tick(&mut s, &TickInput::at(0.0));
        // 639 + 3 = 642 > 640; 637.5 + 2.5 = 640 is not past the edge
        assert!(s.obstacles().is_empty());
        assert_eq!(s.coins()[0].id, stays);
        assert!(result.events.contains(&GameEvent::Despawned(gone)));
    }

    #[test]
    fn test_culled_obstacle_cannot_end_game() {
        // Tall hitbox reaching past the arena floor when pinned to the bottom
        let tuning = Tuning {
            hitbox_size: Vec2::new(48.0, 100.0),
            ..Tuning::default()
        };
        let mut s = GameState::new(1, tuning, 0);
        s.move_player(Vec2::new(240.0, 10_000.0));
        let hitbox = s.player.hitbox();
        s.push_obstacle(Vec2::new(hitbox.left(), 639.0));
        let result = tick(&mut s, &TickInput::at(0.0));
        assert!(result.running);
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn test_obstacle_hit_ends_game_once() {
        let mut s = state();
        s.push_obstacle(HITBOX_MIN);
        let result = tick(&mut s, &TickInput::at(0.0));
        assert!(!result.running);
        assert_eq!(s.phase, GamePhase::GameOver);
        let summary = result.game_over().unwrap();
        assert_eq!(summary.final_score, 0);
        assert_eq!(summary.band, FeedbackBand::Low);

        // Later frames change nothing
        let score = s.score();
        let frames = s.frame_count;
        let obstacle_y = s.obstacles()[0].pos.y;
        for i in 0..10 {
            let result = tick(&mut s, &TickInput::at(10_000.0 * i as f64));
            assert!(!result.running);
            assert!(result.events.is_empty());
        }
        assert_eq!(s.score(), score);
        assert_eq!(s.frame_count, frames);
        assert_eq!(s.obstacles().len(), 1);
        assert_eq!(s.obstacles()[0].pos.y, obstacle_y);
        assert!(s.coins().is_empty());
    }

    #[test]
    fn test_first_obstacle_wins() {
        let mut s = state();
        s.push_obstacle(HITBOX_MIN);
        s.push_obstacle(HITBOX_MIN + Vec2::new(10.0, 0.0));
        let result = tick(&mut s, &TickInput::at(0.0));
        let overs = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_obstacle_below_parachute_is_harmless() {
        let mut s = state();
        // Overlaps the sprite's lower body but not the parachute
        let hitbox = s.player.hitbox();
        s.push_obstacle(Vec2::new(hitbox.left(), hitbox.bottom() + 10.0));
        let result = tick(&mut s, &TickInput::at(0.0));
        assert!(result.running);
    }

    #[test]
    fn test_edge_touch_is_not_a_hit() {
        let mut s = state();
        let hitbox = s.player.hitbox();
        // After moving 3px its bottom edge sits exactly on the hitbox top
        s.push_obstacle(Vec2::new(hitbox.left(), hitbox.top() - 33.0));
        let result = tick(&mut s, &TickInput::at(0.0));
        assert!(result.running);
        // One more frame and it overlaps
        let result = tick(&mut s, &TickInput::at(0.0));
        assert!(!result.running);
    }

    #[test]
    fn test_collect_multiple_coins_in_one_frame() {
        let mut s = state();
        let a = s.push_coin(HITBOX_MIN, CoinTier::Normal);
        let b = s.push_coin(HITBOX_MIN + Vec2::new(5.0, 0.0), CoinTier::Triple);
        let miss = s.push_coin(Vec2::new(0.0, 0.0), CoinTier::Double);
        let result = tick(&mut s, &TickInput::at(0.0));

        assert!(result.running);
        assert_eq!(s.coin_count(), 4);
        assert_eq!(s.displayed_score(), 40);
        assert_eq!(s.coins().len(), 1);
        assert_eq!(s.coins()[0].id, miss);

        // Collected back to front
        let collected: Vec<_> = result
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CoinCollected { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(collected, vec![b, a]);
    }

    #[test]
    fn test_no_coin_collection_on_fatal_frame() {
        let mut s = state();
        s.push_obstacle(HITBOX_MIN);
        s.push_coin(HITBOX_MIN, CoinTier::Triple);
        let result = tick(&mut s, &TickInput::at(0.0));
        assert!(!result.running);
        assert_eq!(s.coin_count(), 0);
        assert_eq!(s.coins().len(), 1);
    }

    #[test]
    fn test_pointer_input_moves_player() {
        let mut s = state();
        let input = TickInput {
            now: 0.0,
            pointer: Some(Vec2::new(0.0, 0.0)),
        };
        tick(&mut s, &input);
        assert_eq!(s.player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_dodging_keeps_running() {
        let mut s = state();
        // Park in the bottom-left corner and let the sky fall for a while
        s.move_player(Vec2::new(0.0, 10_000.0));
        let mut now = 0.0;
        let mut frames = 0;
        while frames < 120 {
            now += 16.0;
            let result = tick(&mut s, &TickInput::at(now));
            if !result.running {
                break;
            }
            frames += 1;
        }
        // Nothing can reach the bottom rows within two seconds
        assert_eq!(frames, 120);
        assert!(s.obstacles().len() >= 2);
    }
}
