//! Time-gated spawning of obstacles and coins
//!
//! Entities appear just above the arena at a random x. Gating uses the
//! host timestamp, so irregular frame intervals are fine.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, CoinTier, EntityId, GameState, Obstacle};

/// Random x for an entity of `width`, keeping it inside the arena
fn random_x(state: &mut GameState, width: f32) -> f32 {
    let span = (state.tuning.arena_width - width).max(0.0);
    state.rng.random::<f32>() * span
}

/// Spawn an obstacle if more than the obstacle interval has passed
pub fn try_spawn_obstacle(state: &mut GameState, now: f64) -> Option<EntityId> {
    if !state.is_running() || now - state.last_obstacle_spawn <= state.tuning.obstacle_interval_ms {
        return None;
    }

    let size = state.tuning.obstacle_size;
    let x = random_x(state, size.x);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, -size.y),
        size,
    });
    state.last_obstacle_spawn = now;

    log::debug!("Obstacle {} spawned at x={:.1}", id.0, x);
    Some(id)
}

/// Spawn a coin if more than the coin interval has passed
pub fn try_spawn_coin(state: &mut GameState, now: f64) -> Option<(EntityId, CoinTier)> {
    if !state.is_running() || now - state.last_coin_spawn <= state.tuning.coin_interval_ms {
        return None;
    }

    let size = state.tuning.coin_size;
    let x = random_x(state, size.x);
    let roll: f64 = state.rng.random();
    let tier = CoinTier::from_roll(roll, &state.tuning);
    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        pos: Vec2::new(x, -size.y),
        size,
        tier,
    });
    state.last_coin_spawn = now;

    log::debug!("Coin {} ({}) spawned at x={:.1}", id.0, tier.as_str(), x);
    Some((id, tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default(), 0)
    }

    #[test]
    fn test_obstacle_gating() {
        let mut s = state();
        // Exactly at the interval: not yet
        assert!(try_spawn_obstacle(&mut s, 900.0).is_none());
        assert!(try_spawn_obstacle(&mut s, 901.0).is_some());
        assert_eq!(s.obstacles().len(), 1);
        // Timer reset to 901
        assert!(try_spawn_obstacle(&mut s, 1500.0).is_none());
        assert!(try_spawn_obstacle(&mut s, 1801.5).is_some());
        assert_eq!(s.obstacles().len(), 2);
    }

    #[test]
    fn test_obstacle_placement() {
        let mut s = state();
        for i in 1..=50 {
            try_spawn_obstacle(&mut s, i as f64 * 1000.0);
        }
        assert_eq!(s.obstacles().len(), 50);
        for o in s.obstacles() {
            assert_eq!(o.pos.y, -30.0);
            assert_eq!(o.size, Vec2::new(70.0, 30.0));
            assert!(o.pos.x >= 0.0 && o.pos.x <= 480.0 - 70.0);
        }
    }

    #[test]
    fn test_coin_gating_and_placement() {
        let mut s = state();
        assert!(try_spawn_coin(&mut s, 700.0).is_none());
        let (id, _) = try_spawn_coin(&mut s, 700.5).unwrap();
        let coin = &s.coins()[0];
        assert_eq!(coin.id, id);
        assert_eq!(coin.pos.y, -40.0);
        assert!(coin.pos.x >= 0.0 && coin.pos.x <= 440.0);
    }

    #[test]
    fn test_coin_tiers_all_appear() {
        let mut s = state();
        for i in 1..=400 {
            try_spawn_coin(&mut s, i as f64 * 701.0);
        }
        let count = |tier| s.coins().iter().filter(|c| c.tier == tier).count();
        assert!(count(CoinTier::Normal) > 0);
        assert!(count(CoinTier::Double) > 0);
        assert!(count(CoinTier::Triple) > 0);
        // Normal is the most common tier (60%)
        assert!(count(CoinTier::Normal) > count(CoinTier::Double));
        assert!(count(CoinTier::Normal) > count(CoinTier::Triple));
    }

    #[test]
    fn test_no_spawn_after_game_over() {
        let mut s = state();
        s.phase = GamePhase::GameOver;
        assert!(try_spawn_obstacle(&mut s, 10_000.0).is_none());
        assert!(try_spawn_coin(&mut s, 10_000.0).is_none());
        assert_eq!(s.last_obstacle_spawn, 0.0);
        assert!(s.obstacles().is_empty() && s.coins().is_empty());
    }

    #[test]
    fn test_narrow_arena_spawns_at_zero() {
        let mut s = GameState::new(1, Tuning::default().with_arena(50.0, 300.0), 0);
        try_spawn_obstacle(&mut s, 1000.0);
        assert_eq!(s.obstacles()[0].pos.x, 0.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = state();
        let mut b = state();
        for i in 1..=10 {
            try_spawn_coin(&mut a, i as f64 * 800.0);
            try_spawn_coin(&mut b, i as f64 * 800.0);
        }
        let xs = |s: &GameState| s.coins().iter().map(|c| (c.pos.x, c.tier)).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }
}
