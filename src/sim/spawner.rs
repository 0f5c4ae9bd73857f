//! Enemy spawner: one enemy per spawn interval, faster at higher levels

use rand::Rng;
use tracing::debug;

use super::state::GameState;
use crate::color::Rgb;
use crate::entities::Enemy;

const BASE_SPAWN_DELAY_MS: u64 = 500;
const SPAWN_DELAY_STEP_MS: u64 = 50;
const MIN_SPAWN_DELAY_MS: u64 = 200;

/// Delay between spawns at the given level, floored at 200 ms
pub fn spawn_delay_ms(level: u32) -> u64 {
    BASE_SPAWN_DELAY_MS
        .saturating_sub(u64::from(level) * SPAWN_DELAY_STEP_MS)
        .max(MIN_SPAWN_DELAY_MS)
}

/// Spawns an enemy if the timer is due and re-arms it from the current level.
pub(super) fn run_spawner(state: &mut GameState) {
    if state.clock_ms < state.next_spawn_at_ms {
        return;
    }

    spawn_enemy(state);
    state.next_spawn_at_ms = state.clock_ms + spawn_delay_ms(state.level);
}

fn spawn_enemy(state: &mut GameState) {
    let max_x = (state.config.canvas_width - Enemy::WIDTH).max(0.0);
    let x = state.rng.random::<f32>() * max_x;
    let speed = (1.0 + state.rng.random::<f32>() * 2.0) * state.difficulty.speed_multiplier();
    let color = Rgb::from_hsl(state.rng.random::<f32>() * 360.0, 0.7, 0.5);

    debug!(x, speed, "enemy spawned");
    state
        .enemies
        .push(Enemy::new(x, -Enemy::HEIGHT, speed, color));
}
