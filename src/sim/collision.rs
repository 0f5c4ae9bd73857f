//! Collision resolution and level progression

use tracing::info;

use super::events::{GameEvent, LifeLostCause};
use super::state::GameState;
use crate::entities::{Bounds, Enemy, create_explosion_particles, is_colliding};

/// Resolves bullet hits, then at most one player hit, for this tick.
pub fn resolve_collisions(state: &mut GameState) {
    // Newest bullet first. Enemies are scanned in reverse and a bullet is
    // spent on the first one it overlaps.
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = &state.bullets[i];
        let Some(j) = state.enemies.iter().rposition(|e| is_colliding(bullet, e)) else {
            continue;
        };

        state.bullets.remove(i);
        let enemy = state.enemies.remove(j);
        explode(state, &enemy);
        state.score += Enemy::POINTS;
    }

    // The player takes at most one hit per tick
    if let Some(j) = state
        .enemies
        .iter()
        .rposition(|e| is_colliding(&state.player, e))
    {
        let enemy = state.enemies.remove(j);
        explode(state, &enemy);
        state.lose_life(LifeLostCause::Collision);
    }
}

/// Advances a single level once the score reaches `level * 100`, even if the
/// score has already passed several thresholds.
pub fn check_level_progression(state: &mut GameState) {
    if state.score >= state.level * 100 {
        state.level += 1;
        info!(level = state.level, score = state.score, "level up");
        state.push_event(GameEvent::LevelUp { level: state.level });
    }
}

fn explode(state: &mut GameState, enemy: &Enemy) {
    let (x, y) = enemy.center();
    let particles = create_explosion_particles(x, y, &mut state.rng);
    state.particles.extend(particles);
    state.push_event(GameEvent::EnemyDestroyed { x, y });
}
