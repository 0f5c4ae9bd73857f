//! Fixed timestep simulation tick
//!
//! Advances the session by exactly one frame. The order of the steps below is
//! part of the game's behavior and must not be shuffled.

use super::collision::{check_level_progression, resolve_collisions};
use super::events::LifeLostCause;
use super::spawner::run_spawner;
use super::state::{GameState, Phase};

/// Length of one simulation frame (~60 Hz)
pub const FRAME_MS: u64 = 16;

/// Level-sampled input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one frame. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != Phase::Playing {
        return;
    }

    state.clock_ms += FRAME_MS;
    run_spawner(state);

    move_player(state, input);

    for bullet in &mut state.bullets {
        bullet.update();
    }
    state.bullets.retain(|b| !b.is_out_of_bounds());

    if update_enemies(state) {
        // Out of lives, nothing else runs this frame
        return;
    }

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());

    let canvas_height = state.config.canvas_height;
    for power_up in &mut state.power_ups {
        power_up.update();
    }
    state
        .power_ups
        .retain(|p| !p.is_out_of_bounds(canvas_height));

    resolve_collisions(state);
    check_level_progression(state);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let max_x = (state.config.canvas_width - state.player.width).max(0.0);
    if input.left {
        state.player.move_left(0.0);
    }
    if input.right {
        state.player.move_right(max_x);
    }
}

/// Moves enemies down and charges a life for each one that escapes.
/// Returns true if that ended the game.
fn update_enemies(state: &mut GameState) -> bool {
    let canvas_height = state.config.canvas_height;
    let mut i = 0;
    while i < state.enemies.len() {
        state.enemies[i].update();
        if !state.enemies[i].has_escaped(canvas_height) {
            i += 1;
            continue;
        }

        state.enemies.remove(i);
        if state.lose_life(LifeLostCause::EnemyEscaped) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::entities::{Bullet, Enemy, Particle, PowerUp};
    use crate::sim::{GameConfig, GameEvent};

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), Some(9));
        state.start();
        state.drain_events();
        // Keep the spawner out of the way
        state.next_spawn_at_ms = u64::MAX;
        state
    }

    #[test]
    fn test_tick_is_noop_unless_playing() {
        let mut state = GameState::new(GameConfig::default(), Some(9));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.clock_ms, 0);

        state.start();
        state.toggle_pause();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.clock_ms, 0);
    }

    #[test]
    fn test_tick_advances_clock_and_spawns() {
        let mut state = GameState::new(GameConfig::default(), Some(9));
        state.start();
        // 450 ms at 16 ms per frame is due on the 29th frame
        for _ in 0..28 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.clock_ms, 29 * FRAME_MS);
    }

    #[test]
    fn test_player_moves_with_held_keys() {
        let mut state = playing_state();
        let start_x = state.player.x;
        tick(
            &mut state,
            &TickInput {
                left: true,
                right: false,
            },
        );
        assert_eq!(state.player.x, start_x - 5.0);

        tick(
            &mut state,
            &TickInput {
                left: false,
                right: true,
            },
        );
        assert_eq!(state.player.x, start_x);
    }

    #[test]
    fn test_player_clamped_at_right_edge() {
        let mut state = playing_state();
        state.player.x = 748.0;
        tick(
            &mut state,
            &TickInput {
                left: false,
                right: true,
            },
        );
        assert_eq!(state.player.x, 750.0);
    }

    #[test]
    fn test_bullets_leave_through_top() {
        let mut state = playing_state();
        state.bullets.push(Bullet::new(10.0, -3.0));
        state.bullets.push(Bullet::new(10.0, 300.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].y, 292.0);
    }

    #[test]
    fn test_escaped_enemy_costs_a_life() {
        let mut state = playing_state();
        state
            .enemies
            .push(Enemy::new(10.0, 601.0, 1.0, Rgb::new(1, 1, 1)));
        tick(&mut state, &TickInput::default());
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_escape_on_last_life_stops_the_tick() {
        let mut state = playing_state();
        state.lives = 1;
        state
            .enemies
            .push(Enemy::new(10.0, 700.0, 1.0, Rgb::new(1, 1, 1)));
        state
            .enemies
            .push(Enemy::new(100.0, 700.0, 1.0, Rgb::new(1, 1, 1)));
        state
            .particles
            .push(Particle::new(5.0, 5.0, 1.0, 1.0, 30, Rgb::new(1, 1, 1)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, Phase::GameOver);
        // The second enemy is left where it was, particles untouched
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].y, 700.0);
        assert_eq!(state.particles[0].life, 30);

        // Nothing more happens after the game is over
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_particles_fade_and_die() {
        let mut state = playing_state();
        state
            .particles
            .push(Particle::new(5.0, 5.0, 1.0, 1.0, 2, Rgb::new(1, 1, 1)));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].alpha, 0.5);
        tick(&mut state, &TickInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_power_ups_fall_and_leave() {
        let mut state = playing_state();
        state
            .power_ups
            .push(PowerUp::new(10.0, 590.0, 5.0, Rgb::new(1, 1, 1)));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.power_ups[0].y, 595.0);
        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_kill_crossing_threshold_levels_up() {
        let mut state = playing_state();
        state.score = 95;
        // Enemy moves 1 down into the bullet's path; bullet moves 8 up
        state
            .enemies
            .push(Enemy::new(100.0, 100.0, 1.0, Rgb::new(1, 1, 1)));
        state.bullets.push(Bullet::new(110.0, 130.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 105);
        assert_eq!(state.level, 2);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
    }
}
