//! Deterministic game simulation
//!
//! Everything that mutates the session lives here: the phase machine, the
//! per-frame tick, the enemy spawner and collision resolution. Nothing in this
//! module touches the terminal, so the whole game can be driven from tests.

mod collision;
mod events;
mod spawner;
mod state;
mod tick;

pub use collision::{check_level_progression, resolve_collisions};
pub use events::{GameEvent, LifeLostCause};
pub use spawner::spawn_delay_ms;
pub use state::{Difficulty, GameConfig, GameState, Phase, STARTING_LIVES};
pub use tick::{FRAME_MS, TickInput, tick};
