//! Events emitted by the simulation for audio and UI feedback.

use super::state::Phase;

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLostCause {
    /// An enemy slipped past the bottom of the screen
    EnemyEscaped,
    /// An enemy rammed the player ship
    Collision,
}

/// Something the front end may want to react to. Drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    ShotFired,
    EnemyDestroyed { x: f32, y: f32 },
    LifeLost { cause: LifeLostCause, lives: u32 },
    LevelUp { level: u32 },
}
