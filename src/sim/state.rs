//! Session state and the phase machine

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::events::{GameEvent, LifeLostCause};
use super::spawner::spawn_delay_ms;
use crate::entities::{Bullet, Enemy, Particle, Player, PowerUp};

pub const STARTING_LIVES: u32 = 3;

/// Drawing surface dimensions, in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Multiplier applied to every newly spawned enemy's speed
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Minimum time between two shots. Hard really does shoot slowest.
    pub fn fire_cooldown_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 150,
            Difficulty::Normal => 200,
            Difficulty::Hard => 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// One game session: entity stores, score keeping and the phase machine.
///
/// Owned by the loop driver and mutated only through the methods below and
/// [`tick`](super::tick).
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    pub muted: bool,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    /// Session clock, advanced one frame per tick
    pub clock_ms: u64,
    /// Session clock time at which the spawner next fires
    pub next_spawn_at_ms: u64,
    pub(crate) rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Creates a session sitting on the start screen. A seed makes every
    /// spawn and explosion reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            phase: Phase::Start,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            difficulty: Difficulty::default(),
            muted: false,
            player: Player::spawn(config.canvas_width, config.canvas_height),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            clock_ms: 0,
            next_spawn_at_ms: 0,
            rng,
            events: Vec::new(),
        }
    }

    /// Leaves the start screen. Ignored in any other phase.
    pub fn start(&mut self) {
        if self.phase == Phase::Start {
            self.reset_session();
        }
    }

    /// Starts over after a game over. Ignored in any other phase.
    pub fn restart(&mut self) {
        if self.phase == Phase::GameOver {
            self.reset_session();
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => self.set_phase(Phase::Paused),
            Phase::Paused => self.set_phase(Phase::Playing),
            Phase::Start | Phase::GameOver => {}
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        debug!(muted = self.muted, "mute toggled");
    }

    /// Label for the mute control
    pub fn mute_label(&self) -> &'static str {
        if self.muted { "UNMUTE" } else { "MUTE" }
    }

    /// Takes effect immediately for new spawns and the next shot
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            info!(difficulty = difficulty.get_name(), "difficulty changed");
        }
        self.difficulty = difficulty;
    }

    /// Fires a bullet if playing and the cooldown has elapsed; otherwise
    /// the request is dropped.
    pub fn fire(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        let cooldown = self.difficulty.fire_cooldown_ms();
        if let Some(bullet) = self.player.try_fire(self.clock_ms, cooldown) {
            self.bullets.push(bullet);
            self.events.push(GameEvent::ShotFired);
        }
    }

    /// Events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Removes one life and ends the game when none remain.
    /// Returns true if this was the last life.
    pub(crate) fn lose_life(&mut self, cause: LifeLostCause) -> bool {
        self.lives = self.lives.saturating_sub(1);
        info!(?cause, lives = self.lives, "life lost");
        self.events.push(GameEvent::LifeLost {
            cause,
            lives: self.lives,
        });

        if self.lives == 0 {
            info!(score = self.score, level = self.level, "game over");
            self.set_phase(Phase::GameOver);
            true
        } else {
            false
        }
    }

    fn reset_session(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.player = Player::spawn(self.config.canvas_width, self.config.canvas_height);
        self.clock_ms = 0;
        self.next_spawn_at_ms = spawn_delay_ms(self.level);
        info!(difficulty = self.difficulty.get_name(), "session started");
        self.set_phase(Phase::Playing);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        debug!(?from, ?to, "phase change");
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }
}
