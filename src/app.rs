use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};
use tracing::info;

use crate::audio::{AudioManager, Cue};
use crate::config::Config;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::sim::{FRAME_MS, GameState, tick};

/// Upper bound on catch-up ticks per loop iteration
const MAX_SUBSTEPS: u32 = 8;
/// How long one loop iteration waits for input
const POLL_TIMEOUT: Duration = Duration::from_millis(8);

/// The main application: owns the session and drives it frame by frame.
pub struct App {
    running: bool,
    state: GameState,
    /// Real time not yet consumed by ticks
    accumulator: Duration,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// `release_events` tells the input layer whether key releases are reported.
    pub fn new(config: &Config, release_events: bool) -> Self {
        let mut state = GameState::new(config.game_config(), config.seed);
        state.set_difficulty(config.difficulty);
        if config.muted {
            state.toggle_mute();
        }

        Self::with_parts(state, InputManager::new(release_events), AudioManager::default())
    }

    fn with_parts(state: GameState, input_manager: InputManager, audio_manager: AudioManager) -> Self {
        Self {
            running: true,
            state,
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!(audio = self.audio_manager.is_available(), "game loop started");

        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    state: &self.state,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.state.phase, POLL_TIMEOUT)?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);

            self.advance(frame_time, Instant::now());
            self.play_cues();
        }

        info!(score = self.state.score, level = self.state.level, "game loop finished");
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match *action {
                InputAction::Quit => self.running = false,
                InputAction::Start => self.state.start(),
                InputAction::Restart => self.state.restart(),
                InputAction::TogglePause => self.state.toggle_pause(),
                InputAction::ToggleMute => self.state.toggle_mute(),
                InputAction::SelectDifficulty(difficulty) => self.state.set_difficulty(difficulty),
                InputAction::Fire => self.state.fire(),
            }
        }
    }

    /// Runs as many fixed ticks as the elapsed real time allows. Time spent
    /// outside of play is discarded so resuming never fast-forwards.
    fn advance(&mut self, frame_time: Duration, now: Instant) -> u32 {
        if !self.state.is_playing() {
            self.accumulator = Duration::ZERO;
            return 0;
        }

        let frame = Duration::from_millis(FRAME_MS);
        self.accumulator += frame_time;
        let input = self.input_manager.tick_input(now);

        let mut steps = 0;
        while self.accumulator >= frame && steps < MAX_SUBSTEPS && self.state.is_playing() {
            tick(&mut self.state, &input);
            self.accumulator -= frame;
            steps += 1;
        }

        // Too far behind; drop the backlog rather than spiral
        if steps == MAX_SUBSTEPS {
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    fn play_cues(&mut self) {
        for event in self.state.drain_events() {
            if let Some(cue) = Cue::for_event(&event) {
                self.audio_manager.play(cue, self.state.muted);
            }
        }
    }
}
