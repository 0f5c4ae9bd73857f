use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::sim::{Difficulty, Phase, TickInput};

/// How long a movement key counts as held on terminals that never report
/// key releases. Must outlast the usual auto-repeat start delay; repeats
/// keep refreshing it after that.
const HOLD_WINDOW: Duration = Duration::from_millis(600);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Fire,
    TogglePause,
    ToggleMute,
    SelectDifficulty(Difficulty),
    Start,
    Restart,
    Quit,
}

/// Pressed state of one level-sampled key
#[derive(Debug, Default, Clone, Copy)]
struct KeyHold {
    pressed: bool,
    last_press: Option<Instant>,
}

impl KeyHold {
    fn press(&mut self, now: Instant) {
        self.pressed = true;
        self.last_press = Some(now);
    }

    fn release(&mut self) {
        self.pressed = false;
        self.last_press = None;
    }

    fn is_held(&self, now: Instant, release_events: bool) -> bool {
        if release_events {
            return self.pressed;
        }
        self.pressed
            && self
                .last_press
                .is_some_and(|at| now.saturating_duration_since(at) <= HOLD_WINDOW)
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: KeyHold,
    right: KeyHold,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal reports key releases
    release_events: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Waits up to `timeout` for the first event, then drains whatever else
    /// is already queued.
    pub fn poll_events(&mut self, phase: Phase, timeout: Duration) -> color_eyre::Result<()> {
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, phase, Instant::now());
            }
            wait = Duration::ZERO;
        }
        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, phase: Phase, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, phase, now, false),
            KeyEventKind::Repeat => self.handle_key_press(key_event, phase, now, true),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: Phase, now: Instant, repeat: bool) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let action = match key_event.code {
            // Movement is level-sampled
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.key_state.left.press(now);
                if !self.release_events {
                    // No release will ever arrive for the other key
                    self.key_state.right.release();
                }
                None
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.key_state.right.press(now);
                if !self.release_events {
                    self.key_state.left.release();
                }
                None
            }
            // Auto-repeat keeps firing, the cooldown does the limiting
            KeyCode::Char(' ') => Some(InputAction::Fire),
            // Toggles only react to the physical press
            _ if repeat => None,
            KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::TogglePause),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMute),
            KeyCode::Char('1') => Some(InputAction::SelectDifficulty(Difficulty::Easy)),
            KeyCode::Char('2') => Some(InputAction::SelectDifficulty(Difficulty::Normal)),
            KeyCode::Char('3') => Some(InputAction::SelectDifficulty(Difficulty::Hard)),
            KeyCode::Enter => match phase {
                Phase::Start => Some(InputAction::Start),
                Phase::GameOver => Some(InputAction::Restart),
                Phase::Playing | Phase::Paused => None,
            },
            KeyCode::Char('r') | KeyCode::Char('R') if phase == Phase::GameOver => {
                Some(InputAction::Restart)
            }
            _ => None,
        };

        if let Some(action) = action {
            self.oneshot_actions.push(action);
        }
    }

    /// Handles key release events
    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.key_state.left.release();
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.key_state.right.release();
            }
            _ => {}
        }
    }

    /// Returns the one-shot actions gathered since the last call
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.oneshot_actions)
    }

    /// Samples the held movement keys for the next tick
    pub fn tick_input(&self, now: Instant) -> TickInput {
        TickInput {
            left: self.key_state.left.is_held(now, self.release_events),
            right: self.key_state.right.is_held(now, self.release_events),
        }
    }
}
