use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;
use tracing::warn;

use crate::sim::GameEvent;

/// Short synthesized cues, no sound files needed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Shot,
    Explosion,
    LifeLost,
    LevelUp,
    GameOver,
}

impl Cue {
    /// Frequency in Hz, duration and volume of the tone
    fn tone(&self) -> (f32, Duration, f32) {
        match self {
            Cue::Shot => (880.0, Duration::from_millis(40), 0.05),
            Cue::Explosion => (110.0, Duration::from_millis(120), 0.15),
            Cue::LifeLost => (196.0, Duration::from_millis(250), 0.15),
            Cue::LevelUp => (660.0, Duration::from_millis(200), 0.1),
            Cue::GameOver => (98.0, Duration::from_millis(600), 0.2),
        }
    }

    /// The cue, if any, that accompanies a game event
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::ShotFired => Some(Cue::Shot),
            GameEvent::EnemyDestroyed { .. } => Some(Cue::Explosion),
            GameEvent::LifeLost { lives: 0, .. } => Some(Cue::GameOver),
            GameEvent::LifeLost { .. } => Some(Cue::LifeLost),
            GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
            GameEvent::PhaseChanged { .. } => None,
        }
    }
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output device; None if it could not be opened
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    /// Opens the default output device
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            output: Some((stream, stream_handle)),
        })
    }

    /// An audio manager that never makes a sound
    pub fn silent() -> Self {
        Self { output: None }
    }

    pub fn is_available(&self) -> bool {
        self.output.is_some()
    }

    /// Plays a cue unless muted
    pub fn play(&self, cue: Cue, muted: bool) {
        if muted {
            return;
        }
        let Some((_, stream_handle)) = &self.output else {
            return;
        };

        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(stream_handle) {
            let (frequency, duration, volume) = cue.tone();
            sink.set_volume(volume);
            sink.append(SineWave::new(frequency).take_duration(duration));
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| {
            warn!(%err, "failed to initialize audio, continuing without sound");
            Self::silent()
        })
    }
}
