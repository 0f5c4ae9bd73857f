// Library exports for the binary and for testing
pub use app::App;
pub use config::Config;
pub use entities::{Bullet, Enemy, Particle, Player, PowerUp, is_colliding};
pub use sim::{Difficulty, GameConfig, GameEvent, GameState, Phase, TickInput, tick};

pub mod app;
pub mod audio;
pub mod color;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;
