//! Command line configuration

use clap::Parser;
use std::path::PathBuf;

use crate::sim::{Difficulty, GameConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "space-defender")]
#[command(about = "Dodge and destroy descending enemies in your terminal")]
pub struct Config {
    /// Starting difficulty: easy, normal or hard (can be changed in game with 1/2/3)
    #[arg(short, long, default_value = "normal", value_parser = parse_difficulty)]
    pub difficulty: Difficulty,

    /// Width of the play field in canvas units
    #[arg(long, default_value_t = 800.0, value_parser = parse_dimension)]
    pub width: f32,

    /// Height of the play field in canvas units
    #[arg(long, default_value_t = 600.0, value_parser = parse_dimension)]
    pub height: f32,

    /// Seed for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with sound muted
    #[arg(long)]
    pub muted: bool,

    /// Where log output goes (stdout belongs to the game)
    #[arg(long, default_value = "space-defender.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            canvas_width: self.width,
            canvas_height: self.height,
        }
    }
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::from_name(value).ok_or_else(|| {
        let names: Vec<_> = Difficulty::ALL
            .iter()
            .map(|d| d.get_name().to_lowercase())
            .collect();
        format!("`{value}` is not one of {}", names.join(", "))
    })
}

fn parse_dimension(value: &str) -> Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    // Must fit at least one enemy and the player
    if !parsed.is_finite() || parsed < 100.0 {
        return Err(format!("`{value}` must be at least 100"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["space-defender"]).expect("defaults parse");
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.game_config(), GameConfig::default());
        assert_eq!(config.seed, None);
        assert!(!config.muted);
        assert_eq!(config.log_file, PathBuf::from("space-defender.log"));
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::try_parse_from([
            "space-defender",
            "--difficulty",
            "HARD",
            "--width",
            "1024",
            "--height",
            "768",
            "--seed",
            "42",
            "--muted",
        ])
        .expect("args parse");
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 768.0);
        assert_eq!(config.seed, Some(42));
        assert!(config.muted);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Config::try_parse_from(["space-defender", "--width", "abc"]).is_err());
        assert!(Config::try_parse_from(["space-defender", "--height", "10"]).is_err());
        assert!(Config::try_parse_from(["space-defender", "-d", "insane"]).is_err());
    }
}
