//! Settings for the `play` binary.
//!
//! Read from a TOML file; every field has a default, so an empty or missing
//! file gives a human (Black) against a random mover on 8x8.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use othello_rules::Player;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Who sits in a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// A person at the terminal.
    Human,
    /// Uniformly random legal moves.
    Random,
}

/// Settings for the `play` binary, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Board edge length. Must be even and at least 2.
    pub size: usize,
    pub black: ConnectorKind,
    pub white: ConnectorKind,
    /// Seed for random players. Drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Number of games to play back to back.
    pub games: usize,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            size: othello_rules::EDGE_LENGTH,
            black: ConnectorKind::Human,
            white: ConnectorKind::Random,
            seed: None,
            games: 1,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "failed to read config file {:?}: {}", path, source)]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display(fmt = "failed to parse TOML: {}", source)]
    TomlParse { source: toml::de::Error },
    #[display(fmt = "config validation error: {}", reason)]
    Validation { reason: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        ConfigError::TomlParse { source }
    }
}

impl PlayConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PlayConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 || self.size % 2 != 0 {
            return Err(ConfigError::Validation {
                reason: format!("size must be even and at least 2, got {}", self.size),
            });
        }
        if self.games == 0 {
            return Err(ConfigError::Validation {
                reason: "games must be > 0".into(),
            });
        }
        let has_human = self.black == ConnectorKind::Human || self.white == ConnectorKind::Human;
        if has_human && self.games > 1 {
            return Err(ConfigError::Validation {
                reason: "a human can only play one game per run".into(),
            });
        }
        Ok(())
    }

    /// Seed for the random player in `seat` of game number `game`, if seeded.
    pub fn seed_for(&self, game: usize, seat: Player) -> Option<u64> {
        let offset = 2 * game as u64
            + match seat {
                Player::Black => 0,
                Player::White => 1,
            };
        self.seed.map(|seed| seed.wrapping_add(offset))
    }
}
