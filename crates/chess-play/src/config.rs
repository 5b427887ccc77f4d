//! Configuration file loading.
//!
//! Settings come from an optional `chess.toml`. Every field has a default,
//! so a missing file or an empty one both yield a standard game.

use std::path::{Path, PathBuf};

use chess_core::{Color, Layout, LayoutError};
use chess_rules::Position;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// File name looked up when no path is given.
pub const CONFIG_FILE: &str = "chess.toml";

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Placement descriptor the game starts from.
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Side to move in the starting layout, `"w"` or `"b"`.
    #[serde(default = "default_side")]
    pub side_to_move: String,
    /// Print legal destinations after a piece is selected.
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
}

fn default_layout() -> String {
    Layout::STARTPOS.to_string()
}

fn default_side() -> String {
    "w".to_string()
}

fn default_show_hints() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout: default_layout(),
            side_to_move: default_side(),
            show_hints: default_show_hints(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `chess.toml` is looked up
    /// in the current directory and its parent; if neither has it the
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::search() {
                Some(found) => Self::from_file(&found),
                None => {
                    debug!("no {CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn search() -> Option<PathBuf> {
        [Path::new("."), Path::new("..")]
            .iter()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(toml::from_str(&content)?)
    }

    /// Builds the starting position, with command-line overrides taking
    /// precedence over the file.
    pub fn position(
        &self,
        layout: Option<&str>,
        side: Option<&str>,
    ) -> Result<Position, LayoutError> {
        let layout = layout.unwrap_or(&self.layout);
        let side = parse_side(side.unwrap_or(&self.side_to_move))?;
        Position::new(layout, side)
    }
}

/// Parses a side-to-move letter.
pub fn parse_side(text: &str) -> Result<Color, LayoutError> {
    let mut chars = text.trim().chars();
    match (chars.next().and_then(Color::from_char), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(LayoutError::InvalidSideToMove(text.to_string())),
    }
}
