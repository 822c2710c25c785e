/// Error type shared by the library and the terminal front-end.

use std::fmt;

use crate::assets::SpriteId;

#[derive(Debug)]
pub enum GameError {
    /// A sprite could not be resolved.  Always fatal.
    AssetLoad { id: SpriteId, reason: String },
    /// Configuration parsed but holds unusable values.
    InvalidConfig(String),
    /// Configuration file is not valid JSON for `GameConfig`.
    Config(serde_json::Error),
    Io(std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn asset(id: SpriteId, reason: impl Into<String>) -> Self {
        GameError::AssetLoad {
            id,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetLoad { id, reason } => {
                write!(f, "failed to load sprite {:?}: {}", id, reason)
            }
            GameError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            GameError::Config(err) => write!(f, "could not parse config: {}", err),
            GameError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(err) => Some(err),
            GameError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err)
    }
}
