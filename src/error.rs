//! Errors at the fallible edges of the game
//!
//! The simulation itself never fails; these cover starting a session,
//! tuning overrides and JSON output and the native runner's file access.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// `start()` was called before the asset gate opened
    AssetsLoading { loaded: usize, total: usize },
    /// Tuning or summary JSON could not be (de)serialized
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetsLoading { loaded, total } => {
                write!(f, "assets still loading ({loaded}/{total})")
            }
            GameError::Json(e) => write!(f, "json error: {e}"),
            GameError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::AssetsLoading { .. } => None,
            GameError::Json(e) => Some(e),
            GameError::Io(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}
