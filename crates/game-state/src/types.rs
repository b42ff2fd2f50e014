//! Domain types shared by the session store and its collaborators
//!
//! These are plain data types: card themes, the authenticated user, high score
//! records and the error information surfaced to the menu.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::session::SessionError;

// =============================================================================
// Card Theme
// =============================================================================

/// Artwork set used for the card faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardTheme {
    /// Puppy photos
    #[default]
    Puppies,
    /// Marvel heroes
    MarvelHeroes,
    /// DC heroes
    #[serde(rename = "DCHeroes")]
    DcHeroes,
    /// Pokemon
    Pokemon,
}

impl CardTheme {
    /// All themes in picker order
    pub const ALL: [CardTheme; 4] = [
        CardTheme::Puppies,
        CardTheme::MarvelHeroes,
        CardTheme::DcHeroes,
        CardTheme::Pokemon,
    ];

    /// Human-facing label shown in the theme picker and menu button
    pub fn label(&self) -> &'static str {
        match self {
            CardTheme::Puppies => "Puppies",
            CardTheme::MarvelHeroes => "Marvel Heroes",
            CardTheme::DcHeroes => "DC Heroes",
            CardTheme::Pokemon => "Pokemon",
        }
    }

    /// Picker labels in order
    pub fn labels() -> [&'static str; 4] {
        Self::ALL.map(|theme| theme.label())
    }
}

impl fmt::Display for CardTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CardTheme {
    type Err = SessionError;

    /// Accepts a picker label ("Marvel Heroes") or the compact variant name
    /// ("MarvelHeroes"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        CardTheme::ALL
            .into_iter()
            .find(|theme| theme.label().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| SessionError::InvalidTheme(s.to_string()))
    }
}

// =============================================================================
// User & Scores
// =============================================================================

/// A logged-in player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Account identifier assigned by the score service
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub username: String,
}

impl AuthenticatedUser {
    /// Create a new user
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Best result stored for a user and game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Points scored
    pub score: u32,
    /// Engine turns taken
    pub turn: u32,
    /// Elapsed seconds
    pub time: u64,
}

/// Game mode a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// The only mode the menu tracks
    #[default]
    Normal,
}

impl GameMode {
    /// Path segment used by the score service
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Errors surfaced to the user
// =============================================================================

/// Which flow produced a user-visible error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// High score fetch failed
    ScoreFetch,
    /// Login modal failure
    Login,
    /// Leader board modal failure
    LeaderBoard,
}

/// A pending error shown until the user dismisses a modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Origin of the error
    pub kind: ErrorKind,
    /// Message for display
    pub message: String,
}

impl ErrorInfo {
    /// Create a new error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a failed score fetch
    pub fn score_fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ScoreFetch, message)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
