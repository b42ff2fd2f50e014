//! High score fetch status
//!
//! The menu needs to tell "not fetched yet" apart from "fetched, no record".
//! Fetch results are tagged with a [`FetchTicket`] so a completion that arrives
//! after the user changed can be recognised and dropped.

use serde::{Deserialize, Serialize};

use crate::types::HighScoreRecord;

/// Where the high score for the current user stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "record", rename_all = "camelCase")]
pub enum HighScoreStatus {
    /// No fetch has completed for the current user
    #[default]
    NotFetched,
    /// The service answered; `None` means the user has no record yet
    Fetched(Option<HighScoreRecord>),
}

impl HighScoreStatus {
    /// The record, if one was fetched
    pub fn record(&self) -> Option<&HighScoreRecord> {
        match self {
            HighScoreStatus::Fetched(Some(record)) => Some(record),
            _ => None,
        }
    }
}

/// Identity of a high score request at the time it was issued
///
/// `generation` is the store's user generation, bumped on every user change,
/// so a ticket for a user who logged out and back in is still stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket {
    /// User the request was made for
    pub user_id: String,
    /// User generation when the request was made
    pub generation: u64,
}

impl FetchTicket {
    /// Create a new ticket
    pub fn new(user_id: impl Into<String>, generation: u64) -> Self {
        Self {
            user_id: user_id.into(),
            generation,
        }
    }
}
