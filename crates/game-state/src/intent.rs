//! Intents: the only way session state changes

use crate::high_score::FetchTicket;
use crate::types::{AuthenticatedUser, CardTheme, ErrorInfo, HighScoreRecord};

/// A named request to mutate [`SessionState`](crate::session::SessionState)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Zero the turn counter and timer and forget the high score
    RestartSession,
    /// One engine turn was played
    AdvanceTurn,
    /// One second elapsed
    TickTimer,
    /// Pick the card artwork
    SetCardTheme(CardTheme),
    /// Log in (`Some`) or out (`None`)
    SetUser(Option<AuthenticatedUser>),
    /// Set or clear the pending error
    SetError(Option<ErrorInfo>),
    /// A high score request completed
    HighScoreFetched {
        /// Request identity
        ticket: FetchTicket,
        /// `None` when the user has no record
        record: Option<HighScoreRecord>,
    },
    /// A high score request failed
    HighScoreFetchFailed {
        /// Request identity
        ticket: FetchTicket,
        /// Failure description
        message: String,
    },
}

impl Intent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Intent::RestartSession => "restart_session",
            Intent::AdvanceTurn => "advance_turn",
            Intent::TickTimer => "tick_timer",
            Intent::SetCardTheme(_) => "set_card_theme",
            Intent::SetUser(_) => "set_user",
            Intent::SetError(_) => "set_error",
            Intent::HighScoreFetched { .. } => "high_score_fetched",
            Intent::HighScoreFetchFailed { .. } => "high_score_fetch_failed",
        }
    }
}
