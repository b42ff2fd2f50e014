//! Game session state for FlashBack
//!
//! This crate holds the session store observed by the game header and the main
//! menu: turn count, timer, card theme, logged-in user, high score and the
//! pending error. State only changes by dispatching an [`Intent`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod high_score;
pub mod intent;
pub mod session;
pub mod types;

pub use high_score::{FetchTicket, HighScoreStatus};
pub use intent::Intent;
pub use session::{
    display_turn, DispatchOutcome, Reduction, SessionError, SessionState, SessionStore,
};
pub use types::{
    AuthenticatedUser, CardTheme, ErrorInfo, ErrorKind, GameMode, HighScoreRecord,
};
