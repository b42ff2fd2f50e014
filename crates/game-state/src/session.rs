//! Session state store
//!
//! [`SessionState`] is the single source of truth observed by the header and
//! the main menu. Every change goes through [`SessionState::reduce`], a pure
//! `(state, intent) -> state` function, and [`SessionStore`] is the shared
//! handle views use to dispatch intents, read selectors and subscribe to
//! changes.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use crate::high_score::{FetchTicket, HighScoreStatus};
use crate::intent::Intent;
use crate::types::{AuthenticatedUser, CardTheme, ErrorInfo};

/// Session store errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// A theme label outside the four known themes
    #[error("Invalid card theme: {0:?}")]
    InvalidTheme(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Human-facing round number: two engine turns (one per player) make a round
pub fn display_turn(turn_count: u32) -> u32 {
    turn_count / 2
}

// =============================================================================
// State
// =============================================================================

/// Canonical session fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Engine turns played this session
    pub turn_count: u32,
    /// Elapsed seconds this session
    pub timer: u64,
    /// Selected card artwork
    pub card_theme: CardTheme,
    /// Logged-in user, if any
    pub user: Option<AuthenticatedUser>,
    /// High score of the current user
    pub high_score: HighScoreStatus,
    /// Pending user-visible error
    pub error: Option<ErrorInfo>,
    /// Bumped on every user identity change
    pub user_generation: u64,
}

/// Result of applying an intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// The intent produced a new state
    Changed(SessionState),
    /// The intent was valid but changed nothing
    Unchanged,
    /// A fetch result whose ticket no longer matches the current user
    DiscardedStale,
}

/// What [`SessionStore::dispatch`] did with an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// State changed and subscribers were notified
    Applied,
    /// State already matched the intent
    Unchanged,
    /// Stale fetch result dropped
    DiscardedStale,
}

impl SessionState {
    /// Fresh state with the given default theme
    pub fn with_theme(card_theme: CardTheme) -> Self {
        Self {
            card_theme,
            ..Default::default()
        }
    }

    /// Id of the logged-in user
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Round number shown in the header
    pub fn display_turn(&self) -> u32 {
        display_turn(self.turn_count)
    }

    /// Whether a fetch result tagged with `ticket` still belongs to this state
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.user_generation == ticket.generation && self.user_id() == Some(ticket.user_id.as_str())
    }

    /// Ticket for a high score request on behalf of the current user
    pub fn fetch_ticket(&self) -> Option<FetchTicket> {
        self.user
            .as_ref()
            .map(|user| FetchTicket::new(user.id.clone(), self.user_generation))
    }

    /// Apply an intent
    pub fn reduce(&self, intent: &Intent) -> Reduction {
        let mut next = self.clone();

        match intent {
            Intent::RestartSession => {
                next.turn_count = 0;
                next.timer = 0;
                next.high_score = HighScoreStatus::NotFetched;
            }
            Intent::AdvanceTurn => {
                next.turn_count = next.turn_count.saturating_add(1);
            }
            Intent::TickTimer => {
                next.timer = next.timer.saturating_add(1);
            }
            Intent::SetCardTheme(theme) => {
                next.card_theme = *theme;
            }
            Intent::SetUser(user) => {
                let new_id = user.as_ref().map(|u| u.id.as_str());
                if new_id != self.user_id() {
                    next.user_generation += 1;
                    next.high_score = HighScoreStatus::NotFetched;
                }
                next.user = user.clone();
            }
            Intent::SetError(error) => {
                next.error = merge_error(&self.error, error.clone());
            }
            Intent::HighScoreFetched { ticket, record } => {
                if !self.is_current(ticket) {
                    return Reduction::DiscardedStale;
                }
                next.high_score = HighScoreStatus::Fetched(*record);
            }
            Intent::HighScoreFetchFailed { ticket, message } => {
                if !self.is_current(ticket) {
                    return Reduction::DiscardedStale;
                }
                next.error = merge_error(&self.error, Some(ErrorInfo::score_fetch(message.clone())));
            }
        }

        if next == *self {
            Reduction::Unchanged
        } else {
            Reduction::Changed(next)
        }
    }
}

/// A pending error is only replaced by clearing it or by an error of the same kind
fn merge_error(current: &Option<ErrorInfo>, incoming: Option<ErrorInfo>) -> Option<ErrorInfo> {
    match (current, incoming) {
        (_, None) => None,
        (Some(existing), Some(new)) if existing.kind != new.kind => Some(existing.clone()),
        (_, Some(new)) => Some(new),
    }
}

// =============================================================================
// Store
// =============================================================================

struct StoreInner {
    state: RwLock<SessionState>,
    changes: watch::Sender<SessionState>,
}

/// Shared handle to the session state
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Create a store with default state
    pub fn new() -> Self {
        Self::from_state(SessionState::default())
    }

    /// Create a store whose card theme starts at `theme`
    pub fn with_theme(theme: CardTheme) -> Self {
        Self::from_state(SessionState::with_theme(theme))
    }

    /// Create a store from an existing state
    pub fn from_state(state: SessionState) -> Self {
        let (changes, _) = watch::channel(state.clone());
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                changes,
            }),
        }
    }

    /// Apply an intent and notify subscribers if the state changed
    pub fn dispatch(&self, intent: Intent) -> DispatchOutcome {
        let mut state = self.inner.state.write();

        match state.reduce(&intent) {
            Reduction::Changed(next) => {
                if next.user_generation != state.user_generation {
                    tracing::info!(
                        user = next.user_id().unwrap_or("<none>"),
                        generation = next.user_generation,
                        "Session user changed"
                    );
                }
                tracing::debug!(intent = intent.name(), "Session intent applied");

                *state = next.clone();
                self.inner.changes.send_replace(next);
                DispatchOutcome::Applied
            }
            Reduction::Unchanged => {
                tracing::trace!(intent = intent.name(), "Session intent changed nothing");
                DispatchOutcome::Unchanged
            }
            Reduction::DiscardedStale => {
                tracing::warn!(
                    intent = intent.name(),
                    current_user = state.user_id().unwrap_or("<none>"),
                    "Discarding high score result for a previous user"
                );
                DispatchOutcome::DiscardedStale
            }
        }
    }

    /// Parse a theme picker label and select it
    ///
    /// Unknown labels fail with [`SessionError::InvalidTheme`] and leave the
    /// state untouched.
    pub fn select_theme_label(&self, label: &str) -> Result<CardTheme> {
        let theme: CardTheme = label.parse()?;
        self.dispatch(Intent::SetCardTheme(theme));
        Ok(theme)
    }

    /// Read a value out of the current state
    pub fn select<T>(&self, selector: impl FnOnce(&SessionState) -> T) -> T {
        let state = self.inner.state.read();
        selector(&state)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    /// Ticket for a high score request on behalf of the current user
    pub fn issue_fetch_ticket(&self) -> Option<FetchTicket> {
        self.select(SessionState::fetch_ticket)
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.changes.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
