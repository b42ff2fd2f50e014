//! Main menu: high score, play button, theme selection and modals
//!
//! The menu fetches the logged-in user's high score when it mounts and
//! whenever the user changes while it is mounted. Each fetch is tagged with a
//! [`FetchTicket`]; a newer user aborts the older request, and any result that
//! still slips through is discarded by the store.

use game_state::{
    CardTheme, ErrorInfo, FetchTicket, GameMode, Intent, SessionError, SessionState,
    SessionStore,
};
use parking_lot::Mutex;
use score_client::ScoreService;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::modal::{ModalContent, ModalKind, ModalNavigator};
use crate::navigation::{Navigator, Route};
use crate::typography::{FontState, TextStyle, TypographyVariant};

/// Which high score message the menu shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighScoreDisplay {
    /// No user: scores are not tracked
    LoginPrompt,
    /// Logged in without a record (or before the fetch completes)
    NoScoreYet,
    /// Logged in with a record
    Score(u32),
}

impl HighScoreDisplay {
    /// Heading shown above the message, if any
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            HighScoreDisplay::Score(_) => Some("Highest Score:"),
            _ => None,
        }
    }

    /// Text role of the message
    pub fn variant(&self) -> TypographyVariant {
        match self {
            HighScoreDisplay::Score(_) => TypographyVariant::Score,
            _ => TypographyVariant::HighScore,
        }
    }
}

impl fmt::Display for HighScoreDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreDisplay::LoginPrompt => {
                f.write_str("Score tracking unavailable, please login to enable")
            }
            HighScoreDisplay::NoScoreYet => f.write_str("No high score, please play your first game"),
            HighScoreDisplay::Score(score) => write!(f, "{} Pts", score),
        }
    }
}

/// Resolved styles for the menu's text roles
#[derive(Debug, Clone, PartialEq)]
pub struct MenuStyles {
    /// Game title
    pub title: TextStyle,
    /// High score heading and message
    pub high_score: TextStyle,
    /// Play and theme buttons
    pub button: TextStyle,
    /// Login and leader board buttons
    pub body: TextStyle,
}

impl MenuStyles {
    fn resolve(high_score: HighScoreDisplay, fonts_ready: bool) -> Self {
        Self {
            title: TextStyle::for_variant(TypographyVariant::Title, fonts_ready),
            high_score: TextStyle::for_variant(high_score.variant(), fonts_ready),
            button: TextStyle::for_variant(TypographyVariant::Button, fonts_ready),
            body: TextStyle::for_variant(TypographyVariant::Body, fonts_ready),
        }
    }
}

/// Everything the menu renders this frame
#[derive(Debug, Clone, PartialEq)]
pub struct MainMenuDisplay {
    /// Game title
    pub title: &'static str,
    /// Username, or "Login" when logged out
    pub login_label: String,
    /// High score message
    pub high_score: HighScoreDisplay,
    /// "Theme: ..." button label
    pub theme_label: String,
    /// Active overlay
    pub modal: Option<ModalContent>,
    /// Pending error
    pub error: Option<ErrorInfo>,
    /// Text styles, decorative once the display font is ready
    pub styles: MenuStyles,
}

// =============================================================================
// High Score Sync
// =============================================================================

#[derive(Default)]
struct FetchSlot {
    mounted: bool,
    observed: Option<FetchTicket>,
    in_flight: Option<JoinHandle<()>>,
}

impl FetchSlot {
    fn abort(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Keeps the menu's high score in step with the session user
///
/// Clones share one fetch slot, so the navigator can mount and unmount the
/// menu while a background task follows store changes.
#[derive(Clone)]
pub struct HighScoreSync {
    store: SessionStore,
    scores: Arc<dyn ScoreService>,
    mode: GameMode,
    slot: Arc<Mutex<FetchSlot>>,
}

impl HighScoreSync {
    /// Create an unmounted sync for the normal game mode
    pub fn new(store: SessionStore, scores: Arc<dyn ScoreService>) -> Self {
        Self {
            store,
            scores,
            mode: GameMode::Normal,
            slot: Arc::new(Mutex::new(FetchSlot::default())),
        }
    }

    /// Use a different game mode for score lookups
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Store the sync reads from and reports to
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Whether the menu is on screen
    pub fn is_mounted(&self) -> bool {
        self.slot.lock().mounted
    }

    /// Menu came on screen: fetch the high score if a user is logged in
    ///
    /// Always starts a fresh request, even for a user seen before.
    /// Must be called from within a tokio runtime.
    pub fn mount(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.mounted = true;
        slot.observed = None;
        self.sync_locked(&mut slot)
    }

    /// React to a user change, returns whether a new fetch was started
    ///
    /// Cheap to call on every state change: nothing happens unless the menu is
    /// mounted and the user identity differs from the last one seen.
    pub fn sync_user(&self) -> bool {
        let mut slot = self.slot.lock();
        if !slot.mounted {
            return false;
        }
        self.sync_locked(&mut slot)
    }

    fn sync_locked(&self, slot: &mut FetchSlot) -> bool {
        let ticket = self.store.issue_fetch_ticket();
        if ticket == slot.observed {
            return false;
        }

        slot.abort();
        slot.observed = ticket.clone();

        match ticket {
            Some(ticket) => {
                slot.in_flight = Some(self.spawn_fetch(ticket));
                true
            }
            None => false,
        }
    }

    /// Menu left the screen; any in-flight fetch is aborted
    pub fn unmount(&self) {
        let mut slot = self.slot.lock();
        slot.mounted = false;
        slot.observed = None;
        slot.abort();
    }

    /// Catch up with the store, then wait for the in-flight fetch to finish
    pub async fn settle(&self) {
        self.sync_user();
        let handle = self.slot.lock().in_flight.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!("High score task failed: {}", e);
                }
            }
        }
    }

    /// Follow store changes in the background, syncing on each one
    pub fn follow(&self, mut changes: watch::Receiver<SessionState>) -> JoinHandle<()> {
        let sync = self.clone();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                sync.sync_user();
            }
            tracing::debug!("Session store closed, high score sync stopped");
        })
    }

    fn spawn_fetch(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let store = self.store.clone();
        let scores = Arc::clone(&self.scores);
        let mode = self.mode;

        tracing::debug!(user = %ticket.user_id, %mode, "Requesting high score");

        tokio::spawn(async move {
            let intent = match scores.fetch_high_score(&ticket.user_id, mode).await {
                Ok(record) => Intent::HighScoreFetched { ticket, record },
                Err(e) => {
                    if e.is_transient() {
                        tracing::warn!(
                            user = %ticket.user_id,
                            "High score fetch failed, retrying on next visit: {}",
                            e
                        );
                    } else {
                        tracing::error!(user = %ticket.user_id, "High score fetch failed: {}", e);
                    }
                    Intent::HighScoreFetchFailed { ticket, message: e.to_string() }
                }
            };
            store.dispatch(intent);
        })
    }
}

// =============================================================================
// Main Menu
// =============================================================================

/// Main menu view logic
pub struct MainMenuView {
    sync: HighScoreSync,
    navigator: Arc<dyn Navigator>,
    fonts: FontState,
    modal: ModalNavigator,
}

impl MainMenuView {
    /// Create a menu for the normal game mode
    pub fn new(
        store: SessionStore,
        scores: Arc<dyn ScoreService>,
        navigator: Arc<dyn Navigator>,
        fonts: FontState,
    ) -> Self {
        Self::with_sync(HighScoreSync::new(store, scores), navigator, fonts)
    }

    /// Create a menu around a sync shared with the navigator
    pub fn with_sync(sync: HighScoreSync, navigator: Arc<dyn Navigator>, fonts: FontState) -> Self {
        Self {
            modal: ModalNavigator::new(sync.store().clone()),
            sync,
            navigator,
            fonts,
        }
    }

    /// Use a different game mode for score lookups
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.sync.mode = mode;
        self
    }

    /// Handle to the menu's high score sync
    pub fn high_score_sync(&self) -> HighScoreSync {
        self.sync.clone()
    }

    /// See [`HighScoreSync::mount`]
    pub fn mount(&self) -> bool {
        self.sync.mount()
    }

    /// See [`HighScoreSync::sync_user`]
    pub fn sync_user(&self) -> bool {
        self.sync.sync_user()
    }

    /// See [`HighScoreSync::unmount`]
    pub fn unmount(&self) {
        self.sync.unmount();
    }

    /// See [`HighScoreSync::settle`]
    pub async fn settle(&self) {
        self.sync.settle().await;
    }

    fn store(&self) -> &SessionStore {
        self.sync.store()
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// High score message for the current state
    pub fn high_score_display(&self) -> HighScoreDisplay {
        self.store().select(|s| match (&s.user, s.high_score.record()) {
            (None, _) => HighScoreDisplay::LoginPrompt,
            (Some(_), Some(record)) => HighScoreDisplay::Score(record.score),
            (Some(_), None) => HighScoreDisplay::NoScoreYet,
        })
    }

    /// Label of the login button
    pub fn login_label(&self) -> String {
        self.store()
            .select(|s| s.user.as_ref().map(|u| u.username.clone()))
            .unwrap_or_else(|| "Login".to_string())
    }

    /// Label of the theme button
    pub fn theme_label(&self) -> String {
        format!("Theme: {}", self.store().select(|s| s.card_theme))
    }

    /// Active overlay
    pub fn active_modal(&self) -> Option<ModalKind> {
        self.modal.active()
    }

    /// Full projection
    pub fn render(&self) -> MainMenuDisplay {
        let high_score = self.high_score_display();
        MainMenuDisplay {
            title: Route::MainMenu.title(),
            login_label: self.login_label(),
            high_score,
            theme_label: self.theme_label(),
            modal: self.modal.content(),
            error: self.store().select(|s| s.error.clone()),
            styles: MenuStyles::resolve(high_score, self.fonts.is_ready()),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Start a new game: reset the counters, then enter the session
    pub fn play(&self) {
        self.store().dispatch(Intent::RestartSession);
        self.navigator.push(Route::GameSession);
    }

    /// Show the login form
    pub fn open_login(&mut self) {
        self.modal.open(ModalKind::Login);
    }

    /// Show the theme picker
    pub fn open_theme_picker(&mut self) {
        self.modal.open(ModalKind::ThemePicker);
    }

    /// Show the leader board
    pub fn open_leader_board(&mut self) {
        self.modal.open(ModalKind::LeaderBoard);
    }

    /// Dismiss the overlay and the pending error
    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Apply a theme picked by label and dismiss the picker
    ///
    /// Unknown labels are a caller bug: the error is returned, the picker
    /// stays open and the theme is unchanged.
    pub fn select_theme(&mut self, label: &str) -> Result<CardTheme, SessionError> {
        let theme = self.store().select_theme_label(label)?;
        self.modal.close();
        Ok(theme)
    }
}

impl Drop for MainMenuView {
    fn drop(&mut self) {
        self.sync.unmount();
    }
}
