//! Single-slot modal overlay state
//!
//! At most one overlay (login, theme picker or leader board) is shown at a
//! time. Opening another one replaces it; closing any of them also clears the
//! pending session error.

use game_state::{CardTheme, Intent, SessionStore};
use serde::{Deserialize, Serialize};

/// Overlay kinds the main menu can present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModalKind {
    /// Login form
    Login,
    /// Card theme picker
    ThemePicker,
    /// Leader board
    LeaderBoard,
}

/// What the active overlay should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// Login form
    Login,
    /// Theme picker with its items in display order
    ThemePicker {
        /// Theme labels
        items: [&'static str; 4],
    },
    /// Leader board
    LeaderBoard,
}

/// Modal overlay state owned by the main menu
pub struct ModalNavigator {
    active: Option<ModalKind>,
    store: SessionStore,
}

impl ModalNavigator {
    /// Create a navigator with no overlay shown
    pub fn new(store: SessionStore) -> Self {
        Self { active: None, store }
    }

    /// Currently shown overlay
    pub fn active(&self) -> Option<ModalKind> {
        self.active
    }

    /// Whether any overlay is shown
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Show `kind`, replacing whatever was shown
    pub fn open(&mut self, kind: ModalKind) {
        if let Some(previous) = self.active.replace(kind) {
            tracing::debug!(?previous, ?kind, "Replacing modal");
        }
    }

    /// Hide the overlay and clear the pending error
    pub fn close(&mut self) {
        self.active = None;
        self.store.dispatch(Intent::SetError(None));
    }

    /// Content for the active overlay
    pub fn content(&self) -> Option<ModalContent> {
        self.active.map(|kind| match kind {
            ModalKind::Login => ModalContent::Login,
            ModalKind::ThemePicker => ModalContent::ThemePicker {
                items: CardTheme::labels(),
            },
            ModalKind::LeaderBoard => ModalContent::LeaderBoard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_state::{ErrorInfo, ErrorKind};

    #[test]
    fn test_starts_closed() {
        let modal = ModalNavigator::new(SessionStore::new());
        assert_eq!(modal.active(), None);
        assert!(!modal.is_open());
        assert!(modal.content().is_none());
    }

    #[test]
    fn test_open_replaces_without_stacking() {
        let mut modal = ModalNavigator::new(SessionStore::new());
        modal.open(ModalKind::Login);
        modal.open(ModalKind::LeaderBoard);
        assert_eq!(modal.active(), Some(ModalKind::LeaderBoard));

        modal.close();
        assert_eq!(modal.active(), None);
    }

    #[test]
    fn test_close_clears_error() {
        let store = SessionStore::new();
        store.dispatch(Intent::SetError(Some(ErrorInfo::new(ErrorKind::Login, "wrong password"))));

        let mut modal = ModalNavigator::new(store.clone());
        modal.open(ModalKind::Login);
        modal.close();

        assert!(store.select(|s| s.error.is_none()));
    }

    #[test]
    fn test_close_when_already_closed_still_clears_error() {
        let store = SessionStore::new();
        store.dispatch(Intent::SetError(Some(ErrorInfo::score_fetch("offline"))));

        let mut modal = ModalNavigator::new(store.clone());
        modal.close();

        assert_eq!(modal.active(), None);
        assert!(store.select(|s| s.error.is_none()));
    }

    #[test]
    fn test_theme_picker_content() {
        let mut modal = ModalNavigator::new(SessionStore::new());
        modal.open(ModalKind::ThemePicker);

        assert_eq!(
            modal.content(),
            Some(ModalContent::ThemePicker {
                items: ["Puppies", "Marvel Heroes", "DC Heroes", "Pokemon"]
            })
        );
    }
}
