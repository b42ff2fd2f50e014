//! Game header: round number, elapsed time and the exit action

use game_state::{Intent, SessionStore};
use std::sync::Arc;

use crate::navigation::{Navigator, Route};
use crate::typography::{FontState, TextStyle, TypographyVariant};

/// What the header shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDisplay {
    /// Round number (two engine turns per round)
    pub turn: u32,
    /// Elapsed seconds
    pub timer: u64,
    /// Style for both titles
    pub title_style: TextStyle,
}

impl HeaderDisplay {
    /// Left title
    pub fn turn_title(&self) -> String {
        format!("Turn: {}", self.turn)
    }

    /// Right title
    pub fn time_title(&self) -> String {
        format!("Time: {} Sec", self.timer)
    }
}

/// Header shown above the board during a game session
pub struct HeaderView {
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    fonts: FontState,
}

impl HeaderView {
    /// Create a header
    pub fn new(store: SessionStore, navigator: Arc<dyn Navigator>, fonts: FontState) -> Self {
        Self { store, navigator, fonts }
    }

    /// Project the session into the header
    pub fn render(&self) -> HeaderDisplay {
        let (turn, timer) = self.store.select(|s| (s.display_turn(), s.timer));
        HeaderDisplay {
            turn,
            timer,
            title_style: TextStyle::for_variant(TypographyVariant::HeaderTitle, self.fonts.is_ready()),
        }
    }

    /// Leave the game: reset the session, then go back to the main menu
    ///
    /// The reset happens first so the menu never observes the old counters.
    pub fn exit(&self) {
        self.store.dispatch(Intent::RestartSession);
        self.navigator.push(Route::MainMenu);
    }
}
