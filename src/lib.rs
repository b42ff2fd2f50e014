//! FlashBack memory-matching game core
//!
//! Facade over the workspace crates: configuration, logging bootstrap and the
//! [`App`] shell that wires the session store, score service and views.
//!
//! ```rust,no_run
//! use flashback::{logging, App, FlashbackConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! logging::init();
//! let config = FlashbackConfig::load_or_default("flashback.json")?;
//! let mut app = App::bootstrap(&config)?;
//! app.start();
//! println!("{}", app.menu().high_score_display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::App;
pub use config::FlashbackConfig;

pub use game_state::{
    AuthenticatedUser, CardTheme, GameMode, HighScoreRecord, HighScoreStatus, Intent,
    SessionState, SessionStore,
};
pub use game_ui::{HeaderView, HighScoreDisplay, MainMenuView, ModalKind, Route};
pub use score_client::{HttpScoreClient, ScoreClientConfig, ScoreService};
