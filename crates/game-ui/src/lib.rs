//! View logic for FlashBack
//!
//! This crate holds the non-markup half of the game's screens: what the header
//! and main menu show for a given session state, and what their buttons do.
//!
//! # Modules
//!
//! - [`navigation`] - Routes and the navigator views push to
//! - [`modal`] - Single-slot overlay state (login, theme picker, leader board)
//! - [`typography`] - Display font loading and text styles
//! - [`header`] - Turn/time header and the exit action
//! - [`main_menu`] - High score, play, theme and modal actions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod header;
pub mod main_menu;
pub mod modal;
pub mod navigation;
pub mod typography;

pub use header::{HeaderDisplay, HeaderView};
pub use main_menu::{HighScoreDisplay, HighScoreSync, MainMenuDisplay, MainMenuView, MenuStyles};
pub use modal::{ModalContent, ModalKind, ModalNavigator};
pub use navigation::{NavigationHistory, Navigator, Route};
pub use typography::{
    AssetFontLoader, FontLoadError, FontLoader, FontSet, FontState, TextStyle, TypographyVariant,
};
