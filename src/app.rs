//! Application shell wiring the store, collaborators and views together

use anyhow::Context;
use game_state::{AuthenticatedUser, Intent, SessionStore};
use game_ui::{
    AssetFontLoader, FontLoader, FontSet, FontState, HeaderView, HighScoreSync, MainMenuView,
    NavigationHistory, Navigator, Route,
};
use score_client::{HttpScoreClient, ScoreService};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::FlashbackConfig;

/// Navigator that mounts the main menu whenever it comes on screen
struct ScreenRouter {
    history: Arc<NavigationHistory>,
    menu: HighScoreSync,
}

impl Navigator for ScreenRouter {
    fn push(&self, route: Route) {
        self.history.push(route);
        match route {
            Route::MainMenu => {
                self.menu.mount();
            }
            Route::GameSession => self.menu.unmount(),
        }
    }
}

/// Running FlashBack session with its two screens
pub struct App {
    store: SessionStore,
    navigator: Arc<NavigationHistory>,
    fonts: FontState,
    font_loader: Arc<dyn FontLoader>,
    menu: MainMenuView,
    header: HeaderView,
    follower: Option<JoinHandle<()>>,
}

impl App {
    /// Wire the app with explicit collaborators
    pub fn new(
        config: &FlashbackConfig,
        scores: Arc<dyn ScoreService>,
        font_loader: Arc<dyn FontLoader>,
    ) -> Self {
        let store = SessionStore::with_theme(config.default_theme);
        let navigator = Arc::new(NavigationHistory::new(Route::MainMenu));
        let fonts = FontState::new();

        let sync = HighScoreSync::new(store.clone(), scores).with_mode(config.game_mode);
        let router: Arc<dyn Navigator> = Arc::new(ScreenRouter {
            history: Arc::clone(&navigator),
            menu: sync.clone(),
        });

        let menu = MainMenuView::with_sync(sync, Arc::clone(&router), fonts.clone());
        let header = HeaderView::new(store.clone(), router, fonts.clone());

        Self { store, navigator, fonts, font_loader, menu, header, follower: None }
    }

    /// Wire the app against the HTTP score service and on-disk font assets
    pub fn bootstrap(config: &FlashbackConfig) -> anyhow::Result<Self> {
        let scores = HttpScoreClient::new(config.score_service.clone())
            .context("Failed to create score client")?;
        let font_loader = AssetFontLoader::new(config.asset_root.clone());

        tracing::info!(
            score_service = %config.score_service.base_url,
            theme = %config.default_theme,
            "FlashBack starting"
        );

        Ok(Self::new(config, Arc::new(scores), Arc::new(font_loader)))
    }

    /// Start font loading, mount the main menu and follow user changes
    ///
    /// Returns the font loading task. Must be called from within a tokio
    /// runtime.
    pub fn start(&mut self) -> JoinHandle<()> {
        let fonts = self.fonts.load_in_background(Arc::clone(&self.font_loader), FontSet::game_fonts());

        if let Some(previous) = self.follower.take() {
            previous.abort();
        }
        self.menu.mount();
        self.follower = Some(self.menu.high_score_sync().follow(self.store.subscribe()));

        fonts
    }

    /// Log a user in (normally done by the login modal)
    pub fn login(&self, user: AuthenticatedUser) {
        self.store.dispatch(Intent::SetUser(Some(user)));
    }

    /// Log the current user out
    pub fn logout(&self) {
        self.store.dispatch(Intent::SetUser(None));
    }

    /// Shared session store
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Navigation history
    pub fn navigator(&self) -> &NavigationHistory {
        &self.navigator
    }

    /// Display font readiness
    pub fn fonts(&self) -> &FontState {
        &self.fonts
    }

    /// Main menu view
    pub fn menu(&self) -> &MainMenuView {
        &self.menu
    }

    /// Main menu view, mutable for modal actions
    pub fn menu_mut(&mut self) -> &mut MainMenuView {
        &mut self.menu
    }

    /// Game header view
    pub fn header(&self) -> &HeaderView {
        &self.header
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.abort();
        }
    }
}
