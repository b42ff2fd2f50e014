//! Session Flow Integration Tests
//!
//! End-to-end scenarios across the store, the score service and both views:
//! menu high score states, the exit/play cycle, and user switches racing
//! high score fetches.

use async_trait::async_trait;
use flashback::{
    App, AuthenticatedUser, CardTheme, FlashbackConfig, GameMode, HighScoreDisplay,
    HighScoreRecord, HighScoreStatus, Intent, ModalKind, Route, ScoreService,
};
use game_ui::{FontLoadError, FontLoader, FontSet};
use score_client::ScoreClientError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

type Reply = score_client::Result<Option<HighScoreRecord>>;

/// Score service answering from a fixed table, or from a gate the test opens
#[derive(Default)]
struct FakeScores {
    table: Mutex<HashMap<String, Option<HighScoreRecord>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
}

impl FakeScores {
    fn with_record(self, user_id: &str, record: Option<HighScoreRecord>) -> Self {
        self.table.lock().unwrap().insert(user_id.to_string(), record);
        self
    }

    fn gate(&self, user_id: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(user_id.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ScoreService for FakeScores {
    async fn fetch_high_score(&self, user_id: &str, _mode: GameMode) -> Reply {
        let gate = self.gates.lock().unwrap().remove(user_id);
        if let Some(rx) = gate {
            return rx.await.unwrap_or(Ok(None));
        }
        let record = self.table.lock().unwrap().get(user_id).copied().flatten();
        Ok(record)
    }
}

struct NoFonts;

#[async_trait]
impl FontLoader for NoFonts {
    async fn load(&self, _fonts: &FontSet) -> Result<(), FontLoadError> {
        Err(FontLoadError::InvalidFont("Bangers".to_string()))
    }
}

struct ReadyFonts;

#[async_trait]
impl FontLoader for ReadyFonts {
    async fn load(&self, _fonts: &FontSet) -> Result<(), FontLoadError> {
        Ok(())
    }
}

fn app_with(scores: FakeScores) -> App {
    flashback::logging::init_for_tests();
    App::new(&FlashbackConfig::default(), Arc::new(scores), Arc::new(NoFonts))
}

fn ada() -> AuthenticatedUser {
    AuthenticatedUser::new("id-ada", "ada")
}

fn grace() -> AuthenticatedUser {
    AuthenticatedUser::new("id-grace", "grace")
}

fn record(score: u32) -> HighScoreRecord {
    HighScoreRecord { score, turn: 12, time: 48 }
}

/// Fresh session without a user: login prompt, nothing fetched
#[tokio::test]
async fn test_fresh_session_prompts_login() {
    let mut app = app_with(FakeScores::default());
    app.start().await.unwrap();
    app.menu().settle().await;

    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::LoginPrompt);
    assert_eq!(
        app.menu().high_score_display().to_string(),
        "Score tracking unavailable, please login to enable"
    );
    assert_eq!(app.store().select(|s| s.high_score), HighScoreStatus::NotFetched);
    assert!(!app.fonts().is_ready());
}

/// Logged in, service has no record: distinct "no score yet" prompt
#[tokio::test]
async fn test_user_without_record_sees_first_game_prompt() {
    let mut app = app_with(FakeScores::default().with_record("id-ada", None));
    app.start();
    app.login(ada());
    app.menu().settle().await;

    assert_eq!(app.store().select(|s| s.high_score), HighScoreStatus::Fetched(None));
    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::NoScoreYet);
    assert_eq!(
        app.menu().high_score_display().to_string(),
        "No high score, please play your first game"
    );
    assert_eq!(app.menu().login_label(), "ada");
}

/// Logged in with a record: score shown, and fetched again on return from a game
#[tokio::test]
async fn test_menu_reloads_high_score_after_play_and_exit() {
    let mut app = app_with(FakeScores::default().with_record("id-ada", Some(record(120))));
    app.start();
    app.login(ada());
    app.menu().settle().await;

    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::Score(120));
    let display = app.menu().render();
    assert_eq!(display.high_score.heading(), Some("Highest Score:"));
    assert_eq!(display.high_score.to_string(), "120 Pts");

    app.menu().play();
    assert!(!app.menu().high_score_sync().is_mounted());
    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::NoScoreYet);

    for _ in 0..4 {
        app.store().dispatch(Intent::AdvanceTurn);
    }
    app.header().exit();
    assert_eq!(app.navigator().current(), Route::MainMenu);
    assert!(app.menu().high_score_sync().is_mounted());

    app.menu().settle().await;
    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::Score(120));
}

/// A login dispatched straight to the store still triggers the fetch
#[tokio::test]
async fn test_store_level_login_fetches_high_score() {
    let mut app = app_with(FakeScores::default().with_record("id-ada", Some(record(64))));
    app.start();

    let store = app.store().clone();
    let mut changes = store.subscribe();
    store.dispatch(Intent::SetUser(Some(ada())));

    tokio::time::timeout(Duration::from_secs(1), async {
        while store.select(|s| s.high_score) == HighScoreStatus::NotFetched {
            changes.changed().await.unwrap();
        }
    })
    .await
    .expect("high score was never fetched");

    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::Score(64));
}

/// Exit mid-session resets counters and navigates to the menu exactly once
#[tokio::test]
async fn test_exit_mid_session() {
    let mut app = app_with(FakeScores::default());
    app.start();

    app.menu().play();
    assert_eq!(app.navigator().current(), Route::GameSession);

    for _ in 0..7 {
        app.store().dispatch(Intent::AdvanceTurn);
    }
    for _ in 0..42 {
        app.store().dispatch(Intent::TickTimer);
    }
    let header = app.header().render();
    assert_eq!(header.turn_title(), "Turn: 3");
    assert_eq!(header.time_title(), "Time: 42 Sec");

    app.header().exit();

    assert_eq!(app.store().select(|s| (s.turn_count, s.timer)), (0, 0));
    assert_eq!(app.navigator().current(), Route::MainMenu);
    assert_eq!(app.navigator().pushes_of(Route::MainMenu), 1);
}

/// Play always starts from zero, even without an exit in between
#[tokio::test]
async fn test_play_starts_fresh_session() {
    let mut app = app_with(FakeScores::default());
    app.start();

    app.menu().play();
    app.store().dispatch(Intent::AdvanceTurn);
    app.store().dispatch(Intent::TickTimer);

    app.menu().play();
    assert_eq!(app.store().select(|s| (s.turn_count, s.timer)), (0, 0));
    assert_eq!(app.navigator().pushes_of(Route::GameSession), 2);
}

/// U1's fetch resolving after U2's must never win
#[tokio::test]
async fn test_user_switch_race_keeps_latest_user_score() {
    let scores = FakeScores::default();
    let release_ada = scores.gate("id-ada");
    let release_grace = scores.gate("id-grace");

    let mut app = app_with(scores);
    app.start();
    app.login(ada());
    tokio::task::yield_now().await;

    app.login(grace());
    release_grace.send(Ok(Some(record(40)))).unwrap();
    app.menu().settle().await;

    let _ = release_ada.send(Ok(Some(record(999))));
    tokio::task::yield_now().await;

    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::Score(40));
}

/// A stale completion reaching the store directly is discarded
#[tokio::test]
async fn test_stale_result_discarded_by_store() {
    let mut app = app_with(FakeScores::default());
    app.start();
    app.login(ada());
    let stale = app.store().issue_fetch_ticket().unwrap();

    app.login(grace());
    app.menu().settle().await;
    app.store().dispatch(Intent::HighScoreFetched { ticket: stale, record: Some(record(999)) });

    assert_eq!(app.store().select(|s| s.high_score), HighScoreStatus::Fetched(None));
}

/// Logging out clears the previous user's score
#[tokio::test]
async fn test_logout_clears_score() {
    let mut app = app_with(FakeScores::default().with_record("id-ada", Some(record(75))));
    app.start();
    app.login(ada());
    app.menu().settle().await;
    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::Score(75));

    app.logout();
    assert_eq!(app.menu().high_score_display(), HighScoreDisplay::LoginPrompt);
    assert_eq!(app.store().select(|s| s.high_score), HighScoreStatus::NotFetched);
    assert_eq!(app.menu().login_label(), "Login");
}

/// Failed fetch surfaces an error that closing a modal dismisses
#[tokio::test]
async fn test_fetch_error_cleared_by_modal_close() {
    let scores = FakeScores::default();
    let release = scores.gate("id-ada");
    let mut app = app_with(scores);
    app.start();
    app.login(ada());

    release
        .send(Err(ScoreClientError::Status { status: 500, message: "down".to_string() }))
        .unwrap();
    app.menu().settle().await;
    assert!(app.menu().render().error.is_some());

    app.menu_mut().open_login();
    app.menu_mut().open_leader_board();
    assert_eq!(app.menu().active_modal(), Some(ModalKind::LeaderBoard));

    app.menu_mut().close_modal();
    assert_eq!(app.menu().active_modal(), None);
    assert!(app.menu().render().error.is_none());
}

/// Theme survives restarts; default comes from config
#[tokio::test]
async fn test_theme_selection_survives_restart() {
    flashback::logging::init_for_tests();
    let config = FlashbackConfig { default_theme: CardTheme::Pokemon, ..Default::default() };
    let mut app = App::new(&config, Arc::new(FakeScores::default()), Arc::new(ReadyFonts));
    app.start().await.unwrap();

    assert!(app.fonts().is_ready());
    assert_eq!(app.menu().render().styles.title.font_family.as_deref(), Some("Bangers"));
    assert_eq!(app.menu().theme_label(), "Theme: Pokemon");

    app.menu_mut().open_theme_picker();
    app.menu_mut().select_theme("Marvel Heroes").unwrap();
    app.header().exit();

    assert_eq!(app.store().select(|s| s.card_theme), CardTheme::MarvelHeroes);
    assert!(app.menu_mut().select_theme("Muppets").is_err());
    assert_eq!(app.store().select(|s| s.card_theme), CardTheme::MarvelHeroes);
}
