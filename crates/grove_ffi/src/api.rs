//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose garden, prompt and logging use-cases to Dart via FRB.
//! - Own the process-wide store, the open prompt session and the ticker
//!   runtime.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - At most one prompt session is open at a time.
//! - Locks are taken in store-then-session order.

use crate::config::garden_db_path;
use grove_core::db::open_db;
use grove_core::view::scene::{PlantModel, PlantShape};
use grove_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner,
    FocusDuration, GardenStore, GardenView, PlantType, PromptSession, PromptView,
    SqliteGardenRepository,
};
use log::warn;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::{Builder, Runtime};

type FfiStore = GardenStore<SqliteGardenRepository>;

static STORE: OnceCell<Mutex<FfiStore>> = OnceCell::new();
static SESSION: Mutex<Option<PromptSession>> = Mutex::new(None);
static TICKER_RUNTIME: OnceCell<Runtime> = OnceCell::new();
static ZEN_MODE: AtomicBool = AtomicBool::new(false);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Log level to pass to [`init_logging`] when the app has no override:
/// `debug` in debug builds, `info` in release builds.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One plant card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantCardItem {
    pub plant_id: String,
    pub kind: String,
    pub emoji: String,
    pub name: String,
    pub stage_label: String,
    pub points: u32,
    pub points_label: String,
    pub progress_percent: u32,
    pub prompt_label: String,
}

/// Scene point in renderer units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One plant's decorative model, flattened for Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantSceneItem {
    pub plant_id: String,
    /// `lily|fern|cactus`.
    pub shape: String,
    pub position: ScenePoint,
    pub growth_scale: f32,
    pub body_color: String,
    pub accent_color: String,
    /// Lily stem or cactus body height; zero for ferns.
    pub body_height: f32,
    pub blossom: bool,
    pub blossom_animated: bool,
    /// Fern fronds or cactus flowers.
    pub parts: Vec<ScenePoint>,
}

/// Whole-page garden state.
#[derive(Debug, Clone, PartialEq)]
pub struct GardenSnapshot {
    pub ok: bool,
    pub message: String,
    pub title: String,
    pub tagline: String,
    pub streak: u32,
    pub streak_label: String,
    pub zen_mode: bool,
    pub cards: Vec<PlantCardItem>,
    pub scene: Vec<PlantSceneItem>,
}

/// Open activity dialog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub open: bool,
    pub kind: Option<String>,
    pub title: String,
    pub headline: String,
    pub detail: String,
    pub progress_percent: Option<u32>,
    pub action_label: String,
    pub action_enabled: bool,
    pub action_completes: bool,
}

impl PromptState {
    fn closed() -> Self {
        Self {
            open: false,
            kind: None,
            title: String::new(),
            headline: String::new(),
            detail: String::new(),
            progress_percent: None,
            action_label: String::new(),
            action_enabled: false,
            action_completes: false,
        }
    }

    fn from_view(view: PromptView) -> Self {
        Self {
            open: true,
            kind: Some(view.kind.as_str().to_string()),
            title: view.title.to_string(),
            headline: view.headline,
            detail: view.detail,
            progress_percent: view.progress_percent,
            action_label: view.action_label,
            action_enabled: view.action_enabled,
            action_completes: view.action_completes,
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptActionResponse {
    pub ok: bool,
    /// Points awarded when the action completed an activity.
    pub points: Option<u32>,
    pub message: String,
}

impl PromptActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            points: None,
            message: message.into(),
        }
    }

    fn awarded(points: u32) -> Self {
        Self {
            ok: true,
            points: Some(points),
            message: format!("+{points} points"),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            points: None,
            message: message.into(),
        }
    }
}

/// Returns the garden page state.
///
/// # FFI contract
/// - Sync call; opens the database on first use.
/// - Never panics; `ok=false` with empty content when storage is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn garden_snapshot() -> GardenSnapshot {
    let zen_mode = ZEN_MODE.load(Ordering::Relaxed);
    match store() {
        Ok(store) => {
            let view = GardenView::build(store.lock().state(), zen_mode);
            to_garden_snapshot(view)
        }
        Err(message) => GardenSnapshot {
            ok: false,
            message,
            title: String::new(),
            tagline: String::new(),
            streak: 0,
            streak_label: String::new(),
            zen_mode,
            cards: Vec::new(),
            scene: Vec::new(),
        },
    }
}

/// Toggles zen mode (scene only, no cards).
#[flutter_rust_bridge::frb(sync)]
pub fn set_zen_mode(enabled: bool) -> GardenSnapshot {
    ZEN_MODE.store(enabled, Ordering::Relaxed);
    garden_snapshot()
}

/// Opens the activity dialog for `plant_type` (`calm|focus|creative`).
///
/// Closes any previously open dialog without awarding points.
#[flutter_rust_bridge::frb(sync)]
pub fn prompt_open(plant_type: String) -> PromptActionResponse {
    let kind = match PlantType::parse(&plant_type) {
        Ok(kind) => kind,
        Err(err) => return PromptActionResponse::failure(err.to_string()),
    };
    let runtime = match ticker_runtime() {
        Ok(runtime) => runtime,
        Err(message) => return PromptActionResponse::failure(message),
    };
    let store = match store() {
        Ok(store) => store,
        Err(message) => return PromptActionResponse::failure(message),
    };

    let mut store = store.lock();
    let mut session = SESSION.lock();
    if let Some(mut previous) = session.take() {
        warn!(
            "event=prompt_open module=ffi status=replacing previous={}",
            previous.kind()
        );
        previous.close(&mut *store);
    }
    *session = Some(PromptSession::open(
        &mut *store,
        kind,
        runtime.handle().clone(),
    ));
    PromptActionResponse::success(format!("{kind} prompt opened."))
}

/// Returns the open dialog state, or `open=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn prompt_view() -> PromptState {
    match SESSION.lock().as_ref() {
        Some(session) if !session.is_closed() => {
            PromptState::from_view(PromptView::build(&session.snapshot()))
        }
        _ => PromptState::closed(),
    }
}

/// Starts the breathing exercise.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_begin() -> PromptActionResponse {
    with_session(|session| session.begin_breathing())
}

/// Selects the focus length in minutes (`5|15|25`).
#[flutter_rust_bridge::frb(sync)]
pub fn focus_select_duration(minutes: u32) -> PromptActionResponse {
    let Some(duration) = FocusDuration::from_minutes(minutes) else {
        return PromptActionResponse::failure(format!(
            "unsupported focus duration {minutes}; expected 5|15|25"
        ));
    };
    with_session(|session| session.select_focus_duration(duration))
}

/// Starts the focus countdown.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_start() -> PromptActionResponse {
    with_session(|session| session.start_focus())
}

/// Replaces the free-writing text.
#[flutter_rust_bridge::frb(sync)]
pub fn creative_set_text(text: String) -> PromptActionResponse {
    with_session(|session| session.set_creative_text(text))
}

/// Completes the open activity, waters its plant and closes the dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn prompt_complete() -> PromptActionResponse {
    let store = match store() {
        Ok(store) => store,
        Err(message) => return PromptActionResponse::failure(message),
    };
    let mut store = store.lock();
    let mut session = SESSION.lock();
    let Some(open) = session.as_mut() else {
        return PromptActionResponse::failure("no prompt is open");
    };

    match open.complete(&mut *store) {
        Ok(award) => {
            *session = None;
            PromptActionResponse::awarded(award.points)
        }
        Err(err) => PromptActionResponse::failure(err.to_string()),
    }
}

/// Closes the open dialog without awarding points. Idempotent.
#[flutter_rust_bridge::frb(sync)]
pub fn prompt_close() -> PromptActionResponse {
    let store = match store() {
        Ok(store) => store,
        Err(message) => return PromptActionResponse::failure(message),
    };
    let mut store = store.lock();
    if let Some(mut session) = SESSION.lock().take() {
        session.close(&mut *store);
    }
    PromptActionResponse::success("Prompt closed.")
}

fn with_session(
    f: impl FnOnce(&mut PromptSession) -> grove_core::FlowResult<()>,
) -> PromptActionResponse {
    match SESSION.lock().as_mut() {
        Some(session) => match f(session) {
            Ok(()) => PromptActionResponse::success("Ok."),
            Err(err) => PromptActionResponse::failure(err.to_string()),
        },
        None => PromptActionResponse::failure("no prompt is open"),
    }
}

fn store() -> Result<&'static Mutex<FfiStore>, String> {
    STORE.get_or_try_init(|| {
        let conn =
            open_db(garden_db_path()).map_err(|err| format!("garden DB open failed: {err}"))?;
        let repo = SqliteGardenRepository::try_new(conn)
            .map_err(|err| format!("garden repo init failed: {err}"))?;
        Ok(Mutex::new(GardenStore::open(repo)))
    })
}

fn ticker_runtime() -> Result<&'static Runtime, String> {
    TICKER_RUNTIME.get_or_try_init(|| {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("grove-ticker")
            .enable_time()
            .build()
            .map_err(|err| format!("ticker runtime start failed: {err}"))
    })
}

fn to_garden_snapshot(view: GardenView) -> GardenSnapshot {
    GardenSnapshot {
        ok: true,
        message: String::new(),
        title: view.title.to_string(),
        tagline: view.tagline.to_string(),
        streak: view.streak,
        streak_label: view.streak_label,
        zen_mode: view.zen_mode,
        cards: view
            .cards
            .into_iter()
            .map(|card| PlantCardItem {
                plant_id: card.plant_id.as_str().to_string(),
                kind: card.kind.as_str().to_string(),
                emoji: card.emoji.to_string(),
                name: card.name,
                stage_label: card.stage_label.to_string(),
                points: card.points,
                points_label: card.points_label,
                progress_percent: card.progress_percent,
                prompt_label: card.prompt_label.to_string(),
            })
            .collect(),
        scene: view.scene.plants.into_iter().map(to_scene_item).collect(),
    }
}

fn to_scene_item(model: PlantModel) -> PlantSceneItem {
    let [x, y, z] = model.position;
    let (shape, body_height, blossom, blossom_animated, parts) = match model.shape {
        PlantShape::Lily {
            stem_height,
            blossom,
            blossom_animated,
        } => ("lily", stem_height, blossom, blossom_animated, Vec::new()),
        PlantShape::Fern { fronds } => ("fern", 0.0, false, false, fronds),
        PlantShape::Cactus {
            body_height,
            flowers,
        } => ("cactus", body_height, false, false, flowers),
    };

    PlantSceneItem {
        plant_id: model.plant_id.as_str().to_string(),
        shape: shape.to_string(),
        position: ScenePoint { x, y, z },
        growth_scale: model.growth_scale,
        body_color: model.body_color.to_string(),
        accent_color: model.accent_color.to_string(),
        body_height,
        blossom,
        blossom_animated,
        parts: parts
            .into_iter()
            .map(|[x, y, z]| ScenePoint { x, y, z })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, creative_set_text, default_log_level, focus_select_duration,
        garden_snapshot, init_logging, ping, prompt_close, prompt_complete, prompt_open,
        prompt_view,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn default_log_level_follows_build_mode() {
        let expected = if cfg!(debug_assertions) { "debug" } else { "info" };
        assert_eq!(default_log_level(), expected);
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/grove-logs".to_string()).is_empty());
    }

    #[test]
    fn snapshot_lists_three_plants() {
        let snapshot = garden_snapshot();
        assert!(snapshot.ok, "{}", snapshot.message);
        assert_eq!(snapshot.title, "Mindful Grove");
        assert_eq!(snapshot.scene.len(), 3);
        let ids: Vec<_> = snapshot
            .scene
            .iter()
            .map(|item| item.plant_id.as_str())
            .collect();
        assert_eq!(ids, vec!["calm-lily", "focus-fern", "creative-cactus"]);
    }

    #[test]
    fn unknown_inputs_are_reported_not_panicked() {
        assert!(!prompt_open("sleep".to_string()).ok);
        assert!(!focus_select_duration(7).ok);
    }

    #[test]
    fn creative_prompt_round_trip_waters_cactus() {
        let before = cactus_points();

        let opened = prompt_open("creative".to_string());
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(prompt_view().kind.as_deref(), Some("creative"));

        assert!(creative_set_text("a quiet morning walk".to_string()).ok);
        let completed = prompt_complete();
        assert!(completed.ok, "{}", completed.message);
        assert_eq!(completed.points, Some(20));
        assert!(!prompt_view().open);

        assert_eq!(cactus_points(), (before + 20).min(100));
        assert!(prompt_close().ok);
        assert!(!prompt_complete().ok);
    }

    fn cactus_points() -> u32 {
        garden_snapshot()
            .cards
            .iter()
            .find(|card| card.plant_id == "creative-cactus")
            .map(|card| card.points)
            .unwrap_or_default()
    }
}
