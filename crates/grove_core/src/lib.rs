//! Core domain logic for Mindful Grove.
//! This crate is the single source of truth for garden growth and streaks.

pub mod clock;
pub mod db;
pub mod flow;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use flow::focus::FocusDuration;
pub use flow::session::PromptSession;
pub use flow::{ActivityFlow, Award, FlowError, FlowResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::garden::{GardenState, GardenValidationError, Season};
pub use model::plant::{stage_for, GrowthStage, Plant, PlantId, PlantType, MAX_POINTS, MAX_STAGE};
pub use repo::garden_repo::{
    GardenRepository, RepoError, RepoResult, SqliteGardenRepository, GARDEN_STORAGE_KEY,
};
pub use store::garden_store::{GardenStore, SubscriptionId};
pub use view::garden_view::GardenView;
pub use view::prompt::PromptView;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
