//! Open activity prompt: one flow, its ticker, and its route to the store.
//!
//! # Responsibility
//! - Touch the streak and mark the active prompt when a prompt opens.
//! - Start the flow's ticker when the activity begins.
//! - Water the plant on completion, then tear the prompt down.
//!
//! # Invariants
//! - Teardown cancels the ticker before resetting flow state.
//! - A closed session accepts no further input.

use crate::clock::Clock;
use crate::flow::breathing::BREATH_PHASE_PERIOD;
use crate::flow::focus::{FocusDuration, FOCUS_TICK_PERIOD};
use crate::flow::ticker::{TickControl, Ticker};
use crate::flow::{ActivityFlow, Award, FlowError, FlowResult};
use crate::model::plant::PlantType;
use crate::repo::garden_repo::GardenRepository;
use crate::store::garden_store::GardenStore;
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// One open prompt.
///
/// Call [`PromptSession::close`] or [`PromptSession::complete`] before
/// dropping: a dropped session stops its ticker but cannot reach the store,
/// so the store keeps its active prompt marker.
pub struct PromptSession {
    kind: PlantType,
    flow: Arc<Mutex<ActivityFlow>>,
    ticker: Option<Ticker>,
    runtime: Handle,
    closed: bool,
}

impl PromptSession {
    /// Opens the prompt for `kind`; tickers run on `runtime`.
    pub fn open<R: GardenRepository, C: Clock>(
        store: &mut GardenStore<R, C>,
        kind: PlantType,
        runtime: Handle,
    ) -> Self {
        store.update_streak();
        store.set_active_prompt(Some(kind));
        info!("event=flow_open module=flow status=ok flow={kind}");

        Self {
            kind,
            flow: Arc::new(Mutex::new(ActivityFlow::for_type(kind))),
            ticker: None,
            runtime,
            closed: false,
        }
    }

    pub fn kind(&self) -> PlantType {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Copy of the current flow state for rendering.
    pub fn snapshot(&self) -> ActivityFlow {
        self.flow.lock().clone()
    }

    pub fn can_complete(&self) -> bool {
        !self.closed && self.flow.lock().can_complete()
    }

    /// Starts the breathing exercise and its phase ticker.
    pub fn begin_breathing(&mut self) -> FlowResult<()> {
        self.ensure_open()?;
        match &mut *self.flow.lock() {
            ActivityFlow::Breathing(flow) => flow.begin()?,
            _ => return Err(self.invalid("begin_breathing")),
        }
        self.start_ticker(BREATH_PHASE_PERIOD);
        info!("event=flow_begin module=flow status=ok flow=calm");
        Ok(())
    }

    pub fn select_focus_duration(&mut self, duration: FocusDuration) -> FlowResult<()> {
        self.ensure_open()?;
        match &mut *self.flow.lock() {
            ActivityFlow::Focus(flow) => flow.select_duration(duration),
            _ => Err(self.invalid("select_focus_duration")),
        }
    }

    /// Starts the focus countdown and its one-second ticker.
    pub fn start_focus(&mut self) -> FlowResult<()> {
        self.ensure_open()?;
        let minutes = match &mut *self.flow.lock() {
            ActivityFlow::Focus(flow) => {
                flow.start()?;
                flow.duration().minutes()
            }
            _ => return Err(self.invalid("start_focus")),
        };
        self.start_ticker(FOCUS_TICK_PERIOD);
        info!("event=flow_begin module=flow status=ok flow=focus minutes={minutes}");
        Ok(())
    }

    pub fn set_creative_text(&mut self, text: impl Into<String>) -> FlowResult<()> {
        self.ensure_open()?;
        match &mut *self.flow.lock() {
            ActivityFlow::Creative(flow) => {
                flow.set_text(text);
                Ok(())
            }
            _ => Err(self.invalid("set_creative_text")),
        }
    }

    /// Waters the plant with the flow's award and closes the prompt.
    ///
    /// Leaves the session open when the activity is not finished.
    pub fn complete<R: GardenRepository, C: Clock>(
        &mut self,
        store: &mut GardenStore<R, C>,
    ) -> FlowResult<Award> {
        self.ensure_open()?;
        let award = self.flow.lock().complete()?;
        store.water_plant(award.plant_id, award.points);
        info!(
            "event=flow_complete module=flow status=ok flow={} points={}",
            self.kind, award.points
        );
        self.teardown(store);
        Ok(award)
    }

    /// Cancels the activity without awarding anything. Idempotent.
    pub fn close<R: GardenRepository, C: Clock>(&mut self, store: &mut GardenStore<R, C>) {
        if self.closed {
            return;
        }
        info!("event=flow_cancel module=flow status=ok flow={}", self.kind);
        self.teardown(store);
    }

    fn teardown<R: GardenRepository, C: Clock>(&mut self, store: &mut GardenStore<R, C>) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.flow.lock().reset();
        store.set_active_prompt(None);
        self.closed = true;
    }

    fn start_ticker(&mut self, period: Duration) {
        let flow = Arc::clone(&self.flow);
        self.ticker = Some(Ticker::spawn(&self.runtime, period, move || {
            match &mut *flow.lock() {
                ActivityFlow::Breathing(flow) => flow.tick(),
                ActivityFlow::Focus(flow) => flow.tick(),
                ActivityFlow::Creative(_) => TickControl::Stop,
            }
        }));
    }

    fn ensure_open(&self) -> FlowResult<()> {
        if self.closed {
            Err(FlowError::Closed)
        } else {
            Ok(())
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidState {
            flow: self.kind,
            action,
        }
    }
}

impl Drop for PromptSession {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        if !self.closed {
            warn!(
                "event=flow_drop module=flow status=error reason=not_closed flow={}",
                self.kind
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PromptSession;
    use crate::db::open_db_in_memory;
    use crate::flow::ActivityFlow;
    use crate::model::plant::PlantType;
    use crate::repo::garden_repo::SqliteGardenRepository;
    use crate::store::garden_store::GardenStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn store() -> GardenStore<SqliteGardenRepository> {
        let repo = SqliteGardenRepository::try_new(open_db_in_memory().unwrap()).unwrap();
        GardenStore::open(repo)
    }

    fn breath_count(flow: &ActivityFlow) -> u32 {
        match flow {
            ActivityFlow::Breathing(flow) => flow.breath_count(),
            other => panic!("expected breathing flow, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_session_stops_its_ticker() {
        let mut store = store();
        let mut session = PromptSession::open(&mut store, PlantType::Calm, Handle::current());
        session.begin_breathing().unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let flow = Arc::clone(&session.flow);
        assert_eq!(breath_count(&flow.lock()), 2);

        drop(session);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(breath_count(&flow.lock()), 2);
        assert_eq!(store.active_prompt(), Some(PlantType::Calm));
    }

    #[tokio::test(start_paused = true)]
    async fn close_before_drop_clears_the_marker() {
        let mut store = store();
        let mut session = PromptSession::open(&mut store, PlantType::Calm, Handle::current());
        session.begin_breathing().unwrap();
        session.close(&mut store);
        drop(session);
        assert_eq!(store.active_prompt(), None);
    }
}
