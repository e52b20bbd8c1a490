//! Garden store: state owner, persistence boundary and observer hub.

use crate::clock::{Clock, SystemClock};
use crate::model::garden::GardenState;
use crate::model::plant::{Plant, PlantId, PlantType};
use crate::repo::garden_repo::{GardenRepository, RepoError};
use log::{debug, error, info, warn};

/// Handle returned by [`GardenStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&GardenState) + Send>;

/// Owns the garden and persists it after every persistent mutation.
pub struct GardenStore<R: GardenRepository, C: Clock = SystemClock> {
    state: GardenState,
    repo: R,
    clock: C,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    /// Cleared when the stored snapshot could not be read, so the garden on
    /// disk is never replaced by a fallback garden.
    writable: bool,
}

impl<R: GardenRepository> GardenStore<R, SystemClock> {
    /// Opens the store on local system time.
    pub fn open(repo: R) -> Self {
        Self::open_with_clock(repo, SystemClock)
    }
}

impl<R: GardenRepository, C: Clock> GardenStore<R, C> {
    /// Loads the stored garden, falling back to the initial garden when the
    /// snapshot is missing or invalid.
    ///
    /// When the storage itself fails the store still opens on the initial
    /// garden, but runs without saving for the rest of the process.
    pub fn open_with_clock(repo: R, clock: C) -> Self {
        let mut writable = true;
        let state = match repo.load_garden() {
            Ok(Some(state)) => {
                info!(
                    "event=garden_load module=store status=ok source=snapshot streak={}",
                    state.streak
                );
                state
            }
            Ok(None) => {
                info!("event=garden_load module=store status=ok source=initial");
                GardenState::initial()
            }
            Err(RepoError::Db(err)) => {
                error!(
                    "event=garden_load module=store status=error source=initial writable=false error={}",
                    err
                );
                writable = false;
                GardenState::initial()
            }
            Err(err) => {
                warn!(
                    "event=garden_load module=store status=error source=initial error={}",
                    err
                );
                GardenState::initial()
            }
        };

        Self {
            state,
            repo,
            clock,
            observers: Vec::new(),
            next_subscription: 0,
            writable,
        }
    }

    /// Awards points to one plant, clamped at the point ceiling.
    pub fn water_plant(&mut self, plant_id: PlantId, points_to_add: u32) {
        let now = self.clock.now();
        if !self.state.water_plant(plant_id, points_to_add, now) {
            warn!(
                "event=plant_water module=store status=skipped reason=plant_missing plant_id={}",
                plant_id
            );
            return;
        }

        if let Some(plant) = self.state.plant(plant_id) {
            info!(
                "event=plant_water module=store status=ok plant_id={} added={} points={} stage={}",
                plant_id, points_to_add, plant.points, plant.stage
            );
        }
        self.persist();
        self.notify();
    }

    /// Counts today's visit; returns whether the streak changed.
    pub fn update_streak(&mut self) -> bool {
        let changed = self.state.update_streak(self.clock.now());
        if changed {
            info!(
                "event=streak_update module=store status=ok streak={}",
                self.state.streak
            );
            self.persist();
            self.notify();
        } else {
            debug!("event=streak_update module=store status=skipped reason=same_day");
        }
        changed
    }

    /// Sets or clears the open activity marker. Not persisted.
    pub fn set_active_prompt(&mut self, prompt: Option<PlantType>) {
        self.state.active_prompt = prompt;
        self.notify();
    }

    pub fn plant_by_type(&self, kind: PlantType) -> Option<&Plant> {
        self.state.plant_by_type(kind)
    }

    pub fn state(&self) -> &GardenState {
        &self.state
    }

    pub fn plants(&self) -> &[Plant] {
        &self.state.plants
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    pub fn active_prompt(&self) -> Option<PlantType> {
        self.state.active_prompt
    }

    /// Whether mutations are being saved.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Registers a callback invoked with the new state after each mutation.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&GardenState) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a callback; returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    fn persist(&self) {
        if !self.writable {
            warn!("event=garden_persist module=store status=skipped reason=load_failed");
            return;
        }
        if let Err(err) = self.repo.save_garden(&self.state) {
            error!(
                "event=garden_persist module=store status=error error={}",
                err
            );
        }
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer(&self.state);
        }
    }
}
