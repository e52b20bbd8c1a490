//! Garden state record and its pure transitions.
//!
//! # Responsibility
//! - Hold the plant list, the daily streak and the transient active prompt.
//! - Apply watering and streak transitions without touching storage.
//!
//! # Invariants
//! - `plants` holds exactly the three fixed plants in `PlantId::ALL` order.
//! - Plants are never added or removed after creation.
//! - `active_prompt` is transient and never serialized.

use crate::model::plant::{Plant, PlantId, PlantType};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Cosmetic season label. Nothing in the garden mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// Validation failure for a garden snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenValidationError {
    /// Plant list is not exactly the three fixed plants in order.
    PlantSet(Vec<String>),
    /// A plant's stored stage or type disagrees with its points or id.
    InconsistentPlant(PlantId),
}

impl Display for GardenValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlantSet(ids) => write!(
                f,
                "garden must hold calm-lily, focus-fern, creative-cactus; found [{}]",
                ids.join(", ")
            ),
            Self::InconsistentPlant(id) => {
                write!(f, "plant `{id}` has a stage or type that does not match its record")
            }
        }
    }
}

impl Error for GardenValidationError {}

/// Whole garden snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenState {
    pub plants: Vec<Plant>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub season: Season,
    #[serde(default)]
    pub last_visit: Option<DateTime<Local>>,
    #[serde(skip)]
    pub active_prompt: Option<PlantType>,
}

impl Default for GardenState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GardenState {
    /// First-load garden: three seedlings, no streak.
    pub fn initial() -> Self {
        Self {
            plants: PlantId::ALL.into_iter().map(Plant::seedling).collect(),
            streak: 0,
            season: Season::Spring,
            last_visit: None,
            active_prompt: None,
        }
    }

    /// Awards points to one plant.
    ///
    /// Returns `false` and leaves state untouched when the plant is missing,
    /// which only happens with a corrupted plant list.
    pub fn water_plant(
        &mut self,
        plant_id: PlantId,
        points_to_add: u32,
        now: DateTime<Local>,
    ) -> bool {
        match self.plants.iter_mut().find(|plant| plant.id == plant_id) {
            Some(plant) => {
                plant.water(points_to_add, now);
                true
            }
            None => false,
        }
    }

    /// Counts today's visit once per local calendar day.
    ///
    /// A gap of any number of days still increments by exactly one; the
    /// streak is never reset. Returns whether the streak changed.
    pub fn update_streak(&mut self, now: DateTime<Local>) -> bool {
        let today = now.date_naive();
        let already_counted = self
            .last_visit
            .map(|last| last.date_naive() == today)
            .unwrap_or(false);
        if already_counted {
            return false;
        }

        self.streak = self.streak.saturating_add(1);
        self.last_visit = Some(now);
        true
    }

    pub fn plant_by_type(&self, kind: PlantType) -> Option<&Plant> {
        self.plants.iter().find(|plant| plant.kind == kind)
    }

    pub fn plant(&self, plant_id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|plant| plant.id == plant_id)
    }

    /// Checks the fixed plant set and per-plant growth consistency.
    pub fn validate(&self) -> Result<(), GardenValidationError> {
        let ids_match = self.plants.len() == PlantId::ALL.len()
            && self
                .plants
                .iter()
                .zip(PlantId::ALL)
                .all(|(plant, expected)| plant.id == expected);
        if !ids_match {
            return Err(GardenValidationError::PlantSet(
                self.plants
                    .iter()
                    .map(|plant| plant.id.to_string())
                    .collect(),
            ));
        }

        if let Some(plant) = self.plants.iter().find(|plant| !plant.is_consistent()) {
            return Err(GardenValidationError::InconsistentPlant(plant.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GardenState, GardenValidationError};
    use crate::model::plant::{stage_for, PlantId, PlantType};
    use chrono::{Duration, Local, TimeZone};

    fn noon(year: i32, month: u32, day: u32) -> chrono::DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("noon is unambiguous")
    }

    #[test]
    fn initial_garden_has_three_seedlings_in_order() {
        let garden = GardenState::initial();
        let ids: Vec<_> = garden.plants.iter().map(|plant| plant.id).collect();
        assert_eq!(ids, PlantId::ALL.to_vec());
        assert!(garden.plants.iter().all(|plant| plant.points == 0));
        assert_eq!(garden.streak, 0);
        assert!(garden.validate().is_ok());
    }

    #[test]
    fn watering_keeps_stage_in_sync_and_clamps() {
        let mut garden = GardenState::initial();
        let now = noon(2026, 3, 1);
        for points in [7, 30, 1, 45, 90] {
            assert!(garden.water_plant(PlantId::FocusFern, points, now));
            let fern = garden.plant(PlantId::FocusFern).unwrap();
            assert!(fern.points <= 100);
            assert_eq!(fern.stage, stage_for(fern.points));
        }
        assert_eq!(garden.plant(PlantId::FocusFern).unwrap().points, 100);
        assert_eq!(garden.plant(PlantId::CalmLily).unwrap().points, 0);
    }

    #[test]
    fn watering_missing_plant_is_ignored() {
        let mut garden = GardenState::initial();
        garden.plants.retain(|plant| plant.id != PlantId::CalmLily);
        let before = garden.clone();
        assert!(!garden.water_plant(PlantId::CalmLily, 10, noon(2026, 3, 1)));
        assert_eq!(garden, before);
    }

    #[test]
    fn streak_counts_once_per_day() {
        let mut garden = GardenState::initial();
        let morning = noon(2026, 3, 1) - Duration::hours(3);
        assert!(garden.update_streak(morning));
        assert!(!garden.update_streak(noon(2026, 3, 1)));
        assert_eq!(garden.streak, 1);
        assert_eq!(garden.last_visit, Some(morning));
    }

    #[test]
    fn streak_increments_by_one_regardless_of_gap() {
        let mut garden = GardenState::initial();
        garden.update_streak(noon(2026, 3, 1));
        garden.update_streak(noon(2026, 3, 2));
        assert_eq!(garden.streak, 2);
        garden.update_streak(noon(2026, 4, 1));
        assert_eq!(garden.streak, 3);
    }

    #[test]
    fn plant_by_type_finds_matching_plant() {
        let garden = GardenState::initial();
        let cactus = garden.plant_by_type(PlantType::Creative).unwrap();
        assert_eq!(cactus.id, PlantId::CreativeCactus);
    }

    #[test]
    fn validate_rejects_stage_drift_and_missing_plants() {
        let mut drifted = GardenState::initial();
        drifted.plants[1].points = 60;
        assert_eq!(
            drifted.validate(),
            Err(GardenValidationError::InconsistentPlant(PlantId::FocusFern))
        );

        let mut short = GardenState::initial();
        short.plants.pop();
        assert!(matches!(
            short.validate(),
            Err(GardenValidationError::PlantSet(_))
        ));
    }

    #[test]
    fn active_prompt_is_not_serialized() {
        let mut garden = GardenState::initial();
        garden.active_prompt = Some(PlantType::Calm);
        let json = serde_json::to_value(&garden).unwrap();
        assert!(json.get("activePrompt").is_none());
        assert_eq!(json["plants"][0]["id"], "calm-lily");
        assert_eq!(json["plants"][0]["type"], "calm");
        assert_eq!(json["season"], "spring");
    }
}
