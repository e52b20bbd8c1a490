//! Plant domain model and growth rule.
//!
//! # Responsibility
//! - Define the three fixed plants and their identities.
//! - Map accumulated points to a discrete growth stage.
//!
//! # Invariants
//! - `PlantId` and `PlantType` are fixed 1:1 and never change for a plant.
//! - `points` never exceeds `MAX_POINTS`.
//! - `stage == stage_for(points)` after every mutation.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Point ceiling for every plant.
pub const MAX_POINTS: u32 = 100;

/// Highest growth stage index (fully grown).
pub const MAX_STAGE: u8 = 4;

/// Stable identifier of one of the three fixed plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantId {
    #[serde(rename = "calm-lily")]
    CalmLily,
    #[serde(rename = "focus-fern")]
    FocusFern,
    #[serde(rename = "creative-cactus")]
    CreativeCactus,
}

impl PlantId {
    /// All plant ids in garden display order.
    pub const ALL: [PlantId; 3] = [Self::CalmLily, Self::FocusFern, Self::CreativeCactus];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CalmLily => "calm-lily",
            Self::FocusFern => "focus-fern",
            Self::CreativeCactus => "creative-cactus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "calm-lily" => Some(Self::CalmLily),
            "focus-fern" => Some(Self::FocusFern),
            "creative-cactus" => Some(Self::CreativeCactus),
            _ => None,
        }
    }

    /// Activity category bound to this plant.
    pub fn plant_type(self) -> PlantType {
        match self {
            Self::CalmLily => PlantType::Calm,
            Self::FocusFern => PlantType::Focus,
            Self::CreativeCactus => PlantType::Creative,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::CalmLily => "Calm Lily",
            Self::FocusFern => "Focus Fern",
            Self::CreativeCactus => "Creative Cactus",
        }
    }
}

impl Display for PlantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wellness category a plant grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    /// Breathing exercises.
    Calm,
    /// Timed single-tasking sessions.
    Focus,
    /// Free writing.
    Creative,
}

impl PlantType {
    pub const ALL: [PlantType; 3] = [Self::Calm, Self::Focus, Self::Creative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Focus => "focus",
            Self::Creative => "creative",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownPlantType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "calm" => Ok(Self::Calm),
            "focus" => Ok(Self::Focus),
            "creative" => Ok(Self::Creative),
            other => Err(UnknownPlantType(other.to_string())),
        }
    }

    /// The single plant that grows from this category.
    pub fn plant_id(self) -> PlantId {
        match self {
            Self::Calm => PlantId::CalmLily,
            Self::Focus => PlantId::FocusFern,
            Self::Creative => PlantId::CreativeCactus,
        }
    }
}

impl Display for PlantType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for plant type labels coming from UI callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlantType(pub String);

impl Display for UnknownPlantType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown plant type `{}`; expected calm|focus|creative",
            self.0
        )
    }
}

impl Error for UnknownPlantType {}

/// Named growth phases, indexed by stage number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GrowthStage {
    Seed = 0,
    Sprout = 1,
    Growing = 2,
    Blooming = 3,
    Flourishing = 4,
}

impl GrowthStage {
    /// Looks up a stage by index; out-of-range values fall back to `Seed`.
    pub fn from_index(stage: u8) -> Self {
        match stage {
            1 => Self::Sprout,
            2 => Self::Growing,
            3 => Self::Blooming,
            MAX_STAGE => Self::Flourishing,
            _ => Self::Seed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::Sprout => "Sprout",
            Self::Growing => "Growing",
            Self::Blooming => "Blooming",
            Self::Flourishing => "Flourishing",
        }
    }
}

/// Maps accumulated points to a growth stage index in `0..=4`.
///
/// Pure and total. Callers pass points already clamped to `0..=MAX_POINTS`,
/// but larger values still map to the top stage.
pub fn stage_for(points: u32) -> u8 {
    match points {
        p if p >= MAX_POINTS => MAX_STAGE,
        p if p >= 75 => 3,
        p if p >= 50 => 2,
        p if p >= 25 => 1,
        _ => 0,
    }
}

/// One growing plant in the garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    /// Serialized as `type` to match the stored snapshot layout.
    #[serde(rename = "type")]
    pub kind: PlantType,
    pub points: u32,
    pub stage: u8,
    #[serde(default)]
    pub last_watered: Option<DateTime<Local>>,
}

impl Plant {
    /// Creates an unwatered plant for the given fixed id.
    pub fn seedling(id: PlantId) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            kind: id.plant_type(),
            points: 0,
            stage: 0,
            last_watered: None,
        }
    }

    /// Adds points (clamped to `MAX_POINTS`) and recomputes the stage.
    pub fn water(&mut self, points_to_add: u32, now: DateTime<Local>) {
        self.points = self.points.saturating_add(points_to_add).min(MAX_POINTS);
        self.stage = stage_for(self.points);
        self.last_watered = Some(now);
    }

    pub fn growth_stage(&self) -> GrowthStage {
        GrowthStage::from_index(self.stage)
    }

    /// Returns whether the stored stage agrees with the growth rule.
    pub fn is_consistent(&self) -> bool {
        self.points <= MAX_POINTS
            && self.stage == stage_for(self.points)
            && self.kind == self.id.plant_type()
    }
}

#[cfg(test)]
mod tests {
    use super::{stage_for, GrowthStage, Plant, PlantId, PlantType, MAX_POINTS, MAX_STAGE};
    use chrono::Local;

    #[test]
    fn stage_thresholds_match_growth_table() {
        assert_eq!(stage_for(0), 0);
        assert_eq!(stage_for(24), 0);
        assert_eq!(stage_for(25), 1);
        assert_eq!(stage_for(49), 1);
        assert_eq!(stage_for(50), 2);
        assert_eq!(stage_for(74), 2);
        assert_eq!(stage_for(75), 3);
        assert_eq!(stage_for(99), 3);
        assert_eq!(stage_for(100), 4);
        assert_eq!(stage_for(MAX_POINTS), MAX_STAGE);
        assert_eq!(stage_for(u32::MAX), MAX_STAGE);
    }

    #[test]
    fn stage_is_monotonic_and_bounded() {
        let mut previous = 0;
        for points in 0..=MAX_POINTS {
            let stage = stage_for(points);
            assert!(stage <= 4);
            assert!(stage >= previous, "stage dropped at {points}");
            previous = stage;
        }
    }

    #[test]
    fn ids_and_types_are_fixed_pairs() {
        for id in PlantId::ALL {
            assert_eq!(id.plant_type().plant_id(), id);
            assert_eq!(PlantId::parse(id.as_str()), Some(id));
        }
        assert_eq!(PlantType::parse(" Focus ").unwrap(), PlantType::Focus);
        assert!(PlantType::parse("sleep").is_err());
    }

    #[test]
    fn watering_clamps_and_restages() {
        let mut plant = Plant::seedling(PlantId::CalmLily);
        plant.water(90, Local::now());
        assert_eq!((plant.points, plant.stage), (90, 3));
        plant.water(30, Local::now());
        assert_eq!((plant.points, plant.stage), (100, 4));
        assert!(plant.last_watered.is_some());
        assert!(plant.is_consistent());
    }

    #[test]
    fn stage_labels_fall_back_to_seed() {
        assert_eq!(GrowthStage::from_index(3).label(), "Blooming");
        assert_eq!(GrowthStage::from_index(9).label(), "Seed");
        assert_eq!(GrowthStage::from_index(MAX_STAGE), GrowthStage::Flourishing);
    }
}
