//! Decorative garden scene parameters.
//!
//! Every value is a deterministic function of a plant's type, stage and
//! position in the garden; the renderer only animates what it is given.

use crate::model::plant::{Plant, PlantId, PlantType};

/// Horizontal spacing between neighbouring plants.
const PLANT_SPACING: f32 = 4.0;
/// Height at which plant pots rest.
const PLANT_BASE_Y: f32 = -1.0;
const LILY_STEM_HEIGHT: f32 = 2.0;
const CACTUS_BODY_HEIGHT: f32 = 2.0;

pub type Vec3 = [f32; 3];

/// Shape specific to each plant family.
#[derive(Debug, Clone, PartialEq)]
pub enum PlantShape {
    Lily {
        stem_height: f32,
        /// Blossom appears once the lily is growing.
        blossom: bool,
        /// Blossom spins and bobs once the lily is blooming.
        blossom_animated: bool,
    },
    Fern {
        fronds: Vec<Vec3>,
    },
    Cactus {
        body_height: f32,
        flowers: Vec<Vec3>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantModel {
    pub plant_id: PlantId,
    pub position: Vec3,
    pub growth_scale: f32,
    pub body_color: &'static str,
    pub accent_color: &'static str,
    pub shape: PlantShape,
}

/// All plant models in garden order.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub plants: Vec<PlantModel>,
}

impl SceneLayout {
    pub fn from_plants(plants: &[Plant]) -> Self {
        Self {
            plants: plants
                .iter()
                .enumerate()
                .map(|(index, plant)| plant_model(index, plant))
                .collect(),
        }
    }
}

pub fn plant_model(index: usize, plant: &Plant) -> PlantModel {
    PlantModel {
        plant_id: plant.id,
        position: [(index as f32 - 1.0) * PLANT_SPACING, PLANT_BASE_Y, 0.0],
        growth_scale: growth_scale(plant.stage),
        body_color: body_color(plant.kind),
        accent_color: accent_color(plant.kind),
        shape: plant_shape(plant.kind, plant.stage),
    }
}

pub fn growth_scale(stage: u8) -> f32 {
    (f32::from(stage) * 0.25 + 0.1).max(0.1)
}

pub fn plant_shape(kind: PlantType, stage: u8) -> PlantShape {
    match kind {
        PlantType::Calm => PlantShape::Lily {
            stem_height: LILY_STEM_HEIGHT,
            blossom: stage >= 2,
            blossom_animated: stage >= 3,
        },
        PlantType::Focus => {
            let count = usize::from(stage) + 1;
            PlantShape::Fern {
                fronds: (0..count)
                    .map(|i| {
                        let i = i as f32;
                        [(i * 2.0).cos() * 0.8, 1.0 + i * 0.3, (i * 2.0).sin() * 0.8]
                    })
                    .collect(),
            }
        }
        PlantType::Creative => {
            let count = usize::from(stage.saturating_sub(2));
            PlantShape::Cactus {
                body_height: CACTUS_BODY_HEIGHT,
                flowers: (0..count)
                    .map(|i| {
                        let i = i as f32;
                        [
                            (i * 1.5).cos() * 0.6,
                            1.5 + i.sin() * 0.3,
                            (i * 1.5).sin() * 0.6,
                        ]
                    })
                    .collect(),
            }
        }
    }
}

fn body_color(kind: PlantType) -> &'static str {
    match kind {
        PlantType::Calm => "#E6F3FF",
        PlantType::Focus => "#E8F5E8",
        PlantType::Creative => "#FFF0E6",
    }
}

fn accent_color(kind: PlantType) -> &'static str {
    match kind {
        PlantType::Calm => "#87CEEB",
        PlantType::Focus => "#98FB98",
        PlantType::Creative => "#FFB347",
    }
}
