//! Plant card projection.

use crate::model::plant::{Plant, PlantId, PlantType, MAX_POINTS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantCard {
    pub plant_id: PlantId,
    pub kind: PlantType,
    pub emoji: &'static str,
    pub name: String,
    pub stage_label: &'static str,
    pub points: u32,
    /// `points/100` text shown next to the progress bar.
    pub points_label: String,
    /// Overall growth on a 0..=100 scale.
    pub progress_percent: u32,
    /// Label of the button that opens the plant's activity.
    pub prompt_label: &'static str,
}

impl PlantCard {
    pub fn from_plant(plant: &Plant) -> Self {
        Self {
            plant_id: plant.id,
            kind: plant.kind,
            emoji: plant_emoji(plant.kind),
            name: plant.name.clone(),
            stage_label: plant.growth_stage().label(),
            points: plant.points,
            points_label: format!("{}/{}", plant.points, MAX_POINTS),
            progress_percent: plant.points.min(MAX_POINTS) * 100 / MAX_POINTS,
            prompt_label: prompt_label(plant.kind),
        }
    }
}

pub fn plant_emoji(kind: PlantType) -> &'static str {
    match kind {
        PlantType::Calm => "🌸",
        PlantType::Focus => "🌿",
        PlantType::Creative => "🌵",
    }
}

pub fn prompt_label(kind: PlantType) -> &'static str {
    match kind {
        PlantType::Calm => "Breathe & Reflect",
        PlantType::Focus => "Focus Session",
        PlantType::Creative => "Creative Flow",
    }
}

#[cfg(test)]
mod tests {
    use super::PlantCard;
    use crate::model::plant::{Plant, PlantId};
    use chrono::Local;

    #[test]
    fn card_reflects_points_and_stage() {
        let mut plant = Plant::seedling(PlantId::FocusFern);
        plant.water(55, Local::now());
        let card = PlantCard::from_plant(&plant);
        assert_eq!(card.emoji, "🌿");
        assert_eq!(card.name, "Focus Fern");
        assert_eq!(card.stage_label, "Growing");
        assert_eq!(card.points_label, "55/100");
        assert_eq!(card.progress_percent, 55);
        assert_eq!(card.prompt_label, "Focus Session");
    }
}
