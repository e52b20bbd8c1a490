//! Whole-page projection: header, plant cards and scene.

use crate::model::garden::GardenState;
use crate::view::card::PlantCard;
use crate::view::scene::SceneLayout;

pub const APP_TITLE: &str = "Mindful Grove";
pub const APP_TAGLINE: &str = "Cultivate wellness, grow serenity";

#[derive(Debug, Clone, PartialEq)]
pub struct GardenView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub streak: u32,
    pub streak_label: String,
    /// Zen mode shows the scene alone, without header or cards.
    pub zen_mode: bool,
    pub cards: Vec<PlantCard>,
    pub scene: SceneLayout,
}

impl GardenView {
    pub fn build(state: &GardenState, zen_mode: bool) -> Self {
        let cards = if zen_mode {
            Vec::new()
        } else {
            state.plants.iter().map(PlantCard::from_plant).collect()
        };

        Self {
            title: APP_TITLE,
            tagline: APP_TAGLINE,
            streak: state.streak,
            streak_label: format!("{} days", state.streak),
            zen_mode,
            cards,
            scene: SceneLayout::from_plants(&state.plants),
        }
    }
}
