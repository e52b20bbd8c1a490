//! Free-writing flow for the creative plant.

use crate::flow::{Award, FlowError, FlowResult};
use crate::model::plant::{PlantId, PlantType};

/// Characters required before the entry can be submitted.
pub const CREATIVE_MIN_CHARS: u32 = 10;
/// Award ceiling for one entry.
pub const CREATIVE_MAX_AWARD: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreativeFlow {
    text: String,
}

impl CreativeFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in Unicode scalar values.
    pub fn char_count(&self) -> u32 {
        u32::try_from(self.text.chars().count()).unwrap_or(u32::MAX)
    }

    pub fn can_complete(&self) -> bool {
        self.char_count() >= CREATIVE_MIN_CHARS
    }

    /// Points the entry would earn, shown even while submission is disabled.
    pub fn award_preview(&self) -> u32 {
        self.char_count().clamp(CREATIVE_MIN_CHARS, CREATIVE_MAX_AWARD)
    }

    pub fn complete(&self) -> FlowResult<Award> {
        if !self.can_complete() {
            return Err(FlowError::NotReady(PlantType::Creative));
        }
        Ok(Award {
            plant_id: PlantId::CreativeCactus,
            points: self.award_preview(),
        })
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }
}
