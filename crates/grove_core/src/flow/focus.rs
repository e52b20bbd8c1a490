//! Timed focus session flow for the focus plant.
//!
//! # Invariants
//! - Duration can only change before the session starts.
//! - Elapsed seconds never exceed the session target.

use crate::flow::ticker::TickControl;
use crate::flow::{Award, FlowError, FlowResult};
use crate::model::plant::{PlantId, PlantType};
use std::time::Duration;

/// Countdown granularity.
pub const FOCUS_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Selectable session lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusDuration {
    #[default]
    Five,
    Fifteen,
    TwentyFive,
}

impl FocusDuration {
    pub const ALL: [FocusDuration; 3] = [Self::Five, Self::Fifteen, Self::TwentyFive];

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            5 => Some(Self::Five),
            15 => Some(Self::Fifteen),
            25 => Some(Self::TwentyFive),
            _ => None,
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Fifteen => 15,
            Self::TwentyFive => 25,
        }
    }

    pub fn target_seconds(self) -> u32 {
        self.minutes() * 60
    }

    /// Two points per focused minute.
    pub fn award_points(self) -> u32 {
        self.minutes() * 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStep {
    SelectDuration,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusFlow {
    step: FocusStep,
    duration: FocusDuration,
    elapsed_seconds: u32,
}

impl Default for FocusFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusFlow {
    pub fn new() -> Self {
        Self {
            step: FocusStep::SelectDuration,
            duration: FocusDuration::default(),
            elapsed_seconds: 0,
        }
    }

    pub fn step(&self) -> FocusStep {
        self.step
    }

    pub fn duration(&self) -> FocusDuration {
        self.duration
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn select_duration(&mut self, duration: FocusDuration) -> FlowResult<()> {
        if self.step != FocusStep::SelectDuration {
            return Err(FlowError::InvalidState {
                flow: PlantType::Focus,
                action: "select_duration",
            });
        }
        self.duration = duration;
        Ok(())
    }

    pub fn start(&mut self) -> FlowResult<()> {
        if self.step != FocusStep::SelectDuration {
            return Err(FlowError::InvalidState {
                flow: PlantType::Focus,
                action: "start",
            });
        }
        self.step = FocusStep::Running;
        self.elapsed_seconds = 0;
        Ok(())
    }

    /// Counts one elapsed second, clamped at the target.
    pub fn tick(&mut self) -> TickControl {
        if self.step != FocusStep::Running {
            return TickControl::Stop;
        }
        let target = self.duration.target_seconds();
        self.elapsed_seconds = (self.elapsed_seconds + 1).min(target);
        if self.elapsed_seconds >= target {
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    }

    /// Elapsed time as `m:ss`.
    pub fn clock_label(&self) -> String {
        format!(
            "{}:{:02}",
            self.elapsed_seconds / 60,
            self.elapsed_seconds % 60
        )
    }

    pub fn progress_percent(&self) -> u32 {
        self.elapsed_seconds * 100 / self.duration.target_seconds()
    }

    pub fn can_complete(&self) -> bool {
        self.step == FocusStep::Running
            && self.elapsed_seconds >= self.duration.target_seconds()
    }

    pub fn complete(&self) -> FlowResult<Award> {
        if !self.can_complete() {
            return Err(FlowError::NotReady(PlantType::Focus));
        }
        Ok(Award {
            plant_id: PlantId::FocusFern,
            points: self.duration.award_points(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
