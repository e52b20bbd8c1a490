//! Guided breathing flow for the calm plant.
//!
//! # Invariants
//! - Ticks only count while the flow is active, and never past
//!   `BREATH_PHASES`.
//! - Completion is available exactly when all phases are done.

use crate::flow::ticker::TickControl;
use crate::flow::{Award, FlowError, FlowResult};
use crate::model::plant::{PlantId, PlantType};
use std::time::Duration;

/// Time between breath phase changes.
pub const BREATH_PHASE_PERIOD: Duration = Duration::from_secs(2);
/// Alternating in/out phases per session (five full breaths).
pub const BREATH_PHASES: u32 = 10;
/// Flat award for a completed session.
pub const BREATHING_AWARD: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingStep {
    Intro,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathingFlow {
    step: BreathingStep,
    breath_count: u32,
}

impl Default for BreathingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingFlow {
    pub fn new() -> Self {
        Self {
            step: BreathingStep::Intro,
            breath_count: 0,
        }
    }

    pub fn step(&self) -> BreathingStep {
        self.step
    }

    pub fn breath_count(&self) -> u32 {
        self.breath_count
    }

    /// Leaves the intro and starts counting phases.
    pub fn begin(&mut self) -> FlowResult<()> {
        if self.step != BreathingStep::Intro {
            return Err(FlowError::InvalidState {
                flow: PlantType::Calm,
                action: "begin",
            });
        }
        self.step = BreathingStep::Active;
        Ok(())
    }

    /// Advances one breath phase.
    pub fn tick(&mut self) -> TickControl {
        if self.step != BreathingStep::Active {
            return TickControl::Stop;
        }
        if self.breath_count < BREATH_PHASES {
            self.breath_count += 1;
        }
        if self.breath_count >= BREATH_PHASES {
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    }

    pub fn is_inhale(&self) -> bool {
        self.breath_count % 2 == 0
    }

    pub fn phase_text(&self) -> &'static str {
        if self.is_inhale() {
            "Breathe In..."
        } else {
            "Breathe Out..."
        }
    }

    /// Current breath out of five, e.g. `3/5`.
    pub fn cycle_label(&self) -> String {
        let cycles = BREATH_PHASES / 2;
        let current = (self.breath_count / 2 + 1).min(cycles);
        format!("{current}/{cycles}")
    }

    pub fn progress_percent(&self) -> u32 {
        self.breath_count * 100 / BREATH_PHASES
    }

    pub fn can_complete(&self) -> bool {
        self.step == BreathingStep::Active && self.breath_count >= BREATH_PHASES
    }

    pub fn complete(&self) -> FlowResult<Award> {
        if !self.can_complete() {
            return Err(FlowError::NotReady(PlantType::Calm));
        }
        Ok(Award {
            plant_id: PlantId::CalmLily,
            points: BREATHING_AWARD,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::{BreathingFlow, BreathingStep, BREATHING_AWARD};
    use crate::flow::ticker::TickControl;
    use crate::flow::FlowError;
    use crate::model::plant::PlantId;

    #[test]
    fn ticks_before_begin_are_ignored() {
        let mut flow = BreathingFlow::new();
        assert_eq!(flow.tick(), TickControl::Stop);
        assert_eq!(flow.breath_count(), 0);
    }

    #[test]
    fn requires_exactly_ten_ticks() {
        let mut flow = BreathingFlow::new();
        flow.begin().unwrap();
        for _ in 0..9 {
            assert_eq!(flow.tick(), TickControl::Continue);
        }
        assert!(!flow.can_complete());
        assert!(matches!(flow.complete(), Err(FlowError::NotReady(_))));

        assert_eq!(flow.tick(), TickControl::Stop);
        let award = flow.complete().unwrap();
        assert_eq!(award.plant_id, PlantId::CalmLily);
        assert_eq!(award.points, BREATHING_AWARD);

        flow.tick();
        assert_eq!(flow.breath_count(), 10);
    }

    #[test]
    fn phase_text_alternates_and_cycle_label_caps() {
        let mut flow = BreathingFlow::new();
        flow.begin().unwrap();
        assert_eq!(flow.phase_text(), "Breathe In...");
        assert_eq!(flow.cycle_label(), "1/5");
        flow.tick();
        assert_eq!(flow.phase_text(), "Breathe Out...");
        for _ in 0..9 {
            flow.tick();
        }
        assert_eq!(flow.cycle_label(), "5/5");
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn begin_twice_is_rejected_and_reset_clears() {
        let mut flow = BreathingFlow::new();
        flow.begin().unwrap();
        assert!(flow.begin().is_err());
        flow.tick();
        flow.reset();
        assert_eq!(flow.step(), BreathingStep::Intro);
        assert_eq!(flow.breath_count(), 0);
    }
}
