//! Activity dialog projection.

use crate::flow::breathing::{BreathingFlow, BreathingStep, BREATHING_AWARD};
use crate::flow::creative::CreativeFlow;
use crate::flow::focus::{FocusFlow, FocusStep};
use crate::flow::ActivityFlow;
use crate::model::plant::PlantType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub kind: PlantType,
    pub title: &'static str,
    /// Large status line: breath phase, focus clock, or heading.
    pub headline: String,
    /// Secondary line: cycle counter, guidance text.
    pub detail: String,
    /// `None` when the step shows no progress bar.
    pub progress_percent: Option<u32>,
    /// Label of the primary action for the current step.
    pub action_label: String,
    pub action_enabled: bool,
    /// Whether the primary action completes the activity.
    pub action_completes: bool,
}

pub fn session_title(kind: PlantType) -> &'static str {
    match kind {
        PlantType::Calm => "Calm Lily Session",
        PlantType::Focus => "Focus Fern Session",
        PlantType::Creative => "Creative Cactus Session",
    }
}

impl PromptView {
    pub fn build(flow: &ActivityFlow) -> Self {
        match flow {
            ActivityFlow::Breathing(flow) => breathing_view(flow),
            ActivityFlow::Focus(flow) => focus_view(flow),
            ActivityFlow::Creative(flow) => creative_view(flow),
        }
    }
}

fn breathing_view(flow: &BreathingFlow) -> PromptView {
    let kind = PlantType::Calm;
    match flow.step() {
        BreathingStep::Intro => PromptView {
            kind,
            title: session_title(kind),
            headline: "Breathing Exercise".to_string(),
            detail: "Let's take a moment to breathe together. Follow the gentle rhythm and let your mind settle.".to_string(),
            progress_percent: None,
            action_label: "Begin Breathing".to_string(),
            action_enabled: true,
            action_completes: false,
        },
        BreathingStep::Active => PromptView {
            kind,
            title: session_title(kind),
            headline: flow.phase_text().to_string(),
            detail: flow.cycle_label(),
            progress_percent: Some(flow.progress_percent()),
            action_label: format!("Complete Session (+{BREATHING_AWARD} points)"),
            action_enabled: flow.can_complete(),
            action_completes: true,
        },
    }
}

fn focus_view(flow: &FocusFlow) -> PromptView {
    let kind = PlantType::Focus;
    match flow.step() {
        FocusStep::SelectDuration => PromptView {
            kind,
            title: session_title(kind),
            headline: "Focus Session".to_string(),
            detail: format!("{} minutes selected", flow.duration().minutes()),
            progress_percent: None,
            action_label: "Start Focus Session".to_string(),
            action_enabled: true,
            action_completes: false,
        },
        FocusStep::Running => PromptView {
            kind,
            title: session_title(kind),
            headline: flow.clock_label(),
            detail: "Keep your attention on one task".to_string(),
            progress_percent: Some(flow.progress_percent()),
            action_label: format!(
                "Complete Session (+{} points)",
                flow.duration().award_points()
            ),
            action_enabled: flow.can_complete(),
            action_completes: true,
        },
    }
}

fn creative_view(flow: &CreativeFlow) -> PromptView {
    let kind = PlantType::Creative;
    PromptView {
        kind,
        title: session_title(kind),
        headline: "Creative Expression".to_string(),
        detail: format!("{} characters", flow.char_count()),
        progress_percent: None,
        action_label: format!("Complete Expression (+{} points)", flow.award_preview()),
        action_enabled: flow.can_complete(),
        action_completes: true,
    }
}

#[cfg(test)]
mod tests {
    use super::PromptView;
    use crate::flow::ActivityFlow;
    use crate::model::plant::PlantType;

    #[test]
    fn breathing_intro_offers_begin() {
        let view = PromptView::build(&ActivityFlow::for_type(PlantType::Calm));
        assert_eq!(view.title, "Calm Lily Session");
        assert_eq!(view.action_label, "Begin Breathing");
        assert!(!view.action_completes);
    }

    #[test]
    fn running_focus_shows_clock_and_disabled_completion() {
        let mut flow = ActivityFlow::for_type(PlantType::Focus);
        if let ActivityFlow::Focus(focus) = &mut flow {
            focus.start().unwrap();
            focus.tick();
        }
        let view = PromptView::build(&flow);
        assert_eq!(view.headline, "0:01");
        assert_eq!(view.action_label, "Complete Session (+10 points)");
        assert!(!view.action_enabled);
    }

    #[test]
    fn creative_preview_shows_minimum_award_while_disabled() {
        let mut flow = ActivityFlow::for_type(PlantType::Creative);
        if let ActivityFlow::Creative(creative) = &mut flow {
            creative.set_text("abc");
        }
        let view = PromptView::build(&flow);
        assert_eq!(view.action_label, "Complete Expression (+10 points)");
        assert!(!view.action_enabled);
    }
}
