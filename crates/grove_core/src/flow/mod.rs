//! Guided activity flows and the prompt session that drives them.
//!
//! # Responsibility
//! - Model breathing, focus and creative activities as small state machines.
//! - Turn a finished activity into an `Award` for the matching plant.
//!
//! # Invariants
//! - Flows never clamp points; the store owns the ceiling.
//! - A flow's ticker is cancelled before its state is reset.

pub mod breathing;
pub mod creative;
pub mod focus;
pub mod session;
pub mod ticker;

use crate::model::plant::{PlantId, PlantType};
use breathing::BreathingFlow;
use creative::CreativeFlow;
use focus::FocusFlow;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FlowResult<T> = Result<T, FlowError>;

/// Flow input errors raised by UI callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Completion requested before the activity is finished.
    NotReady(PlantType),
    /// Action does not apply to the flow or its current step.
    InvalidState {
        flow: PlantType,
        action: &'static str,
    },
    /// Session already completed or closed.
    Closed,
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady(flow) => write!(f, "{flow} activity is not finished yet"),
            Self::InvalidState { flow, action } => {
                write!(f, "`{action}` is not available in the {flow} activity right now")
            }
            Self::Closed => write!(f, "activity session is already closed"),
        }
    }
}

impl Error for FlowError {}

/// Points earned by finishing an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub plant_id: PlantId,
    pub points: u32,
}

/// One of the three activity flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityFlow {
    Breathing(BreathingFlow),
    Focus(FocusFlow),
    Creative(CreativeFlow),
}

impl ActivityFlow {
    /// Fresh flow for the activity that grows `kind`.
    pub fn for_type(kind: PlantType) -> Self {
        match kind {
            PlantType::Calm => Self::Breathing(BreathingFlow::new()),
            PlantType::Focus => Self::Focus(FocusFlow::new()),
            PlantType::Creative => Self::Creative(CreativeFlow::new()),
        }
    }

    pub fn plant_type(&self) -> PlantType {
        match self {
            Self::Breathing(_) => PlantType::Calm,
            Self::Focus(_) => PlantType::Focus,
            Self::Creative(_) => PlantType::Creative,
        }
    }

    pub fn can_complete(&self) -> bool {
        match self {
            Self::Breathing(flow) => flow.can_complete(),
            Self::Focus(flow) => flow.can_complete(),
            Self::Creative(flow) => flow.can_complete(),
        }
    }

    pub fn complete(&self) -> FlowResult<Award> {
        match self {
            Self::Breathing(flow) => flow.complete(),
            Self::Focus(flow) => flow.complete(),
            Self::Creative(flow) => flow.complete(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Breathing(flow) => flow.reset(),
            Self::Focus(flow) => flow.reset(),
            Self::Creative(flow) => flow.reset(),
        }
    }
}
