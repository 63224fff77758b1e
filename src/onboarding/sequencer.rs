//! Setup sequencer: picks the next domain to configure and which sub-step
//! (pairing or wizard) to show for it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::devices::{DeviceCandidate, DeviceKind, PairingOutcome};
use crate::goals::GoalType;

/// Fixed order in which pending domains are set up.
pub const PRIORITY_CHAIN: [GoalType; 5] = [
    GoalType::WeightLoss,
    GoalType::CardioEndurance,
    GoalType::StrengthBuilding,
    GoalType::SleepTracking,
    GoalType::DailySteps,
];

/// What the goal-setup screen shows next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SetupStep {
    /// Device or equipment selection for the pending domain.
    Pairing { goal_type: GoalType },
    /// The pending domain's wizard, given the pairing outcome (if the domain
    /// has a pairing step).
    Wizard {
        goal_type: GoalType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pairing: Option<PairingOutcome>,
    },
    /// Nothing pending; go to the main screen.
    Done,
}

impl SetupStep {
    pub fn goal_type(&self) -> Option<GoalType> {
        match self {
            Self::Pairing { goal_type } | Self::Wizard { goal_type, .. } => Some(*goal_type),
            Self::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// The first selected domain, in priority order, with no completed profile.
pub fn pending_domain(selected: &[GoalType], configured: &[GoalType]) -> Option<GoalType> {
    PRIORITY_CHAIN
        .into_iter()
        .find(|g| selected.contains(g) && !configured.contains(g))
}

/// Session-scoped pairing outcomes, keyed by domain. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct PairingSession {
    outcomes: HashMap<GoalType, PairingOutcome>,
}

impl PairingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pairing step's result. A skip is recorded as an empty
    /// outcome and still counts as a selection made.
    pub fn record(&mut self, goal_type: GoalType, outcome: PairingOutcome) {
        self.outcomes.insert(goal_type, outcome);
    }

    pub fn get(&self, goal_type: GoalType) -> Option<&PairingOutcome> {
        self.outcomes.get(&goal_type)
    }

    pub fn take(&mut self, goal_type: GoalType) -> Option<PairingOutcome> {
        self.outcomes.remove(&goal_type)
    }

    pub fn has_selection(&self, goal_type: GoalType) -> bool {
        self.outcomes.contains_key(&goal_type)
    }
}

/// Decide the next setup step.
pub fn next_step(
    selected: &[GoalType],
    configured: &[GoalType],
    session: &PairingSession,
) -> SetupStep {
    let Some(goal_type) = pending_domain(selected, configured) else {
        return SetupStep::Done;
    };
    if !goal_type.requires_pairing() {
        return SetupStep::Wizard {
            goal_type,
            pairing: None,
        };
    }
    match session.get(goal_type) {
        Some(outcome) => SetupStep::Wizard {
            goal_type,
            pairing: Some(outcome.clone()),
        },
        None => SetupStep::Pairing { goal_type },
    }
}

/// Devices offered on a domain's pairing screen. Strength offers equipment
/// instead, so it has no device candidates.
pub fn pairing_candidates(goal_type: GoalType) -> Vec<DeviceCandidate> {
    match goal_type {
        GoalType::CardioEndurance => vec![
            DeviceCandidate::new("Polar H10", DeviceKind::ChestStrap),
            DeviceCandidate::new("Garmin Forerunner", DeviceKind::Smartwatch),
            DeviceCandidate::new("Apple Watch", DeviceKind::Smartwatch),
        ],
        GoalType::SleepTracking => vec![
            DeviceCandidate::new("Oura Ring", DeviceKind::SmartRing),
            DeviceCandidate::new("Withings Sleep", DeviceKind::SleepSensor),
            DeviceCandidate::new("Fitbit Sense", DeviceKind::Smartwatch),
        ],
        GoalType::DailySteps => vec![
            DeviceCandidate::new("Phone pedometer", DeviceKind::Phone),
            DeviceCandidate::new("Fitbit Charge", DeviceKind::FitnessBand),
            DeviceCandidate::new("Apple Watch", DeviceKind::Smartwatch),
        ],
        GoalType::WeightLoss => vec![DeviceCandidate::new("Smart scale", DeviceKind::SmartScale)],
        GoalType::StrengthBuilding | GoalType::WorkoutConsistency => Vec::new(),
    }
}
