//! Steps wizard: basic → review.

use chrono::Utc;
use uuid::Uuid;

use super::state::{WizardDraft, WizardStep};
use crate::derive::step_targets;
use crate::devices::{ConnectedDevice, TrackingSource};
use crate::domains::StepsProfile;
use crate::goals::GoalType;
use crate::onboarding::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepsStep {
    Basic,
    Review,
}

impl WizardStep for StepsStep {
    const STEPS: &'static [Self] = &[Self::Basic, Self::Review];
}

impl std::fmt::Display for StepsStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Review => write!(f, "review"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepsDraft {
    pub daily_step_goal: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub stride_override_cm: Option<f64>,
    pub devices: Vec<ConnectedDevice>,
}

impl StepsDraft {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            daily_step_goal: Some(GoalType::DailySteps.defaults().target_value as u32),
            height_cm: Some(user.height_cm()),
            weight_kg: Some(user.weight_kg()),
            stride_override_cm: None,
            devices: Vec::new(),
        }
    }

    pub fn with_devices(mut self, devices: &[ConnectedDevice]) -> Self {
        self.devices = devices.to_vec();
        self
    }
}

impl WizardDraft for StepsDraft {
    type Step = StepsStep;
    type Profile = StepsProfile;

    fn is_step_complete(&self, step: StepsStep) -> bool {
        match step {
            StepsStep::Basic => {
                self.daily_step_goal.is_some_and(|s| s > 0)
                    && self.height_cm.is_some_and(|h| h > 0.0)
                    && self.weight_kg.is_some_and(|w| w > 0.0)
                    && self.stride_override_cm.is_none_or(|s| s > 0.0)
            }
            StepsStep::Review => true,
        }
    }

    fn derive(&self) -> Option<StepsProfile> {
        let daily_step_goal = self.daily_step_goal?;
        let height_cm = self.height_cm?;
        let weight_kg = self.weight_kg?;
        Some(StepsProfile {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            daily_step_goal,
            height_cm,
            weight_kg,
            stride_override_cm: self.stride_override_cm,
            targets: step_targets(daily_step_goal, height_cm, weight_kg, self.stride_override_cm),
            tracking: TrackingSource::from_devices(&self.devices),
        })
    }
}
