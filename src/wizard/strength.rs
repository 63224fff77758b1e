//! Strength wizard: basic → program → review.

use chrono::Utc;
use uuid::Uuid;

use super::state::{WizardDraft, WizardStep};
use crate::devices::Equipment;
use crate::domains::StrengthProfile;
use crate::domains::strength::{ExperienceLevel, StrengthFocus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthStep {
    Basic,
    Program,
    Review,
}

impl WizardStep for StrengthStep {
    const STEPS: &'static [Self] = &[Self::Basic, Self::Program, Self::Review];
}

impl std::fmt::Display for StrengthStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Basic => "basic",
            Self::Program => "program",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrengthDraft {
    pub experience: Option<ExperienceLevel>,
    pub training_days_per_week: Option<u32>,
    pub focus: Option<StrengthFocus>,
    pub session_minutes: Option<u32>,
    /// From the equipment step; empty means bodyweight only.
    pub equipment: Vec<Equipment>,
}

impl StrengthDraft {
    pub fn with_equipment(equipment: &[Equipment]) -> Self {
        Self {
            training_days_per_week: Some(3),
            equipment: equipment.to_vec(),
            ..Self::default()
        }
    }
}

impl WizardDraft for StrengthDraft {
    type Step = StrengthStep;
    type Profile = StrengthProfile;

    fn is_step_complete(&self, step: StrengthStep) -> bool {
        match step {
            StrengthStep::Basic => {
                self.experience.is_some()
                    && self
                        .training_days_per_week
                        .is_some_and(|d| (1..=7).contains(&d))
            }
            StrengthStep::Program => {
                self.focus.is_some() && self.session_minutes.is_some_and(|m| m > 0)
            }
            StrengthStep::Review => true,
        }
    }

    fn derive(&self) -> Option<StrengthProfile> {
        let experience = self.experience?;
        let focus = self.focus?;
        Some(StrengthProfile {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            experience,
            focus,
            training_days_per_week: self.training_days_per_week?,
            session_minutes: self.session_minutes?,
            equipment: self.equipment.clone(),
            scheme: focus.scheme(experience),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    #[test]
    fn days_outside_week_are_invalid() {
        let mut draft = StrengthDraft::with_equipment(&[]);
        draft.experience = Some(ExperienceLevel::Beginner);
        assert!(draft.is_step_complete(StrengthStep::Basic));
        draft.training_days_per_week = Some(8);
        assert!(!draft.is_step_complete(StrengthStep::Basic));
    }

    #[test]
    fn focus_drives_scheme() {
        let mut wizard = Wizard::new(StrengthDraft::with_equipment(&[Equipment::Dumbbells]));
        wizard.draft_mut().experience = Some(ExperienceLevel::Intermediate);
        wizard.advance().unwrap();
        wizard.draft_mut().focus = Some(StrengthFocus::Hypertrophy);
        wizard.draft_mut().session_minutes = Some(45);
        wizard.advance().unwrap();

        let profile = wizard.commit().unwrap();
        assert_eq!(profile.scheme.sets, 4);
        assert_eq!(profile.equipment, vec![Equipment::Dumbbells]);
        assert_eq!(profile.goal_target().value, 3.0);
    }
}
