//! Cardio wizard: basic → zones → review.

use chrono::Utc;
use uuid::Uuid;

use super::state::{WizardDraft, WizardStep};
use crate::derive::{karvonen_zones, max_hr_for_age};
use crate::devices::{ConnectedDevice, TrackingSource};
use crate::domains::CardioProfile;
use crate::domains::cardio::{CardioActivity, FitnessLevel};
use crate::goals::GoalType;
use crate::onboarding::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardioStep {
    Basic,
    Zones,
    Review,
}

impl WizardStep for CardioStep {
    const STEPS: &'static [Self] = &[Self::Basic, Self::Zones, Self::Review];
}

impl std::fmt::Display for CardioStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Basic => "basic",
            Self::Zones => "zones",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardioDraft {
    pub age: Option<u32>,
    pub resting_hr: Option<u32>,
    /// Measured max HR. Left empty, `220 - age` is used.
    pub max_hr: Option<u32>,
    pub fitness_level: Option<FitnessLevel>,
    pub preferred_activities: Vec<CardioActivity>,
    pub weekly_minutes_target: Option<u32>,
    /// Paired on the previous step; empty means manual logging.
    pub devices: Vec<ConnectedDevice>,
}

impl CardioDraft {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            age: Some(user.age),
            weekly_minutes_target: Some(GoalType::CardioEndurance.defaults().target_value as u32),
            ..Self::default()
        }
    }

    pub fn with_devices(mut self, devices: &[ConnectedDevice]) -> Self {
        self.devices = devices.to_vec();
        self
    }

    /// Max HR the zones are computed from.
    pub fn effective_max_hr(&self) -> Option<u32> {
        self.max_hr
            .filter(|hr| *hr > 0)
            .or_else(|| self.age.map(max_hr_for_age))
    }
}

impl WizardDraft for CardioDraft {
    type Step = CardioStep;
    type Profile = CardioProfile;

    fn is_step_complete(&self, step: CardioStep) -> bool {
        match step {
            CardioStep::Basic => {
                self.age.is_some_and(|a| a > 0)
                    && self.resting_hr.is_some_and(|hr| hr > 0)
                    && self.fitness_level.is_some()
            }
            CardioStep::Zones => {
                let below_max = match (self.resting_hr, self.effective_max_hr()) {
                    (Some(resting), Some(max)) => resting < max,
                    _ => false,
                };
                below_max && self.weekly_minutes_target.is_some_and(|m| m > 0)
            }
            CardioStep::Review => true,
        }
    }

    fn derive(&self) -> Option<CardioProfile> {
        let age = self.age?;
        let resting_hr = self.resting_hr?;
        let max_hr = self.effective_max_hr()?;
        let zones = karvonen_zones(resting_hr, max_hr)?;

        Some(CardioProfile {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            age,
            resting_hr,
            max_hr,
            max_hr_estimated: self.max_hr.filter(|hr| *hr > 0).is_none(),
            fitness_level: self.fitness_level?,
            preferred_activities: self.preferred_activities.clone(),
            weekly_minutes_target: self.weekly_minutes_target?,
            zones,
            tracking: TrackingSource::from_devices(&self.devices),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{Gender, HeightUnit, WeightUnit};
    use crate::wizard::Wizard;

    fn user() -> UserProfile {
        UserProfile::new(80.0, WeightUnit::Kg, 180.0, HeightUnit::Cm, 40, Gender::Male)
    }

    #[test]
    fn max_hr_defaults_from_age() {
        let draft = CardioDraft::from_user(&user());
        assert_eq!(draft.effective_max_hr(), Some(180));
        assert_eq!(draft.weekly_minutes_target, Some(150));
    }

    #[test]
    fn resting_above_max_blocks_zones_step() {
        let draft = CardioDraft {
            resting_hr: Some(185),
            fitness_level: Some(FitnessLevel::Advanced),
            ..CardioDraft::from_user(&user())
        };
        assert!(draft.is_step_complete(CardioStep::Basic));
        assert!(!draft.is_step_complete(CardioStep::Zones));
    }

    #[test]
    fn commit_derives_five_contiguous_zones() {
        let mut wizard = Wizard::new(CardioDraft {
            resting_hr: Some(60),
            fitness_level: Some(FitnessLevel::Intermediate),
            preferred_activities: vec![CardioActivity::Running],
            ..CardioDraft::from_user(&user())
        });
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        let profile = wizard.commit().unwrap();
        assert!(profile.max_hr_estimated);
        assert_eq!(profile.zones.len(), 5);
        assert_eq!(profile.zones[0].min, 60.0);
        assert_eq!(profile.zones[4].max, 180.0);
        for pair in profile.zones.windows(2) {
            assert_eq!(pair[0].max, pair[1].min);
        }
    }

    #[test]
    fn measured_max_hr_wins() {
        let draft = CardioDraft {
            resting_hr: Some(55),
            max_hr: Some(192),
            fitness_level: Some(FitnessLevel::Advanced),
            ..CardioDraft::from_user(&user())
        };
        let profile = draft.derive().unwrap();
        assert_eq!(profile.max_hr, 192);
        assert!(!profile.max_hr_estimated);
    }
}
