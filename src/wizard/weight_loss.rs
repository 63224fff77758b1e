//! Weight-loss wizard: basic → dietary → review.

use chrono::Utc;
use uuid::Uuid;

use super::state::{WizardDraft, WizardStep};
use crate::derive::{
    ActivityLevel, CalorieInputs, Gender, WeightUnit, calorie_target, distribute_meals,
};
use crate::domains::WeightLossProfile;
use crate::domains::weight_loss::DietaryPreference;
use crate::onboarding::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightLossStep {
    Basic,
    Dietary,
    Review,
}

impl WizardStep for WeightLossStep {
    const STEPS: &'static [Self] = &[Self::Basic, Self::Dietary, Self::Review];
}

impl std::fmt::Display for WeightLossStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Basic => "basic",
            Self::Dietary => "dietary",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// Values collected by the weight-loss wizard. Weights are in `weight_unit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightLossDraft {
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub weight_unit: WeightUnit,
    pub height_cm: Option<f64>,
    pub age: Option<u32>,
    pub gender: Gender,
    pub timeline_weeks: Option<u32>,
    pub activity_level: Option<ActivityLevel>,
    pub dietary_preference: Option<DietaryPreference>,
}

impl WeightLossDraft {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            current_weight: Some(user.weight),
            weight_unit: user.weight_unit,
            height_cm: Some(user.height_cm()),
            age: Some(user.age),
            gender: user.gender,
            ..Self::default()
        }
    }

    fn basic_complete(&self) -> bool {
        match (self.current_weight, self.target_weight) {
            (Some(current), Some(target)) => {
                target > 0.0
                    && target < current
                    && self.height_cm.is_some_and(|h| h > 0.0)
                    && self.age.is_some_and(|a| a > 0)
                    && self.timeline_weeks.is_some_and(|w| w > 0)
            }
            _ => false,
        }
    }
}

impl WizardDraft for WeightLossDraft {
    type Step = WeightLossStep;
    type Profile = WeightLossProfile;

    fn is_step_complete(&self, step: WeightLossStep) -> bool {
        match step {
            WeightLossStep::Basic => self.basic_complete(),
            WeightLossStep::Dietary => {
                self.activity_level.is_some() && self.dietary_preference.is_some()
            }
            WeightLossStep::Review => true,
        }
    }

    fn derive(&self) -> Option<WeightLossProfile> {
        let current_weight = self.current_weight?;
        let target_weight = self.target_weight?;
        let height_cm = self.height_cm?;
        let age = self.age?;
        let timeline_weeks = self.timeline_weeks?;
        let activity_level = self.activity_level?;

        let calorie_target = calorie_target(&CalorieInputs {
            current_weight_kg: self.weight_unit.to_kg(current_weight),
            target_weight_kg: self.weight_unit.to_kg(target_weight),
            height_cm,
            age,
            gender: self.gender,
            activity_level,
            timeline_weeks,
        });
        let meals = distribute_meals(calorie_target.daily_calories);

        Some(WeightLossProfile {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            current_weight,
            target_weight,
            weight_unit: self.weight_unit,
            height_cm,
            age,
            gender: self.gender,
            activity_level,
            timeline_weeks,
            dietary_preference: self.dietary_preference.unwrap_or_default(),
            calorie_target,
            meals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::HeightUnit;
    use crate::wizard::Wizard;

    fn user() -> UserProfile {
        UserProfile::new(70.0, WeightUnit::Kg, 165.0, HeightUnit::Cm, 25, Gender::Female)
    }

    fn filled() -> WeightLossDraft {
        WeightLossDraft {
            target_weight: Some(65.0),
            timeline_weeks: Some(12),
            activity_level: Some(ActivityLevel::ModeratelyActive),
            dietary_preference: Some(DietaryPreference::Vegetarian),
            ..WeightLossDraft::from_user(&user())
        }
    }

    #[test]
    fn prefilled_from_user_profile() {
        let draft = WeightLossDraft::from_user(&user());
        assert_eq!(draft.current_weight, Some(70.0));
        assert_eq!(draft.height_cm, Some(165.0));
        assert_eq!(draft.gender, Gender::Female);
        // Target and timeline are still missing.
        assert!(!draft.is_step_complete(WeightLossStep::Basic));
    }

    #[test]
    fn target_must_be_below_current() {
        let mut draft = filled();
        draft.target_weight = Some(75.0);
        assert!(!draft.is_step_complete(WeightLossStep::Basic));
    }

    #[test]
    fn review_shows_realistic_budget() {
        let mut wizard = Wizard::new(filled());
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        let profile = wizard.commit().unwrap();
        assert!(profile.calorie_target.daily_calories >= 1200.0);
        assert!(profile.calorie_target.weekly_loss_rate <= 2.0);
        assert!(profile.calorie_target.is_realistic);
        assert_eq!(profile.dietary_preference, DietaryPreference::Vegetarian);
        assert_eq!(profile.goal_target().value, 65.0);
        assert_eq!(profile.goal_target().starting_value, 70.0);
    }

    #[test]
    fn pounds_are_converted_for_the_formula() {
        let kg = filled().derive().unwrap();
        let lbs = WeightLossDraft {
            current_weight: Some(WeightUnit::Lbs.from_kg(70.0)),
            target_weight: Some(WeightUnit::Lbs.from_kg(65.0)),
            weight_unit: WeightUnit::Lbs,
            ..filled()
        }
        .derive()
        .unwrap();
        assert_eq!(
            kg.calorie_target.daily_calories,
            lbs.calorie_target.daily_calories
        );
    }
}
