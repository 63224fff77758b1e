//! Goal types, goal records, and the static per-type metadata table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The goal categories a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    CardioEndurance,
    StrengthBuilding,
    DailySteps,
    SleepTracking,
    WorkoutConsistency,
}

impl GoalType {
    /// Every goal type, in declaration order.
    pub const ALL: [GoalType; 6] = [
        GoalType::WeightLoss,
        GoalType::CardioEndurance,
        GoalType::StrengthBuilding,
        GoalType::DailySteps,
        GoalType::SleepTracking,
        GoalType::WorkoutConsistency,
    ];

    /// Whether this goal type has its own setup wizard and domain profile.
    pub fn has_wizard(&self) -> bool {
        !matches!(self, Self::WorkoutConsistency)
    }

    /// Whether setup starts with a device (or equipment) selection step.
    pub fn requires_pairing(&self) -> bool {
        matches!(
            self,
            Self::CardioEndurance | Self::StrengthBuilding | Self::SleepTracking | Self::DailySteps
        )
    }

    /// Static metadata used when creating a goal of this type.
    pub fn defaults(&self) -> GoalDefaults {
        match self {
            Self::WeightLoss => GoalDefaults {
                title: "Lose Weight",
                description: "Reach your target weight with a daily calorie budget",
                icon: "scale",
                target_value: 0.0,
                timeframe_weeks: 12,
            },
            Self::CardioEndurance => GoalDefaults {
                title: "Build Cardio Endurance",
                description: "Train in your heart-rate zones every week",
                icon: "heart",
                target_value: 150.0,
                timeframe_weeks: 12,
            },
            Self::StrengthBuilding => GoalDefaults {
                title: "Build Strength",
                description: "Follow a structured resistance program",
                icon: "dumbbell",
                target_value: 3.0,
                timeframe_weeks: 12,
            },
            Self::DailySteps => GoalDefaults {
                title: "Daily Steps",
                description: "Walk more every day",
                icon: "footprints",
                target_value: 10_000.0,
                timeframe_weeks: 8,
            },
            Self::SleepTracking => GoalDefaults {
                title: "Better Sleep",
                description: "Keep a consistent sleep schedule",
                icon: "moon",
                target_value: 8.0,
                timeframe_weeks: 4,
            },
            Self::WorkoutConsistency => GoalDefaults {
                title: "Workout Consistency",
                description: "Show up for your workouts every week",
                icon: "calendar",
                target_value: 4.0,
                timeframe_weeks: 8,
            },
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::WeightLoss => "weight_loss",
            Self::CardioEndurance => "cardio_endurance",
            Self::StrengthBuilding => "strength_building",
            Self::DailySteps => "daily_steps",
            Self::SleepTracking => "sleep_tracking",
            Self::WorkoutConsistency => "workout_consistency",
        };
        write!(f, "{s}")
    }
}

/// Per-type metadata for new goals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalDefaults {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub target_value: f64,
    pub timeframe_weeks: u32,
}

/// A user goal.
///
/// Among active goals `goal_type` is unique. Removed goals stay in the list
/// with `is_active == false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub goal_type: GoalType,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub target_value: f64,
    pub target_timeframe_weeks: u32,
    #[serde(default)]
    pub current_value: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a fresh active goal from the static metadata table.
    pub fn new(goal_type: GoalType) -> Self {
        let defaults = goal_type.defaults();
        Self {
            id: Uuid::new_v4(),
            goal_type,
            title: defaults.title.to_string(),
            description: defaults.description.to_string(),
            icon: defaults.icon.to_string(),
            target_value: defaults.target_value,
            target_timeframe_weeks: defaults.timeframe_weeks,
            current_value: 0.0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Override the target with user-customized values.
    pub fn with_target(mut self, target: GoalTarget) -> Self {
        self.target_value = target.value;
        self.target_timeframe_weeks = target.timeframe_weeks;
        self.current_value = target.starting_value;
        self
    }

    /// Fraction of the target reached, clamped to `[0, 1]`.
    ///
    /// Weight loss counts down from the starting weight, so progress there is
    /// measured by the caller; this is the plain ratio for count-up goals.
    pub fn progress(&self) -> f64 {
        if self.target_value <= 0.0 {
            return 0.0;
        }
        (self.current_value / self.target_value).clamp(0.0, 1.0)
    }
}

/// A customized target taken from a completed domain profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalTarget {
    pub value: f64,
    pub timeframe_weeks: u32,
    pub starting_value: f64,
}

/// Goal types of all active goals in `goals`.
pub fn active_types(goals: &[Goal]) -> Vec<GoalType> {
    goals
        .iter()
        .filter(|g| g.is_active)
        .map(|g| g.goal_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde() {
        for goal_type in GoalType::ALL {
            let display = format!("{goal_type}");
            let json = serde_json::to_string(&goal_type).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn only_workout_consistency_lacks_wizard() {
        let without: Vec<_> = GoalType::ALL.iter().filter(|g| !g.has_wizard()).collect();
        assert_eq!(without, vec![&GoalType::WorkoutConsistency]);
    }

    #[test]
    fn weight_loss_skips_pairing() {
        assert!(!GoalType::WeightLoss.requires_pairing());
        assert!(GoalType::CardioEndurance.requires_pairing());
        assert!(GoalType::StrengthBuilding.requires_pairing());
        assert!(GoalType::SleepTracking.requires_pairing());
        assert!(GoalType::DailySteps.requires_pairing());
    }

    #[test]
    fn new_goal_uses_defaults() {
        let goal = Goal::new(GoalType::DailySteps);
        assert!(goal.is_active);
        assert_eq!(goal.title, "Daily Steps");
        assert_eq!(goal.target_value, 10_000.0);
        assert_eq!(goal.current_value, 0.0);
    }

    #[test]
    fn with_target_overrides_defaults() {
        let goal = Goal::new(GoalType::WeightLoss).with_target(GoalTarget {
            value: 65.0,
            timeframe_weeks: 10,
            starting_value: 72.0,
        });
        assert_eq!(goal.target_value, 65.0);
        assert_eq!(goal.target_timeframe_weeks, 10);
        assert_eq!(goal.current_value, 72.0);
    }

    #[test]
    fn progress_is_clamped() {
        let mut goal = Goal::new(GoalType::DailySteps);
        goal.current_value = 12_000.0;
        assert_eq!(goal.progress(), 1.0);
        goal.current_value = 5_000.0;
        assert!((goal.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn active_types_ignores_inactive() {
        let mut removed = Goal::new(GoalType::SleepTracking);
        removed.is_active = false;
        let goals = vec![removed, Goal::new(GoalType::DailySteps)];
        assert_eq!(active_types(&goals), vec![GoalType::DailySteps]);
    }
}
