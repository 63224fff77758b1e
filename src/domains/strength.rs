//! Strength domain: training program profile and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cardio::WorkoutSession;
use crate::devices::Equipment;
use crate::goals::{GoalTarget, GoalType};
use crate::store::ContainerState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthFocus {
    #[default]
    Strength,
    Hypertrophy,
    Endurance,
}

/// Sets, rep range, and rest for a focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScheme {
    pub sets: u32,
    pub reps_min: u32,
    pub reps_max: u32,
    pub rest_seconds: u32,
}

impl StrengthFocus {
    /// Base scheme; beginners drop one set.
    pub fn scheme(&self, experience: ExperienceLevel) -> SetScheme {
        let base = match self {
            Self::Strength => SetScheme {
                sets: 5,
                reps_min: 3,
                reps_max: 5,
                rest_seconds: 180,
            },
            Self::Hypertrophy => SetScheme {
                sets: 4,
                reps_min: 8,
                reps_max: 12,
                rest_seconds: 90,
            },
            Self::Endurance => SetScheme {
                sets: 3,
                reps_min: 15,
                reps_max: 20,
                rest_seconds: 45,
            },
        };
        match experience {
            ExperienceLevel::Beginner => SetScheme {
                sets: base.sets - 1,
                ..base
            },
            _ => base,
        }
    }
}

/// Completed strength setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthProfile {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub experience: ExperienceLevel,
    pub focus: StrengthFocus,
    pub training_days_per_week: u32,
    pub session_minutes: u32,
    pub equipment: Vec<Equipment>,
    pub scheme: SetScheme,
}

impl StrengthProfile {
    pub fn goal_target(&self) -> GoalTarget {
        GoalTarget {
            value: f64::from(self.training_days_per_week),
            timeframe_weeks: GoalType::StrengthBuilding.defaults().timeframe_weeks,
            starting_value: 0.0,
        }
    }
}

/// Persisted strength container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrengthState {
    #[serde(default)]
    pub profile: Option<StrengthProfile>,
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

impl ContainerState for StrengthState {
    const KEY: &'static str = "strength";
}
