//! Cardio domain: profile with heart-rate zones and workout sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::derive::HeartRateZone;
use crate::devices::{ConnectedDevice, TrackingSource};
use crate::goals::{GoalTarget, GoalType};
use crate::store::ContainerState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardioActivity {
    Running,
    Cycling,
    Swimming,
    Rowing,
    Walking,
    Hiit,
}

/// Completed cardio setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioProfile {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub age: u32,
    pub resting_hr: u32,
    pub max_hr: u32,
    /// `max_hr` came from `220 - age` rather than user input.
    pub max_hr_estimated: bool,
    pub fitness_level: FitnessLevel,
    pub preferred_activities: Vec<CardioActivity>,
    pub weekly_minutes_target: u32,
    pub zones: Vec<HeartRateZone>,
    #[serde(default)]
    pub tracking: TrackingSource,
}

impl CardioProfile {
    pub fn goal_target(&self) -> GoalTarget {
        GoalTarget {
            value: f64::from(self.weekly_minutes_target),
            timeframe_weeks: GoalType::CardioEndurance.defaults().timeframe_weeks,
            starting_value: 0.0,
        }
    }
}

/// A logged training session (cardio or strength).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub activity: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_hr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

impl WorkoutSession {
    pub fn new(activity: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            activity: activity.into(),
            duration_minutes,
            avg_hr: None,
            calories: None,
        }
    }

    pub fn with_avg_hr(mut self, bpm: f64) -> Self {
        self.avg_hr = Some(bpm);
        self
    }
}

/// Persisted cardio container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardioState {
    #[serde(default)]
    pub profile: Option<CardioProfile>,
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
    #[serde(default)]
    pub devices: Vec<ConnectedDevice>,
}

impl ContainerState for CardioState {
    const KEY: &'static str = "cardio";
}
