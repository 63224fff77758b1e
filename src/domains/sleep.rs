//! Sleep domain: schedule profile and nightly entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::devices::{ConnectedDevice, TrackingSource};
use crate::goals::{GoalTarget, GoalType};
use crate::store::ContainerState;

/// Completed sleep setup. Times are `HH:MM` with no date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepProfile {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub bedtime: String,
    pub target_hours: f64,
    pub wake_time: String,
    /// The wake time falls on the day after the bedtime.
    pub wake_next_day: bool,
    #[serde(default)]
    pub wind_down_minutes: u32,
    #[serde(default)]
    pub smart_alarm: bool,
    #[serde(default)]
    pub tracking: TrackingSource,
}

impl SleepProfile {
    pub fn goal_target(&self) -> GoalTarget {
        GoalTarget {
            value: self.target_hours,
            timeframe_weeks: GoalType::SleepTracking.defaults().timeframe_weeks,
            starting_value: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub id: Uuid,
    /// Night of (the date the user went to bed).
    pub date: NaiveDate,
    pub bedtime: String,
    pub wake_time: String,
    pub hours: f64,
    /// 1..=5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

/// Persisted sleep container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepState {
    #[serde(default)]
    pub profile: Option<SleepProfile>,
    #[serde(default)]
    pub entries: Vec<SleepEntry>,
    #[serde(default)]
    pub devices: Vec<ConnectedDevice>,
}

impl ContainerState for SleepState {
    const KEY: &'static str = "sleep";
}
