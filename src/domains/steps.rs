//! Steps domain: daily goal, stride-based targets, and daily counts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::derive::StepTargets;
use crate::devices::{ConnectedDevice, TrackingSource};
use crate::store::ContainerState;

/// Completed steps setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsProfile {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub daily_step_goal: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride_override_cm: Option<f64>,
    pub targets: StepTargets,
    #[serde(default)]
    pub tracking: TrackingSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub steps: u32,
    pub distance_km: f64,
    pub calories: f64,
}

/// Persisted steps container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepsState {
    #[serde(default)]
    pub profile: Option<StepsProfile>,
    #[serde(default)]
    pub entries: Vec<StepsEntry>,
    #[serde(default)]
    pub devices: Vec<ConnectedDevice>,
}

impl ContainerState for StepsState {
    const KEY: &'static str = "steps";
}
