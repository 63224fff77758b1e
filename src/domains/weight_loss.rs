//! Weight-loss domain: profile, meal log, and weigh-ins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::derive::{ActivityLevel, CalorieTarget, Gender, MealDistribution, WeightUnit};
use crate::devices::ConnectedDevice;
use crate::food::FoodItem;
use crate::goals::GoalTarget;
use crate::store::ContainerState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    #[default]
    None,
    Vegetarian,
    Vegan,
    Pescatarian,
    LowCarb,
    Keto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Completed weight-loss setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLossProfile {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// In `weight_unit`.
    pub current_weight: f64,
    /// In `weight_unit`.
    pub target_weight: f64,
    pub weight_unit: WeightUnit,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub timeline_weeks: u32,
    #[serde(default)]
    pub dietary_preference: DietaryPreference,
    pub calorie_target: CalorieTarget,
    pub meals: MealDistribution,
}

impl WeightLossProfile {
    pub fn goal_target(&self) -> GoalTarget {
        GoalTarget {
            value: self.target_weight,
            timeframe_weeks: self.timeline_weeks,
            starting_value: self.current_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLog {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub slot: MealSlot,
    pub items: Vec<FoodItem>,
    pub calories: f64,
}

impl MealLog {
    pub fn new(slot: MealSlot, items: Vec<FoodItem>) -> Self {
        let calories = items.iter().map(|i| i.calories).sum();
        Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            slot,
            items,
            calories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighIn {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    /// In the profile's `weight_unit`.
    pub weight: f64,
}

/// Persisted weight-loss container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightLossState {
    #[serde(default)]
    pub profile: Option<WeightLossProfile>,
    #[serde(default)]
    pub meals: Vec<MealLog>,
    #[serde(default)]
    pub weigh_ins: Vec<WeighIn>,
    #[serde(default)]
    pub devices: Vec<ConnectedDevice>,
}

impl ContainerState for WeightLossState {
    const KEY: &'static str = "weight_loss";
}
