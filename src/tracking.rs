//! Daily tracking: per-domain log appends, goal progress, and the
//! `TodaySnapshot` handed to the coach.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::derive::sleep::{parse_clock, sleep_duration_hours};
use crate::derive::{step_targets, steps::default_stride_cm};
use crate::domains::weight_loss::WeighIn;
use crate::domains::{DomainStores, MealLog, MealSlot, SleepEntry, StepsEntry, WorkoutSession};
use crate::error::{Result, WizardError};
use crate::food::{FoodItem, FoodLookup, MealDecision};
use crate::goals::GoalType;
use crate::onboarding::AppState;
use crate::store::Container;

/// Height and weight used for step math when no steps profile exists.
const FALLBACK_HEIGHT_CM: f64 = 170.0;
const FALLBACK_WEIGHT_KG: f64 = 70.0;

/// Which training log a workout goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Cardio,
    Strength,
}

/// Today's numbers across every domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodaySnapshot {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_target: Option<f64>,
    pub meals_logged: usize,
    pub workout_minutes: u32,
    pub workouts: usize,
    pub steps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sleep_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_target_hours: Option<f64>,
}

/// Appends log entries to domain containers and keeps the matching active
/// goal's `current_value` in step.
pub struct Tracker {
    app: Arc<Container<AppState>>,
    domains: DomainStores,
    food: Arc<dyn FoodLookup>,
}

impl Tracker {
    pub fn new(
        app: Arc<Container<AppState>>,
        domains: DomainStores,
        food: Arc<dyn FoodLookup>,
    ) -> Self {
        Self { app, domains, food }
    }

    /// Interpret a spoken meal. Confident parses are logged right away;
    /// ambiguous ones come back for confirmation and nothing is written.
    pub async fn log_spoken_meal(&self, slot: MealSlot, text: &str) -> Result<MealDecision> {
        let parsed = self.food.parse_spoken_text(text).await;
        debug!(confidence = parsed.confidence, items = parsed.items.len(), "Meal parsed");
        let decision = MealDecision::from_parsed(parsed);
        if let MealDecision::Commit(items) = &decision {
            self.log_meal(slot, items.clone()).await?;
        }
        Ok(decision)
    }

    /// Log meal items the user entered or confirmed.
    pub async fn log_meal(&self, slot: MealSlot, items: Vec<FoodItem>) -> Result<MealLog> {
        if items.is_empty() {
            return Err(WizardError::StepIncomplete {
                step: "meal".to_string(),
            }
            .into());
        }
        let meal = MealLog::new(slot, items);
        self.domains
            .weight_loss
            .update(|s| s.meals.push(meal.clone()))
            .await?;
        info!(calories = meal.calories, slot = ?slot, "Meal logged");
        Ok(meal)
    }

    /// Record a weigh-in in the profile's weight unit.
    pub async fn log_weigh_in(&self, weight: f64) -> Result<WeighIn> {
        let entry = WeighIn {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            weight,
        };
        self.domains
            .weight_loss
            .update(|s| s.weigh_ins.push(entry.clone()))
            .await?;
        self.set_progress(GoalType::WeightLoss, weight).await?;
        info!(weight, "Weigh-in logged");
        Ok(entry)
    }

    pub async fn log_workout(&self, kind: WorkoutKind, session: WorkoutSession) -> Result<()> {
        let week = session.started_at.date_naive();
        let (goal_type, value) = match kind {
            WorkoutKind::Cardio => {
                let minutes = self
                    .domains
                    .cardio
                    .update(|s| {
                        s.sessions.push(session.clone());
                        minutes_in_week(&s.sessions, week)
                    })
                    .await?;
                (GoalType::CardioEndurance, f64::from(minutes))
            }
            WorkoutKind::Strength => {
                let count = self
                    .domains
                    .strength
                    .update(|s| {
                        s.sessions.push(session.clone());
                        sessions_in_week(&s.sessions, week)
                    })
                    .await?;
                (GoalType::StrengthBuilding, count as f64)
            }
        };
        self.set_progress(goal_type, value).await?;

        let total = self.workouts_in_week(week).await;
        self.set_progress(GoalType::WorkoutConsistency, total as f64)
            .await?;
        info!(kind = ?kind, minutes = session.duration_minutes, "Workout logged");
        Ok(())
    }

    /// Log a night's sleep. `date` is the night the user went to bed.
    pub async fn log_sleep(
        &self,
        date: NaiveDate,
        bedtime: &str,
        wake_time: &str,
        quality: Option<u8>,
    ) -> Result<SleepEntry> {
        let (Some(bed), Some(wake)) = (parse_clock(bedtime), parse_clock(wake_time)) else {
            return Err(WizardError::StepIncomplete {
                step: "sleep".to_string(),
            }
            .into());
        };
        let entry = SleepEntry {
            id: Uuid::new_v4(),
            date,
            bedtime: bedtime.trim().to_string(),
            wake_time: wake_time.trim().to_string(),
            hours: sleep_duration_hours(bed, wake),
            quality: quality.map(|q| q.clamp(1, 5)),
        };
        self.domains
            .sleep
            .update(|s| s.entries.push(entry.clone()))
            .await?;
        self.set_progress(GoalType::SleepTracking, entry.hours).await?;
        info!(hours = entry.hours, "Sleep logged");
        Ok(entry)
    }

    /// Set the step count for `date`, replacing any earlier count that day.
    pub async fn log_steps(&self, date: NaiveDate, steps: u32) -> Result<StepsEntry> {
        let (height_cm, weight_kg, stride) = match self.domains.steps.read(|s| s.profile.clone()).await {
            Some(profile) => (
                profile.height_cm,
                profile.weight_kg,
                Some(profile.targets.stride_cm),
            ),
            None => {
                let user = self.app.read(|s| s.user_profile.clone()).await;
                let height = user.as_ref().map_or(FALLBACK_HEIGHT_CM, |u| u.height_cm());
                let weight = user.as_ref().map_or(FALLBACK_WEIGHT_KG, |u| u.weight_kg());
                (height, weight, Some(default_stride_cm(height)))
            }
        };
        let targets = step_targets(steps, height_cm, weight_kg, stride);
        let entry = StepsEntry {
            id: Uuid::new_v4(),
            date,
            steps,
            distance_km: targets.daily_distance_km,
            calories: targets.daily_calories,
        };
        self.domains
            .steps
            .update(|s| {
                s.entries.retain(|e| e.date != date);
                s.entries.push(entry.clone());
            })
            .await?;
        self.set_progress(GoalType::DailySteps, f64::from(steps))
            .await?;
        debug!(steps, %date, "Steps logged");
        Ok(entry)
    }

    /// Aggregate today's data for the coach and the Today tab.
    pub async fn today(&self, date: NaiveDate) -> TodaySnapshot {
        let (calories_consumed, meals_logged, calorie_target) = self
            .domains
            .weight_loss
            .read(|s| {
                let meals: Vec<_> = s
                    .meals
                    .iter()
                    .filter(|m| m.logged_at.date_naive() == date)
                    .collect();
                (
                    meals.iter().map(|m| m.calories).sum::<f64>(),
                    meals.len(),
                    s.profile.as_ref().map(|p| p.calorie_target.daily_calories),
                )
            })
            .await;

        let on_date = |w: &WorkoutSession| w.started_at.date_naive() == date;
        let (cardio_minutes, cardio_count) = self
            .domains
            .cardio
            .read(|s| {
                let today: Vec<_> = s.sessions.iter().filter(|w| on_date(w)).collect();
                (today.iter().map(|w| w.duration_minutes).sum::<u32>(), today.len())
            })
            .await;
        let (strength_minutes, strength_count) = self
            .domains
            .strength
            .read(|s| {
                let today: Vec<_> = s.sessions.iter().filter(|w| on_date(w)).collect();
                (today.iter().map(|w| w.duration_minutes).sum::<u32>(), today.len())
            })
            .await;

        let (steps, step_goal) = self
            .domains
            .steps
            .read(|s| {
                (
                    s.entries
                        .iter()
                        .find(|e| e.date == date)
                        .map_or(0, |e| e.steps),
                    s.profile.as_ref().map(|p| p.daily_step_goal),
                )
            })
            .await;

        let (last_sleep_hours, sleep_target_hours) = self
            .domains
            .sleep
            .read(|s| {
                (
                    s.entries
                        .iter()
                        .filter(|e| e.date <= date)
                        .max_by_key(|e| e.date)
                        .map(|e| e.hours),
                    s.profile.as_ref().map(|p| p.target_hours),
                )
            })
            .await;

        TodaySnapshot {
            date,
            calories_consumed,
            calorie_target,
            meals_logged,
            workout_minutes: cardio_minutes + strength_minutes,
            workouts: cardio_count + strength_count,
            steps,
            step_goal,
            last_sleep_hours,
            sleep_target_hours,
        }
    }

    async fn workouts_in_week(&self, date: NaiveDate) -> usize {
        let cardio = self
            .domains
            .cardio
            .read(|s| sessions_in_week(&s.sessions, date))
            .await;
        let strength = self
            .domains
            .strength
            .read(|s| sessions_in_week(&s.sessions, date))
            .await;
        cardio + strength
    }

    /// Update the active goal of `goal_type`, if there is one.
    async fn set_progress(&self, goal_type: GoalType, value: f64) -> Result<bool> {
        let has_goal = self
            .app
            .read(|s| s.active_goal(goal_type).is_some())
            .await;
        if !has_goal {
            return Ok(false);
        }
        self.app
            .update(|s| {
                if let Some(goal) = s.active_goal_mut(goal_type) {
                    goal.current_value = value;
                }
            })
            .await?;
        debug!(goal = %goal_type, value, "Goal progress updated");
        Ok(true)
    }
}

fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    a.iso_week() == b.iso_week()
}

fn sessions_in_week(sessions: &[WorkoutSession], date: NaiveDate) -> usize {
    sessions
        .iter()
        .filter(|w| same_week(w.started_at.date_naive(), date))
        .count()
}

fn minutes_in_week(sessions: &[WorkoutSession], date: NaiveDate) -> u32 {
    sessions
        .iter()
        .filter(|w| same_week(w.started_at.date_naive(), date))
        .map(|w| w.duration_minutes)
        .sum()
}
