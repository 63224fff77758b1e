//! User profile and app-level container models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::derive::{Gender, HeightUnit, WeightUnit};
use crate::goals::{Goal, GoalType};
use crate::store::ContainerState;

use super::state::Screen;

/// Main-screen tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Today,
    Progress,
    Coach,
    Profile,
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::Progress => write!(f, "progress"),
            Self::Coach => write!(f, "coach"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

/// Base anthropometrics captured on the profile-setup screen.
///
/// Created once and never deleted; `selected_goals` changes as goals are
/// added and removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub selected_goals: Vec<GoalType>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        weight: f64,
        weight_unit: WeightUnit,
        height: f64,
        height_unit: HeightUnit,
        age: u32,
        gender: Gender,
    ) -> Self {
        Self {
            weight,
            weight_unit,
            height,
            height_unit,
            age,
            gender,
            selected_goals: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }

    pub fn height_cm(&self) -> f64 {
        self.height_unit.to_cm(self.height)
    }

    /// Whether the profile-setup screen may continue.
    pub fn is_valid(&self) -> bool {
        self.weight > 0.0 && self.height > 0.0 && self.age > 0
    }

    /// Add `goal_type` to the selection, keeping it free of duplicates.
    pub fn select(&mut self, goal_type: GoalType) {
        if !self.selected_goals.contains(&goal_type) {
            self.selected_goals.push(goal_type);
        }
    }

    pub fn deselect(&mut self, goal_type: GoalType) {
        self.selected_goals.retain(|g| *g != goal_type);
    }

    /// Render the profile as a context block for the coach prompt.
    pub fn to_context_section(&self) -> String {
        let mut parts = vec!["# User Profile".to_string()];
        parts.push(format!("- **Age:** {}", self.age));
        parts.push(format!("- **Weight:** {:.1} kg", self.weight_kg()));
        parts.push(format!("- **Height:** {:.0} cm", self.height_cm()));
        if !self.selected_goals.is_empty() {
            let goals: Vec<String> = self.selected_goals.iter().map(|g| g.to_string()).collect();
            parts.push(format!("- **Goals:** {}", goals.join(", ")));
        }
        parts.join("\n")
    }
}

/// The app-level container: navigation, base profile, and the goal list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub screen: Screen,
    #[serde(default)]
    pub tab: Tab,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    /// Active and inactive goals; removed goals are kept as history.
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl ContainerState for AppState {
    const KEY: &'static str = "app";
}

impl AppState {
    pub fn active_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| g.is_active)
    }

    pub fn active_goal(&self, goal_type: GoalType) -> Option<&Goal> {
        self.active_goals().find(|g| g.goal_type == goal_type)
    }

    pub fn active_goal_mut(&mut self, goal_type: GoalType) -> Option<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|g| g.is_active && g.goal_type == goal_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(
            154.0,
            WeightUnit::Lbs,
            65.0,
            HeightUnit::In,
            30,
            Gender::Female,
        )
    }

    #[test]
    fn units_convert_to_metric() {
        let p = profile();
        assert!((p.weight_kg() - 69.85).abs() < 0.01);
        assert!((p.height_cm() - 165.1).abs() < 1e-9);
    }

    #[test]
    fn selection_has_no_duplicates() {
        let mut p = profile();
        p.select(GoalType::DailySteps);
        p.select(GoalType::DailySteps);
        p.select(GoalType::WeightLoss);
        assert_eq!(p.selected_goals, vec![GoalType::DailySteps, GoalType::WeightLoss]);

        p.deselect(GoalType::DailySteps);
        assert_eq!(p.selected_goals, vec![GoalType::WeightLoss]);
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let mut p = profile();
        assert!(p.is_valid());
        p.age = 0;
        assert!(!p.is_valid());
    }

    #[test]
    fn app_state_loads_from_partial_blob() {
        let state: AppState = serde_json::from_value(serde_json::json!({
            "screen": "main"
        }))
        .unwrap();
        assert_eq!(state.screen, Screen::Main);
        assert_eq!(state.tab, Tab::Today);
        assert!(state.user_profile.is_none());
        assert!(state.goals.is_empty());
    }

    #[test]
    fn active_goal_lookup_skips_history() {
        let mut state = AppState::default();
        let mut old = Goal::new(GoalType::DailySteps);
        old.is_active = false;
        let current = Goal::new(GoalType::DailySteps);
        let current_id = current.id;
        state.goals = vec![old, current];

        assert_eq!(state.active_goal(GoalType::DailySteps).map(|g| g.id), Some(current_id));
        assert!(state.active_goal(GoalType::WeightLoss).is_none());
    }

    #[test]
    fn context_section_lists_goals() {
        let mut p = profile();
        p.select(GoalType::SleepTracking);
        let section = p.to_context_section();
        assert!(section.contains("**Age:** 30"));
        assert!(section.contains("sleep_tracking"));
    }
}
