//! Coach request/response contract.

use serde::{Deserialize, Serialize};

use crate::domains::DomainProfile;
use crate::goals::GoalType;
use crate::llm::ChatMessage;
use crate::onboarding::UserProfile;
use crate::tracking::TodaySnapshot;

/// Everything the coach sees for one reply.
#[derive(Debug, Clone)]
pub struct CoachRequest {
    pub goal_type: GoalType,
    pub message: String,
    pub user: Option<UserProfile>,
    /// The focused goal's domain profile, if its setup is complete.
    pub profile: Option<DomainProfile>,
    pub today: TodaySnapshot,
    /// Earlier turns, oldest first.
    pub history: Vec<ChatMessage>,
}

impl CoachRequest {
    pub fn new(goal_type: GoalType, message: impl Into<String>, today: TodaySnapshot) -> Self {
        Self {
            goal_type,
            message: message.into(),
            user: None,
            profile: None,
            today,
            history: Vec::new(),
        }
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_profile(mut self, profile: Option<DomainProfile>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Values the coach suggests writing back to today's log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_consumed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachResponse {
    pub message: String,
    #[serde(default)]
    pub action_suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivational_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_updates: Option<DataUpdates>,
    /// Set when the reply came from the static generator.
    #[serde(default)]
    pub using_fallback: bool,
}

impl CoachResponse {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action_suggestions: Vec::new(),
            motivational_tip: None,
            data_updates: None,
            using_fallback: false,
        }
    }
}
