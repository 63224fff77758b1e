//! Typed app events with broadcast fan-out to subscribers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::goals::GoalType;
use crate::onboarding::Screen;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Cross-component notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// Goals were added to or removed from the active list.
    GoalsChanged {
        added: Vec<GoalType>,
        removed: Vec<GoalType>,
    },
    /// A domain profile was committed.
    DomainConfigured { goal_type: GoalType, profile_id: Uuid },
    /// A new active goal was created.
    GoalMerged { goal_type: GoalType, goal_id: Uuid },
    /// Open the coach focused on one goal, optionally with a starter prompt.
    OpenCoach {
        goal_type: GoalType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    },
    ScreenChanged { screen: Screen },
}

/// Broadcast bus for [`AppEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Publish to all current subscribers. Returns how many received it.
    pub fn publish(&self, event: AppEvent) -> usize {
        debug!(?event, "Publishing app event");
        // Ok if nobody is listening yet
        self.tx.send(event).unwrap_or(0)
    }

    /// Ask the UI to open the coach for `goal_type`.
    pub fn open_coach(&self, goal_type: GoalType, prompt: Option<String>) -> usize {
        self.publish(AppEvent::OpenCoach { goal_type, prompt })
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let delivered = bus.open_coach(GoalType::SleepTracking, Some("Why am I tired?".into()));
        assert_eq!(delivered, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            AppEvent::OpenCoach {
                goal_type: GoalType::SleepTracking,
                prompt: Some("Why am I tired?".into()),
            }
        );
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::new();
        assert_eq!(
            bus.publish(AppEvent::ScreenChanged {
                screen: Screen::Main
            }),
            0
        );
    }

    #[test]
    fn event_json_is_tagged() {
        let json = serde_json::to_value(AppEvent::GoalMerged {
            goal_type: GoalType::DailySteps,
            goal_id: Uuid::nil(),
        })
        .unwrap();
        assert_eq!(json["type"], "goal_merged");
        assert_eq!(json["goal_type"], "daily_steps");
    }
}
