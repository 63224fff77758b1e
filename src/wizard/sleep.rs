//! Sleep wizard: schedule → habits → review.

use chrono::Utc;
use uuid::Uuid;

use super::state::{WizardDraft, WizardStep};
use crate::derive::sleep::{crosses_midnight, format_clock, parse_clock, wake_time};
use crate::devices::{ConnectedDevice, TrackingSource};
use crate::domains::SleepProfile;
use crate::goals::GoalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepStep {
    Schedule,
    Habits,
    Review,
}

impl WizardStep for SleepStep {
    const STEPS: &'static [Self] = &[Self::Schedule, Self::Habits, Self::Review];
}

impl std::fmt::Display for SleepStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Schedule => "schedule",
            Self::Habits => "habits",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SleepDraft {
    /// `HH:MM`.
    pub bedtime: String,
    pub target_hours: Option<f64>,
    pub wind_down_minutes: u32,
    pub smart_alarm: bool,
    pub devices: Vec<ConnectedDevice>,
}

impl Default for SleepDraft {
    fn default() -> Self {
        Self {
            bedtime: String::new(),
            target_hours: Some(GoalType::SleepTracking.defaults().target_value),
            wind_down_minutes: 30,
            smart_alarm: false,
            devices: Vec::new(),
        }
    }
}

impl SleepDraft {
    pub fn with_devices(devices: &[ConnectedDevice]) -> Self {
        Self {
            devices: devices.to_vec(),
            ..Self::default()
        }
    }
}

impl WizardDraft for SleepDraft {
    type Step = SleepStep;
    type Profile = SleepProfile;

    fn is_step_complete(&self, step: SleepStep) -> bool {
        match step {
            SleepStep::Schedule => {
                parse_clock(&self.bedtime).is_some()
                    && self.target_hours.is_some_and(|h| h > 0.0 && h < 24.0)
            }
            // Habits are optional preferences with defaults.
            SleepStep::Habits | SleepStep::Review => true,
        }
    }

    fn derive(&self) -> Option<SleepProfile> {
        let bedtime = parse_clock(&self.bedtime)?;
        let target_hours = self.target_hours?;
        let wake = wake_time(bedtime, target_hours);

        Some(SleepProfile {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bedtime: format_clock(bedtime),
            target_hours,
            wake_time: format_clock(wake),
            wake_next_day: crosses_midnight(bedtime, wake),
            wind_down_minutes: self.wind_down_minutes,
            smart_alarm: self.smart_alarm,
            tracking: TrackingSource::from_devices(&self.devices),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    #[test]
    fn bad_bedtime_blocks_schedule() {
        let draft = SleepDraft {
            bedtime: "11pm".to_string(),
            ..SleepDraft::default()
        };
        assert!(!draft.is_step_complete(SleepStep::Schedule));
    }

    #[test]
    fn wake_time_wraps_midnight() {
        let mut wizard = Wizard::new(SleepDraft {
            bedtime: "23:00".to_string(),
            ..SleepDraft::default()
        });
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        let profile = wizard.commit().unwrap();
        assert_eq!(profile.wake_time, "07:00");
        assert!(profile.wake_next_day);
        assert_eq!(profile.goal_target().value, 8.0);
    }

    #[test]
    fn early_bedtime_wakes_same_day() {
        let profile = SleepDraft {
            bedtime: "00:30".to_string(),
            target_hours: Some(7.0),
            ..SleepDraft::default()
        }
        .derive()
        .unwrap();
        assert_eq!(profile.wake_time, "07:30");
        assert!(!profile.wake_next_day);
    }
}
