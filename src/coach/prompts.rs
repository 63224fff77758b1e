//! Coach prompt building and reply parsing.

use crate::domains::DomainProfile;
use crate::error::LlmError;
use crate::goals::GoalType;
use crate::tracking::TodaySnapshot;

use super::model::{CoachRequest, CoachResponse};

const REPLY_FORMAT: &str = r#"Reply with a single JSON object and nothing else:
{"message": string, "action_suggestions": [string], "motivational_tip": string or null, "data_updates": {"calories_consumed"?: number, "steps"?: number, "workout_minutes"?: number, "sleep_hours"?: number} or null}
Keep "message" under 120 words and give at most 3 action suggestions."#;

fn goal_focus(goal_type: GoalType) -> &'static str {
    match goal_type {
        GoalType::WeightLoss => {
            "You coach sustainable weight loss. Focus on the daily calorie budget, \
             meal balance, and steady weekly progress. Never encourage eating below \
             the user's calorie floor."
        }
        GoalType::CardioEndurance => {
            "You coach cardio endurance. Focus on heart-rate zone training, weekly \
             minutes, and gradual progression. Most easy work belongs in zones 1-2."
        }
        GoalType::StrengthBuilding => {
            "You coach strength training. Focus on the user's program, progressive \
             overload, form, and recovery between sessions."
        }
        GoalType::SleepTracking => {
            "You coach sleep habits. Focus on a consistent bedtime and wake time, \
             wind-down routines, and total sleep versus the target."
        }
        GoalType::DailySteps => {
            "You coach daily movement. Focus on reaching the step goal with short \
             walks spread through the day."
        }
        GoalType::WorkoutConsistency => {
            "You coach workout consistency. Focus on showing up each week and \
             building the habit, not on intensity."
        }
    }
}

/// Goal-specific system prompt.
pub fn system_prompt(goal_type: GoalType) -> String {
    format!(
        "You are a friendly, practical fitness coach inside a tracking app.\n\n{}\n\n{}",
        goal_focus(goal_type),
        REPLY_FORMAT
    )
}

/// One-paragraph description of a domain profile.
pub fn profile_summary(profile: &DomainProfile) -> String {
    match profile {
        DomainProfile::WeightLoss(p) => format!(
            "Weight loss plan: {:.1} → {:.1} {:?} over {} weeks, {:.0} kcal/day \
             ({:.1} lbs/week{}).",
            p.current_weight,
            p.target_weight,
            p.weight_unit,
            p.timeline_weeks,
            p.calorie_target.daily_calories,
            p.calorie_target.weekly_loss_rate,
            if p.calorie_target.is_realistic {
                ""
            } else {
                ", aggressive"
            }
        ),
        DomainProfile::CardioEndurance(p) => {
            let zones: Vec<String> = p
                .zones
                .iter()
                .map(|z| format!("Z{} {:.0}-{:.0}", z.zone, z.min, z.max))
                .collect();
            format!(
                "Cardio plan: {} min/week, resting HR {}, max HR {}. Zones: {}.",
                p.weekly_minutes_target,
                p.resting_hr,
                p.max_hr,
                zones.join(", ")
            )
        }
        DomainProfile::StrengthBuilding(p) => format!(
            "Strength plan: {:?} focus, {} days/week, {} sets of {}-{} reps, {}s rest.",
            p.focus,
            p.training_days_per_week,
            p.scheme.sets,
            p.scheme.reps_min,
            p.scheme.reps_max,
            p.scheme.rest_seconds
        ),
        DomainProfile::SleepTracking(p) => format!(
            "Sleep plan: bed at {}, wake at {}{}, {:.1} h target.",
            p.bedtime,
            p.wake_time,
            if p.wake_next_day { " (next day)" } else { "" },
            p.target_hours
        ),
        DomainProfile::DailySteps(p) => format!(
            "Steps plan: {} steps/day, about {:.1} km and {:.0} kcal.",
            p.daily_step_goal, p.targets.daily_distance_km, p.targets.daily_calories
        ),
    }
}

fn today_summary(today: &TodaySnapshot) -> String {
    let mut parts = vec![format!("# Today ({})", today.date)];
    match today.calorie_target {
        Some(target) => parts.push(format!(
            "- Calories: {:.0} of {:.0}",
            today.calories_consumed, target
        )),
        None if today.meals_logged > 0 => {
            parts.push(format!("- Calories: {:.0}", today.calories_consumed))
        }
        None => {}
    }
    if today.workouts > 0 {
        parts.push(format!(
            "- Workouts: {} ({} min)",
            today.workouts, today.workout_minutes
        ));
    }
    match today.step_goal {
        Some(goal) => parts.push(format!("- Steps: {} of {}", today.steps, goal)),
        None if today.steps > 0 => parts.push(format!("- Steps: {}", today.steps)),
        None => {}
    }
    if let Some(hours) = today.last_sleep_hours {
        parts.push(format!("- Last night's sleep: {hours:.1} h"));
    }
    parts.join("\n")
}

/// Context block prepended to the user's message.
pub fn context_block(request: &CoachRequest) -> String {
    let mut sections = Vec::new();
    if let Some(user) = &request.user {
        sections.push(user.to_context_section());
    }
    if let Some(profile) = &request.profile {
        sections.push(format!("# Plan\n{}", profile_summary(profile)));
    }
    sections.push(today_summary(&request.today));
    sections.join("\n\n")
}

/// Parse the model's reply.
///
/// A JSON object (optionally inside a code fence) is parsed as a
/// [`CoachResponse`]; a reply with no JSON object is used as plain text.
pub fn parse_reply(reply: &str) -> Result<CoachResponse, LlmError> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(LlmError::InvalidResponse {
            provider: "coach".to_string(),
            reason: "empty reply".to_string(),
        });
    }
    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        return Ok(CoachResponse::text(trimmed));
    };
    if end < start {
        return Ok(CoachResponse::text(trimmed));
    }
    let mut response: CoachResponse = serde_json::from_str(&trimmed[start..=end])?;
    if response.message.trim().is_empty() {
        return Err(LlmError::InvalidResponse {
            provider: "coach".to_string(),
            reason: "reply has no message".to_string(),
        });
    }
    response.using_fallback = false;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn system_prompt_is_goal_specific() {
        let sleep = system_prompt(GoalType::SleepTracking);
        let steps = system_prompt(GoalType::DailySteps);
        assert!(sleep.contains("bedtime"));
        assert!(steps.contains("step goal"));
        assert!(sleep.contains("JSON"));
    }

    #[test]
    fn parses_fenced_json() {
        let reply = "```json\n{\"message\": \"Nice walk!\", \"action_suggestions\": [\"Walk after lunch\"], \"motivational_tip\": null}\n```";
        let response = parse_reply(reply).unwrap();
        assert_eq!(response.message, "Nice walk!");
        assert_eq!(response.action_suggestions, vec!["Walk after lunch"]);
        assert!(!response.using_fallback);
    }

    #[test]
    fn plain_text_is_accepted() {
        let response = parse_reply("Keep it up, you're close.").unwrap();
        assert_eq!(response.message, "Keep it up, you're close.");
        assert!(response.action_suggestions.is_empty());
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(parse_reply("{\"message\": ").is_err());
        assert!(parse_reply("{\"message\": \"\"}").is_err());
        assert!(parse_reply("   ").is_err());
    }

    #[test]
    fn today_block_skips_empty_domains() {
        let today = TodaySnapshot {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            steps: 4200,
            step_goal: Some(10_000),
            ..TodaySnapshot::default()
        };
        let block = context_block(&CoachRequest::new(GoalType::DailySteps, "hi", today));
        assert!(block.contains("Steps: 4200 of 10000"));
        assert!(!block.contains("Calories"));
        assert!(!block.contains("Workouts"));
    }
}
