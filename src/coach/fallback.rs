//! Static coach replies used when no LLM is configured or a call fails.

use crate::goals::GoalType;
use crate::tracking::TodaySnapshot;

use super::model::{CoachRequest, CoachResponse};

fn tips(goal_type: GoalType) -> (&'static str, [&'static str; 2]) {
    match goal_type {
        GoalType::WeightLoss => (
            "Small, steady deficits add up. Consistency beats perfection.",
            ["Log your next meal", "Plan a protein-rich snack"],
        ),
        GoalType::CardioEndurance => (
            "Easy miles build the engine. Most sessions should feel conversational.",
            ["Schedule a zone 2 session", "Log today's workout"],
        ),
        GoalType::StrengthBuilding => (
            "Add a little weight or one more rep each week.",
            ["Log your last session", "Review your program"],
        ),
        GoalType::SleepTracking => (
            "A steady wake time is the strongest sleep anchor.",
            ["Start your wind-down on time", "Log last night's sleep"],
        ),
        GoalType::DailySteps => (
            "A 10-minute walk after meals adds about 1,000 steps.",
            ["Take a short walk", "Sync your step count"],
        ),
        GoalType::WorkoutConsistency => (
            "Showing up matters more than the perfect workout.",
            ["Book your next workout", "Log a quick session"],
        ),
    }
}

fn status_line(goal_type: GoalType, today: &TodaySnapshot) -> Option<String> {
    match goal_type {
        GoalType::WeightLoss => today.calorie_target.map(|target| {
            let remaining = target - today.calories_consumed;
            if remaining >= 0.0 {
                format!("You have about {remaining:.0} kcal left today.")
            } else {
                format!("You're {:.0} kcal over today's budget.", -remaining)
            }
        }),
        GoalType::DailySteps => today.step_goal.map(|goal| {
            if today.steps >= goal {
                format!("You've hit your {goal} step goal today.")
            } else {
                format!("{} steps to go today.", goal - today.steps)
            }
        }),
        GoalType::SleepTracking => today
            .last_sleep_hours
            .map(|hours| format!("You slept {hours:.1} hours last night.")),
        GoalType::CardioEndurance | GoalType::StrengthBuilding | GoalType::WorkoutConsistency => {
            (today.workouts > 0).then(|| {
                format!(
                    "{} workout(s), {} minutes logged today.",
                    today.workouts, today.workout_minutes
                )
            })
        }
    }
}

/// Build a reply without an LLM. Always sets `using_fallback`.
pub fn fallback_response(request: &CoachRequest) -> CoachResponse {
    let (tip, actions) = tips(request.goal_type);
    let message = match status_line(request.goal_type, &request.today) {
        Some(status) => format!("{status} I'm offline right now, but here's what I'd focus on next."),
        None => "I'm offline right now, but here's what I'd focus on next.".to_string(),
    };
    CoachResponse {
        message,
        action_suggestions: actions.iter().map(|a| a.to_string()).collect(),
        motivational_tip: Some(tip.to_string()),
        data_updates: None,
        using_fallback: true,
    }
}
