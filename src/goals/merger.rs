//! Goal merger: appends active goals for newly resolved goal types.

use tracing::debug;

use super::model::{Goal, GoalTarget, GoalType};

/// Append one new active goal per type in `to_add`.
///
/// `target_for` supplies user-customized targets (from a completed domain
/// profile); types it returns `None` for use the static metadata table.
/// Inactive goals of the same type are left untouched, so history is kept.
/// A type that already has an active goal is skipped, which keeps
/// re-selection idempotent.
///
/// Returns the goals that were created.
pub fn merge_goals<F>(goals: &mut Vec<Goal>, to_add: &[GoalType], target_for: F) -> Vec<Goal>
where
    F: Fn(GoalType) -> Option<GoalTarget>,
{
    let mut created = Vec::new();
    for goal_type in to_add {
        let already_active = goals.iter().any(|g| g.is_active && g.goal_type == *goal_type);
        if already_active {
            debug!(goal = %goal_type, "Goal already active, skipping merge");
            continue;
        }
        let goal = match target_for(*goal_type) {
            Some(target) => Goal::new(*goal_type).with_target(target),
            None => Goal::new(*goal_type),
        };
        goals.push(goal.clone());
        created.push(goal);
    }
    created
}

/// Deactivate the active goal of each type in `to_remove`.
///
/// Returns the number of goals deactivated.
pub fn deactivate_goals(goals: &mut [Goal], to_remove: &[GoalType]) -> usize {
    let mut count = 0;
    for goal in goals.iter_mut() {
        if goal.is_active && to_remove.contains(&goal.goal_type) {
            goal.is_active = false;
            count += 1;
        }
    }
    count
}
