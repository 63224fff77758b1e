//! Goal selection diff: compares the checkbox state against active goals.

use super::model::GoalType;

/// Outcome of comparing a selection against the active goal types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    /// Selected types with no active goal.
    pub to_add: Vec<GoalType>,
    /// Selected types that are already active. Re-selecting an active goal
    /// is a removal request.
    pub to_remove: Vec<GoalType>,
}

impl SelectionDiff {
    /// Nothing to add and nothing to remove.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Split `selected` into additions and removals relative to `existing_active`.
///
/// Order follows `selected`; duplicates in `selected` are collapsed.
pub fn resolve_selection(selected: &[GoalType], existing_active: &[GoalType]) -> SelectionDiff {
    let mut diff = SelectionDiff::default();
    for goal_type in selected {
        if diff.to_add.contains(goal_type) || diff.to_remove.contains(goal_type) {
            continue;
        }
        if existing_active.contains(goal_type) {
            diff.to_remove.push(*goal_type);
        } else {
            diff.to_add.push(*goal_type);
        }
    }
    diff
}
