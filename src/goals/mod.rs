//! Goals: goal types, selection diffing, and goal merging.

pub mod diff;
pub mod merger;
pub mod model;

pub use diff::{SelectionDiff, resolve_selection};
pub use merger::{deactivate_goals, merge_goals};
pub use model::{Goal, GoalDefaults, GoalTarget, GoalType, active_types};
