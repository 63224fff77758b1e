//! Profile derivation: pure calculators for derived targets.
//!
//! Same inputs always produce the same numbers; nothing here touches state.

pub mod calories;
pub mod heart_rate;
pub mod sleep;
pub mod steps;
pub mod units;

pub use calories::{
    ActivityLevel, CalorieInputs, CalorieTarget, CalorieWarning, MealDistribution,
    calorie_target, distribute_meals,
};
pub use heart_rate::{HeartRateZone, karvonen_zones, max_hr_for_age};
pub use sleep::{format_clock, parse_clock, wake_time};
pub use steps::{StepTargets, step_targets};
pub use units::{Gender, HeightUnit, WeightUnit};
