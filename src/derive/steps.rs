//! Step, stride, and distance estimates.

use serde::{Deserialize, Serialize};

const STRIDE_HEIGHT_RATIO: f64 = 0.43;
const CM_PER_KM: f64 = 100_000.0;
const KCAL_PER_STEP: f64 = 0.04;
const REFERENCE_WEIGHT_KG: f64 = 70.0;

/// Stride length estimated from height.
pub fn default_stride_cm(height_cm: f64) -> f64 {
    height_cm * STRIDE_HEIGHT_RATIO
}

pub fn distance_km(steps: u32, stride_cm: f64) -> f64 {
    f64::from(steps) * stride_cm / CM_PER_KM
}

/// Calories burned walking, scaled by body weight.
pub fn steps_calories(steps: u32, weight_kg: f64) -> f64 {
    f64::from(steps) * KCAL_PER_STEP * (weight_kg / REFERENCE_WEIGHT_KG)
}

/// Daily targets derived from a step goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepTargets {
    pub stride_cm: f64,
    pub daily_distance_km: f64,
    pub daily_calories: f64,
}

/// Derive targets for `daily_steps`. A manual stride overrides the
/// height-based estimate.
pub fn step_targets(
    daily_steps: u32,
    height_cm: f64,
    weight_kg: f64,
    stride_override_cm: Option<f64>,
) -> StepTargets {
    let stride_cm = stride_override_cm
        .filter(|s| *s > 0.0)
        .unwrap_or_else(|| default_stride_cm(height_cm));
    StepTargets {
        stride_cm,
        daily_distance_km: distance_km(daily_steps, stride_cm),
        daily_calories: steps_calories(daily_steps, weight_kg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_from_height() {
        assert!((default_stride_cm(170.0) - 73.1).abs() < 1e-9);
    }

    #[test]
    fn ten_thousand_steps() {
        let targets = step_targets(10_000, 170.0, 70.0, None);
        assert!((targets.daily_distance_km - 7.31).abs() < 1e-9);
        assert!((targets.daily_calories - 400.0).abs() < 1e-9);
    }

    #[test]
    fn override_wins() {
        let targets = step_targets(10_000, 170.0, 35.0, Some(80.0));
        assert_eq!(targets.stride_cm, 80.0);
        assert!((targets.daily_distance_km - 8.0).abs() < 1e-9);
        assert!((targets.daily_calories - 200.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_override_is_ignored() {
        let targets = step_targets(1_000, 100.0, 70.0, Some(0.0));
        assert!((targets.stride_cm - 43.0).abs() < 1e-9);
    }
}
