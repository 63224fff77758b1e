//! Calorie budget engine for weight loss.
//!
//! BMR uses the Mifflin-St Jeor equation:
//! `10 * weight_kg + 6.25 * height_cm - 5 * age + offset`, where the offset
//! is +5 (male), -161 (female) or -78 (other). TDEE multiplies BMR by the
//! activity factor. The weekly loss rate is expressed in pounds so the
//! 3500 kcal/lb rule applies directly.

use serde::{Deserialize, Serialize};

use super::units::{Gender, kg_to_lbs};

const KCAL_PER_LB: f64 = 3500.0;
const MAX_REALISTIC_WEEKLY_LBS: f64 = 2.0;
const MAX_REALISTIC_DAILY_DEFICIT: f64 = 750.0;

/// Activity level for the TDEE multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    #[default]
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

/// Lowest daily calorie budget recommended for `gender`.
pub fn calorie_floor(gender: Gender) -> f64 {
    match gender {
        Gender::Female => 1200.0,
        Gender::Male => 1500.0,
        Gender::Other => 1350.0,
    }
}

/// Basal metabolic rate in kcal/day.
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
        Gender::Other => -78.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset
}

/// Raw inputs for the calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieInputs {
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub timeline_weeks: u32,
}

/// Non-blocking advisories attached to a derived calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalorieWarning {
    /// The budget was raised to the gender-based floor.
    FloorApplied { floor: f64 },
    /// Weekly loss rate above 2 lbs/week.
    AggressiveRate { weekly_lbs: f64 },
    /// Daily deficit above 750 kcal.
    LargeDeficit { daily_kcal: f64 },
}

/// Derived daily calorie budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    pub bmr: f64,
    pub tdee: f64,
    /// Pounds per week.
    pub weekly_loss_rate: f64,
    pub daily_deficit: f64,
    pub daily_calories: f64,
    pub is_realistic: bool,
    #[serde(default)]
    pub warnings: Vec<CalorieWarning>,
}

/// Derive the daily calorie budget. Never fails; unsafe targets become
/// warnings.
pub fn calorie_target(inputs: &CalorieInputs) -> CalorieTarget {
    let bmr = mifflin_st_jeor(
        inputs.current_weight_kg,
        inputs.height_cm,
        inputs.age,
        inputs.gender,
    );
    let tdee = bmr * inputs.activity_level.multiplier();

    let weeks = f64::from(inputs.timeline_weeks.max(1));
    let to_lose_lbs = kg_to_lbs(inputs.current_weight_kg - inputs.target_weight_kg).max(0.0);
    let weekly_loss_rate = to_lose_lbs / weeks;
    let daily_deficit = weekly_loss_rate * KCAL_PER_LB / 7.0;

    let floor = calorie_floor(inputs.gender);
    let mut warnings = Vec::new();

    let mut daily_calories = (tdee - daily_deficit).round();
    if daily_calories < floor {
        daily_calories = floor;
        warnings.push(CalorieWarning::FloorApplied { floor });
    }
    if weekly_loss_rate > MAX_REALISTIC_WEEKLY_LBS {
        warnings.push(CalorieWarning::AggressiveRate {
            weekly_lbs: weekly_loss_rate,
        });
    }
    if daily_deficit > MAX_REALISTIC_DAILY_DEFICIT {
        warnings.push(CalorieWarning::LargeDeficit {
            daily_kcal: daily_deficit,
        });
    }

    CalorieTarget {
        bmr,
        tdee,
        weekly_loss_rate,
        daily_deficit,
        daily_calories,
        is_realistic: weekly_loss_rate <= MAX_REALISTIC_WEEKLY_LBS
            && daily_deficit <= MAX_REALISTIC_DAILY_DEFICIT,
        warnings,
    }
}

/// Daily calorie budget split across meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealDistribution {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
    pub snack: u32,
}

impl MealDistribution {
    pub fn total(&self) -> u32 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// Split `daily_calories` 25/35/30/10. Each bucket is rounded on its own;
/// the buckets may not add up to the exact total.
pub fn distribute_meals(daily_calories: f64) -> MealDistribution {
    let share = |fraction: f64| (daily_calories * fraction).round().max(0.0) as u32;
    MealDistribution {
        breakfast: share(0.25),
        lunch: share(0.35),
        dinner: share(0.30),
        snack: share(0.10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> CalorieInputs {
        CalorieInputs {
            current_weight_kg: 70.0,
            target_weight_kg: 65.0,
            height_cm: 165.0,
            age: 25,
            gender: Gender::Female,
            activity_level: ActivityLevel::ModeratelyActive,
            timeline_weeks: 12,
        }
    }

    #[test]
    fn bmr_offsets() {
        let female = mifflin_st_jeor(70.0, 165.0, 25, Gender::Female);
        assert!((female - 1445.25).abs() < 1e-9);
        let male = mifflin_st_jeor(70.0, 165.0, 25, Gender::Male);
        assert!((male - 1611.25).abs() < 1e-9);
        let other = mifflin_st_jeor(70.0, 165.0, 25, Gender::Other);
        assert!((other - 1528.25).abs() < 1e-9);
    }

    #[test]
    fn moderate_plan_is_realistic() {
        let target = calorie_target(&inputs());
        assert!(target.daily_calories >= 1200.0);
        assert!(target.weekly_loss_rate <= 2.0);
        assert!(target.is_realistic);
        assert!(target.warnings.is_empty());
        assert!((target.tdee - 1445.25 * 1.55).abs() < 1e-9);
    }

    #[test]
    fn aggressive_plan_is_clamped_and_flagged() {
        let target = calorie_target(&CalorieInputs {
            current_weight_kg: 90.0,
            target_weight_kg: 60.0,
            timeline_weeks: 4,
            activity_level: ActivityLevel::Sedentary,
            ..inputs()
        });
        assert_eq!(target.daily_calories, 1200.0);
        assert!(!target.is_realistic);
        assert!(target.warnings.contains(&CalorieWarning::FloorApplied { floor: 1200.0 }));
        assert!(target
            .warnings
            .iter()
            .any(|w| matches!(w, CalorieWarning::AggressiveRate { .. })));
    }

    #[test]
    fn large_deficit_alone_is_unrealistic() {
        // 22 lb over 12 weeks is under 2 lb/week but about 920 kcal/day.
        let target = calorie_target(&CalorieInputs {
            current_weight_kg: 90.0,
            target_weight_kg: 80.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::VeryActive,
            ..inputs()
        });
        assert!(target.weekly_loss_rate > 1.8 && target.weekly_loss_rate < 2.0);
        assert!(target.daily_deficit > 900.0);
        assert!(!target.is_realistic);
        assert_eq!(
            target.warnings,
            vec![CalorieWarning::LargeDeficit {
                daily_kcal: target.daily_deficit
            }]
        );
    }

    #[test]
    fn floors_by_gender() {
        assert_eq!(calorie_floor(Gender::Female), 1200.0);
        assert_eq!(calorie_floor(Gender::Male), 1500.0);
        assert_eq!(calorie_floor(Gender::Other), 1350.0);
    }

    #[test]
    fn no_loss_means_no_deficit() {
        let target = calorie_target(&CalorieInputs {
            target_weight_kg: 75.0,
            ..inputs()
        });
        assert_eq!(target.daily_deficit, 0.0);
        assert_eq!(target.daily_calories, target.tdee.round());
    }

    #[test]
    fn identical_inputs_are_deterministic() {
        assert_eq!(calorie_target(&inputs()), calorie_target(&inputs()));
    }

    #[test]
    fn meal_split_rounds_each_bucket() {
        let split = distribute_meals(1781.0);
        assert_eq!(split.breakfast, 445);
        assert_eq!(split.lunch, 623);
        assert_eq!(split.dinner, 534);
        assert_eq!(split.snack, 178);
        // Independent rounding drifts from the total.
        assert_eq!(split.total(), 1780);
    }
}
