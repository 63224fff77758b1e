//! Units and anthropometric enums shared by the derivation functions.

use serde::{Deserialize, Serialize};

const LBS_PER_KG: f64 = 2.204_622_621_8;
const CM_PER_INCH: f64 = 2.54;

/// Biological sex input for the BMR equation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    /// Total height in inches.
    In,
}

impl WeightUnit {
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            Self::Kg => value,
            Self::Lbs => value / LBS_PER_KG,
        }
    }

    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            Self::Kg => kg,
            Self::Lbs => kg * LBS_PER_KG,
        }
    }
}

impl HeightUnit {
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            Self::Cm => value,
            Self::In => value * CM_PER_INCH,
        }
    }
}

/// Convert kilograms to pounds.
pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_conversion_roundtrips() {
        let kg = WeightUnit::Lbs.to_kg(154.0);
        assert!((kg - 69.85).abs() < 0.01);
        assert!((WeightUnit::Lbs.from_kg(kg) - 154.0).abs() < 1e-9);
        assert_eq!(WeightUnit::Kg.to_kg(70.0), 70.0);
    }

    #[test]
    fn height_in_inches() {
        assert!((HeightUnit::In.to_cm(65.0) - 165.1).abs() < 1e-9);
    }
}
