//! Food and meal data models.

use serde::{Deserialize, Serialize};

/// Spoken/typed meals below this confidence need explicit confirmation.
pub const CONFIRMATION_THRESHOLD: f64 = 0.7;

/// A food known to the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: String,
    pub name: String,
    pub serving: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FoodRecord {
    /// Whether `term` names this food (case-insensitive, exact).
    pub fn is_named(&self, term: &str) -> bool {
        self.name.eq_ignore_ascii_case(term) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(term))
    }

    /// Whether `term` occurs in the name or an alias.
    pub fn mentions(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.aliases.iter().any(|a| a.to_lowercase().contains(&term))
    }
}

/// A food entry inside a logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub quantity: f64,
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
}

impl FoodItem {
    pub fn from_record(record: &FoodRecord, quantity: f64) -> Self {
        Self {
            name: record.name.clone(),
            quantity,
            calories: (record.calories * quantity).round(),
            food_id: Some(record.id.clone()),
        }
    }
}

/// Result of interpreting free text as a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMeal {
    pub items: Vec<FoodItem>,
    /// 0.0..=1.0
    pub confidence: f64,
    /// Phrases that matched nothing.
    #[serde(default)]
    pub unmatched: Vec<String>,
}

impl ParsedMeal {
    pub fn total_calories(&self) -> f64 {
        self.items.iter().map(|i| i.calories).sum()
    }
}

/// What to do with a parsed meal.
#[derive(Debug, Clone, PartialEq)]
pub enum MealDecision {
    /// Confident enough to log directly.
    Commit(Vec<FoodItem>),
    /// Ask the user before logging.
    NeedsConfirmation(ParsedMeal),
}

impl MealDecision {
    pub fn from_parsed(parsed: ParsedMeal) -> Self {
        if parsed.confidence < CONFIRMATION_THRESHOLD || parsed.items.is_empty() {
            Self::NeedsConfirmation(parsed)
        } else {
            Self::Commit(parsed.items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(confidence: f64) -> ParsedMeal {
        ParsedMeal {
            items: vec![FoodItem {
                name: "Banana".to_string(),
                quantity: 1.0,
                calories: 105.0,
                food_id: None,
            }],
            confidence,
            unmatched: Vec::new(),
        }
    }

    #[test]
    fn low_confidence_needs_confirmation() {
        assert!(matches!(
            MealDecision::from_parsed(parsed(0.69)),
            MealDecision::NeedsConfirmation(_)
        ));
    }

    #[test]
    fn threshold_confidence_commits() {
        assert!(matches!(
            MealDecision::from_parsed(parsed(0.7)),
            MealDecision::Commit(_)
        ));
    }

    #[test]
    fn empty_meal_is_never_committed() {
        let empty = ParsedMeal {
            items: Vec::new(),
            confidence: 1.0,
            unmatched: Vec::new(),
        };
        assert!(matches!(
            MealDecision::from_parsed(empty),
            MealDecision::NeedsConfirmation(_)
        ));
    }
}
