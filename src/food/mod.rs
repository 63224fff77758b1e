//! Food lookup: search, spoken-meal parsing, and the confirmation gate.

pub mod catalog;
pub mod model;

pub use catalog::{FoodLookup, StaticFoodCatalog};
pub use model::{CONFIRMATION_THRESHOLD, FoodItem, FoodRecord, MealDecision, ParsedMeal};
