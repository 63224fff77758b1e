//! Food lookup collaborator and a small built-in catalog.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::model::{FoodItem, FoodRecord, ParsedMeal};

/// Food search and spoken-meal parsing.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    /// Foods matching free text, best match first.
    async fn search_by_text(&self, query: &str) -> Vec<FoodRecord>;

    /// Interpret a spoken or typed meal description.
    async fn parse_spoken_text(&self, text: &str) -> ParsedMeal;
}

/// Confidence for a matched phrase with an explicit quantity.
const EXPLICIT_QUANTITY_SCORE: f64 = 1.0;
/// Confidence for a matched phrase where the quantity was assumed.
const ASSUMED_QUANTITY_SCORE: f64 = 0.8;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:,|\band\b|\bwith\b|\bplus\b|&)\s*").unwrap());

static PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        (?:(?:(?P<num>\d+(?:\.\d+)?)|(?P<word>half\s+an?|half|an?|one|two|three|four|five|six|some))\s+)?
        (?:(?:cups?|slices?|pieces?|servings?|bowls?|glass(?:es)?|portions?)\s+of\s+)?
        (?P<food>.+?)\s*$",
    )
    .unwrap()
});

fn word_quantity(word: &str) -> Option<f64> {
    let normalized = word.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    match normalized.as_str() {
        "half" | "half a" | "half an" => Some(0.5),
        "a" | "an" | "one" => Some(1.0),
        "two" => Some(2.0),
        "three" => Some(3.0),
        "four" => Some(4.0),
        "five" => Some(5.0),
        "six" => Some(6.0),
        _ => None,
    }
}

/// Singular form for simple English plurals.
fn singular(term: &str) -> Option<&str> {
    term.strip_suffix("es")
        .filter(|s| s.ends_with("ch") || s.ends_with("sh") || s.ends_with('o'))
        .or_else(|| term.strip_suffix('s'))
}

/// Built-in catalog used when no remote food database is configured.
pub struct StaticFoodCatalog {
    records: Vec<FoodRecord>,
}

impl Default for StaticFoodCatalog {
    fn default() -> Self {
        Self::new(builtin_records())
    }
}

impl StaticFoodCatalog {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        Self { records }
    }

    fn find(&self, term: &str) -> Option<&FoodRecord> {
        let term = term.trim().to_lowercase();
        let term = term
            .strip_prefix("the ")
            .or_else(|| term.strip_prefix("my "))
            .unwrap_or(&term);
        self.records
            .iter()
            .find(|r| r.is_named(term))
            .or_else(|| singular(term).and_then(|s| self.records.iter().find(|r| r.is_named(s))))
    }

    fn parse_phrase(&self, phrase: &str) -> Option<(FoodItem, f64)> {
        let caps = PHRASE.captures(phrase)?;
        let food = caps.name("food")?.as_str();
        let record = self.find(food)?;

        let explicit = caps
            .name("num")
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .or_else(|| caps.name("word").and_then(|m| word_quantity(m.as_str())));

        let (quantity, score) = match explicit {
            Some(q) if q > 0.0 => (q, EXPLICIT_QUANTITY_SCORE),
            _ => (1.0, ASSUMED_QUANTITY_SCORE),
        };
        Some((FoodItem::from_record(record, quantity), score))
    }
}

#[async_trait]
impl FoodLookup for StaticFoodCatalog {
    async fn search_by_text(&self, query: &str) -> Vec<FoodRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let mut exact: Vec<FoodRecord> = Vec::new();
        let mut partial: Vec<FoodRecord> = Vec::new();
        for record in &self.records {
            if record.is_named(query) {
                exact.push(record.clone());
            } else if record.mentions(query) {
                partial.push(record.clone());
            }
        }
        exact.extend(partial);
        exact
    }

    async fn parse_spoken_text(&self, text: &str) -> ParsedMeal {
        let phrases: Vec<&str> = SEPARATOR
            .split(text.trim().trim_end_matches(['.', '!']))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return ParsedMeal {
                items: Vec::new(),
                confidence: 0.0,
                unmatched: Vec::new(),
            };
        }

        let mut items = Vec::new();
        let mut unmatched = Vec::new();
        let mut score = 0.0;
        for phrase in &phrases {
            match self.parse_phrase(phrase) {
                Some((item, s)) => {
                    items.push(item);
                    score += s;
                }
                None => unmatched.push((*phrase).to_string()),
            }
        }

        ParsedMeal {
            items,
            confidence: score / phrases.len() as f64,
            unmatched,
        }
    }
}

fn record(
    id: &str,
    name: &str,
    serving: &str,
    calories: f64,
    macros: (f64, f64, f64),
    aliases: &[&str],
) -> FoodRecord {
    FoodRecord {
        id: id.to_string(),
        name: name.to_string(),
        serving: serving.to_string(),
        calories,
        protein_g: macros.0,
        carbs_g: macros.1,
        fat_g: macros.2,
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
    }
}

fn builtin_records() -> Vec<FoodRecord> {
    vec![
        record("apple", "Apple", "1 medium", 95.0, (0.5, 25.0, 0.3), &[]),
        record("banana", "Banana", "1 medium", 105.0, (1.3, 27.0, 0.4), &[]),
        record("egg", "Egg", "1 large", 78.0, (6.3, 0.6, 5.3), &["boiled egg", "fried egg"]),
        record("oatmeal", "Oatmeal", "1 bowl", 150.0, (5.0, 27.0, 2.5), &["oats", "porridge"]),
        record("chicken_breast", "Chicken Breast", "100 g", 165.0, (31.0, 0.0, 3.6), &["chicken"]),
        record("rice", "Rice", "1 cup cooked", 206.0, (4.3, 45.0, 0.4), &["white rice"]),
        record("brown_rice", "Brown Rice", "1 cup cooked", 216.0, (5.0, 45.0, 1.8), &[]),
        record("salad", "Green Salad", "1 bowl", 120.0, (3.0, 10.0, 7.0), &["salad"]),
        record("bread", "Bread", "1 slice", 80.0, (3.0, 14.0, 1.0), &["toast"]),
        record("yogurt", "Greek Yogurt", "170 g", 100.0, (17.0, 6.0, 0.7), &["yogurt", "yoghurt"]),
        record("coffee", "Coffee", "1 cup", 5.0, (0.3, 0.0, 0.0), &[]),
        record("milk", "Milk", "1 glass", 103.0, (8.0, 12.0, 2.4), &[]),
        record("salmon", "Salmon", "100 g", 208.0, (20.0, 0.0, 13.0), &[]),
        record("pasta", "Pasta", "1 cup cooked", 220.0, (8.0, 43.0, 1.3), &["spaghetti"]),
        record("avocado", "Avocado", "1 whole", 240.0, (3.0, 12.0, 22.0), &[]),
        record("almonds", "Almonds", "1 oz", 164.0, (6.0, 6.0, 14.0), &["almond"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_prefers_exact() {
        let catalog = StaticFoodCatalog::default();
        let results = catalog.search_by_text("rice").await;
        assert_eq!(results[0].id, "rice");
        assert!(results.iter().any(|r| r.id == "brown_rice"));
    }

    #[tokio::test]
    async fn search_empty_query() {
        let catalog = StaticFoodCatalog::default();
        assert!(catalog.search_by_text("  ").await.is_empty());
    }

    #[tokio::test]
    async fn explicit_quantities_are_confident() {
        let catalog = StaticFoodCatalog::default();
        let parsed = catalog.parse_spoken_text("two eggs and a banana").await;
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].name, "Egg");
        assert_eq!(parsed.items[0].quantity, 2.0);
        assert_eq!(parsed.items[0].calories, 156.0);
        assert_eq!(parsed.items[1].name, "Banana");
        assert!((parsed.confidence - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn unit_phrases() {
        let catalog = StaticFoodCatalog::default();
        let parsed = catalog.parse_spoken_text("2 cups of rice, half an avocado").await;
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].quantity, 2.0);
        assert_eq!(parsed.items[1].quantity, 0.5);
        assert_eq!(parsed.items[1].calories, 120.0);
    }

    #[tokio::test]
    async fn unknown_food_lowers_confidence() {
        let catalog = StaticFoodCatalog::default();
        let parsed = catalog.parse_spoken_text("a banana and some mystery stew").await;
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.unmatched, vec!["some mystery stew"]);
        assert!(parsed.confidence < 0.7);
    }

    #[tokio::test]
    async fn assumed_quantity_scores_lower() {
        let catalog = StaticFoodCatalog::default();
        let parsed = catalog.parse_spoken_text("oatmeal with milk").await;
        assert_eq!(parsed.items.len(), 2);
        assert!((parsed.confidence - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_text_has_zero_confidence() {
        let catalog = StaticFoodCatalog::default();
        let parsed = catalog.parse_spoken_text("").await;
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.confidence, 0.0);
    }
}
