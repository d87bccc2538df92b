//! Food and beverage mention extraction from normalized review tokens.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Food,
    Beverage,
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityLabel::Food => write!(f, "food"),
            EntityLabel::Beverage => write!(f, "beverage"),
        }
    }
}

/// One recognized mention, as it appears in the normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

const FOOD_TERMS: &[&str] = &[
    "pizza", "burger", "burgers", "pasta", "noodles", "ramen", "rice", "biryani", "curry",
    "sandwich", "sandwiches", "salad", "soup", "steak", "chicken", "fish", "fries", "sushi",
    "taco", "tacos", "burrito", "nachos", "dessert", "desserts", "cake", "pastry", "pastries",
    "bread", "croissant", "waffle", "waffles", "pancake", "pancakes", "momos", "dosa", "idli",
    "paneer", "naan", "kebab", "shawarma", "wrap", "omelette", "eggs", "bagel", "brownie",
    "cookie", "cookies", "donut", "cheesecake", "tiramisu", "lasagna", "risotto", "dumplings",
    "wings", "ribs", "lamb", "prawns", "shrimp", "paratha", "thali", "samosa", "muffin",
    "ice cream", "french fries", "fried rice", "garlic bread", "hot dog", "dim sum",
    "butter chicken", "chocolate cake", "fish tacos", "mac cheese", "spring rolls",
];

const BEVERAGE_TERMS: &[&str] = &[
    "coffee", "tea", "latte", "cappuccino", "espresso", "mocha", "americano", "macchiato",
    "smoothie", "shake", "milkshake", "juice", "lemonade", "mojito", "beer", "wine", "cocktail",
    "cocktails", "soda", "chai", "frappe", "lassi", "kombucha", "cold brew", "iced tea",
    "hot chocolate", "green tea", "cold coffee", "bubble tea", "masala chai", "iced latte",
    "flat white",
];

/// Gazetteer-based recognizer for food and beverage phrases.
///
/// Phrases are matched longest-first over whole tokens, so `cold brew`
/// wins over `cold` and `brew` alone.
#[derive(Debug, Clone)]
pub struct FoodExtractor {
    entries: HashMap<String, EntityLabel>,
    max_phrase_len: usize,
}

impl Default for FoodExtractor {
    fn default() -> Self {
        let food = FOOD_TERMS.iter().map(|t| (*t, EntityLabel::Food));
        let drink = BEVERAGE_TERMS.iter().map(|t| (*t, EntityLabel::Beverage));
        Self::with_entries(food.chain(drink))
    }
}

impl FoodExtractor {
    /// Build an extractor from `(phrase, label)` pairs. Phrases are lowercased
    /// and whitespace-collapsed; later duplicates override earlier ones.
    pub fn with_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, EntityLabel)>,
    {
        let mut map = HashMap::new();
        let mut max_phrase_len = 0;
        for (phrase, label) in entries {
            let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
            if words.is_empty() {
                continue;
            }
            max_phrase_len = max_phrase_len.max(words.len());
            map.insert(words.join(" "), label);
        }
        Self {
            entries: map,
            max_phrase_len,
        }
    }

    /// Mentions found in `tokens`, deduplicated by text in first-seen order.
    #[must_use]
    pub fn extract(&self, tokens: &[&str]) -> Vec<Entity> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        let mut i = 0;

        while i < tokens.len() {
            let longest = self.max_phrase_len.min(tokens.len() - i);
            let hit = (1..=longest).rev().find_map(|len| {
                let phrase = tokens[i..i + len].join(" ");
                self.entries.get(&phrase).map(|label| (phrase, *label, len))
            });

            match hit {
                Some((text, label, len)) => {
                    if seen.insert(text.clone()) {
                        found.push(Entity { text, label });
                    }
                    i += len;
                }
                None => i += 1,
            }
        }

        found
    }

    /// Convenience wrapper splitting already-normalized text on whitespace.
    #[must_use]
    pub fn extract_text(&self, normalized: &str) -> Vec<Entity> {
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        self.extract(&tokens)
    }
}
