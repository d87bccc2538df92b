//! Review rows as read from the scraper and as written for the dashboard.

use serde::{Deserialize, Serialize, Serializer};

/// Sentinel written when a derived field has no value.
pub const NOT_APPLICABLE: &str = "N/A";

/// Issue category written when no keyword matched.
pub const GENERAL_CATEGORY: &str = "General";

/// Columns the scraper must provide.
pub const INPUT_COLUMNS: [&str; 5] = ["Name", "Reviews Count", "Followers", "Rating", "Review Text"];

/// Columns of the persisted dataset, in write order.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "Name",
    "Reviews Count",
    "Followers",
    "Rating",
    "Review Text",
    "unique_id",
    "Processed_Review",
    "Sentiment",
    "Issue_Category",
    "Food_Beverage",
    "Food_Beverage_Sentiment",
];

/// One scraped review. Empty cells deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Reviews Count", default)]
    pub reviews_count: String,
    #[serde(rename = "Followers", default)]
    pub followers: String,
    #[serde(rename = "Rating", default)]
    pub rating: String,
    #[serde(rename = "Review Text", default)]
    pub review_text: String,
}

impl RawReview {
    /// The rating cell, classified as numeric or free text.
    #[must_use]
    pub fn raw_rating(&self) -> RawRating {
        RawRating::from_field(&self.rating)
    }
}

/// A rating cell before cleaning.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRating {
    Number(f64),
    Text(String),
}

impl RawRating {
    /// Classify a CSV cell: anything that parses as a float is numeric.
    #[must_use]
    pub fn from_field(field: &str) -> Self {
        match field.trim().parse::<f64>() {
            Ok(value) => RawRating::Number(value),
            Err(_) => RawRating::Text(field.to_string()),
        }
    }
}

impl std::fmt::Display for RawRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawRating::Number(v) => write!(f, "{v}"),
            RawRating::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Map a polarity score onto a label. Exactly `0.0` is neutral.
    #[must_use]
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review with all derived columns, serialized in [`OUTPUT_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedReview {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Reviews Count")]
    pub reviews_count: String,
    #[serde(rename = "Followers")]
    pub followers: String,
    /// Cleaned rating; `None` is written as an empty cell.
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Review Text")]
    pub review_text: String,
    #[serde(rename = "unique_id")]
    pub unique_id: String,
    #[serde(rename = "Processed_Review")]
    pub processed_review: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Issue_Category", serialize_with = "serialize_categories")]
    pub issue_categories: Vec<String>,
    #[serde(rename = "Food_Beverage", serialize_with = "serialize_food_items")]
    pub food_beverage: Vec<String>,
    #[serde(
        rename = "Food_Beverage_Sentiment",
        serialize_with = "serialize_food_sentiment"
    )]
    pub food_beverage_sentiment: Option<Sentiment>,
}

impl ProcessedReview {
    /// `Issue_Category` as written to disk.
    #[must_use]
    pub fn issue_category(&self) -> String {
        join_or(&self.issue_categories, GENERAL_CATEGORY)
    }

    /// `Food_Beverage` as written to disk.
    #[must_use]
    pub fn food_beverage_label(&self) -> String {
        join_or(&self.food_beverage, NOT_APPLICABLE)
    }

    /// `Food_Beverage_Sentiment` as written to disk.
    #[must_use]
    pub fn food_beverage_sentiment_label(&self) -> &'static str {
        self.food_beverage_sentiment
            .map_or(NOT_APPLICABLE, Sentiment::as_str)
    }
}

/// Join labels with `", "`, or return `fallback` when there are none.
#[must_use]
pub fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn serialize_categories<S: Serializer>(items: &[String], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&join_or(items, GENERAL_CATEGORY))
}

fn serialize_food_items<S: Serializer>(items: &[String], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&join_or(items, NOT_APPLICABLE))
}

#[allow(clippy::ref_option)]
fn serialize_food_sentiment<S: Serializer>(
    value: &Option<Sentiment>,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.map_or(NOT_APPLICABLE, Sentiment::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_or_uses_fallback_only_when_empty() {
        assert_eq!(join_or(&[], GENERAL_CATEGORY), "General");
        assert_eq!(
            join_or(&["pizza".to_string(), "latte".to_string()], NOT_APPLICABLE),
            "pizza, latte"
        );
    }

    fn sample() -> ProcessedReview {
        ProcessedReview {
            name: "Asha".to_string(),
            reviews_count: "12 reviews".to_string(),
            followers: "3 followers".to_string(),
            rating: Some(4.0),
            review_text: "Great coffee, rude staff".to_string(),
            unique_id: "Asha_Great coffee, rude staff".to_string(),
            processed_review: "great coffee rude staff".to_string(),
            sentiment: Sentiment::Positive,
            issue_categories: vec!["Service".to_string(), "Food Quality".to_string()],
            food_beverage: vec!["coffee".to_string()],
            food_beverage_sentiment: Some(Sentiment::Neutral),
        }
    }

    fn write_row(review: &ProcessedReview) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(review).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn sentiment_from_polarity_boundaries() {
        assert_eq!(Sentiment::from_polarity(0.01), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(-0.01), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
    }

    #[test]
    fn raw_rating_classifies_numeric_cells() {
        assert_eq!(RawRating::from_field("4"), RawRating::Number(4.0));
        assert_eq!(RawRating::from_field(" 3.5 "), RawRating::Number(3.5));
        assert_eq!(
            RawRating::from_field("4/5"),
            RawRating::Text("4/5".to_string())
        );
    }

    #[test]
    fn serialized_header_matches_output_columns() {
        let out = write_row(&sample());
        let header = out.lines().next().unwrap();
        assert_eq!(header, OUTPUT_COLUMNS.join(","));
    }

    #[test]
    fn serialized_row_joins_derived_lists() {
        let out = write_row(&sample());
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains("\"Service, Food Quality\""), "row: {row}");
        assert!(row.ends_with(",coffee,Neutral"), "row: {row}");
        assert!(row.contains(",4.0,"), "row: {row}");
    }

    #[test]
    fn empty_derived_fields_use_sentinels() {
        let mut review = sample();
        review.rating = None;
        review.issue_categories.clear();
        review.food_beverage.clear();
        review.food_beverage_sentiment = None;

        assert_eq!(review.issue_category(), "General");
        assert_eq!(review.food_beverage_label(), "N/A");
        assert_eq!(review.food_beverage_sentiment_label(), "N/A");

        let out = write_row(&review);
        let row = out.lines().nth(1).unwrap();
        assert!(row.ends_with(",General,N/A,N/A"), "row: {row}");
        assert!(row.contains("3 followers,,"), "row: {row}");
    }
}
