//! Text analysis stages for restaurant reviews.
//!
//! Normalizes review text, cleans ratings, scores sentiment with a
//! review-domain lexicon, classifies issues from a keyword table and extracts
//! food and beverage mentions. [`Analyzer`] owns all stages so they are built
//! once per pipeline invocation.

pub mod analyzer;
pub mod entities;
pub mod error;
pub mod issues;
pub mod rating;
pub mod scorer;
pub mod text;

pub use analyzer::{Analysis, Analyzer, AnalyzerConfig};
pub use entities::{Entity, EntityLabel, FoodExtractor};
pub use error::RatingError;
pub use issues::IssueClassifier;
pub use rating::clean_rating;
pub use scorer::SentimentScorer;
pub use text::{english_stopwords, TextNormalizer};
