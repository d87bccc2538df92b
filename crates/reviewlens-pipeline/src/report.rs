//! Per-batch summary: what was skipped, what was written, and which rows degraded.

use std::path::Path;

use chrono::{DateTime, Utc};
use reviewlens_core::{ProcessedReview, Sentiment};
use reviewlens_nlp::{Entity, EntityLabel};
use serde::Serialize;
use uuid::Uuid;

use crate::store::DatasetState;

/// Stage that produced a row-level degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Text,
    Rating,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Text => write!(f, "text"),
            Stage::Rating => write!(f, "rating"),
        }
    }
}

/// A row that was kept but fell back to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    pub unique_id: String,
    pub stage: Stage,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub input_path: String,
    pub output_path: Option<String>,
    pub dataset_state: DatasetState,
    /// The persisted dataset could not be read and dedup ran against nothing.
    pub load_fallback: bool,
    pub persisted_keys: usize,
    pub input_rows: usize,
    pub skipped_seen: usize,
    pub skipped_in_batch: usize,
    pub processed: usize,
    pub appended: bool,
    pub sentiment: SentimentCounts,
    pub food_sentiment: SentimentCounts,
    pub food_mentions: usize,
    pub beverage_mentions: usize,
    pub issues: Vec<RowIssue>,
}

impl BatchReport {
    #[must_use]
    pub fn start(input_path: &Path, output_path: Option<&Path>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            input_path: input_path.display().to_string(),
            output_path: output_path.map(|p| p.display().to_string()),
            dataset_state: DatasetState::Empty,
            load_fallback: false,
            persisted_keys: 0,
            input_rows: 0,
            skipped_seen: 0,
            skipped_in_batch: 0,
            processed: 0,
            appended: false,
            sentiment: SentimentCounts::default(),
            food_sentiment: SentimentCounts::default(),
            food_mentions: 0,
            beverage_mentions: 0,
            issues: Vec::new(),
        }
    }

    pub(crate) fn record_issue(&mut self, unique_id: &str, stage: Stage, reason: String) {
        tracing::debug!(unique_id, %stage, %reason, "row degraded to default value");
        self.issues.push(RowIssue {
            unique_id: unique_id.to_string(),
            stage,
            reason,
        });
    }

    pub(crate) fn record_review(&mut self, review: &ProcessedReview, entities: &[Entity]) {
        self.processed += 1;
        self.sentiment.add(review.sentiment);
        if let Some(food) = review.food_beverage_sentiment {
            self.food_sentiment.add(food);
        }
        for entity in entities {
            match entity.label {
                EntityLabel::Food => self.food_mentions += 1,
                EntityLabel::Beverage => self.beverage_mentions += 1,
            }
        }
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// True when nothing new was found in the batch.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.processed == 0
    }
}
