//! Incremental review preprocessing.

use std::collections::HashSet;
use std::path::Path;

use reviewlens_core::{IdentityStrategy, ProcessedReview, RawReview};
use reviewlens_nlp::{clean_rating, Analyzer};

use crate::error::PipelineError;
use crate::identity::identity_key;
use crate::report::{BatchReport, Stage};
use crate::store::{append_reviews, load_identity_keys, read_batch, DatasetState};

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub identity_strategy: IdentityStrategy,
}

/// Rows appended by one batch, plus its report.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub reviews: Vec<ProcessedReview>,
    pub report: BatchReport,
}

/// Process the reviews in `input_path` that are not yet in `output_path`
/// and append them there.
///
/// 1. Load the persisted identity keys (an unreadable dataset is logged and
///    treated as empty).
/// 2. Read the batch and compute each row's key.
/// 3. Drop rows whose key is persisted or already seen earlier in the batch.
/// 4. Analyze the survivors and append them, writing the header only when
///    the dataset is empty.
///
/// With no `output_path` every row is analyzed and nothing is persisted.
/// A batch with no new rows returns an empty outcome and leaves the output
/// file untouched.
///
/// # Errors
///
/// Returns [`PipelineError`] if the input cannot be read or lacks required
/// columns, or if the output cannot be written. Row-level problems never
/// fail the batch; they are collected in [`BatchReport::issues`].
pub fn preprocess_review_data(
    analyzer: &Analyzer,
    options: &PipelineOptions,
    input_path: &Path,
    output_path: Option<&Path>,
) -> Result<ProcessOutcome, PipelineError> {
    let mut report = BatchReport::start(input_path, output_path);
    tracing::info!(
        run_id = %report.run_id,
        input = %input_path.display(),
        "starting incremental preprocessing"
    );

    let persisted = match output_path {
        Some(path) => load_existing_keys(path, options.identity_strategy, &mut report),
        None => HashSet::new(),
    };

    match run_batch(analyzer, options, input_path, output_path, &persisted, &mut report) {
        Ok(reviews) => {
            report.finish();
            Ok(ProcessOutcome { reviews, report })
        }
        Err(e) => {
            tracing::error!(run_id = %report.run_id, error = %e, "preprocessing pipeline failed");
            Err(e)
        }
    }
}

fn load_existing_keys(
    path: &Path,
    strategy: IdentityStrategy,
    report: &mut BatchReport,
) -> HashSet<String> {
    report.dataset_state = DatasetState::detect(path);
    if report.dataset_state == DatasetState::Empty {
        tracing::debug!(output = %path.display(), "no processed dataset yet");
        return HashSet::new();
    }

    match load_identity_keys(path, strategy) {
        Ok(keys) => {
            tracing::debug!(count = keys.len(), "loaded existing processed reviews");
            report.persisted_keys = keys.len();
            keys
        }
        Err(e) => {
            tracing::warn!(
                output = %path.display(),
                error = %e,
                "could not load processed reviews; reprocessing the whole batch"
            );
            report.load_fallback = true;
            HashSet::new()
        }
    }
}

fn run_batch(
    analyzer: &Analyzer,
    options: &PipelineOptions,
    input_path: &Path,
    output_path: Option<&Path>,
    persisted: &HashSet<String>,
    report: &mut BatchReport,
) -> Result<Vec<ProcessedReview>, PipelineError> {
    let rows = read_batch(input_path).map_err(PipelineError::Input)?;
    report.input_rows = rows.len();
    tracing::debug!(count = rows.len(), "loaded raw reviews");

    let mut batch_keys = HashSet::new();
    let mut fresh = Vec::new();
    for row in rows {
        let key = identity_key(options.identity_strategy, &row.name, &row.review_text);
        if persisted.contains(&key) {
            report.skipped_seen += 1;
        } else if batch_keys.insert(key.clone()) {
            fresh.push((key, row));
        } else {
            report.skipped_in_batch += 1;
        }
    }

    tracing::info!(
        new = fresh.len(),
        seen = report.skipped_seen,
        repeated = report.skipped_in_batch,
        "partitioned batch"
    );

    if fresh.is_empty() {
        tracing::info!("no new reviews to process");
        return Ok(Vec::new());
    }

    let reviews: Vec<ProcessedReview> = fresh
        .into_iter()
        .map(|(key, row)| process_row(analyzer, key, row, report))
        .collect();

    if let Some(path) = output_path {
        append_reviews(path, &reviews, report.dataset_state).map_err(PipelineError::Persist)?;
        report.appended = true;
        tracing::info!(
            count = reviews.len(),
            output = %path.display(),
            "appended processed reviews"
        );
    }

    Ok(reviews)
}

fn process_row(
    analyzer: &Analyzer,
    unique_id: String,
    row: RawReview,
    report: &mut BatchReport,
) -> ProcessedReview {
    if row.review_text.trim().is_empty() {
        report.record_issue(&unique_id, Stage::Text, "review text is empty".to_string());
    }

    let rating = match clean_rating(&row.raw_rating()) {
        Ok(value) => Some(value),
        Err(e) => {
            report.record_issue(&unique_id, Stage::Rating, e.to_string());
            None
        }
    };

    let analysis = analyzer.analyze(&row.review_text);
    let review = ProcessedReview {
        food_beverage: analysis.entity_texts(),
        name: row.name,
        reviews_count: row.reviews_count,
        followers: row.followers,
        rating,
        review_text: row.review_text,
        unique_id,
        processed_review: analysis.processed,
        sentiment: analysis.sentiment,
        issue_categories: analysis.issue_categories,
        food_beverage_sentiment: analysis.food_sentiment,
    };
    report.record_review(&review, &analysis.entities);
    review
}
