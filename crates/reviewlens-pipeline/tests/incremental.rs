//! End-to-end tests for `preprocess_review_data`.
//!
//! Each test writes a raw batch into a fresh temp dir, runs the pipeline
//! against a processed dataset in the same dir, and inspects both the
//! returned outcome and the bytes on disk.

use std::fs;
use std::path::{Path, PathBuf};

use reviewlens_core::{IdentityStrategy, Sentiment, OUTPUT_COLUMNS};
use reviewlens_nlp::Analyzer;
use reviewlens_pipeline::{
    preprocess_review_data, DatasetError, DatasetState, PipelineError, PipelineOptions, Stage,
};

const INPUT_HEADER: &str = "Name,Reviews Count,Followers,Rating,Review Text\n";

struct Workspace {
    _dir: tempfile::TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn workspace(rows: &str) -> Workspace {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("raw_reviews.csv");
    let output = dir.path().join("processed_reviews.csv");
    fs::write(&input, format!("{INPUT_HEADER}{rows}")).expect("write input");
    Workspace {
        _dir: dir,
        input,
        output,
    }
}

fn run(ws: &Workspace) -> Result<reviewlens_pipeline::ProcessOutcome, PipelineError> {
    preprocess_review_data(
        &Analyzer::default(),
        &PipelineOptions::default(),
        &ws.input,
        Some(&ws.output),
    )
}

fn output_records(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).expect("open output");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), OUTPUT_COLUMNS);
    reader.records().map(|r| r.expect("record")).collect()
}

fn column(name: &str) -> usize {
    OUTPUT_COLUMNS
        .iter()
        .position(|c| *c == name)
        .expect("known column")
}

const MIXED_ROWS: &str = "\
Asha,12 reviews,3 followers,4/5,\"The waiter was rude and the service slow, but the pizza was delicious!\"\n\
Ben,2 reviews,0 followers,3.5,Lovely cozy place with a great view\n\
Chen,40 reviews,18 followers,5,Cold coffee and bland noodles. Terrible.\n\
Dana,1 review,0 followers,abc,We sat down and left.\n";

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn first_run_writes_header_and_every_row() {
    let ws = workspace(MIXED_ROWS);

    let outcome = run(&ws).unwrap();

    assert_eq!(outcome.reviews.len(), 4);
    assert_eq!(outcome.report.dataset_state, DatasetState::Empty);
    assert!(outcome.report.appended);
    assert_eq!(outcome.report.input_rows, 4);

    let records = output_records(&ws.output);
    assert_eq!(records.len(), 4);
    assert_eq!(
        &records[0][column("unique_id")],
        "Asha_The waiter was rude and the service slow, but the pizza was delicious!"
    );
    assert_eq!(&records[0][column("Rating")], "4.0");
    assert_eq!(&records[0][column("Issue_Category")], "Service, Food Quality, Timing");
    assert_eq!(&records[0][column("Food_Beverage")], "pizza");
    assert_eq!(&records[1][column("Issue_Category")], "Location");
    assert_eq!(&records[1][column("Sentiment")], "Positive");
    assert_eq!(&records[2][column("Sentiment")], "Negative");
    assert_eq!(&records[2][column("Food_Beverage")], "cold coffee, noodles");
}

#[test]
fn derived_labels_stay_within_their_domains() {
    let ws = workspace(MIXED_ROWS);
    run(&ws).unwrap();

    for record in output_records(&ws.output) {
        let sentiment = &record[column("Sentiment")];
        assert!(
            ["Positive", "Neutral", "Negative"].contains(&sentiment),
            "unexpected sentiment {sentiment}"
        );
        let food_sentiment = &record[column("Food_Beverage_Sentiment")];
        assert!(
            ["Positive", "Neutral", "Negative", "N/A"].contains(&food_sentiment),
            "unexpected food sentiment {food_sentiment}"
        );
        if &record[column("Food_Beverage")] == "N/A" {
            assert_eq!(food_sentiment, "N/A");
        }
    }
}

#[test]
fn bad_rating_degrades_to_empty_cell_and_is_reported() {
    let ws = workspace(MIXED_ROWS);

    let outcome = run(&ws).unwrap();

    let dana = outcome
        .reviews
        .iter()
        .find(|r| r.name == "Dana")
        .expect("Dana processed");
    assert_eq!(dana.rating, None);
    assert_eq!(dana.sentiment, Sentiment::Neutral);
    assert_eq!(dana.issue_category(), "General");

    let issues: Vec<_> = outcome
        .report
        .issues
        .iter()
        .filter(|i| i.stage == Stage::Rating)
        .collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].unique_id, "Dana_We sat down and left.");

    let records = output_records(&ws.output);
    assert_eq!(&records[3][column("Rating")], "");
}

#[test]
fn empty_review_text_is_kept_with_defaults_and_reported() {
    let ws = workspace("A,1,1,5,\n");

    let outcome = run(&ws).unwrap();

    assert_eq!(outcome.reviews.len(), 1);
    let review = &outcome.reviews[0];
    assert_eq!(review.unique_id, "A_");
    assert_eq!(review.processed_review, "");
    assert_eq!(review.sentiment, Sentiment::Neutral);

    let issues = &outcome.report.issues;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].stage, Stage::Text);
    assert_eq!(issues[0].unique_id, "A_");

    let records = output_records(&ws.output);
    assert_eq!(&records[0][column("unique_id")], "A_");
    assert_eq!(&records[0][column("Processed_Review")], "");
    assert_eq!(&records[0][column("Sentiment")], "Neutral");
    assert_eq!(&records[0][column("Issue_Category")], "General");
}

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

#[test]
fn second_run_on_same_input_is_a_byte_identical_noop() {
    let ws = workspace(MIXED_ROWS);
    run(&ws).unwrap();
    let before = fs::read(&ws.output).unwrap();

    let outcome = run(&ws).unwrap();

    assert!(outcome.reviews.is_empty());
    assert!(outcome.report.is_noop());
    assert!(!outcome.report.appended);
    assert_eq!(outcome.report.skipped_seen, 4);
    assert_eq!(outcome.report.persisted_keys, 4);
    assert_eq!(fs::read(&ws.output).unwrap(), before);
}

#[test]
fn only_unseen_rows_are_processed_and_appended() {
    let ws = workspace("A,1,1,5,hello\nB,1,1,4,world\n");
    fs::write(
        &ws.output,
        format!(
            "{}\nA,1,1,5.0,hello,A_hello,hello,Neutral,General,N/A,N/A\n",
            OUTPUT_COLUMNS.join(",")
        ),
    )
    .unwrap();

    let outcome = run(&ws).unwrap();

    assert_eq!(outcome.reviews.len(), 1);
    assert_eq!(outcome.reviews[0].unique_id, "B_world");
    assert_eq!(outcome.report.dataset_state, DatasetState::Populated);
    assert_eq!(outcome.report.skipped_seen, 1);

    let records = output_records(&ws.output);
    let ids: Vec<&str> = records.iter().map(|r| &r[column("unique_id")]).collect();
    assert_eq!(ids, ["A_hello", "B_world"]);
}

#[test]
fn repeated_rows_within_a_batch_are_written_once() {
    let ws = workspace("A,1,1,5,hello\nA,9,9,1,hello\nB,1,1,4,world\n");

    let outcome = run(&ws).unwrap();

    assert_eq!(outcome.reviews.len(), 2);
    assert_eq!(outcome.report.skipped_in_batch, 1);
    // First occurrence wins.
    assert_eq!(outcome.reviews[0].rating, Some(5.0));
    assert_eq!(output_records(&ws.output).len(), 2);
}

#[test]
fn sha256_identity_is_idempotent_too() {
    let ws = workspace(MIXED_ROWS);
    let options = PipelineOptions {
        identity_strategy: IdentityStrategy::Sha256,
    };
    let analyzer = Analyzer::default();

    let first = preprocess_review_data(&analyzer, &options, &ws.input, Some(&ws.output)).unwrap();
    assert!(first.reviews.iter().all(|r| r.unique_id.len() == 64));

    let second = preprocess_review_data(&analyzer, &options, &ws.input, Some(&ws.output)).unwrap();
    assert!(second.reviews.is_empty());
    assert_eq!(second.report.skipped_seen, 4);
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn unreadable_dataset_falls_back_to_reprocessing() {
    let ws = workspace("A,1,1,5,hello\n");
    fs::write(&ws.output, "Name,Review Text\nX,one\nY,two,three\n").unwrap();

    let outcome = run(&ws).unwrap();

    assert!(outcome.report.load_fallback);
    assert_eq!(outcome.reviews.len(), 1);
    assert!(outcome.report.appended);
    let content = fs::read_to_string(&ws.output).unwrap();
    assert!(content.ends_with("A_hello,hello,Neutral,General,N/A,N/A\n"), "content: {content}");
}

#[test]
fn blank_dataset_gets_a_header_and_stays_deduplicated() {
    let ws = workspace("A,1,1,5,hello\n");
    fs::write(&ws.output, "\n").unwrap();

    let first = run(&ws).unwrap();
    assert_eq!(first.report.dataset_state, DatasetState::Empty);
    assert!(!first.report.load_fallback);
    assert_eq!(first.reviews.len(), 1);

    let second = run(&ws).unwrap();
    assert!(!second.report.load_fallback);
    assert!(second.reviews.is_empty());
    assert_eq!(second.report.skipped_seen, 1);

    let records = output_records(&ws.output);
    assert_eq!(records.len(), 1);
}

#[test]
fn missing_input_column_is_fatal_and_leaves_output_untouched() {
    let ws = workspace("");
    fs::write(&ws.input, "Name,Rating\nA,5\n").unwrap();

    let err = run(&ws).unwrap_err();

    match err {
        PipelineError::Input(DatasetError::MissingColumns { missing, .. }) => {
            assert_eq!(missing, ["Reviews Count", "Followers", "Review Text"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
    assert!(!ws.output.exists());
}

#[test]
fn missing_input_file_is_fatal() {
    let ws = workspace("");
    fs::remove_file(&ws.input).unwrap();

    let err = run(&ws).unwrap_err();
    assert!(
        matches!(err, PipelineError::Input(DatasetError::Io { .. })),
        "got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Without persistence
// ---------------------------------------------------------------------------

#[test]
fn no_output_path_analyzes_without_writing() {
    let ws = workspace("A,1,1,5,hello\nA,1,1,5,hello\n");

    let outcome = preprocess_review_data(
        &Analyzer::default(),
        &PipelineOptions::default(),
        &ws.input,
        None,
    )
    .unwrap();

    assert_eq!(outcome.reviews.len(), 1);
    assert!(!outcome.report.appended);
    assert!(!ws.output.exists());
}

#[test]
fn header_only_input_is_a_noop() {
    let ws = workspace("");

    let outcome = run(&ws).unwrap();

    assert!(outcome.reviews.is_empty());
    assert_eq!(outcome.report.input_rows, 0);
    assert!(!ws.output.exists());
}
