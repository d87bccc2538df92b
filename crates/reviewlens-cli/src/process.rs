//! `process` command: one incremental batch.

use std::path::Path;

use reviewlens_core::AppConfig;
use reviewlens_nlp::{Analyzer, AnalyzerConfig};
use reviewlens_pipeline::{preprocess_review_data, BatchReport, PipelineOptions};

/// Run the pipeline once and print its report.
///
/// # Errors
///
/// Returns an error if the taxonomy cannot be loaded or the batch fails.
/// A failed batch leaves the processed dataset as it was; the next
/// invocation simply tries again.
pub(crate) fn run_process(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let analyzer = Analyzer::new(&AnalyzerConfig::from_app_config(config)?);
    let options = PipelineOptions {
        identity_strategy: config.identity_strategy,
    };

    let outcome = preprocess_review_data(&analyzer, &options, input, output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        for line in summary_lines(&outcome.report) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn summary_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![
        format!("run {}", report.run_id),
        format!(
            "input rows: {} (already processed: {}, repeated in batch: {})",
            report.input_rows, report.skipped_seen, report.skipped_in_batch
        ),
    ];

    if report.is_noop() {
        lines.push("no new reviews to process".to_string());
    } else {
        lines.push(format!("processed: {}", report.processed));
        lines.push(format!(
            "sentiment: {} positive, {} neutral, {} negative",
            report.sentiment.positive, report.sentiment.neutral, report.sentiment.negative
        ));
        lines.push(format!(
            "mentions: {} food, {} beverage",
            report.food_mentions, report.beverage_mentions
        ));
    }

    lines.push(match (&report.output_path, report.appended) {
        (Some(path), true) => format!("appended to {path}"),
        (Some(path), false) => format!("{path} unchanged"),
        (None, _) => "nothing persisted".to_string(),
    });

    if report.load_fallback {
        lines.push(
            "warning: existing dataset could not be read; batch was not deduplicated".to_string(),
        );
    }

    if !report.issues.is_empty() {
        lines.push(format!("row issues: {}", report.issues.len()));
        lines.extend(
            report
                .issues
                .iter()
                .map(|issue| format!("  [{}] {}: {}", issue.stage, issue.unique_id, issue.reason)),
        );
    }
    lines
}
