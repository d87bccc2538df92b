//! `analyze` command: inspect the derived fields for a single text.

use reviewlens_core::{join_or, AppConfig, Sentiment, GENERAL_CATEGORY, NOT_APPLICABLE};
use reviewlens_nlp::{Analysis, Analyzer, AnalyzerConfig};

pub(crate) fn run_analyze(config: &AppConfig, text: &str, json: bool) -> anyhow::Result<()> {
    let analyzer = Analyzer::new(&AnalyzerConfig::from_app_config(config)?);
    let analysis = analyzer.analyze(text);
    let polarity = analyzer.scorer().polarity(&analysis.processed);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analysis_json(&analysis, polarity))?
        );
    } else {
        println!("processed:     {}", analysis.processed);
        println!("sentiment:     {} ({polarity:.3})", analysis.sentiment);
        println!("issues:        {}", issues_label(&analysis));
        println!("food/beverage: {}", food_label(&analysis));
        println!(
            "food sentiment: {}",
            analysis
                .food_sentiment
                .map_or(NOT_APPLICABLE, Sentiment::as_str)
        );
    }
    Ok(())
}

fn issues_label(analysis: &Analysis) -> String {
    join_or(&analysis.issue_categories, GENERAL_CATEGORY)
}

fn food_label(analysis: &Analysis) -> String {
    join_or(&analysis.entity_texts(), NOT_APPLICABLE)
}

pub(crate) fn analysis_json(analysis: &Analysis, polarity: f32) -> serde_json::Value {
    let entities: Vec<serde_json::Value> = analysis
        .entities
        .iter()
        .map(|e| serde_json::json!({ "text": e.text, "label": e.label }))
        .collect();
    serde_json::json!({
        "processed": analysis.processed,
        "polarity": polarity,
        "sentiment": analysis.sentiment,
        "issue_category": issues_label(analysis),
        "food_beverage": food_label(analysis),
        "entities": entities,
        "food_beverage_sentiment": analysis
            .food_sentiment
            .map_or(NOT_APPLICABLE, Sentiment::as_str),
    })
}
