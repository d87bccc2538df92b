//! The per-invocation analysis context.

use reviewlens_core::{
    default_taxonomy, load_taxonomy, AppConfig, ConfigError, ScoringMethod, Sentiment,
    TaxonomyFile,
};

use crate::entities::{Entity, FoodExtractor};
use crate::issues::IssueClassifier;
use crate::scorer::SentimentScorer;
use crate::text::TextNormalizer;

/// Inputs needed to build an [`Analyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub scoring_method: ScoringMethod,
    pub taxonomy: TaxonomyFile,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scoring_method: ScoringMethod::default(),
            taxonomy: default_taxonomy(),
        }
    }
}

impl AnalyzerConfig {
    /// Resolve the analyzer settings from application config, loading the
    /// taxonomy file when one is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the taxonomy file cannot be read or is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => load_taxonomy(path)?,
            None => default_taxonomy(),
        };
        Ok(Self {
            scoring_method: config.scoring_method,
            taxonomy,
        })
    }
}

/// Derived text fields for one review.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub processed: String,
    pub sentiment: Sentiment,
    pub issue_categories: Vec<String>,
    pub entities: Vec<Entity>,
    /// `None` when no food or beverage was mentioned.
    pub food_sentiment: Option<Sentiment>,
}

impl Analysis {
    #[must_use]
    pub fn entity_texts(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.text.clone()).collect()
    }
}

/// Owns every text stage. Built once and shared by reference across a batch.
#[derive(Debug, Clone)]
pub struct Analyzer {
    normalizer: TextNormalizer,
    scorer: SentimentScorer,
    issues: IssueClassifier,
    foods: FoodExtractor,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl Analyzer {
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        tracing::debug!(
            scorer = %config.scoring_method,
            categories = config.taxonomy.categories.len(),
            "building analyzer"
        );
        let normalizer = TextNormalizer::default();
        let issues = IssueClassifier::from_taxonomy(&config.taxonomy, &normalizer);
        Self {
            normalizer,
            scorer: SentimentScorer::new(config.scoring_method),
            issues,
            foods: FoodExtractor::default(),
        }
    }

    #[must_use]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// Run every text stage over one raw review text.
    ///
    /// Sentiment, issues and entities are all derived from the normalized
    /// text. Food sentiment scores only the joined entity phrases and is
    /// skipped when nothing was found.
    #[must_use]
    pub fn analyze(&self, review_text: &str) -> Analysis {
        let processed = self.normalizer.normalize(review_text);
        let sentiment = self.scorer.label(&processed);
        let issue_categories = self.issues.classify(&processed);

        let tokens: Vec<&str> = processed.split_whitespace().collect();
        let entities = self.foods.extract(&tokens);
        let food_sentiment = if entities.is_empty() {
            None
        } else {
            let joined = entities
                .iter()
                .map(|e| e.text.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Some(self.scorer.label(&joined))
        };

        Analysis {
            processed,
            sentiment,
            issue_categories,
            entities,
            food_sentiment,
        }
    }
}
