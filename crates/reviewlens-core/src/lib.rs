//! Shared domain types and configuration for reviewlens.

pub mod app_config;
pub mod config;
pub mod reviews;
pub mod taxonomy;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, IdentityStrategy, ScoringMethod};
pub use config::{load_app_config, load_app_config_from_env};
pub use reviews::{
    join_or, ProcessedReview, RawRating, RawReview, Sentiment, GENERAL_CATEGORY, INPUT_COLUMNS,
    NOT_APPLICABLE, OUTPUT_COLUMNS,
};
pub use taxonomy::{default_taxonomy, load_taxonomy, CategoryConfig, TaxonomyFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read taxonomy file {path}: {source}")]
    TaxonomyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file: {0}")]
    TaxonomyFileParse(#[from] serde_yaml::Error),

    #[error("taxonomy validation failed: {0}")]
    Validation(String),
}
