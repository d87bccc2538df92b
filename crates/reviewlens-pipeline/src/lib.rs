//! Incremental preprocessing of scraped restaurant reviews.
//!
//! Reads a raw review batch, drops rows already present in the cumulative
//! processed dataset, derives the enrichment columns for the rest, and
//! appends them.

pub mod error;
pub mod identity;
pub mod pipeline;
pub mod report;
pub mod store;

pub use error::{DatasetError, PipelineError};
pub use identity::identity_key;
pub use pipeline::{preprocess_review_data, PipelineOptions, ProcessOutcome};
pub use report::{BatchReport, RowIssue, SentimentCounts, Stage};
pub use store::DatasetState;
