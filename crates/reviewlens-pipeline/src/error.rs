use thiserror::Error;

/// Failure reading or writing one of the CSV datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing required columns: {}", .missing.join(", "))]
    MissingColumns { path: String, missing: Vec<String> },
}

/// Batch-fatal pipeline failure. The caller decides whether to retry.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input batch: {0}")]
    Input(#[source] DatasetError),

    #[error("failed to persist processed reviews: {0}")]
    Persist(#[source] DatasetError),
}
