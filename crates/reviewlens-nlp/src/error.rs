use thiserror::Error;

/// Why a rating cell could not be cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("rating is empty")]
    Empty,

    #[error("rating '{0}' is not a number")]
    Unparsable(String),

    #[error("rating '{0}' is not a finite number")]
    NotFinite(String),
}
