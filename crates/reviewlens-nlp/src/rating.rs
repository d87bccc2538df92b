//! Rating cleanup for the heterogeneous values scraped from review pages.

use reviewlens_core::RawRating;

use crate::error::RatingError;

/// Clean a rating into a float.
///
/// Numbers pass through. Text containing `/` is read as a fraction and only
/// the numerator is kept (`"4/5"` becomes `4.0`). Other text is parsed whole.
///
/// # Errors
///
/// Returns [`RatingError`] when the value is empty, unparsable, or not finite.
pub fn clean_rating(raw: &RawRating) -> Result<f64, RatingError> {
    let value = match raw {
        RawRating::Number(v) => *v,
        RawRating::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(RatingError::Empty);
            }
            let numerator = trimmed
                .split_once('/')
                .map_or(trimmed, |(left, _)| left.trim());
            numerator
                .parse::<f64>()
                .map_err(|_| RatingError::Unparsable(text.clone()))?
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(RatingError::NotFinite(raw.to_string()))
    }
}
