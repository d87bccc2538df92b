//! Identity keys used to detect already-processed reviews.

use reviewlens_core::IdentityStrategy;
use sha2::{Digest, Sha256};

/// Derive the `unique_id` for a review.
///
/// `Concat` reproduces the historical `Name_ReviewText` key, so two rows
/// with the same reviewer name and text are the same review. `Sha256`
/// length-prefixes both fields before hashing, which removes the ambiguity
/// of a literal `_` inside either field.
#[must_use]
pub fn identity_key(strategy: IdentityStrategy, name: &str, review_text: &str) -> String {
    match strategy {
        IdentityStrategy::Concat => format!("{name}_{review_text}"),
        IdentityStrategy::Sha256 => {
            let mut hasher = Sha256::new();
            for field in [name, review_text] {
                hasher.update((field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
            format!("{:x}", hasher.finalize())
        }
    }
}
