//! Keyword-table issue classification.

use reviewlens_core::{default_taxonomy, join_or, TaxonomyFile, GENERAL_CATEGORY};

use crate::text::TextNormalizer;

#[derive(Debug, Clone)]
struct Category {
    name: String,
    /// Keywords normalized the same way as review text.
    keywords: Vec<String>,
}

/// Maps normalized review text onto zero or more issue categories.
///
/// A keyword matches when it occurs anywhere in the lowercased text, so
/// `waiter` also fires on `waiters` (and `view` on `review`). Categories are
/// tested in table order, which is also the order of the returned names.
#[derive(Debug, Clone)]
pub struct IssueClassifier {
    categories: Vec<Category>,
}

impl Default for IssueClassifier {
    fn default() -> Self {
        Self::from_taxonomy(&default_taxonomy(), &TextNormalizer::default())
    }
}

impl IssueClassifier {
    /// Build the classifier, passing every keyword through `normalizer` so
    /// phrases such as `value for money` line up with normalized reviews.
    ///
    /// Keywords made only of stopwords could never match and are dropped.
    #[must_use]
    pub fn from_taxonomy(taxonomy: &TaxonomyFile, normalizer: &TextNormalizer) -> Self {
        let categories = taxonomy
            .categories
            .iter()
            .map(|c| {
                let name = c.name.trim().to_string();
                let keywords = c
                    .keywords
                    .iter()
                    .filter_map(|k| {
                        let normalized = normalizer.normalize(k);
                        if normalized.is_empty() {
                            tracing::warn!(
                                category = %name,
                                keyword = %k,
                                "keyword has no content words after normalization; ignoring"
                            );
                            None
                        } else {
                            Some(normalized)
                        }
                    })
                    .collect();
                Category { name, keywords }
            })
            .collect();
        Self { categories }
    }

    /// Names of every category with at least one matching keyword.
    ///
    /// An empty result means the review falls under [`GENERAL_CATEGORY`].
    #[must_use]
    pub fn classify(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.categories
            .iter()
            .filter(|c| c.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|c| c.name.clone())
            .collect()
    }

    /// [`classify`](Self::classify) joined for display, or `General`.
    #[must_use]
    pub fn label(&self, text: &str) -> String {
        join_or(&self.classify(text), GENERAL_CATEGORY)
    }
}
