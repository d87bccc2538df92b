use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::reviews::GENERAL_CATEGORY;
use crate::ConfigError;

/// One issue category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered category table. Order is the precedence used when joining matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyFile {
    pub categories: Vec<CategoryConfig>,
}

fn category(name: &str, keywords: &[&str]) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

/// The built-in restaurant issue table.
#[must_use]
pub fn default_taxonomy() -> TaxonomyFile {
    TaxonomyFile {
        categories: vec![
            category(
                "Service",
                &["service", "rude", "waiter", "staff", "polite", "friendly"],
            ),
            category(
                "Food Quality",
                &["food", "yummy", "delicious", "tasty", "flavor", "coffee"],
            ),
            category(
                "Timing",
                &["long", "waiting", "slow", "delay", "quick", "fast"],
            ),
            category(
                "Location",
                &["location", "place", "view", "ambience", "cozy"],
            ),
        ],
    }
}

/// Load and validate an issue taxonomy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<TaxonomyFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let taxonomy: TaxonomyFile = serde_yaml::from_str(&content)?;

    validate_taxonomy(&taxonomy)?;

    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &TaxonomyFile) -> Result<(), ConfigError> {
    if taxonomy.categories.is_empty() {
        return Err(ConfigError::Validation(
            "taxonomy must define at least one category".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for category in &taxonomy.categories {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if name.eq_ignore_ascii_case(GENERAL_CATEGORY) {
            return Err(ConfigError::Validation(format!(
                "'{GENERAL_CATEGORY}' is reserved for reviews matching no category"
            )));
        }

        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                category.name
            )));
        }

        if category.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no keywords",
                category.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;
