//! Lowercasing, tokenization and stopword removal.

use std::collections::HashSet;

use regex::Regex;
use stop_words::{get, LANGUAGE};

/// NLTK's English stopword list.
#[must_use]
pub fn english_stopwords() -> HashSet<String> {
    get(LANGUAGE::English).into_iter().map(String::from).collect()
}

/// Cleans review text into space-separated content words.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
    token_re: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(english_stopwords())
    }
}

impl TextNormalizer {
    /// Build a normalizer with a custom stopword set. Stopwords are matched lowercase.
    #[must_use]
    pub fn new(stopwords: HashSet<String>) -> Self {
        let stopwords = stopwords.into_iter().map(|w| w.to_lowercase()).collect();
        // Word runs and punctuation runs become separate tokens.
        let token_re = Regex::new(r"\w+|[^\w\s]+").expect("valid token regex");
        Self {
            stopwords,
            token_re,
        }
    }

    #[must_use]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Lowercased tokens that are purely alphabetic and not stopwords.
    #[must_use]
    pub fn tokens<'a>(&self, lowered: &'a str) -> Vec<&'a str> {
        self.token_re
            .find_iter(lowered)
            .map(|m| m.as_str())
            .filter(|t| t.chars().all(char::is_alphabetic))
            .filter(|t| !self.is_stopword(t))
            .collect()
    }

    /// Lowercase, tokenize, drop non-alphabetic tokens and stopwords, rejoin.
    ///
    /// Returns an empty string for text with no content words.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.tokens(&lowered).join(" ")
    }
}
