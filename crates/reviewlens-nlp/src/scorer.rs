//! Restaurant-review lexicon scorer.

use std::collections::HashMap;

use reviewlens_core::{ScoringMethod, Sentiment};

/// Review-domain word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("delicious", 1.0),
    ("tasty", 0.6),
    ("yummy", 0.8),
    ("flavorful", 0.6),
    ("fresh", 0.3),
    ("juicy", 0.5),
    ("crispy", 0.4),
    ("tender", 0.4),
    ("authentic", 0.5),
    ("perfect", 1.0),
    ("best", 1.0),
    ("superb", 1.0),
    ("outstanding", 0.5),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("enjoyed", 0.5),
    ("happy", 0.8),
    ("pleasant", 0.7),
    ("beautiful", 0.85),
    ("warm", 0.6),
    ("cozy", 0.5),
    ("clean", 0.4),
    ("friendly", 0.4),
    ("polite", 0.5),
    ("helpful", 0.4),
    ("attentive", 0.5),
    ("quick", 0.3),
    ("fast", 0.2),
    ("affordable", 0.4),
    ("reasonable", 0.2),
    ("generous", 0.4),
    ("worth", 0.3),
    ("recommend", 0.4),
    ("recommended", 0.4),
    // Negative signals
    ("bad", -0.7),
    ("poor", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("disgusting", -1.0),
    ("mediocre", -0.4),
    ("bland", -0.5),
    ("stale", -0.5),
    ("soggy", -0.5),
    ("greasy", -0.4),
    ("burnt", -0.5),
    ("salty", -0.3),
    ("cold", -0.6),
    ("dirty", -0.6),
    ("noisy", -0.4),
    ("crowded", -0.3),
    ("rude", -0.3),
    ("unfriendly", -0.5),
    ("unprofessional", -0.5),
    ("slow", -0.3),
    ("late", -0.3),
    ("wrong", -0.5),
    ("overpriced", -0.5),
    ("expensive", -0.5),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
];

/// Words that scale the next scored word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("really", 1.3),
    ("super", 1.3),
    ("highly", 1.3),
    ("totally", 1.3),
    ("absolutely", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
];

/// Words that flip the next scored word. Most English negators are NLTK
/// stopwords and vanish during normalization; these survive it.
const NEGATORS: &[&str] = &["never", "hardly", "barely", "without", "cannot", "nothing"];

const NEGATION_FACTOR: f32 = -0.5;

/// Per-word valence scale used by the compound method.
const COMPOUND_SCALE: f32 = 4.0;

/// Normalization constant for the compound method.
const COMPOUND_ALPHA: f32 = 15.0;

/// Scores text with the domain lexicon using a fixed [`ScoringMethod`].
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    method: ScoringMethod,
    weights: HashMap<&'static str, f32>,
    intensifiers: HashMap<&'static str, f32>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(ScoringMethod::default())
    }
}

impl SentimentScorer {
    #[must_use]
    pub fn new(method: ScoringMethod) -> Self {
        Self {
            method,
            weights: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn method(&self) -> ScoringMethod {
        self.method
    }

    /// Weighted contribution of each scored word, after modifiers.
    fn contributions(&self, text: &str) -> Vec<f32> {
        let mut out = Vec::new();
        let mut multiplier = 1.0_f32;
        let mut negated = false;

        for word in text.split_whitespace() {
            let w = word
                .trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase();
            if w.is_empty() {
                continue;
            }

            if let Some(&boost) = self.intensifiers.get(w.as_str()) {
                multiplier *= boost;
                continue;
            }
            if NEGATORS.contains(&w.as_str()) {
                negated = !negated;
                continue;
            }

            if let Some(&weight) = self.weights.get(w.as_str()) {
                let mut value = weight * multiplier;
                if negated {
                    value *= NEGATION_FACTOR;
                }
                out.push(value);
            }
            multiplier = 1.0;
            negated = false;
        }

        out
    }

    /// Polarity of `text` in `[-1.0, 1.0]`. Empty or unknown text scores `0.0`.
    #[must_use]
    pub fn polarity(&self, text: &str) -> f32 {
        let contributions = self.contributions(text);
        if contributions.is_empty() {
            return 0.0;
        }

        let score = match self.method {
            ScoringMethod::Polarity => {
                #[allow(clippy::cast_precision_loss)]
                let denom = contributions.len() as f32;
                contributions.iter().sum::<f32>() / denom
            }
            ScoringMethod::Compound => {
                let sum: f32 = contributions.iter().map(|c| c * COMPOUND_SCALE).sum();
                sum / (sum * sum + COMPOUND_ALPHA).sqrt()
            }
        };
        score.clamp(-1.0, 1.0)
    }

    /// Three-way label for `text`.
    #[must_use]
    pub fn label(&self, text: &str) -> Sentiment {
        Sentiment::from_polarity(self.polarity(text))
    }
}
