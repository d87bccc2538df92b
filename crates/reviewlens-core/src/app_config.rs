use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How review text is turned into a polarity score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringMethod {
    /// Mean of matched word weights, clamped to `[-1.0, 1.0]`.
    #[default]
    Polarity,
    /// Normalized valence sum, `x / sqrt(x^2 + 15)`.
    Compound,
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringMethod::Polarity => write!(f, "polarity"),
            ScoringMethod::Compound => write!(f, "compound"),
        }
    }
}

/// How the `unique_id` of a review is derived from its fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// `Name + "_" + Review Text`, exactly as written by earlier runs.
    #[default]
    Concat,
    /// Hex SHA-256 over the length-prefixed name and review text.
    Sha256,
}

impl std::fmt::Display for IdentityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityStrategy::Concat => write!(f, "concat"),
            IdentityStrategy::Sha256 => write!(f, "sha256"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub taxonomy_path: Option<PathBuf>,
    pub scoring_method: ScoringMethod,
    pub identity_strategy: IdentityStrategy,
}

impl AppConfig {
    /// Colored log output is only wanted on a developer's terminal.
    #[must_use]
    pub fn log_ansi(&self) -> bool {
        self.env == Environment::Development
    }
}
