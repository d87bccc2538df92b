use crate::app_config::{AppConfig, Environment, IdentityStrategy, ScoringMethod};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("REVIEWLENS_ENV", "development"))?;
    let log_level = or_default("REVIEWLENS_LOG_LEVEL", "info");
    let input_path = PathBuf::from(or_default("REVIEWLENS_INPUT_PATH", "./raw_reviews.csv"));
    let output_path = PathBuf::from(or_default(
        "REVIEWLENS_OUTPUT_PATH",
        "./processed_reviews.csv",
    ));
    let taxonomy_path = lookup("REVIEWLENS_TAXONOMY_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let scoring_method = parse_scoring_method(&or_default("REVIEWLENS_SCORER", "polarity"))?;
    let identity_strategy = parse_identity_strategy(&or_default("REVIEWLENS_IDENTITY", "concat"))?;

    Ok(AppConfig {
        env,
        log_level,
        input_path,
        output_path,
        taxonomy_path,
        scoring_method,
        identity_strategy,
    })
}

fn invalid(var: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: format!("unknown value '{value}'; expected one of {expected}"),
    }
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid(
            "REVIEWLENS_ENV",
            other,
            "development, test, production",
        )),
    }
}

/// Parse a scorer name.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for names other than `polarity` or `compound`.
pub fn parse_scoring_method(s: &str) -> Result<ScoringMethod, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "polarity" => Ok(ScoringMethod::Polarity),
        "compound" => Ok(ScoringMethod::Compound),
        _ => Err(invalid("REVIEWLENS_SCORER", s, "polarity, compound")),
    }
}

/// Parse an identity strategy name.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for names other than `concat` or `sha256`.
pub fn parse_identity_strategy(s: &str) -> Result<IdentityStrategy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "concat" => Ok(IdentityStrategy::Concat),
        "sha256" => Ok(IdentityStrategy::Sha256),
        _ => Err(invalid("REVIEWLENS_IDENTITY", s, "concat, sha256")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
