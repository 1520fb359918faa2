use crate::app_config::{AppConfig, Environment};
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
/// Every variable is optional. Decoupled from the process environment so it
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("COMMSCOPE_ENV", "development"))?;
    let log_level = or_default("COMMSCOPE_LOG_LEVEL", env.default_log_level());

    let reddit_dir = PathBuf::from(or_default("COMMSCOPE_REDDIT_DIR", "scraped_data/reddit"));
    let discord_dir = PathBuf::from(or_default("COMMSCOPE_DISCORD_DIR", "scraped_data/discord"));
    let instagram_dir = PathBuf::from(or_default(
        "COMMSCOPE_INSTAGRAM_DIR",
        "scraped_data/instagram",
    ));
    let facebook_dir = PathBuf::from(or_default(
        "COMMSCOPE_FACEBOOK_DIR",
        "scraped_data/facebook",
    ));
    let output_dir = PathBuf::from(or_default(
        "COMMSCOPE_OUTPUT_DIR",
        "scraped_data/integrated",
    ));
    let scaling_path = lookup("COMMSCOPE_SCALING_PATH").ok().map(PathBuf::from);

    let rng_seed = match lookup("COMMSCOPE_RNG_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "COMMSCOPE_RNG_SEED".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    let top_categories = parse_usize("COMMSCOPE_TOP_CATEGORIES", "10")?;
    let top_communities = parse_usize("COMMSCOPE_TOP_COMMUNITIES", "15")?;

    Ok(AppConfig {
        env,
        log_level,
        reddit_dir,
        discord_dir,
        instagram_dir,
        facebook_dir,
        output_dir,
        scaling_path,
        rng_seed,
        top_categories,
        top_communities,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "COMMSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
