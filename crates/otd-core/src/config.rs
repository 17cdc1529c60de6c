use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

const REQUIRED_VARS: [&str; 6] = [
    "OPENAI_API_KEY",
    "OPENAI_PROMPT_ID",
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_SECRET",
];

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every missing required variable is collected so a single error names all of them.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let present = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());

    let or_default = |var: &str, default: &str| -> String {
        present(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let missing: Vec<String> = REQUIRED_VARS
        .into_iter()
        .filter(|var| present(var).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingEnvVars(missing));
    }

    let require = |var: &str| -> Result<String, ConfigError> {
        present(var).ok_or_else(|| ConfigError::MissingEnvVars(vec![var.to_string()]))
    };

    let save_local = parse_bool("SAVE_LOCAL", &or_default("SAVE_LOCAL", "false"))?;

    Ok(AppConfig {
        openai_api_key: require("OPENAI_API_KEY")?,
        openai_prompt_id: require("OPENAI_PROMPT_ID")?,
        openai_prompt_version: or_default("OPENAI_PROMPT_VERSION", "2"),
        twitter_api_key: require("TWITTER_API_KEY")?,
        twitter_api_secret: require("TWITTER_API_SECRET")?,
        twitter_access_token: require("TWITTER_ACCESS_TOKEN")?,
        twitter_access_secret: require("TWITTER_ACCESS_SECRET")?,
        save_local,
        image_dir: PathBuf::from(or_default("OTD_IMAGE_DIR", "assets/images")),
        image_style: or_default("OTD_IMAGE_STYLE", "cinematic"),
        log_level: or_default("OTD_LOG_LEVEL", "info"),
        http_timeout_secs: parse_u64("OTD_HTTP_TIMEOUT_SECS", "120")?,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0` and `yes/no`, ignoring case.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
