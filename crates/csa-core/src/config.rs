use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Apify's synchronous run endpoint for the public Instagram comment scraper actor.
pub const DEFAULT_PROVIDER_URL: &str =
    "https://api.apify.com/v2/acts/apify~instagram-comment-scraper/run-sync-get-dataset-items";

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
/// Decoupled from the process environment so tests can drive it from a
/// plain `HashMap` without `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_limit = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        let limit = raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if limit == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "limit must be at least 1".to_string(),
            });
        }
        Ok(limit)
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let apify_api_token = require("APIFY_API_TOKEN")?;

    let env = parse_environment(&or_default("CSA_ENV", "development"))?;
    let bind_addr = parse_addr("CSA_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("CSA_LOG_LEVEL", "info");

    let provider_url = or_default("CSA_PROVIDER_URL", DEFAULT_PROVIDER_URL);
    let provider_timeout_secs = parse_u64("CSA_PROVIDER_TIMEOUT_SECS", "30")?;
    if provider_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CSA_PROVIDER_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let provider_user_agent = or_default("CSA_PROVIDER_USER_AGENT", "csa/0.1 (comment-sentiment)");

    let max_comments = parse_limit("CSA_MAX_COMMENTS", "200")?;
    let max_pages = parse_limit("CSA_MAX_PAGES", "10")?;

    let cors_origins = parse_origins(&or_default("CSA_CORS_ORIGINS", "http://localhost:3000"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        apify_api_token,
        provider_url,
        provider_timeout_secs,
        provider_user_agent,
        max_comments,
        max_pages,
        cors_origins,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CSA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
