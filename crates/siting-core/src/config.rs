use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

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

/// Load configuration for the command line tool.
///
/// Same variables as [`load_app_config`], but `OPENWEATHER_API_KEY` stays
/// optional in production: only the `weather` command needs it, and that
/// command checks for the key itself.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
pub fn load_cli_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_config(|key| std::env::var(key), WeatherKey::Optional)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeatherKey {
    RequiredInProduction,
    Optional,
}

/// Build server configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    build_config(lookup, WeatherKey::RequiredInProduction)
}

fn build_config<F>(lookup: F, weather_key: WeatherKey) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SITING_ENV", "development"))?;

    let bind_addr = parse("SITING_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("SITING_LOG_LEVEL", "info");
    let stores_path = PathBuf::from(or_default("SITING_STORES_PATH", "./data/stores.yaml"));
    let warehouses_path = PathBuf::from(or_default(
        "SITING_WAREHOUSES_PATH",
        "./data/warehouses.yaml",
    ));

    let weather_api_key = lookup("OPENWEATHER_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    if weather_api_key.is_none()
        && env == Environment::Production
        && weather_key == WeatherKey::RequiredInProduction
    {
        return Err(ConfigError::MissingEnvVar("OPENWEATHER_API_KEY".to_string()));
    }
    let weather_base_url = or_default("SITING_WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL);
    let weather_timeout_secs = parse_u64("SITING_WEATHER_TIMEOUT_SECS", "10")?;
    if weather_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SITING_WEATHER_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let rate_limit_max_requests = parse_usize("SITING_RATE_LIMIT_MAX_REQUESTS", "120")?;
    let rate_limit_window_secs = parse_u64("SITING_RATE_LIMIT_WINDOW_SECS", "60")?;
    if rate_limit_window_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SITING_RATE_LIMIT_WINDOW_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        stores_path,
        warehouses_path,
        weather_api_key,
        weather_base_url,
        weather_timeout_secs,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SITING_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
