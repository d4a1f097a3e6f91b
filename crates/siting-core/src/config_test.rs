use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SITING_ENV"));
}

#[test]
fn build_app_config_applies_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.stores_path.to_str(), Some("./data/stores.yaml"));
    assert_eq!(cfg.warehouses_path.to_str(), Some("./data/warehouses.yaml"));
    assert!(cfg.weather_api_key.is_none());
    assert_eq!(
        cfg.weather_base_url,
        "https://api.openweathermap.org/data/2.5/"
    );
    assert_eq!(cfg.weather_timeout_secs, 10);
    assert_eq!(cfg.rate_limit_max_requests, 120);
    assert_eq!(cfg.rate_limit_window_secs, 60);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SITING_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITING_BIND_ADDR"),
        "expected InvalidEnvVar(SITING_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_requires_weather_key_in_production() {
    let mut map = HashMap::new();
    map.insert("SITING_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OPENWEATHER_API_KEY"),
        "expected MissingEnvVar(OPENWEATHER_API_KEY), got: {result:?}"
    );
}

#[test]
fn cli_config_allows_missing_weather_key_in_production() {
    let mut map = HashMap::new();
    map.insert("SITING_ENV", "production");
    let cfg = build_config(lookup_from_map(&map), WeatherKey::Optional)
        .expect("offline commands need no weather key");
    assert_eq!(cfg.env, Environment::Production);
    assert!(cfg.weather_api_key.is_none());
}

#[test]
fn cli_config_still_validates_other_values() {
    let mut map = HashMap::new();
    map.insert("SITING_ENV", "production");
    map.insert("SITING_WEATHER_TIMEOUT_SECS", "0");
    let result = build_config(lookup_from_map(&map), WeatherKey::Optional);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITING_WEATHER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SITING_WEATHER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_weather_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("OPENWEATHER_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.weather_api_key.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("SITING_ENV", "production");
    map.insert("OPENWEATHER_API_KEY", "owm-key");
    map.insert("SITING_BIND_ADDR", "127.0.0.1:9000");
    map.insert("SITING_STORES_PATH", "/srv/stores.yaml");
    map.insert("SITING_WEATHER_TIMEOUT_SECS", "3");
    map.insert("SITING_RATE_LIMIT_MAX_REQUESTS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.weather_api_key.as_deref(), Some("owm-key"));
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
    assert_eq!(cfg.stores_path.to_str(), Some("/srv/stores.yaml"));
    assert_eq!(cfg.weather_timeout_secs, 3);
    assert_eq!(cfg.rate_limit_max_requests, 10);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("SITING_WEATHER_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITING_WEATHER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SITING_WEATHER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_weather_timeout() {
    let mut map = HashMap::new();
    map.insert("SITING_WEATHER_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITING_WEATHER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SITING_WEATHER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_rate_limit_window() {
    let mut map = HashMap::new();
    map.insert("SITING_RATE_LIMIT_WINDOW_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SITING_RATE_LIMIT_WINDOW_SECS"),
        "expected InvalidEnvVar(SITING_RATE_LIMIT_WINDOW_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_weather_key() {
    let mut map = HashMap::new();
    map.insert("OPENWEATHER_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[redacted]"));
}
