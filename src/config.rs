use crate::constants::DEFAULT_CURRENCY;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub default_currency: String,
    pub plan_cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            log_level: "info".to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            plan_cache_ttl: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(30),
        }
    }
}

fn env_secs(key: &str, fallback: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        let defaults = Config::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            default_currency: env::var("DEFAULT_CURRENCY")
                .ok()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.default_currency),
            plan_cache_ttl: env_secs("PLAN_CACHE_TTL_SECS", defaults.plan_cache_ttl),
            request_timeout: env_secs("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
