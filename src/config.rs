use once_cell::sync::Lazy;
use std::env;

pub const API_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Configs {
    pub api_url: String,
    pub api_key: Option<String>,
    pub port: u16,
    pub cache_max_size: usize,
}

impl Configs {
    pub fn from_env() -> Self {
        Self {
            api_url: API_URL.to_string(),
            api_key: env::var("COINMARKETCAP_API_KEY").ok().filter(|key| !key.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cache_max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_CACHE_MAX_SIZE),
        }
    }
}

pub static CONFIGS: Lazy<Configs> = Lazy::new(Configs::from_env);

/// Cached command-line arguments
pub static ARGS: Lazy<Vec<String>> = Lazy::new(|| env::args().collect());

/// Check if debug fetch logging is enabled via command line args
pub fn is_debug_fetch_enabled() -> bool {
    ARGS.iter().any(|arg| arg == "--debug-fetch")
}
