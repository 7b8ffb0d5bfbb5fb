use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const RECIPES_PATH_VAR: &str = "PANTRY_RECIPES_PATH";
pub const INGREDIENTS_PATH_VAR: &str = "PANTRY_INGREDIENTS_PATH";
pub const CACHE_ENABLED_VAR: &str = "PANTRY_CACHE_ENABLED";
pub const CACHE_TTL_VAR: &str = "PANTRY_CACHE_TTL_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub recipes_path: PathBuf,
    pub ingredients_path: PathBuf,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipes_path: PathBuf::from("recipes.json"),
            ingredients_path: PathBuf::from("ingredients.csv"),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if present.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or invalid values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        Self {
            recipes_path: lookup(RECIPES_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.recipes_path),
            ingredients_path: lookup(INGREDIENTS_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.ingredients_path),
            cache_enabled: try_load(&lookup, CACHE_ENABLED_VAR, defaults.cache_enabled),
            cache_ttl: Duration::from_secs(try_load(
                &lookup,
                CACHE_TTL_VAR,
                defaults.cache_ttl.as_secs(),
            )),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
    }
}
