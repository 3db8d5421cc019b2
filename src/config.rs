use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_COMMENTS_URL: &str = "https://striveschool-api.herokuapp.com/api";
pub const DEFAULT_MAX_RESULTS: u32 = 12;
pub const DEFAULT_COUNT_MAX_AGE: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_base_url: String,
    pub comments_base_url: String,
    pub comments_token: Option<String>,
    pub max_results: u32,
    /// How long a server-observed review count stays fresh.
    pub count_max_age: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_base_url: DEFAULT_CATALOG_URL.to_string(),
            comments_base_url: DEFAULT_COMMENTS_URL.to_string(),
            comments_token: None,
            max_results: DEFAULT_MAX_RESULTS,
            count_max_age: Duration::from_secs(DEFAULT_COUNT_MAX_AGE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(url) = lookup("SHELFNOTES_CATALOG_URL") {
            cfg.catalog_base_url = trim_base(&url);
        }
        if let Some(url) = lookup("SHELFNOTES_COMMENTS_URL") {
            cfg.comments_base_url = trim_base(&url);
        }
        cfg.comments_token = lookup("SHELFNOTES_COMMENTS_TOKEN").filter(|t| !t.trim().is_empty());

        if let Some(n) = parse_var::<u32, _>(&lookup, "SHELFNOTES_MAX_RESULTS")? {
            cfg.max_results = n;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SHELFNOTES_COUNT_MAX_AGE")? {
            cfg.count_max_age = Duration::from_secs(secs);
        }

        Ok(cfg)
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {}: {:?}", key, raw))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
