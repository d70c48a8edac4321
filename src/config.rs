use std::env;
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DAY_PAGE_SIZE: u32 = 500;
pub const DEFAULT_CURRENCY: &str = "TL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub port: u16,
    /// Page size for the single-day drill-down request.
    pub day_page_size: u32,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            day_page_size: DEFAULT_DAY_PAGE_SIZE,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: lookup("API_BASE_URL")
                .map(|url| normalize_base_url(&url))
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            day_page_size: parse_page_size(lookup("DAY_PAGE_SIZE"), defaults.day_page_size),
            currency: lookup("CURRENCY")
                .filter(|currency| !currency.trim().is_empty())
                .unwrap_or(defaults.currency),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}");
            default
        }),
    }
}

fn parse_page_size(value: Option<String>, default: u32) -> u32 {
    match parse_or("DAY_PAGE_SIZE", value, default) {
        0 => {
            warn!("ignoring DAY_PAGE_SIZE=0, using {default}");
            default
        }
        size => size,
    }
}
