use std::env;

use chrono_tz::Tz;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Jakarta;

/// Defaults taken from the Lambda environment; request fields override them.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub time_zone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE.to_string(), api_token: None, time_zone: DEFAULT_TIME_ZONE }
    }
}

impl Config {
    /// Read `SCHEDULE_API_BASE`, `SCHEDULE_API_TOKEN` and `SCHEDULE_TIME_ZONE`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();
        if let Some(base) = non_empty("SCHEDULE_API_BASE") {
            config.api_base_url = base;
        }
        config.api_token = non_empty("SCHEDULE_API_TOKEN");
        if let Some(name) = non_empty("SCHEDULE_TIME_ZONE") {
            config.time_zone = parse_time_zone(&name)?;
        }
        Ok(config)
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz, String> {
    name.trim().parse::<Tz>().map_err(|e| format!("Unknown time zone {}: {}", name, e))
}
