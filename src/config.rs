use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
pub const DEFAULT_COMPETITION: &str = "PD";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings handed to the gateway, resolver and exporters at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub competition: String,
    pub output_dir: PathBuf,
    pub match_threshold: f64,
    pub request_timeout: Duration,
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            competition: DEFAULT_COMPETITION.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Loads `.env.local` / `.env` (if present) and reads settings from the environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; blank or unparseable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let base_url = get("DATABASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let timeout_secs = get("REQUEST_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let match_threshold = get("MATCH_THRESHOLD")
            .and_then(|val| val.parse::<f64>().ok())
            .filter(|val| val.is_finite())
            .map(|val| val.clamp(0.0, 1.0))
            .unwrap_or(defaults.match_threshold);

        Self {
            base_url,
            api_key: get("API_KEY"),
            competition: get("COMPETITION").unwrap_or(defaults.competition),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            match_threshold,
            request_timeout: Duration::from_secs(timeout_secs),
            server_addr: get("SERVER_ADDR").unwrap_or(defaults.server_addr),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        if threshold.is_finite() {
            self.match_threshold = threshold.clamp(0.0, 1.0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.competition, "PD");
        assert_eq!(cfg.match_threshold, 0.3);
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_trimmed_and_clamped() {
        let cfg = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "http://localhost:9000/v4/"),
            ("API_KEY", "  secret "),
            ("MATCH_THRESHOLD", "1.7"),
            ("REQUEST_TIMEOUT_SECS", "0"),
            ("COMPETITION", "PL"),
        ]));
        assert_eq!(cfg.base_url, "http://localhost:9000/v4");
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.match_threshold, 1.0);
        assert_eq!(cfg.request_timeout, Duration::from_secs(1));
        assert_eq!(cfg.competition, "PL");
    }

    #[test]
    fn garbage_threshold_keeps_default() {
        let cfg = Config::from_lookup(lookup(&[("MATCH_THRESHOLD", "loose")]));
        assert_eq!(cfg.match_threshold, DEFAULT_MATCH_THRESHOLD);
        assert_eq!(cfg.with_threshold(f64::NAN).match_threshold, DEFAULT_MATCH_THRESHOLD);
    }
}
