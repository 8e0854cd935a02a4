use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

/// Pre-compiled regex for hostname validation (compiled once at first use)
static HOSTNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][-a-zA-Z0-9\.]*[a-zA-Z0-9]$").unwrap());

/// Criterion names the matcher understands.
pub const KNOWN_CRITERIA: [&str; 3] = ["weekday", "category", "tag"];

#[derive(Debug, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub logging: Option<LoggingSection>,
    #[serde(default)]
    pub matching: Option<MatchingSection>,
    #[serde(default)]
    pub directory: Option<DirectorySection>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub json: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct MatchingSection {
    #[serde(default)]
    pub criteria: Option<Vec<String>>,
    #[serde(default)]
    pub parallel_threshold: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct DirectorySection {
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load a RawConfigFile from a path. The format is inferred from the extension: .toml, .yaml/.yml, .json
pub fn load_raw_from_file<P: AsRef<Path>>(path: P) -> Result<RawConfigFile, ConfigError> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    parse_config_str(&s, ext.as_deref())
}

/// Parse configuration from a string with optional format hint
#[inline]
fn parse_config_str(s: &str, ext: Option<&str>) -> Result<RawConfigFile, ConfigError> {
    match ext {
        #[cfg(feature = "toml")]
        Some("toml") => toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string())),
        #[cfg(feature = "yaml")]
        Some("yaml" | "yml") => {
            serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
        }
        #[cfg(feature = "json")]
        Some("json") => serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string())),
        _ => parse_config_auto(s),
    }
}

/// Try to parse config by attempting each enabled format
#[inline]
fn parse_config_auto(s: &str) -> Result<RawConfigFile, ConfigError> {
    #[cfg(feature = "json")]
    if let Ok(cfg) = serde_json::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(feature = "toml")]
    if let Ok(cfg) = toml::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(feature = "yaml")]
    if let Ok(cfg) = serde_yaml::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(any(feature = "yaml", feature = "toml", feature = "json"))]
    {
        Err(ConfigError::Parse(
            "failed to parse config as any supported format".into(),
        ))
    }

    #[cfg(not(any(feature = "yaml", feature = "toml", feature = "json")))]
    {
        let _ = s;
        Err(ConfigError::Parse("no config format enabled".into()))
    }
}

/// Concrete application configuration with defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub matching: MatchingConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingConfig {
    /// Criterion names in pipeline order.
    pub criteria: Vec<String>,
    /// Candidate pools at least this large are filtered in parallel.
    pub parallel_threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryConfig {
    /// JSON file with users and jobs loaded into the in-memory stores.
    pub seed_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            matching: MatchingConfig {
                criteria: vec!["weekday".to_string()],
                parallel_threshold: 4096,
            },
            directory: DirectoryConfig { seed_path: None },
        }
    }
}

#[inline]
fn parse_bool(s: &str) -> Result<bool, ()> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        _ => Err(()),
    }
}

#[inline]
fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .filter_map(|p| {
            let trimmed = p.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

/// Helper macro to apply optional value if present
macro_rules! apply_opt {
    ($target:expr, $source:expr) => {
        if let Some(v) = $source {
            $target = v;
        }
    };
    ($target:expr, $source:expr, wrap) => {
        if let Some(v) = $source {
            $target = Some(v);
        }
    };
}

/// Load concrete `Config` from optional file and environment variables.
/// Environment variables take precedence over file values and defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(p) = path {
        let raw = load_raw_from_file(p)?;
        if let Some(server) = raw.server {
            apply_opt!(cfg.server.host, server.host);
            apply_opt!(cfg.server.port, server.port);
        }
        if let Some(logging) = raw.logging {
            apply_opt!(cfg.logging.level, logging.level);
            apply_opt!(cfg.logging.json, logging.json);
        }
        if let Some(matching) = raw.matching {
            apply_opt!(cfg.matching.criteria, matching.criteria);
            apply_opt!(cfg.matching.parallel_threshold, matching.parallel_threshold);
        }
        if let Some(directory) = raw.directory {
            apply_opt!(cfg.directory.seed_path, directory.seed_path, wrap);
        }
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

/// Helper to parse env var as a specific type
#[inline]
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Parse(format!("invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Helper to parse env var as bool
#[inline]
fn env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(v) => parse_bool(&v)
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("invalid {}", key))),
        Err(_) => Ok(None),
    }
}

#[inline]
fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Apply all environment variable overrides to config
fn apply_env_overrides(cfg: &mut Config) -> Result<(), ConfigError> {
    // Server
    if let Some(v) = env_str("HELPY_SERVER_HOST") {
        cfg.server.host = v;
    }
    if let Some(v) = env_parse::<u16>("HELPY_SERVER_PORT")? {
        cfg.server.port = v;
    }

    // Logging
    if let Some(v) = env_str("HELPY_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = env_bool("HELPY_LOG_JSON")? {
        cfg.logging.json = v;
    }

    // Matching
    if let Some(v) = env_str("HELPY_MATCHING_CRITERIA") {
        cfg.matching.criteria = split_csv(&v);
    }
    if let Some(v) = env_parse::<usize>("HELPY_MATCHING_PARALLEL_THRESHOLD")? {
        cfg.matching.parallel_threshold = v;
    }

    // Directory
    if let Some(v) = env_str("HELPY_SEED_PATH") {
        cfg.directory.seed_path = Some(v);
    }

    Ok(())
}

/// Validate higher-level constraints on the resolved configuration.
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.server.port == 0 {
        return Err(ConfigError::Validation("server.port must be > 0".into()));
    }
    let host_ok = cfg.server.host.parse::<std::net::IpAddr>().is_ok()
        || HOSTNAME_REGEX.is_match(&cfg.server.host);
    if !host_ok {
        return Err(ConfigError::Validation(format!(
            "invalid server.host: {}",
            cfg.server.host
        )));
    }

    if cfg.matching.criteria.is_empty() {
        return Err(ConfigError::Validation(
            "matching.criteria must name at least one criterion".into(),
        ));
    }
    let mut seen = HashSet::new();
    for name in &cfg.matching.criteria {
        let normalized = name.trim().to_ascii_lowercase();
        if !KNOWN_CRITERIA.contains(&normalized.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown matching criterion: {}",
                name
            )));
        }
        if !seen.insert(normalized) {
            return Err(ConfigError::Validation(format!(
                "matching criterion listed twice: {}",
                name
            )));
        }
    }
    if cfg.matching.parallel_threshold == 0 {
        return Err(ConfigError::Validation(
            "matching.parallel_threshold must be > 0".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests touching HELPY_* variables must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: [&str; 7] = [
        "HELPY_SERVER_HOST",
        "HELPY_SERVER_PORT",
        "HELPY_LOG_LEVEL",
        "HELPY_LOG_JSON",
        "HELPY_MATCHING_CRITERIA",
        "HELPY_MATCHING_PARALLEL_THRESHOLD",
        "HELPY_SEED_PATH",
    ];

    fn clear_env() {
        for k in ENV_KEYS {
            std::env::remove_var(k);
        }
    }

    fn temp_with(ext: &str, body: &str) -> tempfile::NamedTempFile {
        let f = tempfile::Builder::new()
            .suffix(ext)
            .tempfile()
            .expect("tmpfile");
        std::fs::write(f.path(), body).unwrap();
        f
    }

    #[test]
    fn parse_toml() {
        let f = temp_with(
            ".toml",
            r#"
[server]
host = "127.0.0.1"
port = 6000

[matching]
criteria = ["weekday", "category"]
"#,
        );
        let cfg = load_raw_from_file(f.path()).expect("load");
        let s = cfg.server.unwrap();
        assert_eq!(s.host.unwrap(), "127.0.0.1");
        assert_eq!(s.port.unwrap(), 6000);
        assert_eq!(
            cfg.matching.unwrap().criteria.unwrap(),
            vec!["weekday", "category"]
        );
    }

    #[test]
    fn parse_yaml() {
        let f = temp_with(
            ".yaml",
            r#"
server:
  host: 0.0.0.0
  port: 9000
matching:
  parallel_threshold: 128
directory:
  seed_path: ./seed.json
"#,
        );
        let cfg = load_raw_from_file(f.path()).expect("load");
        assert_eq!(cfg.server.unwrap().port.unwrap(), 9000);
        assert_eq!(cfg.matching.unwrap().parallel_threshold.unwrap(), 128);
        assert_eq!(cfg.directory.unwrap().seed_path.unwrap(), "./seed.json");
    }

    #[test]
    fn parse_json_without_extension() {
        let f = NamedTempFile::new().expect("tmpfile");
        std::fs::write(f.path(), r#"{"logging": {"level": "debug", "json": true}}"#).unwrap();
        let cfg = load_raw_from_file(f.path()).expect("load");
        let logging = cfg.logging.unwrap();
        assert_eq!(logging.level.unwrap(), "debug");
        assert_eq!(logging.json, Some(true));
    }

    #[test]
    fn file_values_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let f = temp_with(
            ".toml",
            r#"
[logging]
level = "warn"

[matching]
criteria = ["tag", "weekday"]
"#,
        );
        let cfg = load_config(Some(f.path())).expect("load");
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.matching.criteria, vec!["tag", "weekday"]);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.matching.parallel_threshold, 4096);
    }

    #[test]
    fn env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("HELPY_SERVER_HOST", "10.1.2.3");
        std::env::set_var("HELPY_SERVER_PORT", "1234");
        std::env::set_var("HELPY_LOG_JSON", "yes");
        std::env::set_var("HELPY_MATCHING_CRITERIA", "weekday, tag");
        std::env::set_var("HELPY_SEED_PATH", "/srv/seed.json");

        let cfg = load_config::<&Path>(None).expect("load config");
        assert_eq!(cfg.server.host, "10.1.2.3");
        assert_eq!(cfg.server.port, 1234);
        assert!(cfg.logging.json);
        assert_eq!(cfg.matching.criteria, vec!["weekday", "tag"]);
        assert_eq!(cfg.directory.seed_path.as_deref(), Some("/srv/seed.json"));

        clear_env();
    }

    #[test]
    fn invalid_env_value_is_a_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var("HELPY_MATCHING_PARALLEL_THRESHOLD", "lots");
        let err = load_config::<&Path>(None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        clear_env();
    }

    #[test]
    fn csv_split() {
        let parts = split_csv("weekday, category, , tag");
        assert_eq!(parts, vec!["weekday", "category", "tag"]);
    }

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn validation_rejects_bad_matching_settings() {
        let mut cfg = Config::default();
        cfg.matching.criteria = vec!["weekday".into(), "rating".into()];
        assert!(matches!(
            validate_config(&cfg),
            Err(ConfigError::Validation(_))
        ));

        cfg.matching.criteria = vec!["weekday".into(), "Weekday".into()];
        assert!(validate_config(&cfg).is_err());

        cfg.matching.criteria = Vec::new();
        assert!(validate_config(&cfg).is_err());

        cfg.matching.criteria = vec!["tag".into()];
        cfg.matching.parallel_threshold = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn validation_rejects_bad_server_settings() {
        let mut cfg = Config::default();
        cfg.server.port = 0;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.server.host = "not a host!".into();
        assert!(validate_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.server.host = "helpy.local".into();
        assert!(validate_config(&cfg).is_ok());
    }
}
