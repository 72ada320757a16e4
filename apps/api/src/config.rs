use anyhow::{Context, Result};

const DEFAULT_FIXTURE_SEED: u64 = 42;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Application configuration loaded from environment variables.
/// Nothing is required; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external parse service. Unset means the fixture parser is used.
    pub parser_url: Option<String>,
    pub fixture_seed: u64,
    pub max_upload_bytes: usize,
    /// Sessions idle longer than this are evicted.
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parser_url: None,
            fixture_seed: DEFAULT_FIXTURE_SEED,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            parser_url: get("PARSER_URL").filter(|s| !s.trim().is_empty()),
            fixture_seed: parse_or("FIXTURE_SEED", get("FIXTURE_SEED"), defaults.fixture_seed)?,
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                get("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            )?,
            session_ttl_secs: parse_or(
                "SESSION_TTL_SECS",
                get("SESSION_TTL_SECS"),
                defaults.session_ttl_secs,
            )?,
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{v}'")),
        None => Ok(default),
    }
}
