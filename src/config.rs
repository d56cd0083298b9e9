use std::{env, fmt, net::SocketAddr, path::PathBuf, time::Duration};

const DEFAULT_DATABASE_URL: &str = "sqlite:postboard.db";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_HOME_CACHE_TTL_SECS: u64 = 20;
const DEFAULT_MEDIA_ROOT: &str = "media";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    /// Posts per page on every listing.
    pub page_size: usize,
    /// How long a rendered home page is served from the timeline cache.
    pub home_cache_ttl: Duration,
    pub media_root: PathBuf,
    /// Allowed CORS origin, CORS is off when unset.
    pub front_url: Option<String>,
}

#[derive(Debug)]
pub struct ConfigError {
    key: &'static str,
    value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value `{}` for {}", self.value, self.key)
    }
}

impl std::error::Error for ConfigError {}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError { key, value }),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8000)),
            page_size: DEFAULT_PAGE_SIZE,
            home_cache_ttl: Duration::from_secs(DEFAULT_HOME_CACHE_TTL_SECS),
            media_root: PathBuf::from(DEFAULT_MEDIA_ROOT),
            front_url: None,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let page_size = parse_var("PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError {
                key: "PAGE_SIZE",
                value: page_size.to_string(),
            });
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_address: parse_var(
                "BIND_ADDRESS",
                DEFAULT_BIND_ADDRESS
                    .parse()
                    .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000))),
            )?,
            page_size,
            home_cache_ttl: Duration::from_secs(parse_var(
                "HOME_CACHE_TTL_SECS",
                DEFAULT_HOME_CACHE_TTL_SECS,
            )?),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MEDIA_ROOT)),
            front_url: env::var("FRONT_URL").ok().filter(|url| !url.is_empty()),
        })
    }
}
