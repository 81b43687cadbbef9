//! Configuration for the news MCP server

use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse, env_required};
use news_mcp::{DEFAULT_GNEWS_BASE_URL, FeedUrls, Locale, SourceMode};
use secrecy::SecretString;
use std::time::Duration;

pub const GNEWS_API_KEY: &str = "GNEWS_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceMode,
    pub locale: Locale,
    pub http_timeout: Duration,
    /// Overrides the client's built-in user agent
    pub user_agent: Option<String>,
    pub feeds: FeedUrls,
    /// Present only in gnews mode
    pub gnews: Option<GNewsConfig>,
}

/// GNews API access
#[derive(Debug, Clone)]
pub struct GNewsConfig {
    pub api_key: SecretString,
    pub base_url: String,
}

impl FromEnv for GNewsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: SecretString::new(env_required(GNEWS_API_KEY)?),
            base_url: env_or_default("GNEWS_BASE_URL", DEFAULT_GNEWS_BASE_URL),
        })
    }
}

impl Config {
    /// Load the configuration for `source`.
    ///
    /// The credential is checked first: in gnews mode a missing
    /// `GNEWS_API_KEY` fails before anything else is read.
    pub fn load(source: SourceMode, locale: Option<Locale>) -> Result<Self, ConfigError> {
        let gnews = match source {
            SourceMode::Gnews => Some(GNewsConfig::from_env()?),
            SourceMode::Rss => None,
        };

        Ok(Self {
            source,
            locale: locale.unwrap_or_else(|| source.default_locale()),
            http_timeout: Duration::from_secs(env_parse("NEWS_HTTP_TIMEOUT_SECS", 30)?),
            user_agent: env_optional("NEWS_USER_AGENT"),
            feeds: FeedUrls::from_env()?,
            gnews,
        })
    }
}
