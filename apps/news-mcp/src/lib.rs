//! News MCP Server
//!
//! Serves news tools over newline-delimited JSON-RPC on stdin/stdout.
//!
//! ## Modes
//!
//! - `rss`: Yahoo! News category feeds (`get-news`, `search-news`)
//! - `gnews`: GNews API (`search-news`, `get-top-headlines`), requires
//!   `GNEWS_API_KEY`
//!
//! Logs go to stderr.

pub mod config;

use clap::Parser;
use config::{Config, GNEWS_API_KEY};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, app_info};
use eyre::{Result, WrapErr};
use news_mcp::{
    Dispatcher, GNewsSource, Locale, McpHandler, NewsClient, SourceMode, YahooFeedSource,
    serve_stdio,
};
use tokio::signal;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "news-mcp")]
#[command(about = "MCP tool server for Yahoo! News RSS feeds and the GNews API")]
pub struct Cli {
    /// News source: rss or gnews
    #[arg(long, env = "NEWS_SOURCE", default_value = "rss")]
    pub source: SourceMode,

    /// Message language: ja or en. Defaults to ja for rss, en for gnews.
    #[arg(long, env = "NEWS_LOCALE")]
    pub locale: Option<Locale>,
}

/// Build the request handler for a loaded configuration
pub fn build_handler(config: &Config) -> Result<McpHandler> {
    let mut client = NewsClient::new().with_timeout(config.http_timeout);
    if let Some(user_agent) = &config.user_agent {
        client = client.with_user_agent(user_agent.clone());
    }
    let client = client.init().wrap_err("Failed to build HTTP client")?;

    let dispatcher = match (&config.source, &config.gnews) {
        (SourceMode::Gnews, Some(gnews)) => {
            let source = GNewsSource::new(client, gnews.api_key.clone())
                .with_base_url(gnews.base_url.clone());
            Dispatcher::new(source, config.locale)
        }
        (SourceMode::Gnews, None) => eyre::bail!("{GNEWS_API_KEY} is not configured"),
        (SourceMode::Rss, _) => {
            Dispatcher::new(YahooFeedSource::new(client, config.feeds.clone()), config.locale)
        }
    };

    Ok(McpHandler::new(dispatcher))
}

/// Run the server until stdin closes or a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if:
/// - `GNEWS_API_KEY` is missing in gnews mode
/// - an environment value cannot be parsed
/// - stdin or stdout fails
pub async fn run() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let app_info = app_info!();
    info!(name = %app_info.name, version = %app_info.version, source = %cli.source, "Starting news MCP server");

    let config = Config::load(cli.source, cli.locale)
        .inspect_err(|e| error!(error = %e, "Startup configuration failed"))
        .wrap_err("Failed to load configuration")?;
    info!(locale = %config.locale, timeout_secs = config.http_timeout.as_secs(), "Configuration loaded");

    let handler = build_handler(&config)?;

    tokio::select! {
        result = serve_stdio(&handler) => {
            result.wrap_err("Transport failed")?;
        }
        result = shutdown_signal() => {
            result?;
        }
    }

    info!("News MCP server stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .wrap_err("Failed to install Ctrl+C handler")
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .wrap_err("Failed to install signal handler")?
            .recv()
            .await;
        Ok::<(), eyre::Report>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("Received Ctrl+C, initiating shutdown...");
        },
        result = terminate => {
            result?;
            info!("Received SIGTERM, initiating shutdown...");
        },
    }

    Ok(())
}
