//! Yahoo! News category feed source
//!
//! One RSS feed per category. Feed URLs default to Yahoo! News and can be
//! overridden per category from the environment.

use super::{NewsQuery, NewsSource};
use crate::client::{NewsClient, Ready};
use crate::error::{Error, Result};
use crate::parser::FeedParser;
use crate::types::{ArticleRecord, FeedCategory, SourceMode};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{error, info, instrument};

/// Feed URL per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    urls: HashMap<FeedCategory, String>,
}

impl FeedUrls {
    /// Yahoo! News defaults
    fn default_url(category: FeedCategory) -> String {
        match category {
            FeedCategory::Top => "https://news.yahoo.co.jp/rss/topics/top-picks.xml".to_string(),
            other => format!("https://news.yahoo.co.jp/rss/categories/{other}.xml"),
        }
    }

    /// Replace the URL of one category
    pub fn with_url(mut self, category: FeedCategory, url: impl Into<String>) -> Self {
        self.urls.insert(category, url.into());
        self
    }

    pub fn url(&self, category: FeedCategory) -> String {
        self.urls
            .get(&category)
            .cloned()
            .unwrap_or_else(|| Self::default_url(category))
    }

    /// Environment variable overriding the URL of `category`
    pub fn env_key(category: FeedCategory) -> String {
        format!("YAHOO_NEWS_FEED_{}", category.as_ref().to_ascii_uppercase())
    }
}

impl Default for FeedUrls {
    fn default() -> Self {
        let urls = FeedCategory::iter()
            .map(|category| (category, Self::default_url(category)))
            .collect();
        Self { urls }
    }
}

impl FromEnv for FeedUrls {
    /// Defaults, overridden per category by `YAHOO_NEWS_FEED_<CATEGORY>`
    fn from_env() -> std::result::Result<Self, ConfigError> {
        let urls = FeedCategory::iter().fold(Self::default(), |urls, category| {
            match env_optional(&Self::env_key(category)) {
                Some(url) => urls.with_url(category, url),
                None => urls,
            }
        });
        Ok(urls)
    }
}

/// Category feed source backed by Yahoo! News RSS
pub struct YahooFeedSource {
    client: NewsClient<Ready>,
    urls: FeedUrls,
}

impl YahooFeedSource {
    pub fn new(client: NewsClient<Ready>, urls: FeedUrls) -> Self {
        Self { client, urls }
    }

    #[instrument(skip_all, fields(category = %category))]
    async fn fetch_category(&self, category: FeedCategory) -> Result<Vec<ArticleRecord>> {
        let url = self.urls.url(category);
        let records = self
            .client
            .get_bytes(&url)
            .await
            .and_then(|body| FeedParser::parse(&body, &url))
            .inspect_err(|e| error!(error = %e, "Failed to fetch feed"))?;

        info!(count = records.len(), "Fetched feed items");
        Ok(records)
    }
}

#[async_trait]
impl NewsSource for YahooFeedSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Rss
    }

    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<ArticleRecord>> {
        match query {
            NewsQuery::Latest { category } => {
                info!(category = %category, "Fetching latest news");
                self.fetch_category(*category).await
            }
            NewsQuery::FeedSearch { keyword, category } => {
                info!(category = %category, keyword = %keyword, "Searching feed");
                self.fetch_category(*category).await
            }
            other => Err(Error::InvalidRequest {
                message: format!("the RSS source cannot serve {other:?}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title><link>https://news.yahoo.co.jp/</link><description>d</description>
<item><title>国内ニュース1</title><link>https://news.yahoo.co.jp/articles/3</link><pubDate>Sat, 15 Apr 2023 08:00:00 GMT</pubDate><description>国内ニュースの内容1</description></item>
</channel></rss>"#;

    #[test]
    fn test_default_urls() {
        let urls = FeedUrls::default();
        assert_eq!(
            urls.url(FeedCategory::Top),
            "https://news.yahoo.co.jp/rss/topics/top-picks.xml"
        );
        assert_eq!(
            urls.url(FeedCategory::It),
            "https://news.yahoo.co.jp/rss/categories/it.xml"
        );
        assert_eq!(
            urls.url(FeedCategory::Entertainment),
            "https://news.yahoo.co.jp/rss/categories/entertainment.xml"
        );
    }

    #[test]
    fn test_env_override() {
        temp_env::with_var(
            "YAHOO_NEWS_FEED_DOMESTIC",
            Some("http://localhost:9999/domestic.xml"),
            || {
                let urls = FeedUrls::from_env().unwrap();
                assert_eq!(
                    urls.url(FeedCategory::Domestic),
                    "http://localhost:9999/domestic.xml"
                );
                assert_eq!(
                    urls.url(FeedCategory::World),
                    "https://news.yahoo.co.jp/rss/categories/world.xml"
                );
            },
        );
    }

    #[test]
    fn test_env_key() {
        assert_eq!(FeedUrls::env_key(FeedCategory::It), "YAHOO_NEWS_FEED_IT");
    }

    #[tokio::test]
    async fn test_fetch_latest_from_category_url() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/rss/categories/domestic.xml");
                then.status(200)
                    .header("content-type", "application/rss+xml")
                    .body(FEED);
            })
            .await;

        let urls = FeedUrls::default().with_url(
            FeedCategory::Domestic,
            server.url("/rss/categories/domestic.xml"),
        );
        let source = YahooFeedSource::new(NewsClient::new().init().unwrap(), urls);

        let records = source
            .fetch(&NewsQuery::Latest {
                category: FeedCategory::Domestic,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "国内ニュース1");
        assert_eq!(records[0].summary.as_deref(), Some("国内ニュースの内容1"));
    }

    #[tokio::test]
    async fn test_malformed_feed_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/top.xml");
                then.status(200).body("<html><body>maintenance</body></html>");
            })
            .await;

        let urls = FeedUrls::default().with_url(FeedCategory::Top, server.url("/top.xml"));
        let source = YahooFeedSource::new(NewsClient::new().init().unwrap(), urls);

        let err = source
            .fetch(&NewsQuery::Latest {
                category: FeedCategory::Top,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[tokio::test]
    async fn test_api_queries_are_rejected() {
        let source =
            YahooFeedSource::new(NewsClient::new().init().unwrap(), FeedUrls::default());
        let err = source
            .fetch(&NewsQuery::ApiSearch {
                keyword: "AI".to_string(),
                lang: "ja".to_string(),
                country: "jp".to_string(),
                max: 5,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
    }
}
