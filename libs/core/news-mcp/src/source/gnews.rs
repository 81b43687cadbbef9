//! GNews API source
//!
//! Keyword search and top headlines over the GNews REST API. The API key is
//! sent as a query parameter and never appears in errors or logs.

use super::{NewsQuery, NewsSource};
use crate::client::{NewsClient, Ready, ensure_success};
use crate::error::{Error, ErrorContext, Result};
use crate::types::{ArticleRecord, SourceMode};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";

/// Response body of `/search` and `/top-headlines`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GNewsResponse {
    #[serde(default)]
    total_articles: u64,
    #[serde(default)]
    articles: Vec<GNewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GNewsArticle {
    title: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    source: Option<GNewsPublisher>,
}

#[derive(Debug, Deserialize)]
struct GNewsPublisher {
    name: String,
}

impl From<GNewsArticle> for ArticleRecord {
    fn from(article: GNewsArticle) -> Self {
        let mut record = ArticleRecord::new(article.title, article.published_at, article.url);
        if let Some(description) = article.description.filter(|d| !d.is_empty()) {
            record = record.with_summary(description);
        }
        if let Some(publisher) = article.source {
            record = record.with_source(publisher.name);
        }
        record
    }
}

/// GNews REST API source.
///
/// Only constructible with a credential, so a missing API key is caught
/// before a source exists.
pub struct GNewsSource {
    client: NewsClient<Ready>,
    base_url: String,
    api_key: SecretString,
}

impl GNewsSource {
    pub fn new(client: NewsClient<Ready>, api_key: SecretString) -> Self {
        Self {
            client,
            base_url: DEFAULT_GNEWS_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn request(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<ArticleRecord>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut query = params.to_vec();
        query.push(("apikey", self.api_key.expose_secret().as_str()));

        let response = self.client.get(&url, &query).await?;
        if response.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::QuotaExceeded);
        }
        let response = ensure_success(response, &url)?;

        let body = response.text().await.with_context(&url)?;
        let parsed: GNewsResponse =
            serde_json::from_str(&body).with_context(format!("{endpoint} response"))?;

        info!(
            count = parsed.articles.len(),
            total = parsed.total_articles,
            "Found articles"
        );
        Ok(parsed.articles.into_iter().map(ArticleRecord::from).collect())
    }
}

#[async_trait]
impl NewsSource for GNewsSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Gnews
    }

    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<ArticleRecord>> {
        match query {
            NewsQuery::ApiSearch {
                keyword,
                lang,
                country,
                max,
            } => {
                info!(keyword = %keyword, "Searching news");
                let max = max.to_string();
                self.request(
                    "search",
                    &[
                        ("q", keyword.as_str()),
                        ("lang", lang.as_str()),
                        ("country", country.as_str()),
                        ("max", max.as_str()),
                    ],
                )
                .await
                .inspect_err(|e| error!(error = %e, "News search failed"))
            }
            NewsQuery::TopHeadlines {
                category,
                lang,
                country,
                max,
            } => {
                info!(category = %category, "Fetching top headlines");
                let category: &'static str = (*category).into();
                let max = max.to_string();
                self.request(
                    "top-headlines",
                    &[
                        ("category", category),
                        ("lang", lang.as_str()),
                        ("country", country.as_str()),
                        ("max", max.as_str()),
                    ],
                )
                .await
                .inspect_err(|e| error!(error = %e, "Top headlines fetch failed"))
            }
            other => Err(Error::InvalidRequest {
                message: format!("the GNews source cannot serve {other:?}"),
            }),
        }
    }
}
