//! News sources
//!
//! A source turns a typed [`NewsQuery`] into article records. The category
//! feed source and the GNews API source are interchangeable behind
//! [`NewsSource`]; the deployment mode decides which one is built.

mod feed;
mod gnews;

pub use feed::{FeedUrls, YahooFeedSource};
pub use gnews::{DEFAULT_GNEWS_BASE_URL, GNewsSource};

use crate::error::{Error, Result};
use crate::format::Heading;
use crate::schema::Operation;
use crate::types::{ArticleRecord, FeedCategory, HeadlineCategory, SourceMode};
use crate::validate::ResolvedArguments;
use async_trait::async_trait;
use std::str::FromStr;

/// Trait for upstream news providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Mode this source serves, which selects the operation catalogue
    fn mode(&self) -> SourceMode;

    /// Fetch the articles for a query. No retries.
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<ArticleRecord>>;
}

/// A typed request for articles, built from validated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsQuery {
    /// Latest items of one feed category
    Latest { category: FeedCategory },
    /// Feed category items, filtered locally by keyword
    FeedSearch {
        keyword: String,
        category: FeedCategory,
    },
    /// Upstream keyword search
    ApiSearch {
        keyword: String,
        lang: String,
        country: String,
        max: u32,
    },
    /// Upstream top headlines
    TopHeadlines {
        category: HeadlineCategory,
        lang: String,
        country: String,
        max: u32,
    },
}

/// A query together with how its results are presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub query: NewsQuery,
    pub limit: usize,
}

impl QueryPlan {
    /// Build the plan for `operation` in `mode` from validated arguments
    pub fn build(mode: SourceMode, operation: Operation, args: &ResolvedArguments) -> Result<Self> {
        match (mode, operation) {
            (SourceMode::Rss, Operation::GetNews) => Ok(Self {
                query: NewsQuery::Latest {
                    category: parse_arg(args, "category")?,
                },
                limit: count_arg(args, "limit")?,
            }),
            (SourceMode::Rss, Operation::SearchNews) => Ok(Self {
                query: NewsQuery::FeedSearch {
                    keyword: text_arg(args, "keyword")?,
                    category: parse_arg(args, "category")?,
                },
                limit: count_arg(args, "limit")?,
            }),
            (SourceMode::Gnews, Operation::SearchNews) => {
                let max = count_arg(args, "max")?;
                Ok(Self {
                    query: NewsQuery::ApiSearch {
                        keyword: text_arg(args, "keyword")?,
                        lang: text_arg(args, "lang")?,
                        country: text_arg(args, "country")?,
                        max: max as u32,
                    },
                    limit: max,
                })
            }
            (SourceMode::Gnews, Operation::GetTopHeadlines) => {
                let max = count_arg(args, "max")?;
                Ok(Self {
                    query: NewsQuery::TopHeadlines {
                        category: parse_arg(args, "category")?,
                        lang: text_arg(args, "lang")?,
                        country: text_arg(args, "country")?,
                        max: max as u32,
                    },
                    limit: max,
                })
            }
            (mode, operation) => Err(Error::InvalidRequest {
                message: format!("operation '{operation}' is not available in {mode} mode"),
            }),
        }
    }

    /// Header of the rendered result
    pub fn heading(&self) -> Heading {
        match &self.query {
            NewsQuery::Latest { category } => Heading::Category(category.to_string()),
            NewsQuery::FeedSearch { keyword, .. } | NewsQuery::ApiSearch { keyword, .. } => {
                Heading::Keyword(keyword.clone())
            }
            NewsQuery::TopHeadlines { category, .. } => Heading::Headlines(category.to_string()),
        }
    }

    /// Keyword to filter on locally. Upstream searches are not re-filtered.
    pub fn local_keyword(&self) -> Option<&str> {
        match &self.query {
            NewsQuery::FeedSearch { keyword, .. } => Some(keyword),
            _ => None,
        }
    }
}

fn text_arg(args: &ResolvedArguments, key: &str) -> Result<String> {
    args.text(key)
        .map(str::to_string)
        .ok_or_else(|| missing(key))
}

fn parse_arg<T: FromStr>(args: &ResolvedArguments, key: &str) -> Result<T> {
    let raw = args.text(key).ok_or_else(|| missing(key))?;
    raw.parse().map_err(|_| Error::InvalidRequest {
        message: format!("'{raw}' is not a valid {key}"),
    })
}

fn count_arg(args: &ResolvedArguments, key: &str) -> Result<usize> {
    let n = args.integer(key).ok_or_else(|| missing(key))?;
    usize::try_from(n).map_err(|_| Error::InvalidRequest {
        message: format!("'{key}' must not be negative"),
    })
}

fn missing(key: &str) -> Error {
    Error::InvalidRequest {
        message: format!("argument '{key}' was not resolved"),
    }
}
