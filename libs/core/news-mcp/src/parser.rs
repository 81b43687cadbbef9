//! RSS parser for category feeds
//!
//! Uses the rss crate for the channel and scraper to strip markup from item
//! descriptions.

use crate::error::{Error, Result};
use crate::types::ArticleRecord;
use scraper::Html;

/// Parser for RSS 2.0 feeds
pub struct FeedParser;

impl FeedParser {
    /// Parse every item of a feed, in document order
    pub fn parse(xml: &[u8], url: &str) -> Result<Vec<ArticleRecord>> {
        let channel = rss::Channel::read_from(xml).map_err(|e| Error::Parse {
            context: url.to_string(),
            details: e.to_string(),
        })?;

        Ok(channel.items().iter().map(Self::record).collect())
    }

    fn record(item: &rss::Item) -> ArticleRecord {
        let record = ArticleRecord::new(
            item.title().unwrap_or_default(),
            item.pub_date().unwrap_or_default(),
            item.link().unwrap_or_default(),
        );

        let summary = item
            .description()
            .or_else(|| item.content())
            .map(Self::snippet)
            .filter(|s| !s.is_empty());

        match summary {
            Some(summary) => record.with_summary(summary),
            None => record,
        }
    }

    /// Plain text of an HTML fragment, trimmed
    pub fn snippet(html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let text: String = fragment.root_element().text().collect();
        text.trim().to_string()
    }
}
