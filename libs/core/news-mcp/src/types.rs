//! Domain types shared by every news source
//!
//! Category keys and modes are strum enums so the schema tables, the feed
//! URL map and the CLI all read the same spelling.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Which upstream the server is deployed against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SourceMode {
    /// Yahoo! News category RSS feeds
    Rss,
    /// GNews REST API
    Gnews,
}

impl SourceMode {
    /// Server name advertised in the MCP handshake
    pub fn server_name(&self) -> &'static str {
        match self {
            SourceMode::Rss => "yahoo-news-server",
            SourceMode::Gnews => "gnews-server",
        }
    }

    /// Message language used when none is configured
    pub fn default_locale(&self) -> Locale {
        match self {
            SourceMode::Rss => Locale::Ja,
            SourceMode::Gnews => Locale::En,
        }
    }
}

/// Language of labels, headers and error text in tool output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    Ja,
    En,
}

/// Yahoo! News feed categories
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum FeedCategory {
    Top,
    Domestic,
    World,
    Business,
    Entertainment,
    Sports,
    It,
    Science,
}

/// GNews top-headline categories
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum HeadlineCategory {
    General,
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

/// A news item, normalized from an RSS item or an API article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub published_at: String,
    pub link: String,
    pub summary: Option<String>,
    /// Publisher name, when the source reports one
    pub source: Option<String>,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        published_at: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published_at: published_at.into(),
            link: link.into(),
            summary: None,
            source: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Literal, case-sensitive substring match on title or summary
    pub fn mentions(&self, keyword: &str) -> bool {
        self.title.contains(keyword)
            || self
                .summary
                .as_deref()
                .is_some_and(|summary| summary.contains(keyword))
    }
}

/// One content block of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// Response envelope for every tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<Content>,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Text of the first content block
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(Content::Text { text }) => text,
            None => "",
        }
    }
}
