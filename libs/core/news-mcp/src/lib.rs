//! News MCP Server
//!
//! An MCP (Model Context Protocol) tool server answering news queries from
//! either the Yahoo! News category RSS feeds or the GNews search API.
//!
//! - Table-driven tool catalogue with one generic argument validator
//! - Typestate HTTP client shared by both sources
//! - Localized plain-text rendering of article lists
//! - Newline-delimited JSON-RPC over stdio

mod client;
mod dispatch;
mod error;
mod format;
mod locale;
mod mcp;
mod parser;
mod schema;
mod source;
mod transport;
mod types;
mod validate;

pub use client::{NewsClient, Ready, Uninitialized};
pub use dispatch::Dispatcher;
pub use error::{Error, Result, ValidationError};
pub use format::{Formatter, Heading};
pub use mcp::{McpHandler, McpRequest, McpResponse, PROTOCOL_VERSION};
pub use parser::FeedParser;
pub use schema::{Catalogue, Operation, OperationSpec, ParamKind, ParamValue, ParameterSpec};
pub use source::{
    DEFAULT_GNEWS_BASE_URL, FeedUrls, GNewsSource, NewsQuery, NewsSource, QueryPlan,
    YahooFeedSource,
};
pub use transport::{serve, serve_stdio};
pub use types::{ArticleRecord, FeedCategory, HeadlineCategory, Locale, SourceMode, ToolResult};
pub use validate::{ResolvedArguments, validate};
