//! Tool dispatcher
//!
//! Maps an operation name plus raw arguments to a [`ToolResult`]. Every path
//! (unknown tool, bad arguments, upstream failure, success) ends in a value;
//! nothing escapes to the transport as an error.

use crate::error::{Error, Result};
use crate::format::Formatter;
use crate::schema::{Catalogue, Operation, OperationSpec};
use crate::source::{NewsSource, QueryPlan};
use crate::types::{Locale, ToolResult};
use crate::validate::validate;
use serde_json::Value;
use tracing::{Instrument, error, info_span, warn};

/// Routes tool calls to the configured news source
pub struct Dispatcher {
    catalogue: Catalogue,
    source: Box<dyn NewsSource>,
    formatter: Formatter,
    locale: Locale,
}

impl Dispatcher {
    /// The catalogue follows the source's mode
    pub fn new(source: impl NewsSource + 'static, locale: Locale) -> Self {
        Self {
            catalogue: Catalogue::for_mode(source.mode()),
            source: Box::new(source),
            formatter: Formatter::new(locale),
            locale,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Descriptors of every operation, in declaration order
    pub fn list(&self) -> Vec<Value> {
        self.catalogue
            .operations()
            .iter()
            .map(OperationSpec::descriptor)
            .collect()
    }

    /// Run one tool call to completion
    pub async fn call(&self, name: &str, arguments: &Value) -> ToolResult {
        let span = info_span!("tool_call", tool = %name);
        let operation = name.parse::<Operation>().ok();

        match self.try_call(name, arguments).instrument(span).await {
            Ok(text) => ToolResult::success(text),
            Err(e) => {
                match &e {
                    Error::UnknownOperation { .. } | Error::Validation(_) => {
                        warn!(tool = %name, error = %e, "Rejected tool call")
                    }
                    _ => error!(tool = %name, error = %e, "Tool execution failed"),
                }
                ToolResult::error(self.locale.describe_error(&e, operation))
            }
        }
    }

    async fn try_call(&self, name: &str, arguments: &Value) -> Result<String> {
        let spec = self
            .catalogue
            .get(name)
            .ok_or_else(|| Error::UnknownOperation {
                name: name.to_string(),
            })?;

        let args = validate(spec, arguments)?;
        let plan = QueryPlan::build(self.catalogue.mode(), spec.operation, &args)?;

        let records = self.source.fetch(&plan.query).await?;

        Ok(self
            .formatter
            .process(&records, plan.limit, plan.local_keyword(), &plan.heading()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NewsClient;
    use crate::source::{FeedUrls, MockNewsSource, NewsQuery, YahooFeedSource};
    use crate::types::{ArticleRecord, FeedCategory, SourceMode};
    use serde_json::json;

    fn rss_source() -> MockNewsSource {
        let mut source = MockNewsSource::new();
        source.expect_mode().return_const(SourceMode::Rss);
        source
    }

    fn gnews_source() -> MockNewsSource {
        let mut source = MockNewsSource::new();
        source.expect_mode().return_const(SourceMode::Gnews);
        source
    }

    fn top_news() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord::new(
                "トップニュース1",
                "2023-04-15T10:00:00Z",
                "https://news.yahoo.co.jp/articles/1",
            )
            .with_summary("トップニュースの内容1"),
            ArticleRecord::new(
                "トップニュース2",
                "2023-04-15T09:00:00Z",
                "https://news.yahoo.co.jp/articles/2",
            )
            .with_summary("トップニュースの内容2"),
        ]
    }

    #[tokio::test]
    async fn test_list_follows_source_mode() {
        let dispatcher = Dispatcher::new(rss_source(), Locale::Ja);
        let names: Vec<_> = dispatcher
            .list()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["get-news", "search-news"]);

        let dispatcher = Dispatcher::new(gnews_source(), Locale::En);
        assert_eq!(dispatcher.list()[1]["name"], "get-top-headlines");
    }

    #[tokio::test]
    async fn test_get_news_success() {
        let mut source = rss_source();
        source
            .expect_fetch()
            .withf(|query| {
                *query
                    == NewsQuery::Latest {
                        category: FeedCategory::Top,
                    }
            })
            .times(1)
            .returning(|_| Ok(top_news()));

        let dispatcher = Dispatcher::new(source, Locale::Ja);
        let result = dispatcher
            .call("get-news", &json!({"category": "top", "limit": 2}))
            .await;

        assert!(!result.is_error);
        assert!(result.text().contains("topカテゴリの最新ニュース"));
        assert!(result.text().contains("1. トップニュース1"));
        assert!(result.text().contains("2. トップニュース2"));
    }

    #[tokio::test]
    async fn test_search_filters_by_keyword() {
        let mut source = rss_source();
        source.expect_fetch().times(1).returning(|_| {
            Ok(vec![
                ArticleRecord::new("キーワードを含むニュース1", "", "https://x/4")
                    .with_summary("テスト用のキーワードを含む内容1"),
                ArticleRecord::new("別のニュース", "", "https://x/5")
                    .with_summary("含まない内容"),
            ])
        });

        let dispatcher = Dispatcher::new(source, Locale::Ja);
        let result = dispatcher
            .call("search-news", &json!({"keyword": "キーワード"}))
            .await;

        assert!(!result.is_error);
        assert!(result.text().contains("「キーワード」に関連するニュース"));
        assert!(result.text().contains("キーワードを含むニュース1"));
        assert!(!result.text().contains("別のニュース"));
    }

    #[tokio::test]
    async fn test_search_without_match_returns_sentinel() {
        let mut source = rss_source();
        source.expect_fetch().returning(|_| Ok(top_news()));

        let dispatcher = Dispatcher::new(source, Locale::Ja);
        let result = dispatcher
            .call("search-news", &json!({"keyword": "天気"}))
            .await;

        assert!(!result.is_error);
        assert_eq!(result.text(), "「天気」に関連するニュースは見つかりませんでした。");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let mut source = rss_source();
        source.expect_fetch().never();

        let dispatcher = Dispatcher::new(source, Locale::Ja);
        let result = dispatcher.call("get-weather", &json!({})).await;

        assert!(result.is_error);
        assert!(result.text().contains("get-weather"));
    }

    #[tokio::test]
    async fn test_other_mode_tool_is_unknown() {
        let mut source = rss_source();
        source.expect_fetch().never();

        let dispatcher = Dispatcher::new(source, Locale::En);
        let result = dispatcher.call("get-top-headlines", &json!({})).await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Unknown tool: get-top-headlines");
    }

    #[tokio::test]
    async fn test_validation_failure_skips_fetch() {
        let mut source = rss_source();
        source.expect_fetch().never();

        let dispatcher = Dispatcher::new(source, Locale::En);
        let result = dispatcher
            .call("get-news", &json!({"category": "top", "limit": 50}))
            .await;

        assert!(result.is_error);
        assert!(result.text().starts_with("Error: "));
        assert!(result.text().contains("limit"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_localized_error_result() {
        let mut source = rss_source();
        source.expect_fetch().returning(|_| {
            Err(Error::Upstream {
                url: "https://news.yahoo.co.jp/rss/topics/top-picks.xml".to_string(),
                status: 503,
            })
        });

        let dispatcher = Dispatcher::new(source, Locale::Ja);
        let result = dispatcher.call("get-news", &json!({"category": "top"})).await;

        assert!(result.is_error);
        assert!(result
            .text()
            .contains("ニュースの取得中にエラーが発生しました"));
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_localized_error_result() {
        let urls = FeedUrls::default().with_url(FeedCategory::World, "http://127.0.0.1:1/world.xml");
        let source = YahooFeedSource::new(NewsClient::new().init().unwrap(), urls);

        let dispatcher = Dispatcher::new(source, Locale::Ja);
        let result = dispatcher
            .call("get-news", &json!({"category": "world"}))
            .await;

        assert!(result.is_error);
        assert!(result
            .text()
            .starts_with("エラー: ニュースの取得中にエラーが発生しました: "));
        assert!(result.text().contains("127.0.0.1:1/world.xml"));
    }

    #[tokio::test]
    async fn test_unreachable_feed_during_search_uses_search_wording() {
        let urls = FeedUrls::default().with_url(FeedCategory::Top, "http://127.0.0.1:1/top.xml");
        let source = YahooFeedSource::new(NewsClient::new().init().unwrap(), urls);

        let dispatcher = Dispatcher::new(source, Locale::En);
        let result = dispatcher
            .call("search-news", &json!({"keyword": "AI"}))
            .await;

        assert!(result.is_error);
        assert!(result
            .text()
            .starts_with("Error: Error occurred while searching for news: "));
    }

    #[tokio::test]
    async fn test_top_headlines_failure_wording() {
        let mut source = gnews_source();
        source.expect_fetch().returning(|_| {
            Err(Error::Upstream {
                url: "https://gnews.io/api/v4/top-headlines".to_string(),
                status: 500,
            })
        });

        let dispatcher = Dispatcher::new(source, Locale::En);
        let result = dispatcher.call("get-top-headlines", &json!({})).await;

        assert!(result.is_error);
        assert!(result
            .text()
            .starts_with("Error: Error occurred while fetching top headlines: "));
    }

    #[tokio::test]
    async fn test_quota_exceeded_message() {
        let mut source = gnews_source();
        source
            .expect_fetch()
            .returning(|_| Err(Error::QuotaExceeded));

        let dispatcher = Dispatcher::new(source, Locale::En);
        let result = dispatcher.call("search-news", &json!({"keyword": "AI"})).await;

        assert!(result.is_error);
        assert_eq!(
            result.text(),
            "Error: API daily quota reached. Please try again tomorrow."
        );
    }

    #[tokio::test]
    async fn test_api_search_is_not_refiltered_but_is_capped() {
        let mut source = gnews_source();
        source.expect_fetch().returning(|_| {
            Ok((1..=4)
                .map(|i| {
                    ArticleRecord::new(format!("Story {i}"), "", format!("https://x/{i}"))
                        .with_source("Wire")
                })
                .collect())
        });

        let dispatcher = Dispatcher::new(source, Locale::En);
        let result = dispatcher
            .call("search-news", &json!({"keyword": "election", "max": 3}))
            .await;

        assert!(!result.is_error);
        assert!(result.text().starts_with("News related to \"election\":"));
        assert!(result.text().contains("3. Story 3"));
        assert!(!result.text().contains("Story 4"));
        assert!(result.text().contains("   Source: Wire\n"));
    }
}
