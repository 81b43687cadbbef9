//! User-facing wording for each [`Locale`]

use crate::error::Error;
use crate::schema::Operation;
use crate::types::Locale;

impl Locale {
    pub fn date_label(&self) -> &'static str {
        match self {
            Locale::Ja => "発行日",
            Locale::En => "Published",
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            Locale::Ja => "ソース",
            Locale::En => "Source",
        }
    }

    pub fn link_label(&self) -> &'static str {
        match self {
            Locale::Ja => "リンク",
            Locale::En => "Link",
        }
    }

    pub fn category_header(&self, category: &str) -> String {
        match self {
            Locale::Ja => format!("{category}カテゴリの最新ニュース:"),
            Locale::En => format!("Latest news in category \"{category}\":"),
        }
    }

    pub fn keyword_header(&self, keyword: &str) -> String {
        match self {
            Locale::Ja => format!("「{keyword}」に関連するニュース:"),
            Locale::En => format!("News related to \"{keyword}\":"),
        }
    }

    pub fn headlines_header(&self, category: &str) -> String {
        match self {
            Locale::Ja => format!("{category}カテゴリのトップヘッドライン:"),
            Locale::En => format!("Top headlines in category \"{category}\":"),
        }
    }

    pub fn no_keyword_results(&self, keyword: &str) -> String {
        match self {
            Locale::Ja => format!("「{keyword}」に関連するニュースは見つかりませんでした。"),
            Locale::En => format!("No news found related to \"{keyword}\"."),
        }
    }

    pub fn no_results(&self) -> &'static str {
        match self {
            Locale::Ja => "記事が見つかりませんでした。",
            Locale::En => "No articles found.",
        }
    }

    pub fn unknown_tool(&self, name: &str) -> String {
        match self {
            Locale::Ja => format!("未知のツール: {name}"),
            Locale::En => format!("Unknown tool: {name}"),
        }
    }

    fn error_prefix(&self) -> &'static str {
        match self {
            Locale::Ja => "エラー: ",
            Locale::En => "Error: ",
        }
    }

    fn quota_exceeded(&self) -> &'static str {
        match self {
            Locale::Ja => "APIの1日の利用上限に達しました。明日再度お試しください。",
            Locale::En => "API daily quota reached. Please try again tomorrow.",
        }
    }

    fn fetch_failed(&self, operation: Option<Operation>) -> &'static str {
        match (self, operation) {
            (Locale::Ja, Some(Operation::SearchNews)) => "ニュースの検索中にエラーが発生しました",
            (Locale::Ja, Some(Operation::GetTopHeadlines)) => {
                "トップヘッドラインの取得中にエラーが発生しました"
            }
            (Locale::Ja, _) => "ニュースの取得中にエラーが発生しました",
            (Locale::En, Some(Operation::SearchNews)) => "Error occurred while searching for news",
            (Locale::En, Some(Operation::GetTopHeadlines)) => {
                "Error occurred while fetching top headlines"
            }
            (Locale::En, _) => "Error occurred while fetching news",
        }
    }

    /// Text of the error result returned to the caller.
    ///
    /// `operation` selects the wording for upstream failures.
    pub fn describe_error(&self, error: &Error, operation: Option<Operation>) -> String {
        match error {
            Error::UnknownOperation { name } => self.unknown_tool(name),
            Error::QuotaExceeded => format!("{}{}", self.error_prefix(), self.quota_exceeded()),
            e if e.is_fetch_failure() => format!(
                "{}{}: {}",
                self.error_prefix(),
                self.fetch_failed(operation),
                e
            ),
            e => format!("{}{}", self.error_prefix(), e),
        }
    }
}
