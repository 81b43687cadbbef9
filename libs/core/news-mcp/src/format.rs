//! Filter, truncate and render articles as a text block

use crate::types::{ArticleRecord, Locale};

/// What the result list is about, used for the header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    Category(String),
    Keyword(String),
    Headlines(String),
}

/// Renders article lists in one [`Locale`]
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    locale: Locale,
}

impl Formatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Filter by `keyword`, keep the first `limit` records, render.
    ///
    /// Records keep their source order. An empty result yields the
    /// "no results" sentinel instead of a header with no entries.
    pub fn process(
        &self,
        records: &[ArticleRecord],
        limit: usize,
        keyword: Option<&str>,
        heading: &Heading,
    ) -> String {
        let selected: Vec<&ArticleRecord> = records
            .iter()
            .filter(|record| keyword.is_none_or(|kw| record.mentions(kw)))
            .take(limit)
            .collect();

        if selected.is_empty() {
            return self.no_results(heading);
        }

        let entries: Vec<String> = selected
            .iter()
            .enumerate()
            .map(|(index, record)| self.entry(index + 1, record))
            .collect();

        format!("{}\n\n{}", self.header(heading), entries.join("\n"))
    }

    fn header(&self, heading: &Heading) -> String {
        match heading {
            Heading::Category(category) => self.locale.category_header(category),
            Heading::Keyword(keyword) => self.locale.keyword_header(keyword),
            Heading::Headlines(category) => self.locale.headlines_header(category),
        }
    }

    fn no_results(&self, heading: &Heading) -> String {
        match heading {
            Heading::Keyword(keyword) => self.locale.no_keyword_results(keyword),
            _ => self.locale.no_results().to_string(),
        }
    }

    fn entry(&self, index: usize, record: &ArticleRecord) -> String {
        let mut entry = format!(
            "{index}. {}\n   {}: {}\n",
            record.title,
            self.locale.date_label(),
            record.published_at
        );
        if let Some(source) = &record.source {
            entry.push_str(&format!("   {}: {source}\n", self.locale.source_label()));
        }
        entry.push_str(&format!(
            "   {}: {}\n   {}\n",
            self.locale.link_label(),
            record.link,
            record.summary.as_deref().unwrap_or_default()
        ));
        entry
    }
}
