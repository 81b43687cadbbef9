//! Operation catalogue
//!
//! Every tool is a row in a static table of [`ParameterSpec`]s. The same
//! table drives argument validation and the JSON Schema advertised by
//! `tools/list`, so the two can never disagree.

use crate::types::{FeedCategory, HeadlineCategory, SourceMode};
use serde_json::{Map, Value, json};
use strum::{AsRefStr, Display, EnumString, IntoEnumIterator, IntoStaticStr};

/// Names of the operations this server can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    GetNews,
    SearchNews,
    GetTopHeadlines,
}

/// A validated argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
}

impl ParamValue {
    fn to_json(&self) -> Value {
        match self {
            ParamValue::Text(text) => Value::String(text.clone()),
            ParamValue::Integer(n) => Value::from(*n),
        }
    }
}

/// Type and bounds of a parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Integer {
        min: i64,
        max: i64,
    },
    Enum {
        allowed: Vec<&'static str>,
    },
}

/// Declaration of one operation parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<ParamValue>,
}

impl ParameterSpec {
    fn new(key: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            key,
            description,
            kind,
            required: false,
            default: None,
        }
    }

    /// Free-form string parameter
    pub fn text(key: &'static str, description: &'static str) -> Self {
        Self::new(
            key,
            description,
            ParamKind::Text {
                min_len: None,
                max_len: None,
            },
        )
    }

    /// Integer parameter bounded to `[min, max]`
    pub fn integer(key: &'static str, description: &'static str, min: i64, max: i64) -> Self {
        Self::new(key, description, ParamKind::Integer { min, max })
    }

    /// String parameter restricted to `allowed`
    pub fn one_of(key: &'static str, description: &'static str, allowed: Vec<&'static str>) -> Self {
        Self::new(key, description, ParamKind::Enum { allowed })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_len(mut self, len: usize) -> Self {
        if let ParamKind::Text { min_len, .. } = &mut self.kind {
            *min_len = Some(len);
        }
        self
    }

    /// Exact length, e.g. two-letter language codes
    pub fn exact_len(mut self, len: usize) -> Self {
        if let ParamKind::Text { min_len, max_len } = &mut self.kind {
            *min_len = Some(len);
            *max_len = Some(len);
        }
        self
    }

    pub fn default_text(mut self, value: &str) -> Self {
        self.default = Some(ParamValue::Text(value.to_string()));
        self
    }

    pub fn default_integer(mut self, value: i64) -> Self {
        self.default = Some(ParamValue::Integer(value));
        self
    }

    /// JSON Schema fragment for this parameter
    pub fn json_schema(&self) -> Value {
        let mut schema = Map::new();
        match &self.kind {
            ParamKind::Text { min_len, max_len } => {
                schema.insert("type".into(), json!("string"));
                if let Some(min) = min_len {
                    schema.insert("minLength".into(), json!(min));
                }
                if let Some(max) = max_len {
                    schema.insert("maxLength".into(), json!(max));
                }
            }
            // Advertised as a JSON number; validation still requires a whole value
            ParamKind::Integer { min, max } => {
                schema.insert("type".into(), json!("number"));
                schema.insert("minimum".into(), json!(min));
                schema.insert("maximum".into(), json!(max));
            }
            ParamKind::Enum { allowed } => {
                schema.insert("type".into(), json!("string"));
                schema.insert("enum".into(), json!(allowed));
            }
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.to_json());
        }
        schema.insert("description".into(), json!(self.description));
        Value::Object(schema)
    }
}

/// Declaration of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
}

impl OperationSpec {
    pub fn name(&self) -> &'static str {
        self.operation.into()
    }

    /// JSON Schema object advertised as the tool's `inputSchema`
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.key.to_string(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.key)
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    /// Descriptor returned by `tools/list`
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// The read-only set of operations for one deployment mode
#[derive(Debug, Clone)]
pub struct Catalogue {
    mode: SourceMode,
    operations: Vec<OperationSpec>,
}

impl Catalogue {
    pub fn for_mode(mode: SourceMode) -> Self {
        let operations = match mode {
            SourceMode::Rss => vec![feed_get_news(), feed_search_news()],
            SourceMode::Gnews => vec![api_search_news(), api_top_headlines()],
        };
        Self { mode, operations }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Look up an operation by its wire name
    pub fn get(&self, name: &str) -> Option<&OperationSpec> {
        self.operations.iter().find(|op| op.name() == name)
    }

    /// Operations in declaration order
    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }
}

const FEED_CATEGORY_DESCRIPTION: &str =
    "News category (top, domestic, world, business, entertainment, sports, it, science)";
const FEED_LIMIT_DESCRIPTION: &str = "Number of articles to return (max 20)";
const API_MAX_DESCRIPTION: &str = "Number of articles to return (max 10)";
const KEYWORD_DESCRIPTION: &str = "Search keyword";

fn feed_categories() -> Vec<&'static str> {
    FeedCategory::iter().map(Into::into).collect()
}

fn headline_categories() -> Vec<&'static str> {
    HeadlineCategory::iter().map(Into::into).collect()
}

fn feed_limit() -> ParameterSpec {
    ParameterSpec::integer("limit", FEED_LIMIT_DESCRIPTION, 1, 20).default_integer(5)
}

fn api_locale_params() -> [ParameterSpec; 3] {
    [
        ParameterSpec::text("lang", "Language code (e.g. ja, en, fr)")
            .exact_len(2)
            .default_text("ja"),
        ParameterSpec::text("country", "Country code (e.g. jp, us, gb)")
            .exact_len(2)
            .default_text("jp"),
        ParameterSpec::integer("max", API_MAX_DESCRIPTION, 1, 10).default_integer(5),
    ]
}

fn feed_get_news() -> OperationSpec {
    OperationSpec {
        operation: Operation::GetNews,
        description: "Get the latest news for a category from the Yahoo! News RSS feeds. \
                      Returns a list of articles with title, publication date, link and summary.",
        parameters: vec![
            ParameterSpec::one_of("category", FEED_CATEGORY_DESCRIPTION, feed_categories())
                .required(),
            feed_limit(),
        ],
    }
}

fn feed_search_news() -> OperationSpec {
    OperationSpec {
        operation: Operation::SearchNews,
        description: "Search news by keyword within a category. Matches articles whose title \
                      or summary contains the keyword and returns title, publication date, \
                      link and summary.",
        parameters: vec![
            ParameterSpec::text("keyword", KEYWORD_DESCRIPTION)
                .min_len(1)
                .required(),
            ParameterSpec::one_of("category", FEED_CATEGORY_DESCRIPTION, feed_categories())
                .default_text("top"),
            feed_limit(),
        ],
    }
}

fn api_search_news() -> OperationSpec {
    let mut parameters = vec![
        ParameterSpec::text("keyword", KEYWORD_DESCRIPTION)
            .min_len(1)
            .required(),
    ];
    parameters.extend(api_locale_params());
    OperationSpec {
        operation: Operation::SearchNews,
        description: "Search news by keyword. Returns matching articles with title, \
                      publication date, source, link and summary.",
        parameters,
    }
}

fn api_top_headlines() -> OperationSpec {
    let mut parameters = vec![
        ParameterSpec::one_of("category", "News category", headline_categories())
            .default_text("general"),
    ];
    parameters.extend(api_locale_params());
    OperationSpec {
        operation: Operation::GetTopHeadlines,
        description: "Get the latest top headlines for a category. Returns articles with \
                      title, publication date, source, link and summary.",
        parameters,
    }
}
