use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// Filter on a single database property, e.g.
/// `{"property": "Job ID", "rich_text": {"equals": "42"}}`.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    #[serde(flatten)]
    pub condition: FilterCondition,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    RichText(TextFilterCondition),
    Title(TextFilterCondition),
}

#[derive(Debug, Clone, Serialize)]
pub struct TextFilterCondition {
    pub equals: String,
}

impl PropertyFilter {
    /// Exact match on a rich text property.
    pub fn rich_text_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            condition: FilterCondition::RichText(TextFilterCondition {
                equals: value.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseQueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A page as returned by the API. Properties are kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Value,
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct PageCreateRequest {
    pub parent: Parent,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl PageCreateRequest {
    pub fn in_database(database_id: impl Into<String>) -> Self {
        Self {
            parent: Parent::DatabaseId {
                database_id: database_id.into(),
            },
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    DatabaseId { database_id: String },
}

/// Property value payloads. Serialized externally tagged, which is the
/// shape Notion expects: `{"title": [...]}`, `{"url": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Url(Option<String>),
}

impl PropertyValue {
    pub fn title(content: impl Into<String>) -> Self {
        PropertyValue::Title(vec![RichText::plain(content)])
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        PropertyValue::RichText(vec![RichText::plain(content)])
    }

    /// Notion rejects an empty string for URL properties, so empty becomes null.
    pub fn url(url: impl Into<String>) -> Self {
        let url = url.into();
        PropertyValue::Url(if url.is_empty() { None } else { Some(url) })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RichText {
    pub text: Text,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: Text {
                content: content.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Text {
    pub content: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
