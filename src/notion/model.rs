//! Notion API objects
//!
//! Only the parts of the Notion object model the blog reads are modelled.
//! Property values are read leniently: a property whose payload does not
//! match its declared type becomes [`PropertyValue::Unsupported`] instead of
//! failing the whole page.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Property types understood by the extractor, in the order they are probed
/// when a property object carries no `type` field.
const PROPERTY_KINDS: &[&str] = &["title", "rich_text", "date", "select", "files", "checkbox"];

/// A page (database row) as returned by a database query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    /// Page id assigned by Notion
    #[serde(default)]
    pub id: String,

    /// Named, typed properties
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: IndexMap<String, PropertyValue>,
}

impl Page {
    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

fn lenient_properties<'de, D>(deserializer: D) -> Result<IndexMap<String, PropertyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let properties = match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| (name.clone(), PropertyValue::from_json(value)))
            .collect(),
        _ => IndexMap::new(),
    };
    Ok(properties)
}

/// The value of one page property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Date(Option<DateValue>),
    Select(Option<SelectOption>),
    Files(Vec<FileObject>),
    Checkbox(bool),
    Unsupported,
}

impl PropertyValue {
    /// Read a property object such as `{"type": "title", "title": [...]}`.
    ///
    /// The variant comes from `type` when present, otherwise from the first
    /// known payload key found on the object.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return PropertyValue::Unsupported;
        };

        let kind = match object.get("type").and_then(Value::as_str) {
            Some(kind) => kind,
            None => match PROPERTY_KINDS.iter().find(|k| object.contains_key(**k)) {
                Some(kind) => *kind,
                None => return PropertyValue::Unsupported,
            },
        };
        let payload = object.get(kind).unwrap_or(&NULL);

        let parsed = match kind {
            "title" => decode(payload).map(PropertyValue::Title),
            "rich_text" => decode(payload).map(PropertyValue::RichText),
            "date" => decode(payload).map(PropertyValue::Date),
            "select" => decode(payload).map(PropertyValue::Select),
            "checkbox" => decode(payload).map(PropertyValue::Checkbox),
            "files" => payload.as_array().map(|entries| {
                PropertyValue::Files(entries.iter().map(FileObject::from_json).collect())
            }),
            _ => None,
        };

        parsed.unwrap_or(PropertyValue::Unsupported)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(PropertyValue::from_json(&value))
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

/// One run of formatted text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichText {
    /// Run kind: "text", "mention" or "equation"
    #[serde(rename = "type")]
    pub kind: String,
    pub plain_text: String,
    pub href: Option<String>,
    pub annotations: Annotations,
}

impl RichText {
    /// Plain text run without formatting
    pub fn plain(text: &str) -> Self {
        Self {
            kind: "text".to_string(),
            plain_text: text.to_string(),
            ..Default::default()
        }
    }
}

/// Concatenated plain text of a list of runs
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}

/// Formatting applied to a rich-text run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// Value of a date property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateValue {
    pub start: Option<String>,
    pub end: Option<String>,
    pub time_zone: Option<String>,
}

/// Selected option of a select property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub id: Option<String>,
    pub name: String,
    pub color: Option<String>,
}

/// URL holder used by both external and Notion-hosted files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUrl {
    pub url: String,
    pub expiry_time: Option<String>,
}

/// One entry of a files property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { external: FileUrl },
    File { file: FileUrl },
    #[serde(other)]
    Unsupported,
}

impl FileObject {
    fn from_json(value: &Value) -> Self {
        decode(value).unwrap_or(FileObject::Unsupported)
    }

    /// URL of the file, external or hosted
    pub fn url(&self) -> Option<&str> {
        match self {
            FileObject::External { external } => Some(&external.url),
            FileObject::File { file } => Some(&file.url),
            FileObject::Unsupported => None,
        }
    }
}

/// A content block of a page body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub block_type: String,

    #[serde(default)]
    pub has_children: bool,

    /// Remaining fields, including the payload keyed by `block_type`
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Block {
    /// Decode the type-specific payload. Missing or malformed payloads yield
    /// an empty [`BlockData`].
    pub fn data(&self) -> BlockData {
        self.fields
            .get(&self.block_type)
            .and_then(decode)
            .unwrap_or_default()
    }
}

/// Union of the payload fields used by the supported block types
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockData {
    pub rich_text: Vec<RichText>,
    pub caption: Vec<RichText>,
    pub checked: bool,
    pub language: String,
    pub expression: String,
    pub title: String,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<Icon>,
    pub external: Option<FileUrl>,
    pub file: Option<FileUrl>,
    pub cells: Vec<Vec<RichText>>,
}

impl BlockData {
    /// URL of an attached media file or link
    pub fn media_url(&self) -> Option<&str> {
        self.external
            .as_ref()
            .or(self.file.as_ref())
            .map(|f| f.url.as_str())
            .or(self.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Callout icon
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Icon {
    pub emoji: Option<String>,
}

/// A paginated list response
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    /// Cursor for the next request, if the listing continues
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Body of a database query request
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Database query filter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    And {
        and: Vec<Filter>,
    },
    Property {
        property: String,
        #[serde(flatten)]
        condition: Condition,
    },
}

impl Filter {
    /// `{"property": name, "checkbox": {"equals": value}}`
    pub fn checkbox(property: &str, equals: bool) -> Self {
        Filter::Property {
            property: property.to_string(),
            condition: Condition::Checkbox { equals },
        }
    }

    /// `{"property": name, "rich_text": {"equals": value}}`
    pub fn rich_text(property: &str, equals: &str) -> Self {
        Filter::Property {
            property: property.to_string(),
            condition: Condition::RichText {
                equals: equals.to_string(),
            },
        }
    }
}

/// Condition applied to one property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Checkbox { equals: bool },
    RichText { equals: String },
}

/// Sort criterion of a database query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    pub fn descending(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: Direction::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}
