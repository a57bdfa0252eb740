use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The four text fields every stored entry must carry.
pub const CORE_FIELDS: [&str; 4] = ["kanji", "hiragana", "romaji", "vietnamese"];

/// JSON keys of the optional metadata fields.
pub const ID_KEY: &str = "id";
pub const DATE_ADDED_KEY: &str = "dateAdded";

/// One vocabulary item.
///
/// Core fields decode leniently: a missing field, `null`, `false`, `0` or `""`
/// all become the empty string. Unknown JSON fields are kept in `extra` so a
/// load/save cycle round-trips them; only [`VocabularyEntry::normalized`] drops them.
///
/// An `id` that is not a UUID, or a `dateAdded` that is not RFC 3339, is kept
/// verbatim in `extra` under its own key and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct VocabularyEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub kanji: String,
    pub hiragana: String,
    pub romaji: String,
    pub vietnamese: String,

    #[serde(rename = "dateAdded", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape of an entry before metadata is parsed.
#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<Value>,

    #[serde(default, deserialize_with = "lenient_string")]
    kanji: String,

    #[serde(default, deserialize_with = "lenient_string")]
    hiragana: String,

    #[serde(default, deserialize_with = "lenient_string")]
    romaji: String,

    #[serde(default, deserialize_with = "lenient_string")]
    vietnamese: String,

    #[serde(rename = "dateAdded", default)]
    date_added: Option<Value>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawEntry> for VocabularyEntry {
    fn from(raw: RawEntry) -> Self {
        let mut extra = raw.extra;
        let id = parse_or_keep(raw.id, ID_KEY, &mut extra, |s| Uuid::parse_str(s).ok());
        let date_added = parse_or_keep(raw.date_added, DATE_ADDED_KEY, &mut extra, |s| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|d| d.with_timezone(&Utc))
        });
        Self {
            id,
            kanji: raw.kanji,
            hiragana: raw.hiragana,
            romaji: raw.romaji,
            vietnamese: raw.vietnamese,
            date_added,
            extra,
        }
    }
}

/// Parse a metadata value, or stash it in `extra` under `key` when it does not parse.
fn parse_or_keep<T>(
    value: Option<Value>,
    key: &str,
    extra: &mut Map<String, Value>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match parse(&s) {
            Some(parsed) => Some(parsed),
            None => {
                extra.insert(key.to_string(), Value::String(s));
                None
            }
        },
        Some(other) => {
            extra.insert(key.to_string(), other);
            None
        }
    }
}

impl VocabularyEntry {
    pub fn new(
        kanji: impl Into<String>,
        hiragana: impl Into<String>,
        romaji: impl Into<String>,
        vietnamese: impl Into<String>,
    ) -> Self {
        Self {
            kanji: kanji.into(),
            hiragana: hiragana.into(),
            romaji: romaji.into(),
            vietnamese: vietnamese.into(),
            ..Default::default()
        }
    }

    /// Assigns a fresh id and a creation timestamp where they are missing.
    /// A kept unparsed value counts as present.
    pub fn ensure_identity(&mut self) {
        if self.id.is_none() && !self.extra.contains_key(ID_KEY) {
            self.id = Some(Uuid::new_v4());
        }
        if self.date_added.is_none() && !self.extra.contains_key(DATE_ADDED_KEY) {
            self.date_added = Some(Utc::now());
        }
    }

    /// Returns the text of the field a search type targets.
    /// `None` for an unknown search type.
    pub fn field(&self, search_type: &SearchType) -> Option<&str> {
        match search_type {
            SearchType::Romaji => Some(&self.romaji),
            SearchType::Hiragana => Some(&self.hiragana),
            SearchType::Vietnamese => Some(&self.vietnamese),
            SearchType::Unknown(_) => None,
        }
    }

    /// Copy of this entry with only the model fields. Unparsed `id` and
    /// `dateAdded` values survive.
    pub fn normalized(&self) -> Self {
        let mut entry = self.clone();
        entry.extra.retain(|key, _| is_metadata_key(key));
        entry
    }

    /// Number of fields [`normalized`](Self::normalized) would drop.
    pub fn unexpected_field_count(&self) -> usize {
        self.extra.keys().filter(|key| !is_metadata_key(key)).count()
    }
}

/// Converts a raw JSON field into a string following the "falsy means empty" rule.
pub fn coerce_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        other => other.to_string(),
    }
}

fn is_metadata_key(key: &str) -> bool {
    key == ID_KEY || key == DATE_ADDED_KEY
}

/// True when a raw record's core field is absent or not a string.
pub fn field_needs_fill(record: &Value, field: &str) -> bool {
    !matches!(record.get(field), Some(Value::String(_)))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| coerce_field(&v)).unwrap_or_default())
}

/// Which field a query is matched against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchType {
    #[default]
    Romaji,
    Hiragana,
    Vietnamese,
    /// Anything else. Matches nothing.
    Unknown(String),
}

impl SearchType {
    pub fn as_str(&self) -> &str {
        match self {
            SearchType::Romaji => "romaji",
            SearchType::Hiragana => "hiragana",
            SearchType::Vietnamese => "vietnamese",
            SearchType::Unknown(s) => s,
        }
    }
}

impl FromStr for SearchType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "romaji" => SearchType::Romaji,
            "hiragana" => SearchType::Hiragana,
            "vietnamese" => SearchType::Vietnamese,
            _ => SearchType::Unknown(s.to_string()),
        })
    }
}

impl From<String> for SearchType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<SearchType> for String {
    fn from(t: SearchType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient query state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: String,
    #[serde(rename = "searchType")]
    pub search_type: SearchType,
}

impl SearchFilters {
    pub fn new(query: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            query: query.into(),
            search_type,
        }
    }
}
