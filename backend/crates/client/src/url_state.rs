//! URL state parsers
//!
//! Parsers turn one query-string value into typed state and back. They fail
//! closed: malformed JSON, a schema mismatch or a column outside the
//! allow-list all parse as `None`, which callers treat as "no state". A bad
//! shared link therefore shows an unfiltered table instead of an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use table_query::SortItem;

/// Converts between a query-string value and typed state.
pub trait UrlStateParser {
    type Value;

    /// `None` when the raw value is not acceptable.
    fn parse(&self, raw: &str) -> Option<Self::Value>;

    fn serialize(&self, value: &Self::Value) -> String;

    /// Whether two values would produce the same URL state.
    fn eq(&self, a: &Self::Value, b: &Self::Value) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterVariant {
    Text,
    Number,
    Range,
    Date,
    DateRange,
    Boolean,
    Select,
    MultiSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    ILike,
    NotILike,
    Eq,
    Ne,
    InArray,
    NotInArray,
    IsEmpty,
    IsNotEmpty,
    Lt,
    Lte,
    Gt,
    Gte,
    IsBetween,
    IsRelativeToToday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterItemValue {
    One(String),
    Many(Vec<String>),
}

/// One advanced filter as stored in the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterItem {
    pub id: String,
    pub value: FilterItemValue,
    pub variant: FilterVariant,
    pub operator: FilterOperator,
    pub filter_id: String,
}

fn allow_list<I, S>(column_ids: I) -> Option<HashSet<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(column_ids.into_iter().map(Into::into).collect())
}

fn permitted<'a>(allowed: &Option<HashSet<String>>, mut ids: impl Iterator<Item = &'a str>) -> bool {
    match allowed {
        Some(allowed) => ids.all(|id| allowed.contains(id)),
        None => true,
    }
}

/// JSON array of [`FilterItem`]s
#[derive(Debug, Clone, Default)]
pub struct FiltersParser {
    allowed: Option<HashSet<String>>,
}

impl FiltersParser {
    /// Accepts any column id
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the whole value if any item names a column outside `column_ids`.
    pub fn with_columns<I, S>(column_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allow_list(column_ids),
        }
    }
}

impl UrlStateParser for FiltersParser {
    type Value = Vec<FilterItem>;

    fn parse(&self, raw: &str) -> Option<Vec<FilterItem>> {
        let items: Vec<FilterItem> = serde_json::from_str(raw).ok()?;
        permitted(&self.allowed, items.iter().map(|item| item.id.as_str())).then_some(items)
    }

    fn serialize(&self, value: &Vec<FilterItem>) -> String {
        serde_json::to_string(value).unwrap_or_default()
    }

    /// Positional; `filter_id` is not compared.
    fn eq(&self, a: &Vec<FilterItem>, b: &Vec<FilterItem>) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(x, y)| {
                x.id == y.id
                    && x.variant == y.variant
                    && x.operator == y.operator
                    && x.value == y.value
            })
    }
}

/// JSON array of `{id, desc}`
#[derive(Debug, Clone, Default)]
pub struct SortingParser {
    allowed: Option<HashSet<String>>,
}

impl SortingParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(column_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allow_list(column_ids),
        }
    }
}

impl UrlStateParser for SortingParser {
    type Value = Vec<SortItem>;

    fn parse(&self, raw: &str) -> Option<Vec<SortItem>> {
        let items: Vec<SortItem> = serde_json::from_str(raw).ok()?;
        permitted(&self.allowed, items.iter().map(|item| item.id.as_str())).then_some(items)
    }

    fn serialize(&self, value: &Vec<SortItem>) -> String {
        serde_json::to_string(value).unwrap_or_default()
    }

    fn eq(&self, a: &Vec<SortItem>, b: &Vec<SortItem>) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id && x.desc == y.desc)
    }
}

/// One raw string per query parameter, used for the simple per-column filters
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl UrlStateParser for StringParser {
    type Value = String;

    fn parse(&self, raw: &str) -> Option<String> {
        Some(raw.to_string())
    }

    fn serialize(&self, value: &String) -> String {
        value.clone()
    }

    fn eq(&self, a: &String, b: &String) -> bool {
        a == b
    }
}
