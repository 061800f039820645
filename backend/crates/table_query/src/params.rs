//! List query parameters
//!
//! Wire format: `page=<int>&limit=<int>&sort=<csv of [-]columnId>&<columnId>=<value>...`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QueryParamError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

const RESERVED_KEYS: [&str; 3] = ["page", "limit", "sort"];

/// Requested page window. `page >= 1`, `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub id: String,
    pub desc: bool,
}

impl SortItem {
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    /// `name` / `-createdAt`
    pub fn to_token(&self) -> String {
        if self.desc {
            format!("-{}", self.id)
        } else {
            self.id.clone()
        }
    }
}

/// Normalized list request shared by client and server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub pagination: PageRequest,
    /// First item has the highest precedence
    pub sorting: Vec<SortItem>,
    /// columnId -> raw value, never empty
    pub filters: BTreeMap<String, String>,
}

impl ListRequest {
    /// Encode as query pairs in the order the server reads them.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.pagination.page.to_string()),
            ("limit".to_string(), self.pagination.limit.to_string()),
        ];

        if !self.sorting.is_empty() {
            let sort = self
                .sorting
                .iter()
                .map(SortItem::to_token)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("sort".to_string(), sort));
        }

        pairs.extend(
            self.filters
                .iter()
                .filter(|(key, value)| !value.is_empty() && !RESERVED_KEYS.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        pairs
    }
}

/// Parse raw query pairs into a [`ListRequest`].
///
/// - `page` / `limit` default to 1 / 10 and are the only fields that can fail
/// - `sort` is a comma list where a leading `-` means descending
/// - every other key is a filter; empty values are dropped and the first
///   occurrence of a repeated key wins
pub fn parse_query_params<I, K, V>(pairs: I) -> Result<ListRequest, QueryParamError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut page = None;
    let mut limit = None;
    let mut sort = None;
    let mut filters = BTreeMap::new();

    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref());
        match key {
            "page" => {
                page.get_or_insert_with(|| value.to_string());
            }
            "limit" => {
                limit.get_or_insert_with(|| value.to_string());
            }
            "sort" => {
                sort.get_or_insert_with(|| value.to_string());
            }
            _ if value.is_empty() => {}
            _ => {
                filters
                    .entry(key.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
    }

    let page = match page {
        Some(raw) => {
            let n = parse_integer("page", &raw)?;
            if n < 1 {
                return Err(QueryParamError::PageTooSmall(n));
            }
            u32::try_from(n).map_err(|_| QueryParamError::NotAnInteger {
                field: "page",
                value: raw,
            })?
        }
        None => DEFAULT_PAGE,
    };

    let limit = match limit {
        Some(raw) => {
            let n = parse_integer("limit", &raw)?;
            if !(1..=i64::from(MAX_LIMIT)).contains(&n) {
                return Err(QueryParamError::LimitOutOfRange {
                    actual: n,
                    max: MAX_LIMIT,
                });
            }
            n as u32
        }
        None => DEFAULT_LIMIT,
    };

    Ok(ListRequest {
        pagination: PageRequest { page, limit },
        sorting: sort.as_deref().map(parse_sort).unwrap_or_default(),
        filters,
    })
}

/// `name,-createdAt` -> `[{name, asc}, {createdAt, desc}]`
///
/// Tokens are trimmed before the `-` prefix is read, so `" -name"` sorts by
/// `name` descending. Tokens left empty (including a bare `-`) are skipped.
pub fn parse_sort(raw: &str) -> Vec<SortItem> {
    raw.split(',')
        .map(str::trim)
        .filter_map(|token| match token.strip_prefix('-') {
            Some(id) if !id.is_empty() => Some(SortItem::desc(id)),
            Some(_) => None,
            None if token.is_empty() => None,
            None => Some(SortItem::asc(token)),
        })
        .collect()
}

/// Integer coercion: surrounding whitespace and a zero fraction ("2.0") are
/// accepted, anything else is not an integer.
fn parse_integer(field: &'static str, raw: &str) -> Result<i64, QueryParamError> {
    let trimmed = raw.trim();
    let not_integer = || QueryParamError::NotAnInteger {
        field,
        value: raw.to_string(),
    };

    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(not_integer()),
    }
}
