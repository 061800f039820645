//! In-process evaluation of list requests
//!
//! Mirrors the SQL semantics over plain records so repository fakes behave
//! like the Postgres implementations: filter, count, order, slice.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::columns::ColumnMap;
use crate::order::{OrderTerm, order_plan};
use crate::pagination::offset;
use crate::params::ListRequest;
use crate::predicate::{Condition, Predicate, build_predicate};

/// A column value as seen by filters and ordering
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    pub fn text(s: impl Into<Cow<'a, str>>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Text form used for substring matching and mixed-type ordering
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Timestamp(t) => Cow::Owned(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }
}

/// Something a list request can be evaluated against.
pub trait Record {
    /// Value of a column by its public id (`createdAt`), `None` if unknown.
    fn field(&self, column_id: &str) -> Option<FieldValue<'_>>;
}

fn compare_by<R: Record>(a: &R, b: &R, terms: &[OrderTerm]) -> Ordering {
    for term in terms {
        let ordering = match (a.field(term.column.id), b.field(term.column.id)) {
            (Some(x), Some(y)) => x.compare(&y),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        };
        let ordering = if term.desc {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Filter, order and slice `rows`; returns the page and the filtered total.
pub fn evaluate<R: Record + Clone>(
    rows: &[R],
    request: &ListRequest,
    map: &ColumnMap,
    base: Option<Condition>,
) -> (Vec<R>, u64) {
    let predicate = build_predicate(&request.filters, map);
    let predicate = match base {
        Some(condition) => Some(Predicate::and(predicate, condition)),
        None => predicate,
    };

    let mut matched: Vec<&R> = rows
        .iter()
        .filter(|row| predicate.as_ref().is_none_or(|p| p.matches(*row)))
        .collect();
    let total = matched.len() as u64;

    let terms = order_plan(&request.sorting, map);
    matched.sort_by(|a, b| compare_by(*a, *b, &terms));

    let page = matched
        .into_iter()
        .skip(offset(request.pagination) as usize)
        .take(request.pagination.limit as usize)
        .cloned()
        .collect();

    (page, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::fixtures::{ACTIVE, PEOPLE};
    use crate::params::{PageRequest, SortItem};
    use chrono::{Duration, TimeZone};

    #[derive(Clone, Debug)]
    struct Row {
        id: String,
        name: String,
        active: bool,
        created_at: DateTime<Utc>,
    }

    impl Record for Row {
        fn field(&self, column_id: &str) -> Option<FieldValue<'_>> {
            match column_id {
                "id" => Some(FieldValue::text(self.id.as_str())),
                "name" => Some(FieldValue::text(self.name.as_str())),
                "active" => Some(FieldValue::Bool(self.active)),
                "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..7)
            .map(|i| Row {
                id: format!("{i:02}"),
                name: format!("user{i}"),
                active: i % 2 == 0,
                created_at: base + Duration::hours(i),
            })
            .collect()
    }

    #[test]
    fn test_default_order_is_newest_first() {
        let request = ListRequest {
            pagination: PageRequest { page: 1, limit: 3 },
            ..ListRequest::default()
        };
        let (page, total) = evaluate(&rows(), &request, &PEOPLE, None);
        assert_eq!(total, 7);
        let ids: Vec<_> = page.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["06", "05", "04"]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let request = ListRequest {
            pagination: PageRequest { page: 3, limit: 3 },
            sorting: vec![SortItem::asc("name")],
            ..ListRequest::default()
        };
        let (page, total) = evaluate(&rows(), &request, &PEOPLE, None);
        assert_eq!(total, 7);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "user6");
    }

    #[test]
    fn test_ties_are_broken_by_primary_key() {
        let mut data = rows();
        let same = data[0].created_at;
        for row in &mut data {
            row.created_at = same;
        }
        let request = ListRequest {
            sorting: vec![SortItem::desc("createdAt")],
            ..ListRequest::default()
        };
        let (page, _) = evaluate(&data, &request, &PEOPLE, None);
        let ids: Vec<_> = page.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["00", "01", "02", "03", "04", "05", "06"]);
    }

    #[test]
    fn test_base_condition_reduces_total() {
        let (page, total) = evaluate(
            &rows(),
            &ListRequest::default(),
            &PEOPLE,
            Some(Condition::is(&ACTIVE, true)),
        );
        assert_eq!(total, 4);
        assert!(page.iter().all(|r| r.active));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let request = ListRequest {
            pagination: PageRequest { page: 9, limit: 10 },
            ..ListRequest::default()
        };
        let (page, total) = evaluate(&rows(), &request, &PEOPLE, None);
        assert!(page.is_empty());
        assert_eq!(total, 7);
    }
}
