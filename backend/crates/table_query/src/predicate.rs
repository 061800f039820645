//! Filter predicates
//!
//! Each `{columnId: value}` filter becomes one [`Condition`] chosen by the
//! column's [`ColumnKind`]. Conditions are always combined with `AND`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::columns::{ColumnDescriptor, ColumnKind, ColumnMap, ExactType};
use crate::memory::{FieldValue, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// Case-insensitive substring (raw value, unescaped)
    Contains(String),
    /// Boolean equality
    Is(bool),
    /// Typed equality
    Equals(ExactValue),
}

/// A filter value parsed into the column's [`ExactType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExactValue {
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    /// Not a valid value of the column type; matches no row
    Unmatchable,
}

impl ExactValue {
    pub fn parse(ty: ExactType, raw: &str) -> Self {
        let parsed = match ty {
            ExactType::Text => return ExactValue::Text(raw.to_string()),
            ExactType::Uuid => Uuid::parse_str(raw.trim()).ok().map(ExactValue::Uuid),
            ExactType::Timestamp => DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|t| ExactValue::Timestamp(t.with_timezone(&Utc))),
        };
        parsed.unwrap_or_else(|| {
            tracing::debug!(value = %raw, kind = ?ty, "Filter value does not parse, matching nothing");
            ExactValue::Unmatchable
        })
    }

    fn matches(&self, field: &FieldValue<'_>) -> bool {
        match (self, field) {
            (ExactValue::Text(expected), field) => field.as_text() == expected.as_str(),
            (ExactValue::Uuid(expected), field) => {
                Uuid::parse_str(&field.as_text()).is_ok_and(|actual| actual == *expected)
            }
            (ExactValue::Timestamp(expected), FieldValue::Timestamp(actual)) => actual == expected,
            (ExactValue::Timestamp(_), _) | (ExactValue::Unmatchable, _) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: &'static ColumnDescriptor,
    pub matcher: Match,
}

impl Condition {
    /// Interpret a raw filter value according to the column kind.
    pub fn from_filter(column: &'static ColumnDescriptor, raw: &str) -> Self {
        let matcher = match column.kind {
            ColumnKind::Text => Match::Contains(raw.to_string()),
            ColumnKind::Boolean => Match::Is(raw == "true"),
            ColumnKind::Exact(ty) => Match::Equals(ExactValue::parse(ty, raw)),
        };
        Self { column, matcher }
    }

    /// Fixed condition a listing always applies (e.g. `published = true`)
    pub fn is(column: &'static ColumnDescriptor, value: bool) -> Self {
        Self {
            column,
            matcher: Match::Is(value),
        }
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let Some(field) = record.field(self.column.id) else {
            return false;
        };

        match (&self.matcher, field) {
            (Match::Contains(needle), field) => field
                .as_text()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            (Match::Is(expected), FieldValue::Bool(actual)) => *expected == actual,
            (Match::Is(_), _) => false,
            (Match::Equals(expected), field) => expected.matches(&field),
        }
    }
}

/// A conjunction of conditions. Never empty: "no filter" is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Single(Condition),
    All(Vec<Condition>),
}

impl Predicate {
    /// 0 conditions -> `None`, 1 -> itself, more -> `All`
    pub fn from_conditions(mut conditions: Vec<Condition>) -> Option<Self> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop().map(Predicate::Single),
            _ => Some(Predicate::All(conditions)),
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        match self {
            Predicate::Single(c) => std::slice::from_ref(c),
            Predicate::All(cs) => cs,
        }
    }

    /// Conjoin an optional predicate with a fixed condition.
    pub fn and(predicate: Option<Predicate>, extra: Condition) -> Predicate {
        match predicate {
            None => Predicate::Single(extra),
            Some(Predicate::Single(c)) => Predicate::All(vec![extra, c]),
            Some(Predicate::All(mut cs)) => {
                cs.insert(0, extra);
                Predicate::All(cs)
            }
        }
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.conditions().iter().all(|c| c.matches(record))
    }
}

/// Build the predicate for a set of filters.
///
/// Filters on ids the column map does not know are skipped.
pub fn build_predicate(filters: &BTreeMap<String, String>, map: &ColumnMap) -> Option<Predicate> {
    let conditions = filters
        .iter()
        .filter_map(|(id, raw)| match map.get(id) {
            Some(column) => Some(Condition::from_filter(column, raw)),
            None => {
                tracing::debug!(column = %id, "Ignoring filter on unknown column");
                None
            }
        })
        .collect();

    Predicate::from_conditions(conditions)
}

/// `%value%` with LIKE metacharacters escaped (backslash is the default
/// escape character in PostgreSQL).
pub fn like_pattern(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::fixtures::{ACTIVE, PEOPLE};

    struct Person {
        name: &'static str,
        active: bool,
        role: &'static str,
    }

    impl Record for Person {
        fn field(&self, column_id: &str) -> Option<FieldValue<'_>> {
            match column_id {
                "name" => Some(FieldValue::text(self.name)),
                "active" => Some(FieldValue::Bool(self.active)),
                "role" => Some(FieldValue::text(self.role)),
                _ => None,
            }
        }
    }

    fn filters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "Ann Lee", active: true, role: "admin" },
            Person { name: "Susanne", active: false, role: "student" },
            Person { name: "Bob", active: true, role: "student" },
        ]
    }

    #[test]
    fn test_no_filters_means_no_predicate() {
        assert!(build_predicate(&BTreeMap::new(), &PEOPLE).is_none());
        assert!(build_predicate(&filters(&[("unknown", "x")]), &PEOPLE).is_none());
    }

    #[test]
    fn test_single_filter_is_used_directly() {
        let predicate = build_predicate(&filters(&[("role", "admin")]), &PEOPLE).unwrap();
        assert!(matches!(predicate, Predicate::Single(_)));
    }

    #[test]
    fn test_text_filter_is_case_insensitive_substring() {
        let predicate = build_predicate(&filters(&[("name", "ann")]), &PEOPLE).unwrap();
        let matched: Vec<_> = people()
            .into_iter()
            .filter(|p| predicate.matches(p))
            .map(|p| p.name)
            .collect();
        assert_eq!(matched, vec!["Ann Lee", "Susanne"]);
    }

    #[test]
    fn test_boolean_filter_only_true_rows() {
        let predicate = build_predicate(&filters(&[("active", "true")]), &PEOPLE).unwrap();
        let matched: Vec<_> = people()
            .into_iter()
            .filter(|p| predicate.matches(p))
            .map(|p| p.name)
            .collect();
        assert_eq!(matched, vec!["Ann Lee", "Bob"]);

        // Anything other than "true" means false
        let predicate = build_predicate(&filters(&[("active", "yes")]), &PEOPLE).unwrap();
        assert_eq!(predicate.conditions()[0].matcher, Match::Is(false));
    }

    #[test]
    fn test_unknown_column_ignored_among_known_ones() {
        let predicate = build_predicate(
            &filters(&[("role", "student"), ("shoeSize", "42"), ("name", "s")]),
            &PEOPLE,
        )
        .unwrap();

        assert_eq!(predicate.conditions().len(), 2);
        let matched: Vec<_> = people()
            .into_iter()
            .filter(|p| predicate.matches(p))
            .map(|p| p.name)
            .collect();
        assert_eq!(matched, vec!["Susanne"]);
    }

    #[test]
    fn test_and_with_base_condition() {
        let combined = Predicate::and(None, Condition::is(&ACTIVE, true));
        assert!(matches!(combined, Predicate::Single(_)));

        let filtered = build_predicate(&filters(&[("name", "an")]), &PEOPLE);
        let combined = Predicate::and(filtered, Condition::is(&ACTIVE, true));
        assert_eq!(combined.conditions().len(), 2);

        let matched: Vec<_> = people()
            .into_iter()
            .filter(|p| combined.matches(p))
            .map(|p| p.name)
            .collect();
        assert_eq!(matched, vec!["Ann Lee"]);
    }

    struct Stamped {
        id: &'static str,
        created_at: DateTime<Utc>,
    }

    impl Record for Stamped {
        fn field(&self, column_id: &str) -> Option<FieldValue<'_>> {
            match column_id {
                "id" => Some(FieldValue::text(self.id)),
                "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
                _ => None,
            }
        }
    }

    fn stamped() -> Stamped {
        Stamped {
            id: "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00.123Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    fn exact_matches(id: &str, value: &str) -> bool {
        build_predicate(&filters(&[(id, value)]), &PEOPLE)
            .unwrap()
            .matches(&stamped())
    }

    #[test]
    fn test_timestamp_filter_compares_instants() {
        assert!(exact_matches("createdAt", "2024-01-01T00:00:00.123Z"));
        assert!(exact_matches("createdAt", "2024-01-01T09:00:00.123+09:00"));
        assert!(!exact_matches("createdAt", "2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_uuid_filter_ignores_case() {
        assert!(exact_matches("id", "6F9619FF-8B86-D011-B42D-00C04FC964FF"));
        assert!(exact_matches("id", "6f9619ff8b86d011b42d00c04fc964ff"));
        assert!(!exact_matches("id", "not-a-uuid"));
    }

    #[test]
    fn test_exact_value_parsing() {
        assert_eq!(
            ExactValue::parse(ExactType::Text, "admin"),
            ExactValue::Text("admin".to_string())
        );
        assert_eq!(
            ExactValue::parse(ExactType::Timestamp, "2024-13-01T00:00:00Z"),
            ExactValue::Unmatchable
        );
        assert!(matches!(
            ExactValue::parse(ExactType::Uuid, " 6F9619FF-8B86-D011-B42D-00C04FC964FF "),
            ExactValue::Uuid(_)
        ));
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
