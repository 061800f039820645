//! Column maps
//!
//! Each listing declares, once and statically, which column ids it exposes,
//! the SQL expression behind each id and how filters on it are interpreted.
//! Column SQL never comes from the request.

/// How a filter value is matched against a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Case-insensitive substring match
    Text,
    /// `value == "true"`
    Boolean,
    /// Typed equality (enums, identifiers, timestamps)
    Exact(ExactType),
}

/// Storage type of a [`ColumnKind::Exact`] column. The filter value is
/// parsed into this type before it is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExactType {
    /// Compared as the string itself (enum codes)
    Text,
    /// Any UUID spelling, case-insensitive
    Uuid,
    /// RFC 3339 instant, compared as a point in time
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Public id used in `sort` and as the filter key (`createdAt`)
    pub id: &'static str,
    /// SQL expression (`created_at`)
    pub sql: &'static str,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub const fn new(id: &'static str, sql: &'static str, kind: ColumnKind) -> Self {
        Self { id, sql, kind }
    }
}

/// The set of columns a listing can be filtered and sorted by.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    columns: &'static [ColumnDescriptor],
    default_sort: &'static ColumnDescriptor,
    default_desc: bool,
    primary_key: &'static ColumnDescriptor,
}

impl ColumnMap {
    /// `default_sort` is used when no known sort column was requested;
    /// `primary_key` is appended to every ordering to make pages stable.
    pub const fn new(
        columns: &'static [ColumnDescriptor],
        default_sort: &'static ColumnDescriptor,
        default_desc: bool,
        primary_key: &'static ColumnDescriptor,
    ) -> Self {
        Self {
            columns,
            default_sort,
            default_desc,
            primary_key,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'static ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn columns(&self) -> &'static [ColumnDescriptor] {
        self.columns
    }

    pub fn default_sort(&self) -> (&'static ColumnDescriptor, bool) {
        (self.default_sort, self.default_desc)
    }

    pub fn primary_key(&self) -> &'static ColumnDescriptor {
        self.primary_key
    }
}
