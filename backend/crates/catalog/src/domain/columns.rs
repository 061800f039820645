//! Columns exposed by the course listings
//!
//! The public listing never exposes `published`; it is always restricted to
//! published rows instead.

use table_query::{ColumnDescriptor, ColumnKind, ColumnMap, ExactType};

pub const ID: ColumnDescriptor =
    ColumnDescriptor::new("id", "id", ColumnKind::Exact(ExactType::Uuid));
pub const TITLE: ColumnDescriptor = ColumnDescriptor::new("title", "title", ColumnKind::Text);
pub const DESCRIPTION: ColumnDescriptor =
    ColumnDescriptor::new("description", "description", ColumnKind::Text);
pub const LEVEL: ColumnDescriptor =
    ColumnDescriptor::new("level", "level", ColumnKind::Exact(ExactType::Text));
pub const PUBLISHED: ColumnDescriptor =
    ColumnDescriptor::new("published", "published", ColumnKind::Boolean);
pub const CREATED_AT: ColumnDescriptor = ColumnDescriptor::new(
    "createdAt",
    "created_at",
    ColumnKind::Exact(ExactType::Timestamp),
);

const PUBLIC_COLUMNS: [ColumnDescriptor; 4] = [TITLE, DESCRIPTION, LEVEL, CREATED_AT];
const ADMIN_COLUMNS: [ColumnDescriptor; 6] = [ID, TITLE, DESCRIPTION, LEVEL, PUBLISHED, CREATED_AT];

pub static PUBLIC_COURSE_COLUMNS: ColumnMap =
    ColumnMap::new(&PUBLIC_COLUMNS, &CREATED_AT, true, &ID);

pub static ADMIN_COURSE_COLUMNS: ColumnMap = ColumnMap::new(&ADMIN_COLUMNS, &CREATED_AT, true, &ID);
