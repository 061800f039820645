//! Columns exposed by `GET /admin/users`

use table_query::{ColumnDescriptor, ColumnKind, ColumnMap, ExactType};

pub const ID: ColumnDescriptor =
    ColumnDescriptor::new("id", "id", ColumnKind::Exact(ExactType::Uuid));
pub const EMAIL: ColumnDescriptor = ColumnDescriptor::new("email", "email", ColumnKind::Text);
pub const NAME: ColumnDescriptor = ColumnDescriptor::new("name", "name", ColumnKind::Text);
pub const ROLE: ColumnDescriptor =
    ColumnDescriptor::new("role", "role", ColumnKind::Exact(ExactType::Text));
pub const CREATED_AT: ColumnDescriptor = ColumnDescriptor::new(
    "createdAt",
    "created_at",
    ColumnKind::Exact(ExactType::Timestamp),
);
pub const UPDATED_AT: ColumnDescriptor = ColumnDescriptor::new(
    "updatedAt",
    "updated_at",
    ColumnKind::Exact(ExactType::Timestamp),
);

const COLUMNS: [ColumnDescriptor; 6] = [ID, EMAIL, NAME, ROLE, CREATED_AT, UPDATED_AT];

/// Newest accounts first
pub static USER_COLUMNS: ColumnMap = ColumnMap::new(&COLUMNS, &CREATED_AT, true, &ID);
