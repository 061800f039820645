//! Server-driven data-table queries
//!
//! One list request flows through these stages:
//!
//! 1. [`params`] turns raw `?page=&limit=&sort=&<column>=` pairs into a
//!    [`ListRequest`]
//! 2. [`predicate`] maps each filter to a condition using the column's
//!    [`ColumnKind`], and [`order`] resolves sorting with a default and a
//!    primary-key tie-breaker
//! 3. [`sql`] renders both into a count query and a page query
//! 4. [`pagination`] wraps the rows into a [`PaginatedResult`]
//!
//! [`memory`] evaluates the same plan over in-process records, which is what
//! the repository fakes in the service crates use.

pub mod columns;
pub mod error;
pub mod memory;
pub mod order;
pub mod pagination;
pub mod params;
pub mod predicate;

#[cfg(feature = "axum")]
pub mod extract;
#[cfg(feature = "sqlx")]
pub mod sql;

pub use columns::{ColumnDescriptor, ColumnKind, ColumnMap, ExactType};
pub use error::QueryParamError;
pub use order::{OrderTerm, order_plan};
pub use pagination::{PageMeta, PaginatedResult, offset, paginate};
pub use params::{ListRequest, PageRequest, SortItem, parse_query_params};
pub use predicate::{Condition, Predicate, build_predicate};

#[cfg(feature = "axum")]
pub use extract::ListQueryParams;
#[cfg(feature = "sqlx")]
pub use sql::ListPlan;
