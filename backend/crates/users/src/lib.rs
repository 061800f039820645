//! Users (Admin) Backend Module
//!
//! Admin-only user management under `/admin/users`:
//! - paginated, filterable, sortable listing through `table_query`
//! - create, read, update, delete
//!
//! Accounts, passwords and the auth guards come from the `auth` crate; this
//! crate only adds the listing query and the admin use cases.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::columns::USER_COLUMNS;
pub use error::{UserAdminError, UserAdminResult};
pub use presentation::router::{users_router, users_router_generic};

#[cfg(test)]
mod tests;
