//! Admin Client
//!
//! Client half of the list protocol plus an authenticated API client:
//! - [`url_state`]: fail-closed URL parsers for filter, sort and plain values
//! - [`table_state`]: data-table query state, URL sync and outbound requests
//! - [`tokens`]: token storage and unverified claim decoding
//! - [`refresh`]: single-flight token refresh shared by concurrent requests
//! - [`api`]: `reqwest` client for the auth, users and courses endpoints

pub mod api;
pub mod dto;
pub mod error;
pub mod refresh;
pub mod table_state;
pub mod tokens;
pub mod url_state;


pub use api::ApiClient;
pub use error::{ApiError, ClientError, ClientResult, RefreshFailure};
pub use refresh::RefreshCoordinator;
pub use table_state::{FilterDescriptor, FilterKind, FilterValue, PageResetPolicy, TableState};
pub use tokens::{TokenClaims, TokenStore, decode_claims};
pub use url_state::{FilterItem, FiltersParser, SortingParser, StringParser, UrlStateParser};

pub use table_query::{ListRequest, PageMeta, PaginatedResult, SortItem};
