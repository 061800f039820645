//! Axum extractor for list endpoints

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use kernel::error::app_error::AppError;

use crate::params::{ListRequest, parse_query_params};

/// Parsed `page` / `limit` / `sort` / filter parameters.
///
/// Rejects with 400 `INVALID_INPUT` when page or limit are invalid.
#[derive(Debug, Clone)]
pub struct ListQueryParams(pub ListRequest);

impl<S> FromRequestParts<S> for ListQueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::bad_request(e.body_text()).with_code("INVALID_INPUT"))?;

        Ok(Self(parse_query_params(pairs)?))
    }
}
