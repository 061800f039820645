//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::models::MessageResponse;
use kernel::extract::ApiJson;
use table_query::{ListQueryParams, PaginatedResult};

use crate::application::{
    CreateCourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase,
    ListCoursesUseCase, UpdateCourseInput, UpdateCourseUseCase,
};
use crate::domain::{CourseRepository, Visibility};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    CourseEnvelope, CourseResponse, CreateCourseRequest, UpdateCourseRequest,
};

#[derive(Clone)]
pub struct CatalogAppState<C>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<C>,
}

// ============================================================================
// Public
// ============================================================================

/// GET /courses
pub async fn list_published<C>(
    State(state): State<CatalogAppState<C>>,
    ListQueryParams(request): ListQueryParams,
) -> CatalogResult<Json<PaginatedResult<CourseResponse>>>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    let page = ListCoursesUseCase::new(state.repo.clone())
        .execute(&request, Visibility::Public)
        .await?;
    Ok(Json(page.map(CourseResponse::from)))
}

/// GET /courses/{id}
pub async fn get_published<C>(
    State(state): State<CatalogAppState<C>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<CourseEnvelope>>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    let course = GetCourseUseCase::new(state.repo.clone())
        .execute(&id, Visibility::Public)
        .await?;
    Ok(Json(course.into()))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/courses
pub async fn list_all<C>(
    State(state): State<CatalogAppState<C>>,
    ListQueryParams(request): ListQueryParams,
) -> CatalogResult<Json<PaginatedResult<CourseResponse>>>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    let page = ListCoursesUseCase::new(state.repo.clone())
        .execute(&request, Visibility::Admin)
        .await?;
    Ok(Json(page.map(CourseResponse::from)))
}

/// GET /admin/courses/{id}
pub async fn get_any<C>(
    State(state): State<CatalogAppState<C>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<CourseEnvelope>>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    let course = GetCourseUseCase::new(state.repo.clone())
        .execute(&id, Visibility::Admin)
        .await?;
    Ok(Json(course.into()))
}

/// POST /admin/courses
pub async fn create_course<C>(
    State(state): State<CatalogAppState<C>>,
    ApiJson(req): ApiJson<CreateCourseRequest>,
) -> CatalogResult<(StatusCode, Json<CourseEnvelope>)>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    let course = CreateCourseUseCase::new(state.repo.clone())
        .execute(CreateCourseInput {
            title: req.title,
            description: req.description,
            level: req.level,
            price_cents: req.price_cents,
            published: req.published,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// PATCH /admin/courses/{id}
pub async fn update_course<C>(
    State(state): State<CatalogAppState<C>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCourseRequest>,
) -> CatalogResult<Json<CourseEnvelope>>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    let course = UpdateCourseUseCase::new(state.repo.clone())
        .execute(
            &id,
            UpdateCourseInput {
                title: req.title,
                description: req.description,
                level: req.level,
                price_cents: req.price_cents,
                published: req.published,
            },
        )
        .await?;
    Ok(Json(course.into()))
}

/// DELETE /admin/courses/{id}
pub async fn delete_course<C>(
    State(state): State<CatalogAppState<C>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    DeleteCourseUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
