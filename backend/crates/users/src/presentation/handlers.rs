//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use auth::models::MessageResponse;
use auth::store::{TokenRepository, UserRepository};
use auth::{AuthConfig, AuthContext};
use kernel::extract::ApiJson;
use table_query::{ListQueryParams, PaginatedResult};

use crate::application::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::UserListRepository;
use crate::error::UserAdminResult;
use crate::presentation::dto::{CreateUserRequest, UpdateUserRequest, UserEnvelope, UserResponse};

#[derive(Clone)]
pub struct UsersAppState<R>
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// GET /admin/users
pub async fn list_users<R>(
    State(state): State<UsersAppState<R>>,
    ListQueryParams(request): ListQueryParams,
) -> UserAdminResult<Json<PaginatedResult<UserResponse>>>
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    let page = ListUsersUseCase::new(state.repo.clone())
        .execute(&request)
        .await?;

    Ok(Json(page.map(UserResponse::from)))
}

/// GET /admin/users/{id}
pub async fn get_user<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<String>,
) -> UserAdminResult<Json<UserEnvelope>>
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    let user = GetUserUseCase::new(state.repo.clone()).execute(&id).await?;
    Ok(Json(user.into()))
}

/// POST /admin/users
pub async fn create_user<R>(
    State(state): State<UsersAppState<R>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> UserAdminResult<(StatusCode, Json<UserEnvelope>)>
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    let user = CreateUserUseCase::new(state.repo.clone(), state.config.clone())
        .execute(CreateUserInput {
            email: req.email,
            password: req.password,
            name: req.name,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PATCH /admin/users/{id}
pub async fn update_user<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> UserAdminResult<Json<UserEnvelope>>
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    let user = UpdateUserUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .execute(
            &id,
            UpdateUserInput {
                email: req.email,
                name: req.name,
                role: req.role,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /admin/users/{id}
pub async fn delete_user<R>(
    State(state): State<UsersAppState<R>>,
    Extension(caller): Extension<AuthContext>,
    Path(id): Path<String>,
) -> UserAdminResult<Json<MessageResponse>>
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    DeleteUserUseCase::new(state.repo.clone())
        .execute(caller.user_id, &id)
        .await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
