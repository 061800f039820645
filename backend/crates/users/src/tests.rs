//! Admin user management tests against the in-memory repository

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::application::{SignInInput, SignInUseCase};
    use auth::models::{DisplayName, Email, RawPassword, User, UserPassword, UserRole};
    use auth::store::UserRepository;
    use auth::{AuthConfig, InMemoryAuthRepository};
    use chrono::{Duration, TimeZone, Utc};

    pub const PASSWORD: &str = "correct horse battery";

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new(vec![7u8; 32], "http://client.test"))
    }

    /// Hashing is slow; seed helpers share one hash.
    pub fn hashed() -> UserPassword {
        let raw = RawPassword::new(PASSWORD.to_string()).unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    }

    /// Insert a user created `minutes` after a fixed epoch.
    pub async fn seed(
        repo: &InMemoryAuthRepository,
        password: &UserPassword,
        email: &str,
        role: UserRole,
        minutes: i64,
    ) -> User {
        let mut user = User::new(
            Email::new(email).unwrap(),
            DisplayName::new(email.split('@').next().unwrap()).unwrap(),
            password.clone(),
            role,
        );
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        user.created_at = at;
        user.updated_at = at;
        repo.create(&user).await.unwrap();
        user
    }

    pub async fn access_token(repo: &Arc<InMemoryAuthRepository>, email: &str) -> String {
        SignInUseCase::new(repo.clone(), repo.clone(), config())
            .execute(SignInInput {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
            .tokens
            .access_token
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use auth::InMemoryAuthRepository;
    use auth::models::{Email, UserRole};
    use auth::AuthError;
    use auth::store::UserRepository;
    use table_query::parse_query_params;

    use super::support::*;
    use crate::application::*;
    use crate::error::UserAdminError;

    #[tokio::test]
    async fn test_list_filters_sorts_and_pages() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let password = hashed();
        for i in 0..25 {
            seed(&repo, &password, &format!("admin{i:02}@example.com"), UserRole::Admin, i).await;
        }
        for i in 0..5 {
            seed(&repo, &password, &format!("student{i}@example.com"), UserRole::Student, 100 + i)
                .await;
        }

        let request = parse_query_params([
            ("page", "2"),
            ("limit", "10"),
            ("sort", "-createdAt"),
            ("role", "admin"),
        ])
        .unwrap();
        let page = ListUsersUseCase::new(repo.clone()).execute(&request).await.unwrap();

        let emails: Vec<_> = page.data.iter().map(|u| u.email.clone()).collect();
        let expected: Vec<_> = (5..15).rev().map(|i| format!("admin{i:02}@example.com")).collect();
        assert_eq!(emails, expected);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[tokio::test]
    async fn test_list_text_filter_is_case_insensitive() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let password = hashed();
        seed(&repo, &password, "ann.lee@example.com", UserRole::Student, 0).await;
        seed(&repo, &password, "bob@example.com", UserRole::Student, 1).await;

        let request = parse_query_params([("email", "ANN")]).unwrap();
        let page = ListUsersUseCase::new(repo.clone()).execute(&request).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].email, "ann.lee@example.com");
    }

    #[tokio::test]
    async fn test_create_requires_valid_role() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let err = CreateUserUseCase::new(repo.clone(), config())
            .execute(CreateUserInput {
                email: "new@example.com".to_string(),
                password: PASSWORD.to_string(),
                name: "New".to_string(),
                role: "instructor".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            UserAdminError::Auth(AuthError::InvalidInput(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "role");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        seed(&repo, &hashed(), "taken@example.com", UserRole::Student, 0).await;

        let err = CreateUserUseCase::new(repo.clone(), config())
            .execute(CreateUserInput {
                email: "Taken@Example.com".to_string(),
                password: PASSWORD.to_string(),
                name: "Dup".to_string(),
                role: "admin".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserAdminError::Auth(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let user = seed(&repo, &hashed(), "ann@example.com", UserRole::Student, 0).await;

        let updated = UpdateUserUseCase::new(repo.clone(), repo.clone(), config())
            .execute(
                &user.id.to_string(),
                UpdateUserInput {
                    role: Some("admin".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, UserRole::Admin);
        assert_eq!(updated.email, "ann@example.com");
        assert_eq!(updated.name, "ann");
        assert!(updated.updated_at > user.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let password = hashed();
        let ann = seed(&repo, &password, "ann@example.com", UserRole::Student, 0).await;
        seed(&repo, &password, "bob@example.com", UserRole::Student, 1).await;

        let err = UpdateUserUseCase::new(repo.clone(), repo.clone(), config())
            .execute(
                &ann.id.to_string(),
                UpdateUserInput {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserAdminError::Auth(AuthError::EmailAlreadyExists)));

        // Same address as before is not a conflict
        UpdateUserUseCase::new(repo.clone(), repo.clone(), config())
            .execute(
                &ann.id.to_string(),
                UpdateUserInput {
                    email: Some("ANN@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_password_change_revokes_sessions() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let user = seed(&repo, &hashed(), "ann@example.com", UserRole::Student, 0).await;
        access_token(&repo, "ann@example.com").await;
        assert!(repo.tokens().await.iter().all(|t| !t.revoked));

        UpdateUserUseCase::new(repo.clone(), repo.clone(), config())
            .execute(
                &user.id.to_string(),
                UpdateUserInput {
                    password: Some("a brand new passphrase".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let tokens = repo.tokens().await;
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.revoked));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let password = hashed();
        let admin = seed(&repo, &password, "root@example.com", UserRole::Admin, 0).await;
        let ann = seed(&repo, &password, "ann@example.com", UserRole::Student, 1).await;
        let delete = DeleteUserUseCase::new(repo.clone());

        let err = delete.execute(admin.id, &admin.id.to_string()).await.unwrap_err();
        assert!(matches!(err, UserAdminError::CannotDeleteOwnAccount));

        delete.execute(admin.id, &ann.id.to_string()).await.unwrap();
        let gone = repo
            .find_by_email(&Email::new("ann@example.com").unwrap())
            .await
            .unwrap();
        assert!(gone.is_none());

        let err = delete.execute(admin.id, &ann.id.to_string()).await.unwrap_err();
        assert!(matches!(err, UserAdminError::NotFound));

        let err = delete.execute(admin.id, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, UserAdminError::NotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::InMemoryAuthRepository;
    use auth::models::UserRole;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::presentation::router::users_router_generic;

    fn app(repo: &Arc<InMemoryAuthRepository>) -> Router {
        Router::new().nest("/admin/users", users_router_generic(repo.clone(), config()))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn admin_session(repo: &Arc<InMemoryAuthRepository>) -> (String, String) {
        let admin = seed(repo, &hashed(), "root@example.com", UserRole::Admin, 0).await;
        let token = access_token(repo, "root@example.com").await;
        (admin.id.to_string(), token)
    }

    #[tokio::test]
    async fn test_requires_admin() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo);

        let (status, _) = send(
            &app,
            Request::builder().uri("/admin/users").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        seed(&repo, &hashed(), "ann@example.com", UserRole::Student, 0).await;
        let token = access_token(&repo, "ann@example.com").await;
        let (status, body) = send(&app, request("GET", "/admin/users", &token, None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_exact_filters_accept_values_from_the_listing() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (_, token) = admin_session(&repo).await;
        let ann = seed(&repo, &hashed(), "ann@example.com", UserRole::Student, 1).await;
        let app = app(&repo);

        let (_, listed) = send(&app, request("GET", "/admin/users?email=ann", &token, None)).await;
        let created_at = listed["data"][0]["createdAt"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            request("GET", &format!("/admin/users?createdAt={created_at}"), &token, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["email"], "ann@example.com");

        let upper = ann.id.to_string().to_uppercase();
        let (_, body) = send(&app, request("GET", &format!("/admin/users?id={upper}"), &token, None)).await;
        assert_eq!(body["pagination"]["total"], 1);

        let (status, body) =
            send(&app, request("GET", "/admin/users?createdAt=yesterday", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn test_list_envelope() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (_, token) = admin_session(&repo).await;
        seed(&repo, &hashed(), "ann@example.com", UserRole::Student, 1).await;

        let (status, body) = send(
            &app(&repo),
            request("GET", "/admin/users?sort=email&limit=10", &token, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"][0]["email"], "ann@example.com");
        assert_eq!(body["data"][1]["role"], "admin");
        assert!(body["data"][0]["createdAt"].is_string());
        assert!(body["data"][0].get("password").is_none());
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["hasNext"], false);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_page() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (_, token) = admin_session(&repo).await;

        let (status, body) =
            send(&app(&repo), request("GET", "/admin/users?page=0", &token, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_crud_round() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (_, token) = admin_session(&repo).await;
        let app = app(&repo);

        let (status, body) = send(
            &app,
            request(
                "POST",
                "/admin/users",
                &token,
                Some(json!({
                    "email": "Instructor@Example.com",
                    "password": PASSWORD,
                    "name": "Tess",
                    "role": "admin"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["user"]["email"], "instructor@example.com");
        let id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, request("GET", &format!("/admin/users/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Tess");

        let (status, body) = send(
            &app,
            request(
                "PATCH",
                &format!("/admin/users/{id}"),
                &token,
                Some(json!({"name": "Tessa", "role": "student"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Tessa");
        assert_eq!(body["user"]["role"], "student");
        assert_eq!(body["user"]["email"], "instructor@example.com");

        let (status, body) =
            send(&app, request("DELETE", &format!("/admin/users/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User deleted successfully");

        let (status, body) =
            send(&app, request("GET", &format!("/admin/users/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_validation_and_conflict() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (_, token) = admin_session(&repo).await;
        let app = app(&repo);

        let (status, body) = send(
            &app,
            request(
                "POST",
                "/admin/users",
                &token,
                Some(json!({"email": "nope", "password": "short", "name": "", "role": ""})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        for field in ["email", "password", "name", "role"] {
            assert!(body["details"][field].is_array(), "missing {field}: {body}");
        }

        let (status, body) = send(
            &app,
            request(
                "POST",
                "/admin/users",
                &token,
                Some(json!({
                    "email": "root@example.com",
                    "password": PASSWORD,
                    "name": "Again",
                    "role": "student"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMAIL_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (id, token) = admin_session(&repo).await;

        let (status, body) = send(
            &app(&repo),
            request("DELETE", &format!("/admin/users/{id}"), &token, None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "CANNOT_DELETE_OWN_ACCOUNT");
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let (_, token) = admin_session(&repo).await;
        let app = app(&repo);

        for method in ["GET", "DELETE"] {
            let (status, body) =
                send(&app, request(method, "/admin/users/123", &token, None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(body["code"], "USER_NOT_FOUND");
        }
    }
}
