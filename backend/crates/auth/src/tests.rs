//! Use case and HTTP tests against the in-memory repository

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use kernel::id::{IssuedTokenId, UserId};
    use platform::mail::{MailError, Mailer, OutgoingMail};

    use crate::application::config::AuthConfig;
    use crate::domain::entity::issued_token::IssuedToken;
    use crate::domain::repository::TokenRepository;
    use crate::error::AuthResult;
    use crate::infra::memory::InMemoryAuthRepository;

    pub const PASSWORD: &str = "correct horse battery";

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new(vec![42u8; 32], "http://client.test"))
    }

    /// Keeps every message instead of sending it
    #[derive(Clone, Default)]
    pub struct RecordingMailer {
        pub sent: Arc<Mutex<Vec<OutgoingMail>>>,
    }

    impl RecordingMailer {
        pub fn sent(&self) -> Vec<OutgoingMail> {
            self.sent.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(mail);
            }
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    pub struct FailingMailer;

    impl Mailer for FailingMailer {
        async fn send(&self, _mail: OutgoingMail) -> Result<(), MailError> {
            Err(MailError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    /// Reads every token record as unrevoked, the way a request sees it when
    /// another request revokes the token right after the lookup
    pub struct StaleReads(pub Arc<InMemoryAuthRepository>);

    impl TokenRepository for StaleReads {
        async fn create(&self, token: &IssuedToken) -> AuthResult<()> {
            TokenRepository::create(self.0.as_ref(), token).await
        }

        async fn find_by_hash(&self, token_hash: &[u8]) -> AuthResult<Option<IssuedToken>> {
            Ok(self.0.find_by_hash(token_hash).await?.map(|mut token| {
                token.revoked = false;
                token.revoked_at = None;
                token
            }))
        }

        async fn revoke(&self, id: &IssuedTokenId) -> AuthResult<bool> {
            self.0.revoke(id).await
        }

        async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
            self.0.revoke_all_for_user(user_id).await
        }

        async fn cleanup_expired(&self) -> AuthResult<u64> {
            self.0.cleanup_expired().await
        }
    }

    /// The `token` query value of the reset link in a mail body
    pub fn reset_token_from(mail: &OutgoingMail) -> String {
        let start = mail.html.find("token=").expect("link in mail") + "token=".len();
        mail.html[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::tokens::issue_pair;
    use crate::application::*;
    use crate::domain::entity::user::User;
    use crate::domain::repository::{TokenRepository, UserRepository};
    use crate::domain::value_object::{
        display_name::DisplayName,
        email::Email,
        user_password::{RawPassword, UserPassword},
        user_role::UserRole,
    };
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;

    async fn sign_up(repo: &Arc<InMemoryAuthRepository>, email: &str) -> SessionOutput {
        SignUpUseCase::new(repo.clone(), repo.clone(), config())
            .execute(SignUpInput {
                email: email.to_string(),
                password: PASSWORD.to_string(),
                name: "Ann Lee".to_string(),
            })
            .await
            .unwrap()
    }

    async fn login(
        repo: &Arc<InMemoryAuthRepository>,
        email: &str,
        password: &str,
    ) -> Result<SessionOutput, AuthError> {
        SignInUseCase::new(repo.clone(), repo.clone(), config())
            .execute(SignInInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    fn refresh(repo: &Arc<InMemoryAuthRepository>) -> RefreshUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        RefreshUseCase::new(repo.clone(), repo.clone(), config())
    }

    fn authenticate(repo: &Arc<InMemoryAuthRepository>) -> AuthenticateUseCase<InMemoryAuthRepository> {
        AuthenticateUseCase::new(repo.clone(), config())
    }

    #[tokio::test]
    async fn test_sign_up_creates_student_and_tokens() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "Ann@Example.com").await;

        assert_eq!(out.user.email.as_str(), "ann@example.com");
        assert_eq!(out.user.role, UserRole::Student);
        assert_eq!(repo.tokens().await.len(), 2);

        let ctx = authenticate(&repo).execute(&out.tokens.access_token).await.unwrap();
        assert_eq!(ctx.user_id, out.user.id);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up(&repo, "ann@example.com").await;

        let err = SignUpUseCase::new(repo.clone(), repo.clone(), config())
            .execute(SignUpInput {
                email: "ANN@example.com".to_string(),
                password: PASSWORD.to_string(),
                name: "Other".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn test_sign_up_reports_every_invalid_field() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let err = SignUpUseCase::new(repo.clone(), repo.clone(), config())
            .execute(SignUpInput {
                email: "nope".to_string(),
                password: "short".to_string(),
                name: " ".to_string(),
            })
            .await
            .unwrap_err();

        let AuthError::InvalidInput(fields) = err else {
            panic!("expected InvalidInput");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field).collect();
        assert_eq!(names, vec!["email", "password", "name"]);
        assert!(repo.users().await.is_empty());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_alike() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up(&repo, "ann@example.com").await;

        assert!(login(&repo, "ann@example.com", PASSWORD).await.is_ok());
        for (email, password) in [
            ("ann@example.com", "wrong password!"),
            ("bob@example.com", PASSWORD),
            ("not-an-email", PASSWORD),
        ] {
            assert!(matches!(
                login(&repo, email, password).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_refresh_rotates_tokens() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;

        let pair = refresh(&repo)
            .execute(Some(&out.tokens.refresh_token))
            .await
            .unwrap();
        assert_ne!(pair.refresh_token, out.tokens.refresh_token);

        // The presented token is single-use
        assert!(matches!(
            refresh(&repo).execute(Some(&out.tokens.refresh_token)).await,
            Err(AuthError::InvalidRefreshToken)
        ));
        assert!(refresh(&repo).execute(Some(&pair.refresh_token)).await.is_ok());
    }

    #[tokio::test]
    async fn test_parallel_refreshes_with_one_token() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;
        let (first, second) = (refresh(&repo), refresh(&repo));

        let (a, b) = tokio::join!(
            first.execute(Some(&out.tokens.refresh_token)),
            second.execute(Some(&out.tokens.refresh_token)),
        );

        let refused = [&a, &b]
            .into_iter()
            .filter(|r| matches!(r, Err(AuthError::InvalidRefreshToken)))
            .count();
        assert!(a.is_ok() != b.is_ok());
        assert_eq!(refused, 1);
    }

    #[tokio::test]
    async fn test_refresh_refused_when_token_revoked_after_lookup() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;
        refresh(&repo)
            .execute(Some(&out.tokens.refresh_token))
            .await
            .unwrap();
        let issued = repo.tokens().await.len();

        let late = RefreshUseCase::new(repo.clone(), Arc::new(StaleReads(repo.clone())), config());
        assert!(matches!(
            late.execute(Some(&out.tokens.refresh_token)).await,
            Err(AuthError::InvalidRefreshToken)
        ));
        // No second pair was issued
        assert_eq!(repo.tokens().await.len(), issued);
    }

    #[tokio::test]
    async fn test_revoke_reports_whether_it_changed_the_token() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up(&repo, "ann@example.com").await;
        let id = repo.tokens().await[0].id;

        assert!(repo.revoke(&id).await.unwrap());
        assert!(!repo.revoke(&id).await.unwrap());
        assert!(!repo.revoke(&kernel::id::IssuedTokenId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_rejections() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;

        assert!(matches!(
            refresh(&repo).execute(None).await,
            Err(AuthError::RefreshTokenRequired)
        ));
        assert!(matches!(
            refresh(&repo).execute(Some("  ")).await,
            Err(AuthError::RefreshTokenRequired)
        ));
        // An access token is not a refresh token
        assert!(matches!(
            refresh(&repo).execute(Some(&out.tokens.access_token)).await,
            Err(AuthError::InvalidRefreshToken)
        ));
        assert!(matches!(
            refresh(&repo).execute(Some("garbage")).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_for_missing_user() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let raw = RawPassword::new(PASSWORD.to_string()).unwrap();
        let ghost = User::new(
            Email::new("ghost@example.com").unwrap(),
            DisplayName::new("Ghost").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            UserRole::Student,
        );
        let pair = issue_pair(repo.as_ref(), &config(), &ghost).await.unwrap();

        assert!(matches!(
            refresh(&repo).execute(Some(&pair.refresh_token)).await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_key_is_refused() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;

        let other = Arc::new(AuthConfig::new(vec![1u8; 32], "http://client.test"));
        let err = AuthenticateUseCase::new(repo.clone(), other)
            .execute(&out.tokens.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_both_tokens() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;

        SignOutUseCase::new(repo.clone())
            .execute(&out.tokens.access_token, Some(&out.tokens.refresh_token))
            .await
            .unwrap();

        assert!(authenticate(&repo).execute(&out.tokens.access_token).await.is_err());
        assert!(refresh(&repo).execute(Some(&out.tokens.refresh_token)).await.is_err());
        assert!(repo.tokens().await.iter().all(|t| t.revoked));
    }

    #[tokio::test]
    async fn test_sign_out_ignores_unknown_tokens() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        SignOutUseCase::new(repo.clone())
            .execute("unknown", Some("also-unknown"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email_sends_nothing() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let mailer = Arc::new(RecordingMailer::default());

        let use_case = ForgotPasswordUseCase::new(repo.clone(), repo.clone(), mailer.clone(), config());
        use_case.execute("nobody@example.com").await.unwrap();
        use_case.execute("not an email").await.unwrap();

        assert!(mailer.sent().is_empty());
        assert!(repo.tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let mailer = Arc::new(RecordingMailer::default());
        let out = sign_up(&repo, "ann@example.com").await;

        ForgotPasswordUseCase::new(repo.clone(), repo.clone(), mailer.clone(), config())
            .execute("ann@example.com")
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ann@example.com");
        assert!(sent[0].html.contains("http://client.test/reset-password?token="));
        let token = reset_token_from(&sent[0]);

        let reset = ResetPasswordUseCase::new(repo.clone(), repo.clone(), config());

        // A weak password leaves the token usable
        let err = reset
            .execute(ResetPasswordInput {
                token: token.clone(),
                password: "12345678".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        reset
            .execute(ResetPasswordInput {
                token: token.clone(),
                password: "a brand new passphrase".to_string(),
            })
            .await
            .unwrap();

        assert!(login(&repo, "ann@example.com", PASSWORD).await.is_err());
        assert!(login(&repo, "ann@example.com", "a brand new passphrase").await.is_ok());

        // Everything issued before the reset is dead, including the reset token
        assert!(authenticate(&repo).execute(&out.tokens.access_token).await.is_err());
        assert!(matches!(
            reset
                .execute(ResetPasswordInput {
                    token,
                    password: "yet another passphrase".to_string(),
                })
                .await,
            Err(AuthError::InvalidResetToken)
        ));
    }

    #[tokio::test]
    async fn test_reset_with_unknown_token() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let reset = ResetPasswordUseCase::new(repo.clone(), repo.clone(), config());
        for token in ["", "made-up"] {
            assert!(matches!(
                reset
                    .execute(ResetPasswordInput {
                        token: token.to_string(),
                        password: "a brand new passphrase".to_string(),
                    })
                    .await,
                Err(AuthError::InvalidResetToken)
            ));
        }
    }

    #[tokio::test]
    async fn test_forgot_password_survives_mail_failure() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        sign_up(&repo, "ann@example.com").await;

        ForgotPasswordUseCase::new(repo.clone(), repo.clone(), Arc::new(FailingMailer), config())
            .execute("ann@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_expired_tokens() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let out = sign_up(&repo, "ann@example.com").await;
        let mut expired = repo.tokens().await[0].clone();
        expired.id = kernel::id::IssuedTokenId::new();
        expired.token_hash = vec![0u8; 32];
        expired.expires_at = chrono::Utc::now() - chrono::Duration::seconds(1);
        TokenRepository::create(repo.as_ref(), &expired).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.tokens().await.len(), 2);
        assert!(repo.find_by_id(&out.user.id).await.unwrap().is_some());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::tokens::issue_pair;
    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{
        display_name::DisplayName,
        email::Email,
        user_password::{RawPassword, UserPassword},
        user_role::UserRole,
    };
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::middleware::{CurrentUser, admin_only};
    use crate::presentation::router::auth_router_generic;

    fn app(repo: &Arc<InMemoryAuthRepository>, mailer: &Arc<RecordingMailer>) -> Router {
        let admin = admin_only(
            Router::new().route(
                "/secret",
                get(|axum::Extension(CurrentUser(user)): axum::Extension<CurrentUser>| async move {
                    user.email.as_str().to_string()
                }),
            ),
            repo.clone(),
            config(),
        );

        Router::new()
            .nest("/auth", auth_router_generic(repo.clone(), mailer.clone(), config()))
            .nest("/admin", admin)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::String(
            String::from_utf8_lossy(&body).into_owned(),
        ));
        (status, json)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn signup(app: &Router, email: &str) -> Value {
        let (status, body) = send(
            app,
            post(
                "/auth/signup",
                json!({"email": email, "password": PASSWORD, "name": "Ann Lee"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));

        let body = signup(&app, "ann@example.com").await;
        assert_eq!(body["user"]["email"], "ann@example.com");
        assert_eq!(body["user"]["role"], "student");
        assert!(body["accessToken"].is_string());
        assert!(body["refreshToken"].is_string());

        let (status, body) = send(
            &app,
            post("/auth/login", json!({"email": "ann@example.com", "password": PASSWORD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Ann Lee");
    }

    #[tokio::test]
    async fn test_error_codes_on_the_wire() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));
        signup(&app, "ann@example.com").await;

        let (status, body) = send(
            &app,
            post(
                "/auth/signup",
                json!({"email": "ann@example.com", "password": PASSWORD, "name": "Ann"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMAIL_ALREADY_EXISTS");

        let (status, body) = send(&app, post("/auth/signup", json!({"email": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert!(body["details"]["password"].is_array());

        let (_, body) = send(
            &app,
            post("/auth/login", json!({"email": "ann@example.com", "password": "nope nope"})),
        )
        .await;
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        let (status, body) = send(&app, post("/auth/refresh", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "REFRESH_TOKEN_REQUIRED");

        let (_, body) = send(&app, post("/auth/refresh", json!({"refreshToken": "x.y.z"}))).await;
        assert_eq!(body["code"], "INVALID_REFRESH_TOKEN");

        let (_, body) = send(
            &app,
            post("/auth/reset-password", json!({"token": "nope", "password": "long enough pass"})),
        )
        .await;
        assert_eq!(body["code"], "INVALID_RESET_TOKEN");
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_input() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));

        let req = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_forgot_password_same_reply_either_way() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let mailer = Arc::new(RecordingMailer::default());
        let app = app(&repo, &mailer);
        signup(&app, "ann@example.com").await;

        let (s1, b1) = send(&app, post("/auth/forgot-password", json!({"email": "ann@example.com"}))).await;
        let (s2, b2) = send(&app, post("/auth/forgot-password", json!({"email": "bob@example.com"}))).await;

        assert_eq!((s1, s2), (StatusCode::OK, StatusCode::OK));
        assert_eq!(b1, b2);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_logout() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));
        let session = signup(&app, "ann@example.com").await;
        let access = session["accessToken"].as_str().unwrap();
        let refresh = session["refreshToken"].as_str().unwrap();

        let (status, _) = send(&app, post("/auth/logout", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header(header::AUTHORIZATION, format!("Bearer {access}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"refreshToken": refresh}).to_string()))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logged out successfully");

        let (_, body) = send(&app, post("/auth/refresh", json!({"refreshToken": refresh}))).await;
        assert_eq!(body["code"], "INVALID_REFRESH_TOKEN");
    }

    #[tokio::test]
    async fn test_logout_without_body() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));
        let session = signup(&app, "ann@example.com").await;
        let access = session["accessToken"].as_str().unwrap();

        let req = Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header(header::AUTHORIZATION, format!("Bearer {access}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_role_guard() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));

        let (status, body) = send(
            &app,
            Request::builder().uri("/admin/secret").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let session = signup(&app, "ann@example.com").await;
        let access = session["accessToken"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_with("/admin/secret", &access)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        // The role is read at request time, not from the token
        let mut user = repo
            .find_by_email(&Email::new("ann@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        user.set_role(UserRole::Admin);
        repo.update(&user).await.unwrap();

        let (status, body) = send(&app, get_with("/admin/secret", &access)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ann@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_role_guard_user_gone() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let app = app(&repo, &Arc::new(RecordingMailer::default()));

        let raw = RawPassword::new(PASSWORD.to_string()).unwrap();
        let ghost = User::new(
            Email::new("ghost@example.com").unwrap(),
            DisplayName::new("Ghost").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            UserRole::Admin,
        );
        let pair = issue_pair(repo.as_ref(), &config(), &ghost).await.unwrap();

        let (status, body) = send(&app, get_with("/admin/secret", &pair.access_token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "USER_NOT_FOUND");
    }
}
