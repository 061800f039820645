//! Authenticated API client
//!
//! Attaches the stored access token to every request. A 401 on a protected
//! endpoint triggers one shared refresh through [`RefreshCoordinator`] and a
//! single retry with the new token. If the refresh fails the stored tokens
//! are cleared and the call fails with [`ClientError::SessionExpired`].

use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use table_query::{ListRequest, PaginatedResult};
use url::Url;

use crate::dto::{
    Course, CourseEnvelope, CreateCourseRequest, CreateUserRequest, LoginRequest, Message,
    Session, SignUpRequest, TokenPair, UpdateCourseRequest, UpdateUserRequest, User,
    UserEnvelope,
};
use crate::error::{ApiError, ClientError, ClientResult, RefreshFailure};
use crate::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::tokens::TokenStore;

/// Whether a 401 should trigger refresh-and-retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnUnauthorized {
    Fail,
    Refresh,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    tokens: TokenStore,
    refresh: RefreshCoordinator,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http,
            base,
            tokens: TokenStore::new(),
            refresh: RefreshCoordinator::new(),
        })
    }

    /// Share an existing token store, e.g. one restored from disk.
    pub fn with_tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<Session> {
        let session: Session = self
            .call(Method::POST, "auth/signup", &[], Some(request), OnUnauthorized::Fail)
            .await?;
        self.tokens
            .save(session.access_token.clone(), session.refresh_token.clone());
        Ok(session)
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<Session> {
        let session: Session = self
            .call(Method::POST, "auth/login", &[], Some(request), OnUnauthorized::Fail)
            .await?;
        self.tokens
            .save(session.access_token.clone(), session.refresh_token.clone());
        Ok(session)
    }

    /// Revoke both tokens server-side. Local tokens are cleared either way.
    pub async fn logout(&self) -> ClientResult<Message> {
        let body = json!({ "refreshToken": self.tokens.refresh_token() });
        let result = self
            .call(Method::POST, "auth/logout", &[], Some(&body), OnUnauthorized::Fail)
            .await;
        self.tokens.clear();
        result
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<Message> {
        self.call(
            Method::POST,
            "auth/forgot-password",
            &[],
            Some(&json!({ "email": email })),
            OnUnauthorized::Fail,
        )
        .await
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> ClientResult<Message> {
        self.call(
            Method::POST,
            "auth/reset-password",
            &[],
            Some(&json!({ "token": token, "password": password })),
            OnUnauthorized::Fail,
        )
        .await
    }

    // ========================================================================
    // Admin users
    // ========================================================================

    pub async fn list_users(&self, request: &ListRequest) -> ClientResult<PaginatedResult<User>> {
        self.call(
            Method::GET,
            "admin/users",
            &request.to_query_pairs(),
            None::<&()>,
            OnUnauthorized::Refresh,
        )
        .await
    }

    pub async fn get_user(&self, id: &str) -> ClientResult<User> {
        let envelope: UserEnvelope = self
            .call(
                Method::GET,
                &format!("admin/users/{id}"),
                &[],
                None::<&()>,
                OnUnauthorized::Refresh,
            )
            .await?;
        Ok(envelope.user)
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> ClientResult<User> {
        let envelope: UserEnvelope = self
            .call(Method::POST, "admin/users", &[], Some(request), OnUnauthorized::Refresh)
            .await?;
        Ok(envelope.user)
    }

    pub async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> ClientResult<User> {
        let envelope: UserEnvelope = self
            .call(
                Method::PATCH,
                &format!("admin/users/{id}"),
                &[],
                Some(request),
                OnUnauthorized::Refresh,
            )
            .await?;
        Ok(envelope.user)
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<Message> {
        self.call(
            Method::DELETE,
            &format!("admin/users/{id}"),
            &[],
            None::<&()>,
            OnUnauthorized::Refresh,
        )
        .await
    }

    // ========================================================================
    // Courses
    // ========================================================================

    /// Public catalog
    pub async fn list_courses(&self, request: &ListRequest) -> ClientResult<PaginatedResult<Course>> {
        self.call(
            Method::GET,
            "courses",
            &request.to_query_pairs(),
            None::<&()>,
            OnUnauthorized::Fail,
        )
        .await
    }

    pub async fn get_course(&self, id: &str) -> ClientResult<Course> {
        let envelope: CourseEnvelope = self
            .call(
                Method::GET,
                &format!("courses/{id}"),
                &[],
                None::<&()>,
                OnUnauthorized::Fail,
            )
            .await?;
        Ok(envelope.course)
    }

    /// Admin listing, drafts included
    pub async fn list_admin_courses(
        &self,
        request: &ListRequest,
    ) -> ClientResult<PaginatedResult<Course>> {
        self.call(
            Method::GET,
            "admin/courses",
            &request.to_query_pairs(),
            None::<&()>,
            OnUnauthorized::Refresh,
        )
        .await
    }

    pub async fn create_course(&self, request: &CreateCourseRequest) -> ClientResult<Course> {
        let envelope: CourseEnvelope = self
            .call(Method::POST, "admin/courses", &[], Some(request), OnUnauthorized::Refresh)
            .await?;
        Ok(envelope.course)
    }

    pub async fn update_course(
        &self,
        id: &str,
        request: &UpdateCourseRequest,
    ) -> ClientResult<Course> {
        let envelope: CourseEnvelope = self
            .call(
                Method::PATCH,
                &format!("admin/courses/{id}"),
                &[],
                Some(request),
                OnUnauthorized::Refresh,
            )
            .await?;
        Ok(envelope.course)
    }

    pub async fn delete_course(&self, id: &str) -> ClientResult<Message> {
        self.call(
            Method::DELETE,
            &format!("admin/courses/{id}"),
            &[],
            None::<&()>,
            OnUnauthorized::Refresh,
        )
        .await
    }

    // ========================================================================
    // Transport
    // ========================================================================

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
        on_unauthorized: OnUnauthorized,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let token = self.tokens.access_token();
        let response = self
            .send(method.clone(), &url, query, body, token.as_deref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED
            || on_unauthorized == OnUnauthorized::Fail
        {
            return decode(response).await;
        }

        tracing::debug!(%url, "Access token rejected, refreshing");
        let fresh = self.refresh_access_token().await?;
        let retried = self.send(method, &url, query, body, Some(&fresh)).await?;
        decode(retried).await
    }

    async fn send<B>(
        &self,
        method: Method,
        url: &Url,
        query: &[(String, String)],
        body: Option<&B>,
        token: Option<&str>,
    ) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn refresh_access_token(&self) -> ClientResult<String> {
        match self.refresh.refresh(|| self.exchange_refresh_token()).await {
            Ok(token) => Ok(token),
            Err(failure) => {
                tracing::info!(error = %failure, "Session expired, clearing tokens");
                self.tokens.clear();
                Err(ClientError::SessionExpired)
            }
        }
    }

    /// `POST /auth/refresh`; stores the rotated pair on success.
    async fn exchange_refresh_token(&self) -> RefreshOutcome {
        let refresh_token = self
            .tokens
            .refresh_token()
            .ok_or(RefreshFailure::MissingRefreshToken)?;
        let url = self
            .endpoint("auth/refresh")
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_body(status.as_u16(), &body);
            return Err(RefreshFailure::Rejected {
                status: error.status,
                code: error.code,
            });
        }

        let pair: TokenPair = response
            .json()
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;
        self.tokens
            .save(pair.access_token.clone(), pair.refresh_token);
        Ok(pair.access_token)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let error = ApiError::from_body(status.as_u16(), &body);
    tracing::debug!(status = error.status, code = ?error.code, "API error");
    Err(ClientError::Api(error))
}
