//! Catalog API client.

use crate::models::api::{
    ApiResponse, ErrorBody, LoginRequest, RegisterRequest, UpdateUserRequest,
};
use crate::models::config::ApiConfig;
use crate::models::filter::FilterQuery;
use crate::models::movie::{Movie, MovieId};
use crate::models::user::{User, UserId};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fallback message when the server reports failure without one.
pub const SERVER_ERROR: &str = "Server Error!!";

/// Source of filtered movie collections.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch the movies matching `query`.
    async fn filter_movies(&self, query: &FilterQuery) -> Result<Vec<Movie>>;
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub message: Option<String>,
    pub token: String,
}

/// Outcome of an email verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Verified(String),
    Expired,
    Rejected(String),
}

/// Server message for an expired verification link.
const VERIFICATION_EXPIRED: &str = "Verification Token Expired Try Login Again!!";

/// Catalog API client.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a new client.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// Non-2xx statuses become [`Error::Status`]; a 2xx with
    /// `success: false` becomes [`Error::Application`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let resp = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::debug!("Request failed with {}: {:?}", status, message);
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = resp.json().await?;
        if !envelope.success {
            return Err(Error::Application(
                envelope.message.unwrap_or_else(|| SERVER_ERROR.to_string()),
            ));
        }
        Ok(envelope)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        self.send(self.build_request(reqwest::Method::GET, path)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        self.send(self.build_request(reqwest::Method::POST, path).json(body))
            .await
    }

    /// Check whether the server answers at all.
    pub async fn health_check(&self) -> Result<bool> {
        match self.client.get(&self.base_url).send().await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    /// Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<String>> {
        let resp: ApiResponse<serde_json::Value> =
            self.post("/api/auth/register", request).await?;
        Ok(resp.message)
    }

    /// Log in and obtain a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let resp: ApiResponse<serde_json::Value> = self.post("/api/auth/login", request).await?;
        let token = resp
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::InvalidToken("login response carried no token".into()))?;
        Ok(LoginResponse {
            message: resp.message,
            token,
        })
    }

    /// Confirm an email address.
    pub async fn verify(&self, token: &str) -> Result<Verification> {
        let path = format!("/api/auth/verify?token={}", urlencoding::encode(token));
        match self.get::<serde_json::Value>(&path).await {
            Ok(resp) => Ok(Verification::Verified(resp.message.unwrap_or_default())),
            Err(Error::Application(msg)) if msg == VERIFICATION_EXPIRED => {
                Ok(Verification::Expired)
            }
            Err(Error::Status {
                message: Some(msg), ..
            }) if msg == VERIFICATION_EXPIRED => Ok(Verification::Expired),
            Err(Error::Application(msg)) => Ok(Verification::Rejected(msg)),
            Err(e) => Err(e),
        }
    }

    /// Fetch the whole catalog.
    pub async fn get_movies(&self) -> Result<Vec<Movie>> {
        let resp = self.get("/api/movies/getmovies").await?;
        Ok(resp.data.unwrap_or_default())
    }

    /// Fetch movies matching a filter.
    pub async fn get_filtered_movies(&self, query: &FilterQuery) -> Result<Vec<Movie>> {
        let path = format!("/api/movies/filtermovies?{}", query.to_query_string());
        let resp = self.get(&path).await?;
        Ok(resp.data.unwrap_or_default())
    }

    /// Fetch a single movie.
    pub async fn get_movie(&self, id: &MovieId) -> Result<Movie> {
        let path = format!("/api/movies/{}", urlencoding::encode(&id.to_string()));
        let resp = self.get(&path).await?;
        resp.data.ok_or_else(|| Error::MovieNotFound(id.to_string()))
    }

    /// List every user account. Requires an admin token.
    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.require_token()?;
        let resp = self.get("/api/user/getUsers").await?;
        Ok(resp.data.unwrap_or_default())
    }

    /// Update a user account. Requires an admin token.
    pub async fn update_user(
        &self,
        id: &UserId,
        request: &UpdateUserRequest,
    ) -> Result<Option<String>> {
        self.require_token()?;
        let path = format!("/api/user/updateUser/{}", urlencoding::encode(&id.to_string()));
        let resp: ApiResponse<serde_json::Value> = self.post(&path, request).await?;
        Ok(resp.message)
    }

    fn require_token(&self) -> Result<()> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(Error::NotAuthenticated),
        }
    }
}

#[async_trait]
impl MovieSource for CatalogClient {
    async fn filter_movies(&self, query: &FilterQuery) -> Result<Vec<Movie>> {
        self.get_filtered_movies(query).await
    }
}
