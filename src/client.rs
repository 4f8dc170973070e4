//! HTTP client for the HR REST API.
//!
//! Configuration comes from [`crate::config::HrConfig`]; the client itself
//! only needs a base URL and an optional bearer token.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::*;

/// Default URL for local development.
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// HTTP client errors.
///
/// Variants that come from an error response carry the `message` field of
/// the JSON body when the server sent one.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {}", .0.as_deref().unwrap_or("no details"))]
    NotFound(Option<String>),

    #[error("Bad request: {}", .0.as_deref().unwrap_or("no details"))]
    BadRequest(Option<String>),

    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("credentials missing or invalid"))]
    Unauthorized(Option<String>),

    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ClientError {
    /// The message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http(_) => None,
            Self::NotFound(m) | Self::BadRequest(m) | Self::Unauthorized(m) => m.as_deref(),
            Self::Server { message, .. } => message.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pull `message` out of an error body. Empty or non-JSON bodies yield `None`.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// `PUT /api/performance-goals/{id}` answers either with the goal or with
/// `{ "goal": ... }` depending on the backend version.
#[derive(Deserialize)]
#[serde(untagged)]
enum GoalResponse {
    Wrapped { goal: Goal },
    Bare(Goal),
}

/// HTTP client for the HR API.
#[derive(Debug, Clone)]
pub struct HrClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl HrClient {
    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with optional auth header.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "HR API request");
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::warn!(%status, message = message.as_deref().unwrap_or(""), "HR API error response");
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::BadRequest(message))
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Err(ClientError::Unauthorized(message))
                }
                _ => Err(ClientError::Server { status, message }),
            }
        }
    }

    // ============================================================
    // Performance Goals
    // ============================================================

    /// Push a progress update for a goal.
    pub async fn update_goal(&self, id: i64, input: &UpdateGoalInput) -> Result<Goal, ClientError> {
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/api/performance-goals/{}", id),
            )
            .json(input)
            .send()
            .await?;
        let goal = match self.handle_response(response).await? {
            GoalResponse::Wrapped { goal } => goal,
            GoalResponse::Bare(goal) => goal,
        };
        Ok(goal)
    }

    // ============================================================
    // Payroll
    // ============================================================

    /// List every payroll record visible to the caller.
    pub async fn list_payroll(&self) -> Result<Vec<PayrollRecord>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/payroll")
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Users
    // ============================================================

    /// List user accounts.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/users")
            .send()
            .await?;
        let list: UserList = self.handle_response(response).await?;
        Ok(list.users)
    }
}
