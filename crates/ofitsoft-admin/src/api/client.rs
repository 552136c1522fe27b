use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ofitsoft_shared::{
    api::{ContentSummary, ErrorResponse, LoginRequest, LoginResponse},
    ContentDocument,
};
use reqwest::{Client, StatusCode};

use super::auth::AuthTokens;
use crate::store::ContentRemote;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated, run `ofitsoft-admin login`")]
    Unauthorized,
    #[error("Resource not found")]
    NotFound,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    home: PathBuf,
    tokens: Option<AuthTokens>,
}

impl ApiClient {
    pub fn new(base_url: &str, home: &Path) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            home: home.to_path_buf(),
            tokens: None,
        }
    }

    /// Load tokens from disk
    pub fn load_tokens(&mut self) -> anyhow::Result<bool> {
        self.tokens = AuthTokens::load(&self.home)?;
        Ok(self.tokens.is_some())
    }

    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.tokens.as_ref()
    }

    /// Build URL for endpoint
    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Bearer header for writes. There is no refresh endpoint, so an
    /// expiring token means logging in again.
    fn auth_header(&self) -> Result<String, ApiError> {
        let tokens = self.tokens.as_ref().ok_or(ApiError::Unauthorized)?;

        if tokens.is_expiring(Utc::now()) {
            tracing::debug!(expires_at = %tokens.expires_at, "Stored token expired");
            return Err(ApiError::Unauthorized);
        }

        Ok(format!("Bearer {}", tokens.access_token))
    }

    /// Pull the message out of an `{"error": ...}` body, falling back to the raw text
    async fn error_text(response: reqwest::Response) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                response.json().await.map_err(ApiError::Network)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::Validation(Self::error_text(response).await))
            }
            _ => {
                let text = Self::error_text(response).await;
                Err(ApiError::Server(format!("{}: {}", status, text)))
            }
        }
    }

    /// Handle empty response
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::Validation(Self::error_text(response).await))
            }
            _ => {
                let text = Self::error_text(response).await;
                Err(ApiError::Server(format!("{}: {}", status, text)))
            }
        }
    }

    // ============ Auth ============

    pub async fn login(&mut self, email: &str, password: &str) -> Result<DateTime<Utc>, ApiError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&req)
            .send()
            .await?;

        let auth: LoginResponse = self.handle_response(response).await?;

        let tokens = AuthTokens {
            access_token: auth.access_token,
            expires_at: auth.expires_at,
        };
        tokens.save(&self.home).map_err(ApiError::Other)?;
        self.tokens = Some(tokens);

        Ok(auth.expires_at)
    }

    /// Tokens are stateless on the server, so logging out only forgets them
    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.tokens = None;
        AuthTokens::delete(&self.home).map_err(ApiError::Other)?;
        Ok(())
    }

    // ============ Content ============

    pub async fn list_content(&self) -> Result<Vec<ContentSummary>, ApiError> {
        let response = self.client.get(self.url("/content")).send().await?;
        self.handle_response(response).await
    }

    pub async fn delete_content(&self, domain: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/content/{}", domain)))
            .header("Authorization", self.auth_header()?)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

impl ContentRemote for ApiClient {
    async fn fetch<D: ContentDocument>(&mut self) -> Result<Option<D>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/content/{}", D::DOMAIN)))
            .send()
            .await?;

        match self.handle_response::<D>(response).await {
            Ok(doc) => Ok(Some(doc)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save<D: ContentDocument>(&mut self, doc: &D) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/content/{}", D::DOMAIN)))
            .header("Authorization", self.auth_header()?)
            .json(doc)
            .send()
            .await?;

        // The server echoes the stored document back
        let _: serde_json::Value = self.handle_response(response).await?;
        Ok(())
    }
}
