//! REST client for the content backend.

use crate::config::Config;
use crate::models::{Entity, EntityKind, EntityPayload, Wilaya};
use crate::retry::{with_retry_if, RetryConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    /// Rate limiting, server errors and transport failures are worth retrying;
    /// other client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Transport(_) => true,
            ApiError::Decode { .. } => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Collections come back either bare or wrapped in `{"data": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Wrapped { data } => data,
        }
    }
}

/// Single records may also be wrapped in `{"data": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemResponse<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemResponse<T> {
    fn into_item(self) -> T {
        match self {
            ItemResponse::Wrapped { data } => data,
            ItemResponse::Bare(item) => item,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    retry: RetryConfig,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            retry: RetryConfig::api_call(config.max_attempts),
        })
    }

    /// Override the retry policy (tests use short delays).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>, ApiError> {
        let items = self
            .send::<ListResponse<Entity>>(reqwest::Method::GET, kind.path(), None)
            .await?
            .into_items();
        info!("Fetched {} {}", items.len(), kind);
        Ok(items)
    }

    pub async fn get(&self, kind: EntityKind, id: i64) -> Result<Entity, ApiError> {
        let path = format!("{}/{}", kind.path(), id);
        Ok(self
            .send::<ItemResponse<Entity>>(reqwest::Method::GET, &path, None)
            .await?
            .into_item())
    }

    pub async fn create(&self, kind: EntityKind, payload: &EntityPayload) -> Result<Entity, ApiError> {
        Ok(self
            .send::<ItemResponse<Entity>>(reqwest::Method::POST, kind.path(), Some(payload))
            .await?
            .into_item())
    }

    pub async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        payload: &EntityPayload,
    ) -> Result<Entity, ApiError> {
        let path = format!("{}/{}", kind.path(), id);
        Ok(self
            .send::<ItemResponse<Entity>>(reqwest::Method::PUT, &path, Some(payload))
            .await?
            .into_item())
    }

    pub async fn wilayas(&self) -> Result<Vec<Wilaya>, ApiError> {
        Ok(self
            .send::<ListResponse<Wilaya>>(reqwest::Method::GET, "geographie/wilayas", None)
            .await?
            .into_items())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&EntityPayload>,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let operation_name = format!("{} /{}", method, path);

        with_retry_if(
            &self.retry,
            &operation_name,
            || async {
                debug!("{} {}", method, url);
                let mut request = self.client.request(method.clone(), &url);
                if let Some(token) = &self.token {
                    request = request.bearer_auth(token);
                }
                if let Some(payload) = body {
                    request = request.json(payload);
                }

                let response = request.send().await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
                    return Err(ApiError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }

                let bytes = response.bytes().await?;
                serde_json::from_slice::<T>(&bytes).map_err(|e| ApiError::Decode {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            },
            ApiError::is_retryable,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_retryable_statuses() {
        let status = |status| ApiError::Status {
            status,
            body: String::new(),
        };
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
        assert_eq!(status(404).status(), Some(404));
    }

    #[test]
    fn test_decode_error_not_retryable() {
        let err = ApiError::Decode {
            path: "oeuvres".to_string(),
            message: "bad".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("oeuvres"));
    }

    #[test]
    fn test_list_response_shapes() {
        let bare: ListResponse<Wilaya> =
            serde_json::from_value(json!([{"id": 1, "nom": "Adrar"}])).unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let wrapped: ListResponse<Wilaya> =
            serde_json::from_value(json!({"data": [{"id": 1, "nom": "Adrar"}, {"id": 2, "nom": "Chlef"}]}))
                .unwrap();
        assert_eq!(wrapped.into_items().len(), 2);
    }

    #[test]
    fn test_list_with_mixed_title_spellings_decodes() {
        let list: ListResponse<Entity> = serde_json::from_value(json!({"data": [
            {"id": 1, "nom": "A", "titre": "B"},
            {"id_oeuvre": 2, "titre": "{\"fr\":\"Tapis\"}"}
        ]}))
        .unwrap();

        let items = list.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(crate::i18n::Language::FRENCH), "A");
        assert_eq!(items[1].title(crate::i18n::Language::ENGLISH), "Tapis");
    }

    #[test]
    fn test_item_response_shapes() {
        let wrapped: ItemResponse<Wilaya> =
            serde_json::from_value(json!({"data": {"id": 16, "nom": "Alger"}})).unwrap();
        assert_eq!(wrapped.into_item().id, 16);

        let bare: ItemResponse<Wilaya> =
            serde_json::from_value(json!({"id": 31, "nom": "Oran"})).unwrap();
        assert_eq!(bare.into_item().id, 31);
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = ApiClient::new(&Config::for_base_url("http://localhost:3001/api/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:3001/api");
        assert_eq!(client.retry.max_attempts, 3);
    }
}
