//! Object store client for a GCS-compatible JSON API

use crate::config::StorageSettings;
use crate::storage::traits::{ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// HTTP client for the object-storage JSON API
///
/// Requests carry a bearer token read from the environment at construction.
/// Without a token every call fails with [`StorageError::Unauthenticated`],
/// which the persistence chain treats as "remote tier unavailable".
pub struct HttpObjectStore {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(endpoint: &str, token: Option<String>) -> StorageResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| StorageError::Endpoint(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Builds a client from settings, reading the token from `token_env`
    pub fn from_settings(settings: &StorageSettings) -> StorageResult<Self> {
        let token = std::env::var(&settings.token_env).ok();
        if token.is_none() {
            tracing::debug!(
                "No object store token in ${}; remote storage will be skipped",
                settings.token_env
            );
        }
        Self::new(&settings.endpoint, token)
    }

    fn token(&self) -> StorageResult<&str> {
        self.token.as_deref().ok_or_else(|| {
            StorageError::Unauthenticated("no access token available".to_string())
        })
    }

    fn api_url(&self, segments: &[&str]) -> StorageResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::Endpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Maps non-success responses to storage errors
async fn check_status(response: Response, target: &str) -> StorageResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthenticated(
            format!("{} rejected credentials for {}", status.as_u16(), target),
        )),
        StatusCode::NOT_FOUND => Err(StorageError::NotFound(target.to_string())),
        _ => Err(StorageError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        let token = self.token()?;
        let mut url = self.api_url(&["upload", "storage", "v1", "b", bucket, "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", path);

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        check_status(response, &format!("{}/{}", bucket, path)).await?;
        Ok(())
    }

    async fn get(&self, bucket: &str, path: &str) -> StorageResult<Vec<u8>> {
        let token = self.token()?;
        let mut url = self.api_url(&["storage", "v1", "b", bucket, "o", path])?;
        url.query_pairs_mut().append_pair("alt", "media");

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = check_status(response, &format!("{}/{}", bucket, path)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn exists(&self, bucket: &str) -> StorageResult<bool> {
        let token = self.token()?;
        let url = self.api_url(&["storage", "v1", "b", bucket])?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        match check_status(response, bucket).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
