pub mod middleware;

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::errors::Result;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Status and raw body of one HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Number of items when the body is a JSON array.
    pub fn item_count(&self) -> Option<usize> {
        self.json().ok().and_then(|v| v.as_array().map(Vec::len))
    }
}

/// Single-attempt HTTP client shared by login and every check.
#[derive(Clone)]
pub struct ApiClient {
    inner: ClientWithMiddleware,
}

impl ApiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;
        Ok(Self {
            inner: middleware::build_client_with_logging(client),
        })
    }

    /// GET `url`, sending `authorization` verbatim as the `Authorization` header.
    pub async fn get(&self, url: Url, authorization: &str) -> Result<ApiResponse> {
        let mut auth = HeaderValue::from_str(authorization)?;
        auth.set_sensitive(true);

        let resp = self.inner.get(url).header(AUTHORIZATION, auth).send().await?;
        read_response(resp).await
    }

    /// POST a JSON body without authentication.
    pub async fn post_json<T>(&self, url: Url, body: &T) -> Result<ApiResponse>
    where
        T: Serialize + ?Sized,
    {
        let resp = self.inner.post(url).json(body).send().await?;
        read_response(resp).await
    }
}

async fn read_response(resp: reqwest::Response) -> Result<ApiResponse> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    Ok(ApiResponse { status, body })
}
