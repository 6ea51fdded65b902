use crate::error::{ArrError, Result};
use crate::query::QueryParams;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully assembled call, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint without the query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: QueryParams,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.query.render())
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Connection handling, TLS and timeouts live behind this
/// seam; status interpretation does not.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("arrapi/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!("Making {} request", request.method);

        let mut builder = self.client.request(request.method.clone(), request.full_url());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("HTTP {} failed: {}", request.method, e);
            ArrError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "Received response");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_only_adds_query_when_present() {
        let mut request = ApiRequest {
            method: Method::GET,
            url: "http://localhost:7878/api/v3/queue".into(),
            headers: vec![("X-Api-Key".into(), "secret".into())],
            query: QueryParams::new(),
            body: None,
        };
        assert_eq!(request.full_url(), "http://localhost:7878/api/v3/queue");

        request.query.push("page", 2);
        assert_eq!(
            request.full_url(),
            "http://localhost:7878/api/v3/queue?page=2"
        );
        assert_eq!(request.header("x-api-key"), Some("secret"));
    }

    #[test]
    fn success_range() {
        assert!(ApiResponse { status: 204, body: String::new() }.is_success());
        assert!(!ApiResponse { status: 404, body: String::new() }.is_success());
    }
}
