//! Versioned base client shared by the `*arr` services.

use crate::error::{ArrError, Result};
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::query::QueryParams;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_VERSION: &str = "v3";
const API_KEY_HEADER: &str = "X-Api-Key";

pub struct ArrClient<T> {
    transport: T,
    host_url: String,
    api_key: String,
    ver_uri: String,
}

impl<T: Transport> ArrClient<T> {
    pub fn new(transport: T, host_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Self::with_version(transport, host_url, api_key, DEFAULT_API_VERSION)
    }

    pub fn with_version(
        transport: T,
        host_url: &str,
        api_key: impl Into<String>,
        version: &str,
    ) -> Result<Self> {
        Url::parse(host_url)?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ArrError::missing("api_key"));
        }

        Ok(Self {
            transport,
            host_url: host_url.trim_end_matches('/').to_string(),
            api_key,
            ver_uri: version.trim_matches('/').to_string(),
        })
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `{host}/api/{version}/{path}`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}/{}", self.host_url, self.ver_uri, path)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
        body: Option<Value>,
    ) -> ApiRequest {
        ApiRequest {
            method,
            url: self.endpoint(path),
            headers: vec![
                (API_KEY_HEADER.to_string(), self.api_key.clone()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            query,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
        body: Option<Value>,
    ) -> Result<Value> {
        let request = self.build(method, path, query, body);
        let response = self.transport.execute(request).await?;
        process_response(path, response)
    }

    pub async fn get(&self, path: &str, query: QueryParams) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str, query: QueryParams) -> Result<R> {
        let value = self.get(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post(&self, path: &str, query: QueryParams, body: Option<Value>) -> Result<Value> {
        self.request(Method::POST, path, query, body).await
    }

    pub async fn put(&self, path: &str, query: QueryParams, body: Option<Value>) -> Result<Value> {
        self.request(Method::PUT, path, query, body).await
    }

    pub async fn delete(
        &self,
        path: &str,
        query: QueryParams,
        body: Option<Value>,
    ) -> Result<Value> {
        self.request(Method::DELETE, path, query, body).await
    }
}

fn process_response(path: &str, response: ApiResponse) -> Result<Value> {
    match response.status {
        404 => {
            debug!(path, "Resource not found");
            Err(ArrError::ResourceNotFound {
                path: path.to_string(),
            })
        }
        _ if response.is_success() => {
            // DELETE and some PUT endpoints answer with an empty body. Collection
            // endpoints send `[]` instead, so `{}` only reaches a sequence decoder
            // if the server misbehaves, and then surfaces as `Json`.
            if response.body.trim().is_empty() {
                return Ok(Value::Object(Default::default()));
            }
            Ok(serde_json::from_str(&response.body)?)
        }
        status => {
            warn!(path, status, "Request failed");
            Err(ArrError::Request {
                status,
                body: response.body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.urls.lock().unwrap().push(request.full_url());
            Ok(ApiResponse {
                status: 200,
                body: "[]".to_string(),
            })
        }
    }

    #[test]
    fn defaults_to_v3_and_trims_host() {
        let client = ArrClient::new(Recorder::default(), "https://h:7878/", "k").unwrap();
        assert_eq!(client.host_url(), "https://h:7878");
        assert_eq!(client.endpoint("movie"), "https://h:7878/api/v3/movie");
    }

    #[tokio::test]
    async fn version_override_reaches_the_wire() {
        let client =
            ArrClient::with_version(Recorder::default(), "https://h:7878/", "k", "/v4/").unwrap();
        client.get("movie", QueryParams::new()).await.unwrap();
        assert_eq!(
            client.transport().urls.lock().unwrap().as_slice(),
            ["https://h:7878/api/v4/movie".to_string()]
        );
    }

    #[test]
    fn rejects_bad_host() {
        let err = ArrClient::new(Recorder::default(), "not a url", "k")
            .err()
            .unwrap();
        assert!(matches!(err, ArrError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_blank_api_key() {
        for key in ["", "   "] {
            let err = ArrClient::new(Recorder::default(), "http://localhost:7878", key)
                .err()
                .unwrap();
            assert!(matches!(err, ArrError::MissingArgument { ref name } if name == "api_key"));
        }
    }

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn maps_404_to_not_found() {
        let err = process_response("movie/999", response(404, "")).unwrap_err();
        assert!(matches!(err, ArrError::ResourceNotFound { ref path } if path == "movie/999"));
    }

    #[test]
    fn other_failures_keep_status_and_body() {
        let err = process_response("movie", response(500, "boom")).unwrap_err();
        assert!(matches!(err, ArrError::Request { status: 500, ref body } if body == "boom"));
    }

    #[test]
    fn empty_success_is_empty_object() {
        let value = process_response("movie/1", response(200, "")).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = process_response("movie", response(200, "<html>")).unwrap_err();
        assert!(matches!(err, ArrError::Json(_)));
    }
}
