// alo-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{HttpClient, QueryPairs};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through Tower's `oneshot`, so a service stand-in
/// can be exercised without opening sockets.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use alo_client::OneshotHttpClient;
///
/// let router: Router = fake_restaurant_service();
/// let client = OneshotHttpClient::new(router);
/// let branches: ListResponse<StoreBranch> = client.get("api/restaurants").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn uri(path: &str, query: QueryPairs<'_>) -> ClientResult<String> {
        let path = format!("/{}", path.trim_start_matches('/'));
        if query.is_empty() {
            return Ok(path);
        }
        // Percent-encode through the same URL type reqwest uses on the network path
        let url = reqwest::Url::parse_with_params(&format!("http://in-process{}", path), query)
            .map_err(|e| ClientError::Internal(format!("Invalid request URI: {}", e)))?;
        Ok(match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        })
    }

    fn build_request(&self, method: Method, uri: String, body: Body) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// Run the request and return the raw body of a successful response
    async fn execute(&self, request: Request<Body>) -> ClientResult<axum::body::Bytes> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(ClientError::from_status(status, text));
        }
        Ok(body_bytes)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let body_bytes = self.execute(request).await?;
        serde_json::from_slice(&body_bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    fn json_body<B: serde::Serialize>(body: &B) -> ClientResult<Body> {
        Ok(Body::from(serde_json::to_vec(body)?))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, Self::uri(path, &[])?, Body::empty())?;
        self.execute_json(request).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryPairs<'_>,
    ) -> ClientResult<T> {
        let request = self.build_request(Method::GET, Self::uri(path, query)?, Body::empty())?;
        self.execute_json(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request =
            self.build_request(Method::POST, Self::uri(path, &[])?, Self::json_body(body)?)?;
        self.execute_json(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request =
            self.build_request(Method::PUT, Self::uri(path, &[])?, Self::json_body(body)?)?;
        self.execute_json(request).await
    }

    async fn put_status<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        let request =
            self.build_request(Method::PUT, Self::uri(path, &[])?, Self::json_body(body)?)?;
        self.execute(request).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.build_request(Method::DELETE, Self::uri(path, &[])?, Body::empty())?;
        self.execute(request).await?;
        Ok(())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
