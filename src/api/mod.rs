mod envelope;
mod error;
#[cfg(test)]
pub(crate) mod testing;

pub(crate) use envelope::{decode, decode_list, decode_value, parse_body};
pub(crate) use error::{ApiError, ApiResult};

use crate::config::EnvConfig;
use crate::models::{LoginRequest, LoginResponse, Resource};
use crate::report::ReportSummary;
use crate::storage::{bearer_header, BrowserSession, SessionStore};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Status and JSON body of a completed HTTP exchange, before envelope
/// normalization.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// One HTTP round-trip. No retries, no timeout, no cancellation.
pub(crate) trait Transport: Clone + Send + Sync + 'static {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

/// `reqwest`-backed transport rooted at the configured API URL.
#[derive(Clone)]
pub(crate) struct HttpTransport {
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.into(),
            session,
        }
    }

    /// Base URL from `window.ENV`, token from `localStorage`.
    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url, Arc::new(BrowserSession))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let client = reqwest::Client::new();
        let mut req = client.request(request.method.clone(), self.url(&request.path));

        if let Some(header) = bearer_header(self.session.token().as_deref()) {
            req = req.header("Authorization", header);
        }

        if request.method != Method::GET {
            if let Some(body) = &request.body {
                req = req.json(body);
            }
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        let text = res.text().await.map_err(ApiError::network)?;

        Ok(RawResponse {
            status,
            body: parse_body(status, &text)?,
        })
    }
}

pub(crate) fn to_body(payload: &impl Serialize) -> ApiResult<Value> {
    serde_json::to_value(payload).map_err(ApiError::parse)
}

/// Typed client over a `Transport`.
///
/// Every method returns the envelope-normalized result; callers never see
/// `success`/`data`/`message` wrappers.
#[derive(Clone)]
pub(crate) struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn from_env() -> Self {
        Self::new(HttpTransport::from_env())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<RawResponse> {
        self.transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
            })
            .await
    }

    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<R> {
        let raw = self.send(method, path, body).await?;
        decode(raw.status, raw.body)
    }

    pub async fn request_value(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let raw = self.send(method, path, body).await?;
        decode_value(raw.status, raw.body)
    }

    pub async fn list<R: Resource>(&self, path: &str) -> ApiResult<Vec<R>> {
        let raw = self.send(Method::GET, path, None).await?;
        decode_list(raw.status, raw.body)
    }

    /// Returns the backend's payload (normally the canonical record).
    pub async fn create<R: Resource>(&self, payload: Value) -> ApiResult<Value> {
        self.request_value(Method::POST, &R::create_path(), Some(payload))
            .await
    }

    pub async fn update<R: Resource>(&self, id: &str, payload: Value) -> ApiResult<Value> {
        self.request_value(Method::PATCH, &R::admin_item_path(id), Some(payload))
            .await
    }

    pub async fn remove<R: Resource>(&self, id: &str) -> ApiResult<()> {
        self.request_value(Method::DELETE, &R::admin_item_path(id), None)
            .await
            .map(|_| ())
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = to_body(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        self.request(Method::POST, "/auth/login", Some(body)).await
    }

    pub async fn report_summary(&self) -> ApiResult<ReportSummary> {
        self.request(Method::GET, "/reports/summary", None).await
    }
}
