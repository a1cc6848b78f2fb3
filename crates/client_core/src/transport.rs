//! Outbound request plumbing shared by the identity and gallery services.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::error::ApiError;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, ClientResult, HttpError};

/// A single JSON call relative to a transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> ClientResult<Self> {
        let value = serde_json::to_value(body).map_err(|err| ClientError::Decode {
            url: self.path.clone(),
            message: format!("failed to encode request body: {err}"),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the decoded JSON body of a 2xx response.
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;
}

/// Sends `request` and decodes the response into `T`.
pub async fn call<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> ClientResult<T> {
    let path = request.path.clone();
    let value = transport.send(request).await?;
    serde_json::from_value(value).map_err(|err| ClientError::Decode {
        url: path,
        message: err.to_string(),
    })
}

pub struct HttpClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    /// `authorization` is attached verbatim to every request unless a request carries a bearer token.
    pub fn new(base_url: &str, authorization: Option<&str>) -> ClientResult<Self> {
        let parsed = Url::parse(base_url).map_err(|err| {
            ClientError::invalid_state("http client", format!("bad base url '{base_url}': {err}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::invalid_state(
                "http client",
                format!("unsupported scheme in '{base_url}'"),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = authorization.filter(|token| !token.is_empty()) {
            let value = HeaderValue::from_str(token).map_err(|err| {
                ClientError::invalid_state("http client", format!("bad authorization value: {err}"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let url = self.url_for(&request.path);
        let method = request.method.clone();
        debug!(%method, %url, "sending request");

        let mut headers = self.headers.clone();
        if let Some(token) = &request.bearer {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                ClientError::invalid_state("http client", format!("bad bearer token: {err}"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(%method, %url, error = %err, "request failed before a response arrived");
            ClientError::Network {
                method: method.clone(),
                url: url.clone(),
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| ClientError::Network {
            method: method.clone(),
            url: url.clone(),
            message: err.to_string(),
        })?;

        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "backend rejected request");
            return Err(HttpError {
                status: status.as_u16(),
                method,
                url,
                message: ApiError::message_from_body(&text),
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| ClientError::Decode {
            url,
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
