//! Executes built requests and applies the status rule.
//!
//! # Design
//! `Transport` is the I/O seam: it turns an `HttpRequest` into an
//! `HttpResponse` and reports only failures where no status exists
//! (connect, timeout, TLS). `Dispatcher` sits on top and is the one place
//! that maps statuses to `ApiError`. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{classify_status, ApiError, NO_STATUS};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::ResponseFailure;

/// The request never produced a status.
#[derive(Debug, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    read_timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout for requests that do not carry their own.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = request.timeout.or(self.read_timeout) {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.without_url().to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Sends requests through a `Transport` and classifies the result.
pub struct Dispatcher {
    transport: Box<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Executes a GET and returns the body bytes unchanged.
    pub async fn get_resource(&self, request: &HttpRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.fetch(request).await?;
        Ok(response.body)
    }

    /// Executes a POST or DELETE, discarding the body.
    pub async fn mutate_resource(&self, request: &HttpRequest) -> Result<(), ApiError> {
        self.fetch(request).await.map(|_| ())
    }

    /// Executes a POST or DELETE whose answer carries data.
    pub async fn mutate_and_decode<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, ApiError> {
        let response = self.fetch(request).await?;
        crate::client::decode(&response.body)
    }

    /// Executes any request and returns the whole response if its status is
    /// in 200..=299.
    pub async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = request.redacted_url(), "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    method = %request.method,
                    url = request.redacted_url(),
                    error = %e,
                    "request failed without a status"
                );
                return Err(ApiError::InvalidStatusCode(NO_STATUS));
            }
        };

        let status = i32::from(response.status);
        if let Err(e) = classify_status(status) {
            match serde_json::from_slice::<ResponseFailure>(&response.body) {
                Ok(failure) => warn!(
                    method = %request.method,
                    url = request.redacted_url(),
                    status,
                    service_code = failure.status_code,
                    service_message = %failure.status_message,
                    "request rejected"
                ),
                Err(_) => warn!(
                    method = %request.method,
                    url = request.redacted_url(),
                    status,
                    "request rejected"
                ),
            }
            return Err(e);
        }

        debug!(status, bytes = response.body.len(), "response received");
        Ok(response)
    }
}
