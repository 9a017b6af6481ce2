//! Transport layer — one pooled HTTP connection per client
//!
//! The [`Transport`] trait is the seam between request logic and the wire:
//! [`HttpTransport`] talks to a real hub, tests plug in an in-memory one.
//! Status mapping and JSON decoding happen above this layer so every
//! transport behaves the same.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{BeszelError, BeszelResult};

/// Fixed connect and read timeout applied to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully resolved outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// Raw token for the Authorization header, if any
    pub token: Option<String>,
    /// JSON body for write methods
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            token: None,
            body: None,
        }
    }

    /// Value of a query parameter, if present
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw status and body of a completed round trip
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over an owned connection resource
pub trait Transport {
    /// Perform one blocking round trip
    fn send(&self, request: &ApiRequest) -> BeszelResult<ApiResponse>;

    /// Release the connection resource
    fn close(&mut self);
}

/// Blocking `reqwest` transport with a keep-alive connection pool
pub struct HttpTransport {
    client: Option<Client>,
}

impl HttpTransport {
    /// Open a new connection pool with the fixed request timeout
    pub fn new() -> BeszelResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client: Some(client) })
    }

    /// Whether the pool is still held
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    fn build_url(request: &ApiRequest) -> BeszelResult<Url> {
        let parsed = if request.query.is_empty() {
            Url::parse(&request.url)
        } else {
            Url::parse_with_params(&request.url, &request.query)
        };
        parsed.map_err(|e| BeszelError::Config(format!("invalid URL '{}': {}", request.url, e)))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> BeszelResult<ApiResponse> {
        let client = self.client.as_ref().ok_or(BeszelError::Closed)?;
        let url = Self::build_url(request)?;

        debug!("{} {}", request.method, url);

        let mut builder = client
            .request(request.method.clone(), url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, token.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(ApiResponse { status, body })
    }

    fn close(&mut self) {
        // Dropping the client tears down its pooled connections
        self.client.take();
    }
}
