//! BeszelClient — session state over a single owned connection
//!
//! The client holds the base URL, the optional auth token and the transport.
//! The connection is opened on construction and released exactly once,
//! either through [`BeszelClient::close`] or when the client is dropped.

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{BeszelError, BeszelResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Client for a Beszel hub's collection API.
///
/// Not meant to be shared across threads; one caller per instance.
pub struct BeszelClient<T: Transport = HttpTransport> {
    base_url: String,
    token: Option<String>,
    transport: T,
    closed: bool,
}

impl BeszelClient<HttpTransport> {
    /// Open a client against `base_url`, optionally pre-authenticated.
    ///
    /// # Example
    /// ```no_run
    /// # use beszel::BeszelClient;
    /// let client = BeszelClient::new("https://hub.example.com", None).unwrap();
    /// let systems = client.get_systems("").unwrap();
    /// client.close();
    /// ```
    pub fn new(base_url: &str, token: Option<String>) -> BeszelResult<Self> {
        Ok(Self::with_transport(base_url, token, HttpTransport::new()?))
    }
}

impl<T: Transport> BeszelClient<T> {
    /// Build a client over an already opened transport
    pub fn with_transport(base_url: &str, token: Option<String>, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            transport,
            closed: false,
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current auth token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue an authenticated request and parse the JSON response body.
    ///
    /// `path` is appended to the base URL. An empty success body parses
    /// as `null`.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> BeszelResult<Value> {
        let mut request = ApiRequest::new(method, self.url(path));
        request.query = query.to_vec();
        request.token = self.token().map(str::to_string);
        request.body = body.cloned();

        let response = self.dispatch(&request)?;
        Self::decode(&response)
    }

    /// Issue an authenticated request whose response body is ignored
    pub fn request_empty(&self, method: Method, path: &str) -> BeszelResult<()> {
        let mut request = ApiRequest::new(method, self.url(path));
        request.token = self.token().map(str::to_string);

        self.dispatch(&request)?;
        Ok(())
    }

    /// POST a JSON body without any Authorization header
    pub(crate) fn post_unauthenticated(&self, path: &str, body: &Value) -> BeszelResult<Value> {
        let mut request = ApiRequest::new(Method::POST, self.url(path));
        request.body = Some(body.clone());

        let response = self.dispatch(&request)?;
        Self::decode(&response)
    }

    fn dispatch(&self, request: &ApiRequest) -> BeszelResult<ApiResponse> {
        let response = self.transport.send(request)?;
        if !response.is_success() {
            debug!("{} {} failed with {}", request.method, request.url, response.status);
            return Err(BeszelError::Http {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn decode(response: &ApiResponse) -> BeszelResult<Value> {
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Release the connection now
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.transport.close();
        info!("Closed connection to {}", self.base_url);
    }
}

impl<T: Transport> Drop for BeszelClient<T> {
    fn drop(&mut self) {
        self.release();
    }
}
