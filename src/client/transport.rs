//! HTTP transport for signed requests

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, StatusCode};

use crate::Result;
use crate::command::CommandRequest;
use crate::signing::SignedHeaders;

/// A signed command request ready to send
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Full request URL
    pub url: String,

    /// Authentication headers, generated for this request only
    pub headers: SignedHeaders,

    /// JSON body
    pub body: CommandRequest,
}

/// The parts of a response the client looks at
///
/// The response body is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,

    /// Reason phrase as sent by the server, when it differs from the
    /// canonical phrase for the status
    pub reason: Option<String>,
}

/// Sends command requests to the API
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `request` and return the response status
    ///
    /// Non-2xx statuses are returned, not raised.
    ///
    /// # Errors
    ///
    /// Returns error on network-level failure
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport using the client's default timeouts
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh HTTP client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse> {
        let headers = request.headers.to_header_map()?;

        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .json(&request.body)
            .send()
            .await?;

        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());

        Ok(ApiResponse {
            status: response.status(),
            reason,
        })
    }
}
