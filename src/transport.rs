//! Transport seam between the invoker and the network.
//!
//! The invoker builds a [`FunctionRequest`] and hands it to a [`Transport`],
//! which performs the I/O and reports the status code and raw body. The
//! default implementation is [`ReqwestTransport`].

use crate::error::TransportError;
use http::header::CONTENT_TYPE;
use http::Method;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRequest {
    pub method: Method,
    pub url: Url,
    /// JSON body; `None` for GET and for calls without params.
    pub body: Option<Vec<u8>>,
}

impl FunctionRequest {
    /// `application/json` when a body is present.
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| JSON_CONTENT_TYPE)
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange per call.
///
/// Implementations must not retry; a request that cannot complete is reported
/// as a [`TransportError`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: FunctionRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// [`Transport`] backed by an async `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport, optionally with a per-request timeout.
    pub fn new(timeout_ms: Option<u64>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: FunctionRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        let content_type = request.content_type();
        let mut builder = self.client.request(request.method, request.url);
        if let (Some(content_type), Some(body)) = (content_type, request.body) {
            builder = builder.header(CONTENT_TYPE, content_type).body(body);
        }
        async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(TransportResponse { status, body })
        }
    }
}
