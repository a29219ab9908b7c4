use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::TransportPolicy;

/// A single outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub url: String,

    /// JSON-encoded `SurveyRecord`.
    pub body: String,

    /// Whether the caller intends to read the reply.
    pub policy: TransportPolicy,
}

/// What the transport could observe after sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The request went out; the reply was not read.
    Dispatched,

    /// The reply was read in full.
    Replied { status: u16, body: String },
}

/// Error type for a send.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be delivered (connection refused, DNS, reset...).
    #[error("Network error: {0}")]
    Network(String),

    /// The request was delivered but the reply could not be read.
    #[error("Reply unreadable: {0}")]
    Unreadable(String),
}

/// Sends a serialized record to the collection endpoint.
///
/// Implementations perform exactly one attempt per call. Dropping the returned
/// future must abort the request; the submission client relies on this for
/// its timeout.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &SubmitRequest) -> Result<Delivery, TransportError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: &SubmitRequest) -> Result<Delivery, TransportError> {
        (**self).send(request).await
    }
}

/// HTTP transport: one `POST` with a JSON body.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, TLS roots, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: &SubmitRequest) -> Result<Delivery, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        match request.policy {
            TransportPolicy::Opaque => {
                debug!(url = %request.url, "request dispatched, reply left unread");
                Ok(Delivery::Dispatched)
            }
            TransportPolicy::Readable => {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|e| TransportError::Unreadable(e.to_string()))?;
                debug!(url = %request.url, status, "reply received");
                Ok(Delivery::Replied { status, body })
            }
        }
    }
}
