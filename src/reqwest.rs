//! Batteries-included upstream connector built on [`reqwest`]

use http_body_util::BodyDataStream;
use reqwest::{
    Body, Client,
    header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderValue},
};

use crate::{errors::reqwest::UpstreamError, payload_stream::PayloadStream};

/// Payload stream over a [`reqwest`] response body
pub type ResponsePayloadStream = PayloadStream<BodyDataStream<Body>>;

/// Connection factory for an SSE-speaking conversation endpoint.
///
/// Holds a [`Client`] and the endpoint url, so cloning one around a server is cheap.
/// Timeouts and proxies are the client's business, bring a configured one via
/// [`Upstream::with_client`].
#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client,
    url: String,
}

impl Upstream {
    /// Create an [`Upstream`] for `url` with a default [`Client`]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create an [`Upstream`] that reuses an existing [`Client`]
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `payload` to the endpoint and re-frame the response into payloads.
    ///
    /// The payload passes through untouched, declared as json. The response status is
    /// checked before any byte is re-framed, so failures here arrive while the caller can
    /// still answer with a clean gateway error. Nothing is retried.
    pub async fn open(
        &self,
        payload: impl Into<Body>,
    ) -> Result<ResponsePayloadStream, UpstreamError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .body(payload)
            .send()
            .await
            .map_err(|source| UpstreamError::Connect {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        Ok(crate::response_to_payload_stream(response))
    }
}
