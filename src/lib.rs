//! `no_std`-compatible re-framing of
//! [Server-Sent Events](https://html.spec.whatwg.org/multipage/server-sent-events.html) (SSE)
//! into plain text payload streams, built for proxying streaming chat backends.
//!
//! `unsse` takes the SSE framing apart instead of surfacing it: whatever arrives in `data:`
//! lines comes out as one joined payload per event, and the rest of the protocol (comments,
//! other fields, the `[DONE]` completion marker) is consumed along the way. The layers:
//!
//! - [`PayloadStream`] - a generic [`Stream`][futures_core::Stream] adapter that converts any
//!   `Stream<Item = Result<impl AsRef<[u8]>, E>>` of SSE bytes into one
//!   [`Str`][bytes_utils::Str] payload per event, however the chunks are fragmented.
//! - [`PlainStream`] - wraps a payload stream for an already committed response body,
//!   degrading the first error into a final in-band `Error: ...` chunk.
//! - [`Upstream`] (requires `reqwest` feature) - a connection factory that POSTs to an SSE
//!   endpoint, checks the status and hands back a ready [`PayloadStream`].
//! - [`proxy`] (requires `axum` feature) - the downstream HTTP surface: a `POST /api/chat`
//!   route answering `text/plain; charset=utf-8` with buffering disabled.
//! - Low-level parsing via [`parser::parse_line`] and [`parser::parse_line_from_buffer`] for
//!   custom integrations.
//!
//! # Proxying with `axum` and `reqwest`
//!
//! ```ignore
//! use unsse::{Upstream, proxy};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let upstream = Upstream::new("http://localhost:8080/conversation");
//! let app = proxy::router(upstream);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Talking to an endpoint yourself
//!
//! [`Upstream::open`] gives you the payload stream directly, and
//! [`response_to_payload_stream`] does the same for a [`::reqwest::Response`] you already
//! have in hand:
//!
//! ```ignore
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let upstream = unsse::Upstream::new("http://localhost:8080/conversation");
//! let mut payloads = upstream.open(r#"{"message":"hi"}"#).await?;
//!
//! while let Some(Ok(payload)) = payloads.next().await {
//!     print!("{payload}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Using `PayloadStream` directly
//!
//! If you already have a byte stream (from any HTTP client, WebSocket, file, etc.)
//! you can use [`PayloadStream`] without any features:
//!
//! ```rust
//! use bytes::Bytes;
//! use futures::StreamExt;
//! use unsse::PayloadStream;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let chunks = vec![
//!     Ok::<_, std::io::Error>(Bytes::from("data: Hel")),
//!     Ok(Bytes::from("lo\n\ndata: World\n\ndata: [DONE]\n\n")),
//! ];
//! let mut payloads = PayloadStream::new(futures::stream::iter(chunks));
//!
//! while let Some(Ok(payload)) = payloads.next().await {
//!     println!("{payload}");
//! }
//! # }
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Description | no std? |
//! | --- | --- | --- | --- |
//! | `std` | off | Enables standard library support in core dependencies (`bytes`, `memchr`, `futures-core`, etc.). Notably enables runtime SIMD for memchr. Turned on automatically by `reqwest`. | false |
//! | `reqwest` | off | Provides [`Upstream`] and [`response_to_payload_stream`] for HTTP-based SSE endpoints. | false |
//! | `axum` | off | Provides the [`proxy`] module with a streaming `text/plain` route in front of an [`Upstream`]. Implies `reqwest`. | false |
//!
//! Without any features enabled, the crate is fully `no_std` compatible and provides
//! [`PayloadStream`], [`PlainStream`] and the low-level parser.

#![cfg_attr(not(feature = "std"), no_std)]

pub(crate) mod constants;
pub mod errors;
pub mod parser;
pub mod payload_stream;
pub mod plain_stream;
#[cfg(feature = "axum")]
pub mod proxy;
#[cfg(feature = "reqwest")]
pub mod reqwest;

// if the reqwest feature is enabled, this is what someone wants
#[cfg(feature = "reqwest")]
pub use reqwest::Upstream;

pub use payload_stream::PayloadStream;
pub use plain_stream::PlainStream;

#[cfg(feature = "reqwest")]
/// Convert a [`Response`][::reqwest::Response] into a [`Stream`][futures_core::Stream] of
/// payloads via a similar mechanism to [`::reqwest::Response::bytes_stream`]
pub fn response_to_payload_stream(
    response: ::reqwest::Response,
) -> reqwest::ResponsePayloadStream {
    PayloadStream::new(http_body_util::BodyDataStream::new(::reqwest::Body::from(
        response,
    )))
}
