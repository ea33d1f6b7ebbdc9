//! Downstream HTTP surface, the `POST /api/chat` half of the proxy
//!
//! The response is committed as `text/plain; charset=utf-8` with caching and nginx
//! buffering turned off, so each payload reaches the client as soon as the upstream
//! produces it. Upstream failures before the commit map to `502`, everything after
//! degrades into the body via [`PlainStream`].

use core::fmt::Display;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use bytes_utils::Str;
use futures_core::Stream;

use crate::{plain_stream::PlainStream, reqwest::Upstream};

/// Streaming `text/plain` response over `payloads`, errors degrade into the body
pub fn plain_text_response<S, E>(payloads: S) -> Response
where
    S: Stream<Item = Result<Str, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache, no-transform"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Body::from_stream(PlainStream::new(payloads)),
    )
        .into_response()
}

/// Forward the request body to the upstream and stream the re-framed answer back
pub async fn chat(State(upstream): State<Upstream>, body: Bytes) -> Response {
    match upstream.open(body).await {
        Ok(payloads) => plain_text_response(payloads),
        Err(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
    }
}

/// One-route [`Router`] exposing [`chat`]
pub fn router(upstream: Upstream) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(upstream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use futures::stream;
    use http_body_util::BodyExt;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    async fn upstream_once(response: &'static [u8]) -> Upstream {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        Upstream::new(format!("http://{addr}/conversation"))
    }

    #[tokio::test]
    async fn proxies_a_conversation() {
        let upstream = upstream_once(
            b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\ndata: Hello\n\ndata: World\n\ndata: [DONE]\n\n",
        )
        .await;

        let response = router(upstream)
            .oneshot(
                Request::post("/api/chat")
                    .body(Body::from(r#"{"message":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()["cache-control"],
            "no-cache, no-transform"
        );
        assert_eq!(response.headers()["x-accel-buffering"], "no");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"HelloWorld");
    }

    #[tokio::test]
    async fn mid_stream_failures_degrade_into_the_body() {
        let payloads = stream::iter(vec![
            Ok::<_, &str>(Str::from_static("partial")),
            Err("upstream reset"),
        ]);

        let response = plain_text_response(payloads);
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"partialError: upstream reset");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_bad_gateway() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = router(Upstream::new(format!("http://{addr}/conversation")))
            .oneshot(Request::post("/api/chat").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"Failed to connect to"));
    }
}
