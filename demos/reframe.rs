//! Feed a canned SSE transcript through the re-framer, chunked mid-line on purpose

use bytes::Bytes;
use futures::StreamExt;
use unsse::PayloadStream;

#[tokio::main]
async fn main() {
    let chunks = vec![
        Ok::<_, std::convert::Infallible>(Bytes::from_static(b"data: Hel")),
        Ok(Bytes::from_static(
            b"lo\n\n: heartbeat\ndata: How\ndata: are you?\n\n",
        )),
        Ok(Bytes::from_static(b"data: [DONE]\n\ndata: never seen\n\n")),
    ];

    let mut payloads = PayloadStream::new(futures::stream::iter(chunks));
    while let Some(payload) = payloads.next().await {
        println!("{payload:?}");
    }
}
