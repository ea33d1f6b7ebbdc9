//! Error degradation for already committed responses
//!
//! Once a response body has started streaming there is no second channel left for failures.
//! [`PlainStream`] forwards payloads as raw bytes and turns the first error into one final
//! in-band `Error: ...` chunk, then ends for good.

use core::convert::Infallible;
use core::fmt::{Display, Write};
use core::pin::Pin;
use core::task::{Context, Poll, ready};

use bytes::Bytes;
use bytes_utils::{Str, StrMut};
use futures_core::Stream;
use pin_project_lite::pin_project;

use crate::constants::ERROR_PREFIX;

pin_project! {
    /// [`Stream`][futures_core::Stream] of response body chunks that can no longer fail
    pub struct PlainStream<S> {
        #[pin]
        state: PlainStreamState<S>,
    }
}

pin_project! {
    #[project = PlainStreamProjection]
    enum PlainStreamState<S> {
        Streaming { #[pin] stream: S },
        Finished,
    }
}

impl<S> PlainStream<S> {
    pub fn new(stream: S) -> Self {
        let state = PlainStreamState::Streaming { stream };
        Self { state }
    }
}

struct StrWriter<'a>(&'a mut StrMut);

impl Write for StrWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.push_str(s);
        Ok(())
    }
}

fn error_chunk(err: &impl Display) -> Bytes {
    let mut msg = StrMut::new();
    msg.push_str(ERROR_PREFIX);
    // writing into a growable buffer can't fail
    let _ = write!(StrWriter(&mut msg), "{err}");
    msg.freeze().into_inner()
}

impl<S, E> Stream for PlainStream<S>
where
    S: Stream<Item = Result<Str, E>>,
    E: Display,
{
    type Item = Result<Bytes, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        let stream = match this.state.as_mut().project() {
            PlainStreamProjection::Streaming { stream } => stream,
            PlainStreamProjection::Finished => return Poll::Ready(None),
        };

        match ready!(stream.poll_next(cx)) {
            Some(Ok(payload)) => Poll::Ready(Some(Ok(payload.into_inner()))),
            Some(Err(e)) => {
                let chunk = error_chunk(&e);
                this.state.set(PlainStreamState::Finished);
                Poll::Ready(Some(Ok(chunk)))
            }
            None => {
                this.state.set(PlainStreamState::Finished);
                Poll::Ready(None)
            }
        }
    }
}
