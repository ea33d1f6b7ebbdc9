//! Re-framing of SSE bytes into plain payload text
//!
//! [`PayloadStream`] buffers arbitrarily fragmented chunks, cuts them into lines, collects
//! the `data:` values of each event and yields them joined with LF. The `[DONE]` completion
//! marker ends the stream without being emitted. One instance carries the state of exactly
//! one upstream response.

use core::{
    pin::Pin,
    task::{Context, Poll, ready},
};

use bytes::{Buf, BytesMut};
use bytes_utils::{Str, StrMut};
use futures_core::Stream;

use crate::{
    constants::{BOM, DONE_MARKER},
    errors::PayloadStreamError,
    parser::{Line, RawLineOwned, parse_line_from_buffer},
};

#[derive(Debug, Clone)]
struct PayloadBuilder {
    data: StrMut,
    is_complete: bool,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self {
            data: StrMut::new(),
            is_complete: false,
        }
    }
}

impl PayloadBuilder {
    fn add(&mut self, line: Line) {
        match line {
            Line::Empty => self.is_complete = true,
            Line::Data(value) => {
                self.data.push_str(&value);
                self.data.push('\n');
            }
            // comments and other fields contribute nothing to the payload
            Line::Comment | Line::Ignored => (),
        }
    }

    /// Joins the collected `data:` values with LF and resets the builder. Returns [None] if
    /// no data line arrived since the last dispatch, a group made only of comments or ignored
    /// fields produces nothing. A lone empty `data:` line still yields the empty payload.
    fn dispatch(&mut self) -> Option<Str> {
        let PayloadBuilder { data, .. } = core::mem::take(self);

        if data.is_empty() {
            return None;
        }

        // every data line appended an LF, drop the final one so values end up joined rather than terminated
        let mut buf = data.into_inner();
        buf.truncate(buf.len() - 1);
        // Safety: the removed byte is the trailing LF we appended, it can't be part of another utf-8 codepoint
        let data = unsafe { StrMut::from_inner_unchecked(buf) };

        Some(data.freeze())
    }
}

/// Completion marker check, trimmed and ascii-case-insensitive so `[DONE]`, `[done]` and
/// `  [Done]  ` all terminate. Applied to the joined payload only, a marker split across
/// data lines joins with LF and no longer matches.
fn is_done_marker(payload: &str) -> bool {
    payload.trim().eq_ignore_ascii_case(DONE_MARKER)
}

enum Dispatch {
    Payload(Str),
    Done,
}

fn next_payload<E>(
    buffer: &mut BytesMut,
    builder: &mut PayloadBuilder,
) -> Result<Option<Dispatch>, PayloadStreamError<E>> {
    if buffer.is_empty() {
        return Ok(None);
    }
    loop {
        let line = match parse_line_from_buffer(buffer).map(RawLineOwned::validate) {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(PayloadStreamError::Utf8Error(e)),
            None => return Ok(None),
        };

        builder.add(line);

        // dispatch resets the builder either way, so a dataless group just falls through
        #[allow(clippy::collapsible_if)]
        if builder.is_complete {
            if let Some(payload) = builder.dispatch() {
                if is_done_marker(&payload) {
                    return Ok(Some(Dispatch::Done));
                }
                return Ok(Some(Dispatch::Payload(payload)));
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PayloadStreamState {
    NotStarted,
    Started,
    /// Upstream is exhausted but buffered events still drain
    Ended,
    /// Nothing will ever be produced again
    Terminated,
}

impl PayloadStreamState {
    fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted)
    }
}

/// [Some] once enough bytes are buffered to decide, [None] while the buffer is still a
/// proper prefix of the BOM
fn starts_with_bom(buffer: &[u8]) -> Option<bool> {
    if buffer.len() >= BOM.len() {
        Some(buffer.starts_with(BOM))
    } else if BOM.starts_with(buffer) {
        None
    } else {
        Some(false)
    }
}

pin_project_lite::pin_project! {
    /// [`Stream`][futures_core::Stream] that re-frames a stream of SSE bytes into the joined
    /// `data:` payload of each event
    #[project = PayloadStreamProjection]
    #[derive(Debug)]
    pub struct PayloadStream<S> {
        #[pin]
        stream: S,
        buffer: BytesMut,
        builder: PayloadBuilder,
        state: PayloadStreamState,
    }
}

impl<S> PayloadStream<S> {
    /// Create a new [`PayloadStream`] from a stream of [`AsRef<[u8]>`][AsRef] chunks
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: BytesMut::new(),
            builder: PayloadBuilder::default(),
            state: PayloadStreamState::NotStarted,
        }
    }

    /// Take the current buffer from the [PayloadStream], useful if you want to check for leftovers
    pub fn take_buffer(self) -> BytesMut {
        self.buffer
    }
}

macro_rules! try_next_payload {
    ($this:ident) => {
        match next_payload($this.buffer, $this.builder) {
            Ok(Some(Dispatch::Payload(payload))) => {
                if $this.state.is_not_started() {
                    *$this.state = PayloadStreamState::Started;
                }
                return Poll::Ready(Some(Ok(payload)));
            }
            Ok(Some(Dispatch::Done)) => {
                *$this.state = PayloadStreamState::Terminated;
                return Poll::Ready(None);
            }
            Err(e) => {
                *$this.state = PayloadStreamState::Terminated;
                return Poll::Ready(Some(Err(e)));
            }
            Ok(None) => {}
        }
    };
}

macro_rules! flush_trailing {
    ($this:ident) => {
        *$this.state = PayloadStreamState::Terminated;
        // a final event missing its blank line still flushes, an unterminated line does not
        match $this.builder.dispatch() {
            Some(payload) if !is_done_marker(&payload) => {
                return Poll::Ready(Some(Ok(payload)));
            }
            _ => return Poll::Ready(None),
        }
    };
}

impl<S, E, B> Stream for PayloadStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Str, PayloadStreamError<E>>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<<Self as Stream>::Item>> {
        let mut this = self.project();

        match *this.state {
            PayloadStreamState::Terminated => return Poll::Ready(None),
            PayloadStreamState::Ended => {
                try_next_payload!(this);
                flush_trailing!(this);
            }
            PayloadStreamState::NotStarted | PayloadStreamState::Started => {}
        }

        try_next_payload!(this);

        loop {
            let new_bytes = match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(o)) => o,
                Some(Err(e)) => {
                    *this.state = PayloadStreamState::Terminated;
                    return Poll::Ready(Some(Err(PayloadStreamError::Transport(e))));
                }
                None => {
                    *this.state = PayloadStreamState::Ended;
                    try_next_payload!(this);
                    flush_trailing!(this);
                }
            };

            let new_bytes = new_bytes.as_ref();

            if new_bytes.is_empty() {
                continue;
            }

            this.buffer.extend_from_slice(new_bytes);

            if this.state.is_not_started() {
                match starts_with_bom(this.buffer) {
                    Some(true) => {
                        *this.state = PayloadStreamState::Started;
                        this.buffer.advance(BOM.len());
                    }
                    Some(false) => *this.state = PayloadStreamState::Started,
                    None => continue,
                }
            }

            try_next_payload!(this);
        }
    }
}
