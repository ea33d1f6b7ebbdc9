//! UTF-8 agnostic line parser for SSE byte streams
//!
//! Lines are terminated by LF only. A single CR directly before the LF is stripped,
//! a CR anywhere else is ordinary content. Only `data:` fields carry payload here,
//! every other field is recognised just far enough to be skipped.

use core::str::Utf8Error;

use bytes::{Buf, Bytes, BytesMut};
use bytes_utils::Str;

use crate::constants::{CR, DATA_FIELD, LF};

/// A classified line borrowed from an SSE stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawLine<'a> {
    /// Blank line, delimits events
    Empty,
    /// Line starting with a colon, carries nothing
    Comment,
    /// A `data:` line with its value, at most one leading space stripped
    Data(&'a [u8]),
    /// Any other field, or a line without a colon
    Ignored,
}

/// Owned version of [RawLine]. Note: you probably want to [RawLineOwned::validate] these into [Line]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLineOwned {
    Empty,
    Comment,
    Data(Bytes),
    Ignored,
}

/// Completely parsed SSE line with a utf8-checked data value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Empty,
    Comment,
    Data(Str),
    Ignored,
}

fn validate_bytes(val: Bytes) -> Result<Str, Utf8Error> {
    match str::from_utf8(val.as_ref()) {
        Ok(_) => Ok(unsafe { Str::from_inner_unchecked(val) }),
        Err(e) => Err(e),
    }
}

impl RawLineOwned {
    pub fn validate(self) -> Result<Line, Utf8Error> {
        match self {
            RawLineOwned::Empty => Ok(Line::Empty),
            RawLineOwned::Comment => Ok(Line::Comment),
            RawLineOwned::Data(value) => Ok(Line::Data(validate_bytes(value)?)),
            RawLineOwned::Ignored => Ok(Line::Ignored),
        }
    }
}

/// Finds the next LF, returns a tuple where the first value is the non-inclusive end of the
/// line content and the second value is the inclusive start of the remainder. A CR directly
/// before the LF is excluded from the content. Returns [None] if the slice holds no LF, a
/// trailing lone CR included, that one is content until an LF says otherwise.
fn find_eol(bytes: &[u8]) -> Option<(usize, usize)> {
    let lf_pos = memchr::memchr(LF, bytes)?;

    if lf_pos > 0 && bytes[lf_pos - 1] == CR {
        Some((lf_pos - 1, lf_pos + 1))
    } else {
        Some((lf_pos, lf_pos + 1))
    }
}

/// Splits a slice of bytes at the next EOL. Returns [None] if more data is required to find an LF.
fn split_at_next_eol(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    find_eol(bytes).map(|(line_end, rem_start)| (&bytes[..line_end], &bytes[rem_start..]))
}

fn read_line(bytes: &[u8]) -> RawLine<'_> {
    if bytes.is_empty() {
        return RawLine::Empty;
    }

    match memchr::memchr(b':', bytes) {
        Some(0) => RawLine::Comment,
        Some(colon_pos) if &bytes[..colon_pos] == DATA_FIELD => {
            let value = &bytes[colon_pos + 1..];
            // strip a single leading space if present, tabs are content
            let value = match value {
                [b' ', rest @ ..] => rest,
                _ => value,
            };
            RawLine::Data(value)
        }
        // other fields and colon-less lines carry no payload, a bare `data` included
        _ => RawLine::Ignored,
    }
}

/// Tries to read the next [RawLine] from `bytes`. Returns [None] if `bytes` contains no complete line.
pub fn parse_line(bytes: &[u8]) -> Option<(RawLine<'_>, &[u8])> {
    let (line_to_read, next) = split_at_next_eol(bytes)?;
    Some((read_line(line_to_read), next))
}

/// Reads the next [RawLineOwned] from the buffer, then advances the buffer past the
/// corresponding EOL. Returns [None] if the buffer holds no LF.
pub fn parse_line_from_buffer(buffer: &mut BytesMut) -> Option<RawLineOwned> {
    let (line_end, rem_start) = find_eol(buffer)?;

    let line = buffer.split_to(line_end).freeze();
    buffer.advance(rem_start - line_end);

    if line.is_empty() {
        return Some(RawLineOwned::Empty);
    }

    match memchr::memchr(b':', &line) {
        Some(0) => Some(RawLineOwned::Comment),
        Some(colon_pos) if &line[..colon_pos] == DATA_FIELD => {
            let value_start = if line.get(colon_pos + 1) == Some(&b' ') {
                colon_pos + 2
            } else {
                colon_pos + 1
            };
            Some(RawLineOwned::Data(line.slice(value_start..)))
        }
        _ => Some(RawLineOwned::Ignored),
    }
}
