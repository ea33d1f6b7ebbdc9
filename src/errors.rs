//! [`Error`][core::error::Error] implementations used across the crate

use core::{
    fmt::{Display, Formatter},
    str::Utf8Error,
};

#[cfg(feature = "reqwest")]
pub mod reqwest;
#[cfg(feature = "reqwest")]
pub use reqwest::UpstreamError;

/// Why a [`PayloadStream`][crate::PayloadStream] stopped producing payloads
#[derive(Debug, PartialEq)]
pub enum PayloadStreamError<E> {
    /// Something went wrong with the underlying stream
    Transport(E),
    /// A data value held invalid utf8
    Utf8Error(Utf8Error),
}

impl<E> From<Utf8Error> for PayloadStreamError<E> {
    fn from(value: Utf8Error) -> Self {
        Self::Utf8Error(value)
    }
}

impl<E> Display for PayloadStreamError<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PayloadStreamError::Transport(e) => e.fmt(f),
            PayloadStreamError::Utf8Error(e) => e.fmt(f),
        }
    }
}

impl<E> core::error::Error for PayloadStreamError<E> where E: core::error::Error {}
