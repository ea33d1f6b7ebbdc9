use core::fmt::{Display, Formatter};

use reqwest::StatusCode;

/// Why an [`Upstream`][crate::reqwest::Upstream] connection never reached the streaming stage.
/// These happen before any response bytes are committed downstream, so they are safe to map to
/// a gateway error instead of degrading into the body.
#[derive(Debug)]
pub enum UpstreamError {
    /// The request failed before a response arrived
    Connect {
        url: String,
        source: reqwest::Error,
    },
    /// The upstream answered, but not with a success status
    Status(StatusCode),
}

impl Display for UpstreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            UpstreamError::Connect { url, .. } => write!(f, "Failed to connect to {url}"),
            UpstreamError::Status(status) => write!(f, "Upstream returned {status}"),
        }
    }
}

impl core::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            UpstreamError::Connect { source, .. } => Some(source),
            UpstreamError::Status(_) => None,
        }
    }
}
