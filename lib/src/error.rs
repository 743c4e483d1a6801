//! The errors returned by the commands

use std::error::Error as _;

/// All the possible errors returned by the client and the API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API rejected the credentials
    #[error("authentication rejected: {status} - {body}")]
    Unauthorized { status: u16, body: String },
    /// The API answered with an unexpected status
    #[error("{status} - {body}")]
    Remote { status: u16, body: String },
    /// Unable to reach the API, including timeouts
    #[error("unable to reach the api: {}", transport_detail(.0))]
    Transport(#[from] reqwest::Error),
    /// Unable to parse a JSON response
    #[error("unable to parse the response: {0}")]
    ResponseFormat(#[from] serde_json::Error),
}

/// The reqwest message followed by its causes, reqwest only displays the outer one.
fn transport_detail(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        detail.push_str(": ");
        detail.push_str(&inner.to_string());
        source = inner.source();
    }
    if err.is_timeout() && !detail.contains("timed out") {
        detail.push_str(": operation timed out");
    }
    detail
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Remote { status, .. } => Some(*status),
            Self::Transport(inner) => inner.status().map(|code| code.as_u16()),
            Self::ResponseFormat(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(inner) if inner.is_timeout())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
