use std::fmt;

/// Why a refresh of the model list did not produce new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Transport-level failure: connection refused, DNS, timeout.
    Network(String),
    /// The backend answered with a non-success status.
    Status { status: u16, url: String },
    /// The body was not JSON or had no usable `models` field.
    Malformed(String),
}

impl FetchFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Network(_) => "network",
            FetchFailure::Status { .. } => "status",
            FetchFailure::Malformed(_) => "malformed",
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network(msg) => write!(f, "request failed: {}", msg),
            FetchFailure::Status { status, url } => {
                write!(f, "GET {} returned status {}", url, status)
            }
            FetchFailure::Malformed(msg) => write!(f, "malformed model list response: {}", msg),
        }
    }
}

impl std::error::Error for FetchFailure {}

impl From<reqwest::Error> for FetchFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchFailure::Malformed(e.to_string())
        } else {
            FetchFailure::Network(e.to_string())
        }
    }
}
