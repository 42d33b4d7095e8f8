use thiserror::Error;

/// A failure while talking to the remote calendar.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a transport which is not backed by HTTP.
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("fetching the waste calendar failed: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed waste calendar response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("invalid collection timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("unknown locale {0:?}, expected \"de\" or \"en\"")]
    UnknownLocale(String),
}

impl CalendarError {
    /// Whether the remote calendar could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, CalendarError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
