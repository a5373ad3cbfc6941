use thiserror::Error;

/// Failures talking to a movie catalog.
///
/// Every variant renders as a single plain-text message suitable for showing
/// in place of a result list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Something went wrong while fetching movies! (HTTP {status})")]
    Http { status: u16 },

    /// The catalog answered but reported no match (`Response: "False"`)
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Network(String),

    #[error("Unexpected response from catalog: {0}")]
    Decode(String),

    #[error("OMDb API key is not configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SourceError::Http { status: status.as_u16() }
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}
