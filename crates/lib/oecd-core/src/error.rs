use std::{error::Error, fmt};

/// Failure reported by a statistics source.
#[derive(Debug)]
pub enum SourceError {
    UnknownDataflow(String),
    Http(Box<reqwest::Error>),
    Api { status: u16, reason: String },
    Decode(String),
    /// Unstructured failure carrying only a message.
    Other(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDataflow(id) => write!(
                f,
                "Unknown dataflow: {id}. Use list_dataflows to see available dataflows."
            ),
            Self::Http(err) => write!(f, "SDMX request failed: {err}"),
            Self::Api { status, reason } => write!(f, "SDMX API error: {status} {reason}"),
            Self::Decode(message) => write!(f, "SDMX response could not be decoded: {message}"),
            Self::Other(message) => f.write_str(message),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

impl From<String> for SourceError {
    fn from(message: String) -> Self {
        Self::Other(message)
    }
}

impl From<&str> for SourceError {
    fn from(message: &str) -> Self {
        Self::Other(message.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
