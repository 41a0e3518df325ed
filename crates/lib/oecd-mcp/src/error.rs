use std::{error::Error, fmt};

use oecd_core::SourceError;

use crate::validation::ValidationError;

/// Failure of a single tool invocation.
#[derive(Debug)]
pub enum ToolError {
    /// Arguments violated the tool's schema.
    Validation(ValidationError),
    /// The statistics source failed.
    Source(SourceError),
    /// No tool is registered under the name.
    UnknownTool(String),
    Decode(serde_json::Error),
    /// The handler panicked; carries the panic payload as text.
    Panicked(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::UnknownTool(name) => write!(f, "Unknown tool: {name}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Panicked(message) => f.write_str(message),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::UnknownTool(_) | Self::Panicked(_) => None,
        }
    }
}

impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<SourceError> for ToolError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
