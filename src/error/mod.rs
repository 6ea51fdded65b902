use thiserror::Error;

/// Everything that can go wrong between building a request and decoding
/// the response.
#[derive(Debug, Error)]
pub enum ArrError {
    /// A required argument, or one half of a paired argument group, was not
    /// supplied. Raised before any request is sent.
    #[error("missing required argument: {name}")]
    MissingArgument { name: String },

    /// An argument was supplied but is not acceptable (unknown enum string,
    /// non-positive id).
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    /// The server answered 404.
    #[error("resource not found: {path}")]
    ResourceNotFound { path: String },

    /// Any other non-2xx answer.
    #[error("request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ArrError {
    pub fn missing(name: impl Into<String>) -> Self {
        ArrError::MissingArgument { name: name.into() }
    }

    pub fn invalid(name: impl Into<String>, value: impl ToString) -> Self {
        ArrError::InvalidValue {
            name: name.into(),
            value: value.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ArrError::ResourceNotFound { .. })
    }

    /// HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ArrError::ResourceNotFound { .. } => Some(404),
            ArrError::Request { status, .. } => Some(*status),
            ArrError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArrError>;
