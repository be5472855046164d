use thiserror::Error;

/// Failures reported by the backend client.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend did not answer in time")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    #[error("Backend rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Maps a non-success status and the `error` field of its body.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => BackendError::Unauthorized,
            404 => BackendError::NotFound,
            _ => BackendError::Api {
                status,
                message: message.unwrap_or_else(|| "no details".to_string()),
            },
        }
    }

    /// Text suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Timeout => "The server took too long to respond.".to_string(),
            BackendError::Transport(_) => "Could not reach the server.".to_string(),
            BackendError::Unauthorized => "Please sign in to continue.".to_string(),
            BackendError::NotFound => "Nothing was found.".to_string(),
            BackendError::Api { message, .. } => message.clone(),
            BackendError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::from_status(status.as_u16(), None)
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}
