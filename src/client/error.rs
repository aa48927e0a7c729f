use thiserror::Error;

/// Failure of a call to the referral service.
///
/// HTTP failures keep the server's `error` field (when the body carried one)
/// separately from the generic status message, so callers can prefer the
/// structured text and still branch on the class of failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed with status code 401")]
    Unauthorized { message: Option<String> },

    #[error("Request failed with status code 400")]
    Validation { message: Option<String> },

    #[error("Request failed with status code 409")]
    Conflict { message: Option<String> },

    #[error("Request failed with status code 404")]
    NotFound { message: Option<String> },

    #[error("Request failed with status code {status}")]
    Server { status: u16, message: Option<String> },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid service URL '{url}'")]
    InvalidUrl { url: String },
}

impl ClientError {
    /// Classify a non-success status and its (optional) server message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ClientError::Validation { message },
            401 => ClientError::Unauthorized { message },
            404 => ClientError::NotFound { message },
            409 => ClientError::Conflict { message },
            status => ClientError::Server { status, message },
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Validation { .. } => Some(400),
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Conflict { .. } => Some(409),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) | ClientError::InvalidUrl { .. } => None,
        }
    }

    /// The `error` field of the server's JSON body, if present.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { message }
            | ClientError::Validation { message }
            | ClientError::Conflict { message }
            | ClientError::NotFound { message }
            | ClientError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Collapse the error into one user-facing string: the server message,
    /// else the error's own message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }
        let generic = self.to_string();
        if generic.trim().is_empty() {
            fallback.to_string()
        } else {
            generic
        }
    }
}
