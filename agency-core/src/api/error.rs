use thiserror::Error;

use crate::table::entity_table::LOAD_ERROR_MESSAGE;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Upload form incomplete: {0}")]
    IncompleteForm(&'static str),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// What a page shows in its error banner: the server's own message
    /// when it sent one, otherwise a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message: Some(message), .. } => message.clone(),
            ApiError::IncompleteForm(reason) => format!("Cannot upload: {}", reason),
            _ => LOAD_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = ApiError::Status { status: 403, message: Some("Forbidden for this role".to_string()) };
        assert_eq!(err.user_message(), "Forbidden for this role");
        assert_eq!(err.status(), Some(403));

        let bare = ApiError::Status { status: 500, message: None };
        assert_eq!(bare.user_message(), LOAD_ERROR_MESSAGE);
        assert_eq!(bare.to_string(), "Server error 500: no details");
    }
}
