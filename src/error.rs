use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-2xx answer from the rate or palette service
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Message shown to the dashboard user for a failed city fetch
    pub fn user_message(&self) -> String {
        match self {
            AppError::Upstream { message, .. } => message.clone(),
            AppError::Network(_) | AppError::Timeout(_) => {
                "Network error: Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Alias for convenience
pub type Error = AppError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_is_shown_verbatim() {
        let err = AppError::Upstream {
            status: 503,
            message: "API returned 503: Service Unavailable".to_string(),
        };
        assert_eq!(err.user_message(), "API returned 503: Service Unavailable");
    }

    #[test]
    fn test_transport_errors_share_network_message() {
        let network = AppError::Network("connection refused".to_string());
        let timeout = AppError::Timeout("deadline".to_string());
        assert_eq!(network.user_message(), timeout.user_message());
        assert!(network.user_message().starts_with("Network error"));
    }
}
