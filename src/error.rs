use thiserror::Error;

/// Failure modes of a catalog lookup
///
/// `Cancelled` is an expected outcome of a superseded request and is never
/// shown to the user; every other variant is a genuine fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request was superseded or torn down before it finished
    #[error("Request cancelled")]
    Cancelled,

    /// The remote answered with a non-success status
    #[error("{context}: {reason}")]
    Status {
        context: &'static str,
        status: u16,
        reason: String,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),
}

impl FetchError {
    /// True for the silent, superseded-request outcome
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_reason() {
        let err = FetchError::Status {
            context: "Failed to fetch suggestions",
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch suggestions: Internal Server Error"
        );
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_is_distinct() {
        assert!(FetchError::Cancelled.is_cancelled());
        assert!(!FetchError::Network("connection refused".to_string()).is_cancelled());
    }
}
