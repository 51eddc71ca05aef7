//! Failure taxonomy of the question/answer exchange.

use thiserror::Error;

/// Ways a single ask exchange can fail.
///
/// The variants map one-to-one onto the failure kinds surfaced to the user:
/// an endpoint answering 405 is misconfigured, any other non-2xx is a
/// remote failure, and a request that never produced a response is a
/// transport failure. A 2xx reply whose body does not carry an `answer`
/// string is treated as a failure of the same weight.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("method not allowed: the ask endpoint rejected POST")]
    MethodNotAllowed,

    #[error("HTTP error, status {status}")]
    Http { status: u16 },

    #[error("network failure: {0}")]
    Transport(String),

    #[error("malformed answer payload: {0}")]
    MalformedAnswer(String),
}

impl AskError {
    /// Human-readable description used for the failure notification shown
    /// to the user.
    pub fn description(&self) -> String {
        match self {
            AskError::MethodNotAllowed => {
                "Method not allowed. Please check the API endpoint configuration.".to_string()
            }
            AskError::Http { status } => format!("HTTP error! status: {}", status),
            AskError::Transport(_) | AskError::MalformedAnswer(_) => {
                "Failed to get response from the assistant. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            AskError::Http { status: 500 }.to_string(),
            "HTTP error, status 500"
        );
        assert!(AskError::Transport("connection refused".to_string())
            .to_string()
            .contains("connection refused"));
        assert!(AskError::MalformedAnswer("missing field `answer`".to_string())
            .to_string()
            .contains("missing field"));
    }

    #[test]
    fn test_method_not_allowed_description() {
        let desc = AskError::MethodNotAllowed.description();
        assert!(desc.contains("Method not allowed"));
        assert!(desc.contains("endpoint configuration"));
    }

    #[test]
    fn test_http_description_carries_status() {
        assert_eq!(
            AskError::Http { status: 502 }.description(),
            "HTTP error! status: 502"
        );
    }

    #[test]
    fn test_transport_description_is_generic() {
        let desc = AskError::Transport("dns failure".to_string()).description();
        assert_eq!(
            desc,
            "Failed to get response from the assistant. Please try again."
        );
        // The raw transport detail stays in logs, not in the notification.
        assert!(!desc.contains("dns"));
    }

    #[test]
    fn test_malformed_description_matches_transport() {
        assert_eq!(
            AskError::MalformedAnswer("bad json".to_string()).description(),
            AskError::Transport("x".to_string()).description()
        );
    }
}
