//! HTTP implementation of the ask contract.

use async_trait::async_trait;
use tracing::debug;

use crate::error::AskError;
use crate::wire::{AskRequest, AskResponse};
use crate::AnswerClient;

/// `AnswerClient` backed by an HTTP endpoint speaking the ask contract:
/// POST a JSON `{"question"}` body, receive a JSON `{"answer"}` body.
pub struct HttpAnswerClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAnswerClient {
    /// Client with default connection settings.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Client with a caller-configured `reqwest::Client` (timeouts, proxy).
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn ask(&self, question: &str) -> Result<String, AskError> {
        debug!(
            endpoint = %self.endpoint,
            question_len = question.len(),
            "sending ask request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&AskRequest {
                question: question.to_string(),
            })
            .send()
            .await
            .map_err(|e| AskError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 405 {
            return Err(AskError::MethodNotAllowed);
        }
        if !status.is_success() {
            return Err(AskError::Http {
                status: status.as_u16(),
            });
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| AskError::MalformedAnswer(e.to_string()))?;

        debug!(answer_len = body.answer.len(), "ask exchange settled");
        Ok(body.answer)
    }
}

// =============================================================================
// Tests
// =============================================================================
