//! Scripted stand-ins for the answering service.
//!
//! Let tests drive the conversation controller through exact
//! success/failure sequences without network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::AskError;
use crate::AnswerClient;

/// Pops one pre-scripted result per `ask` call, in order.
///
/// An exhausted script settles as a transport failure so a test that
/// under-scripts fails loudly rather than hanging.
pub struct ScriptedAnswerClient {
    script: Mutex<VecDeque<Result<String, AskError>>>,
    /// Questions seen, in call order, so tests can inspect what was sent.
    questions: Mutex<Vec<String>>,
}

impl ScriptedAnswerClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Script a sequence of successful answers.
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for answer in answers {
            client.push_ok(answer);
        }
        client
    }

    pub fn push_ok(&self, answer: impl Into<String>) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(Ok(answer.into()));
    }

    pub fn push_err(&self, err: AskError) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(Err(err));
    }

    /// Questions received so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .expect("questions mutex poisoned")
            .clone()
    }
}

impl Default for ScriptedAnswerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerClient for ScriptedAnswerClient {
    async fn ask(&self, question: &str) -> Result<String, AskError> {
        self.questions
            .lock()
            .expect("questions mutex poisoned")
            .push(question.to_string());
        self.script
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(AskError::Transport("script exhausted".to_string())))
    }
}

/// Parks each exchange until the test releases it.
///
/// Lets tests observe the Submitting window deterministically: `ask` signals
/// entry, then waits on the gate before settling with the fixed answer.
pub struct GatedAnswerClient {
    answer: String,
    entered: Notify,
    gate: Notify,
}

impl GatedAnswerClient {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Wait until an exchange has been issued and is parked on the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked exchange settle.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl AnswerClient for GatedAnswerClient {
    async fn ask(&self, _question: &str) -> Result<String, AskError> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.answer.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_pops_in_order() {
        let client = ScriptedAnswerClient::with_answers(["first", "second"]);
        assert_eq!(client.ask("a").await.unwrap(), "first");
        assert_eq!(client.ask("b").await.unwrap(), "second");
        assert_eq!(client.questions(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_scripted_errors_settle_as_failures() {
        let client = ScriptedAnswerClient::new();
        client.push_err(AskError::Http { status: 503 });
        let err = client.ask("q").await.unwrap_err();
        assert!(matches!(err, AskError::Http { status: 503 }));
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let client = ScriptedAnswerClient::new();
        let err = client.ask("q").await.unwrap_err();
        assert!(matches!(err, AskError::Transport(_)));
    }

    #[tokio::test]
    async fn test_gated_client_parks_until_released() {
        let client = std::sync::Arc::new(GatedAnswerClient::new("done"));
        let worker = std::sync::Arc::clone(&client);
        let handle = tokio::spawn(async move { worker.ask("q").await });

        client.entered().await;
        client.release();
        assert_eq!(handle.await.unwrap().unwrap(), "done");
    }
}
