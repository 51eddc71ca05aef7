//! Converse client crate - the outbound question/answer exchange.
//!
//! Defines the answering-service boundary (`AnswerClient`), the wire types
//! of the ask contract, the failure taxonomy, the HTTP implementation, and
//! scripted stand-ins for tests.

pub mod error;
pub mod http;
pub mod mock;
pub mod wire;

pub use error::AskError;
pub use http::HttpAnswerClient;
pub use mock::{GatedAnswerClient, ScriptedAnswerClient};
pub use wire::{AskRequest, AskResponse};

use async_trait::async_trait;

/// A remote service that answers a single free-standing question.
///
/// Each call is independent; no conversation context is carried between
/// exchanges. Implementations must run one exchange to settlement per call
/// and never retry on their own.
#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Submit one question and wait for the exchange to settle.
    async fn ask(&self, question: &str) -> Result<String, AskError>;
}
