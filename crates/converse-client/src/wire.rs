//! Wire types of the ask contract.

use serde::{Deserialize, Serialize};

/// Body of the outbound POST: `{"question": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Body of a successful reply: `{"answer": "..."}`.
///
/// The answer is markdown source; rendering belongs to presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}
