//! Request pipeline: the single-flight question/answer cycle.
//!
//! Accepts a submission, applies its synchronous side effects (user message
//! appended, input cleared, state Submitting) before the first await, runs
//! exactly one exchange to settlement, and recovers locally from every
//! failure: the sink is notified, the apology is appended, and the state
//! returns to Idle on both paths.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use converse_client::AnswerClient;
use converse_core::events::ConverseEvent;
use converse_core::types::{InputBuffer, Message, MessageLog, Notification, RequestState, Timestamp};

use crate::notify::NotificationSink;

/// Fixed bot reply appended when an exchange fails.
pub const APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request. Please try again.";

/// How a submit attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The exchange settled successfully; the answer was appended.
    Answered,
    /// The exchange failed; the sink was notified and the apology appended.
    Failed,
    /// Rejected with no side effects: blank question after trimming.
    RejectedBlank,
    /// Rejected with no side effects: an exchange is already in flight.
    RejectedBusy,
}

/// Owns the request lifecycle and the answering-service handle.
///
/// The message log and input buffer stay with the conversation controller;
/// the pipeline borrows them per submission so log ownership has a single
/// home.
pub struct RequestPipeline {
    state: Mutex<RequestState>,
    client: Arc<dyn AnswerClient>,
    sink: Arc<dyn NotificationSink>,
    events: broadcast::Sender<ConverseEvent>,
}

impl RequestPipeline {
    pub fn new(
        client: Arc<dyn AnswerClient>,
        sink: Arc<dyn NotificationSink>,
        events: broadcast::Sender<ConverseEvent>,
    ) -> Self {
        Self {
            state: Mutex::new(RequestState::Idle),
            client,
            sink,
            events,
        }
    }

    /// Returns the current request lifecycle state.
    pub fn state(&self) -> RequestState {
        *self.state.lock().expect("request state mutex poisoned")
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == RequestState::Submitting
    }

    /// Run one submission to settlement.
    ///
    /// Preconditions (violations are silent no-ops, reported only through
    /// the returned outcome): the question is non-blank after trimming and
    /// no exchange is outstanding.
    pub async fn submit(
        &self,
        question: &str,
        log: &Mutex<MessageLog>,
        input: &Mutex<InputBuffer>,
    ) -> SubmitOutcome {
        if question.trim().is_empty() {
            debug!("Submission ignored: blank question");
            return SubmitOutcome::RejectedBlank;
        }

        // Claim the single submission slot.
        {
            let mut state = self.state.lock().expect("request state mutex poisoned");
            if *state == RequestState::Submitting {
                debug!("Submission ignored: exchange already in flight");
                return SubmitOutcome::RejectedBusy;
            }
            *state = RequestState::Submitting;
        }

        // Synchronous side effects, before the first await: the user
        // message is visible in the log before the exchange is issued.
        self.append(log, Message::user(question));
        input
            .lock()
            .expect("input buffer mutex poisoned")
            .clear();
        self.emit(ConverseEvent::SubmissionStarted {
            question_len: question.len(),
            timestamp: Timestamp::now(),
        });

        let result = self.client.ask(question).await;

        let outcome = match result {
            Ok(answer) => {
                self.append(log, Message::bot(answer));
                SubmitOutcome::Answered
            }
            Err(err) => {
                warn!(error = %err, "Ask exchange failed");
                self.sink.notify(Notification::error(err.description()));
                self.append(log, Message::bot(APOLOGY));
                SubmitOutcome::Failed
            }
        };

        // Settlement finalization runs on both paths.
        {
            let mut state = self.state.lock().expect("request state mutex poisoned");
            *state = RequestState::Idle;
        }
        self.emit(ConverseEvent::SubmissionSettled {
            ok: outcome == SubmitOutcome::Answered,
            timestamp: Timestamp::now(),
        });

        outcome
    }

    fn append(&self, log: &Mutex<MessageLog>, message: Message) {
        let is_bot = message.is_bot;
        let index = {
            let mut log = log.lock().expect("message log mutex poisoned");
            log.append(message);
            log.len() - 1
        };
        self.emit(ConverseEvent::MessageAppended {
            index,
            is_bot,
            timestamp: Timestamp::now(),
        });
    }

    fn emit(&self, event: ConverseEvent) {
        // Nobody listening is fine; presentation subscribes when it wants.
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Tests
// =============================================================================
