//! Conversation controller: the top-level orchestrator.
//!
//! Owns the message log and input buffer, composes the dictation
//! controller and request pipeline, and routes every mutation through its
//! own methods so the whole conversation is testable without a rendering
//! environment. Presentation consumes read-only snapshots plus the
//! broadcast event stream.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use converse_client::AnswerClient;
use converse_core::events::{ConverseEvent, DictationStopReason};
use converse_core::types::{InputBuffer, Message, MessageLog, RequestState, Timestamp};
use converse_dictation::{
    DictationController, DictationState, SpeechCapability, SpeechEvent, SpeechOutcome,
    ToggleOutcome,
};

use crate::notify::NotificationSink;
use crate::pipeline::{RequestPipeline, SubmitOutcome};

/// Broadcast capacity for domain events. Presentation consumes promptly;
/// a lagging subscriber just misses scroll hints.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Composes the conversation state and drives it from UI events.
///
/// Methods take `&self`; interior state lives behind mutexes that are never
/// held across an await, so dictation events and input edits interleave
/// freely with an in-flight exchange.
pub struct ConversationController {
    session_id: Uuid,
    log: Mutex<MessageLog>,
    input: Mutex<InputBuffer>,
    dictation: Mutex<DictationController>,
    pipeline: RequestPipeline,
    events: broadcast::Sender<ConverseEvent>,
}

impl ConversationController {
    /// Create a controller seeded with the greeting message.
    ///
    /// `capability` is the feature-detected speech engine; pass `None` in
    /// hosts without one and the dictation toggle degrades to a no-op.
    pub fn new(
        greeting: &str,
        client: Arc<dyn AnswerClient>,
        sink: Arc<dyn NotificationSink>,
        capability: Option<Box<dyn SpeechCapability>>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let session_id = Uuid::new_v4();

        let mut log = MessageLog::new();
        log.append(Message::bot(greeting));

        let dictation = match capability {
            Some(capability) => DictationController::with_capability(capability),
            None => DictationController::new(),
        };

        info!(session_id = %session_id, "Conversation started");
        let controller = Self {
            session_id,
            log: Mutex::new(log),
            input: Mutex::new(InputBuffer::new()),
            dictation: Mutex::new(dictation),
            pipeline: RequestPipeline::new(client, sink, events.clone()),
            events,
        };
        controller.emit(ConverseEvent::ConversationStarted {
            session_id,
            timestamp: Timestamp::now(),
        });
        controller
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Subscribe to the domain-event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ConverseEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Read-only snapshots for presentation
    // =========================================================================

    /// The transcript in conversation order.
    pub fn messages(&self) -> Vec<Message> {
        self.log
            .lock()
            .expect("message log mutex poisoned")
            .messages()
            .to_vec()
    }

    /// The in-progress question text.
    pub fn input(&self) -> String {
        self.input
            .lock()
            .expect("input buffer mutex poisoned")
            .current()
            .to_string()
    }

    pub fn dictation_state(&self) -> DictationState {
        self.dictation
            .lock()
            .expect("dictation mutex poisoned")
            .state()
    }

    pub fn dictation_available(&self) -> bool {
        self.dictation
            .lock()
            .expect("dictation mutex poisoned")
            .is_available()
    }

    pub fn request_state(&self) -> RequestState {
        self.pipeline.state()
    }

    // =========================================================================
    // UI event entry points
    // =========================================================================

    /// Replace the input buffer with edited text (input-change event).
    pub fn set_input(&self, text: impl Into<String>) {
        self.input
            .lock()
            .expect("input buffer mutex poisoned")
            .set(text);
    }

    /// Flip dictation between Idle and Listening.
    ///
    /// Returns `None` when the toggle is ignored because an exchange is in
    /// flight; the microphone affordance is disabled while Submitting.
    pub fn toggle_dictation(&self) -> Option<ToggleOutcome> {
        if self.pipeline.is_submitting() {
            debug!("Dictation toggle ignored: submission in flight");
            return None;
        }

        let outcome = self
            .dictation
            .lock()
            .expect("dictation mutex poisoned")
            .toggle();
        match outcome {
            ToggleOutcome::Started => self.emit(ConverseEvent::DictationStarted {
                timestamp: Timestamp::now(),
            }),
            ToggleOutcome::Stopped => self.emit(ConverseEvent::DictationStopped {
                reason: DictationStopReason::Toggled,
                timestamp: Timestamp::now(),
            }),
            ToggleOutcome::Unavailable => {}
        }
        Some(outcome)
    }

    /// Route an asynchronous speech-engine event.
    ///
    /// Transcript results overwrite the whole input buffer: the engine
    /// delivers its full cumulative hypothesis per event, which also means
    /// manual edits made while Listening are discarded by the next result.
    pub fn handle_speech_event(&self, event: SpeechEvent) {
        let outcome = self
            .dictation
            .lock()
            .expect("dictation mutex poisoned")
            .handle_event(event);

        match outcome {
            SpeechOutcome::ReplaceTranscript {
                transcript,
                is_final,
            } => {
                let transcript_len = transcript.len();
                self.input
                    .lock()
                    .expect("input buffer mutex poisoned")
                    .set(transcript);
                self.emit(ConverseEvent::TranscriptUpdated {
                    transcript_len,
                    is_final,
                    timestamp: Timestamp::now(),
                });
            }
            SpeechOutcome::Stopped => self.emit(ConverseEvent::DictationStopped {
                reason: DictationStopReason::Ended,
                timestamp: Timestamp::now(),
            }),
            SpeechOutcome::Failed { .. } => self.emit(ConverseEvent::DictationStopped {
                reason: DictationStopReason::Failed,
                timestamp: Timestamp::now(),
            }),
            SpeechOutcome::Ignored => {}
        }
    }

    /// Submit a question through the request pipeline.
    pub async fn submit(&self, question: &str) -> SubmitOutcome {
        self.pipeline.submit(question, &self.log, &self.input).await
    }

    /// Submit whatever the input buffer currently holds.
    pub async fn submit_input(&self) -> SubmitOutcome {
        let question = self.input();
        self.submit(&question).await
    }

    fn emit(&self, event: ConverseEvent) {
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Tests
// =============================================================================
