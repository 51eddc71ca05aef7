use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// Why a dictation session returned to idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictationStopReason {
    /// The user toggled dictation off.
    Toggled,
    /// The engine stopped on its own (silence timeout or similar).
    Ended,
    /// The engine reported an error.
    Failed,
}

/// Domain events emitted by the conversation controller.
///
/// Consumed by the broadcast channel for presentation updates: scroll to the
/// newest entry on `MessageAppended`, show or hide the thinking indicator on
/// the submission events, reflect the microphone affordance on the dictation
/// events.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConverseEvent {
    /// A conversation session was created and seeded with the greeting.
    ConversationStarted {
        session_id: Uuid,
        timestamp: Timestamp,
    },

    /// A message was appended to the log.
    MessageAppended {
        /// Position of the new entry in the log.
        index: usize,
        is_bot: bool,
        timestamp: Timestamp,
    },

    /// A submission was accepted and its exchange issued.
    SubmissionStarted {
        question_len: usize,
        timestamp: Timestamp,
    },

    /// The outstanding exchange settled.
    SubmissionSettled { ok: bool, timestamp: Timestamp },

    /// Dictation began listening.
    DictationStarted { timestamp: Timestamp },

    /// Dictation returned to idle.
    DictationStopped {
        reason: DictationStopReason,
        timestamp: Timestamp,
    },

    /// The speech engine delivered a new full hypothesis into the input
    /// buffer.
    TranscriptUpdated {
        transcript_len: usize,
        is_final: bool,
        timestamp: Timestamp,
    },
}

impl ConverseEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            ConverseEvent::ConversationStarted { timestamp, .. }
            | ConverseEvent::MessageAppended { timestamp, .. }
            | ConverseEvent::SubmissionStarted { timestamp, .. }
            | ConverseEvent::SubmissionSettled { timestamp, .. }
            | ConverseEvent::DictationStarted { timestamp, .. }
            | ConverseEvent::DictationStopped { timestamp, .. }
            | ConverseEvent::TranscriptUpdated { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a stable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            ConverseEvent::ConversationStarted { .. } => "conversation_started",
            ConverseEvent::MessageAppended { .. } => "message_appended",
            ConverseEvent::SubmissionStarted { .. } => "submission_started",
            ConverseEvent::SubmissionSettled { .. } => "submission_settled",
            ConverseEvent::DictationStarted { .. } => "dictation_started",
            ConverseEvent::DictationStopped { .. } => "dictation_stopped",
            ConverseEvent::TranscriptUpdated { .. } => "transcript_updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamp() {
        let ts = Timestamp::now();
        let event = ConverseEvent::MessageAppended {
            index: 0,
            is_bot: true,
            timestamp: ts,
        };
        assert_eq!(event.timestamp(), ts);
    }

    #[test]
    fn test_event_names() {
        let ts = Timestamp::now();
        let cases: Vec<(ConverseEvent, &str)> = vec![
            (
                ConverseEvent::ConversationStarted {
                    session_id: Uuid::new_v4(),
                    timestamp: ts,
                },
                "conversation_started",
            ),
            (
                ConverseEvent::MessageAppended {
                    index: 2,
                    is_bot: false,
                    timestamp: ts,
                },
                "message_appended",
            ),
            (
                ConverseEvent::SubmissionStarted {
                    question_len: 10,
                    timestamp: ts,
                },
                "submission_started",
            ),
            (
                ConverseEvent::SubmissionSettled {
                    ok: true,
                    timestamp: ts,
                },
                "submission_settled",
            ),
            (
                ConverseEvent::DictationStarted { timestamp: ts },
                "dictation_started",
            ),
            (
                ConverseEvent::DictationStopped {
                    reason: DictationStopReason::Ended,
                    timestamp: ts,
                },
                "dictation_stopped",
            ),
            (
                ConverseEvent::TranscriptUpdated {
                    transcript_len: 11,
                    is_final: true,
                    timestamp: ts,
                },
                "transcript_updated",
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(event.event_name(), expected);
        }
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let event = ConverseEvent::SubmissionSettled {
            ok: false,
            timestamp: Timestamp(1700000000000),
        };
        let json = serde_json::to_string(&event).unwrap();
        let rt: ConverseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(rt.event_name(), "submission_settled");
        assert_eq!(rt.timestamp(), Timestamp(1700000000000));
    }

    #[test]
    fn test_stop_reason_serialization() {
        let json = serde_json::to_string(&DictationStopReason::Ended).unwrap();
        assert_eq!(json, "\"ended\"");
    }
}
