use chrono::Utc;
use serde::{Deserialize, Serialize};

// =============================================================================
// Messages
// =============================================================================

/// A single entry in the conversation transcript.
///
/// Messages are immutable once appended. Ordering is conversation order and
/// a message has no identity beyond its position in the log. Bot message
/// text is markdown source; rendering belongs to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub is_bot: bool,
}

impl Message {
    /// A message typed (or dictated) by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: false,
        }
    }

    /// A message produced by the answering service.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: true,
        }
    }
}

/// Append-only record of the conversation.
///
/// Insertion order is significant, entries are never deduplicated, and no
/// removal or edit operations exist. The log only grows for the lifetime of
/// a conversation session.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the end of the log. Synchronous, always succeeds.
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// The full transcript in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }
}

// =============================================================================
// Input buffer
// =============================================================================

/// The user's in-progress, editable question text.
///
/// Owned exclusively by the conversation controller. Cleared on successful
/// submission acceptance and overwritten wholesale while dictation is
/// active.
#[derive(Clone, Debug, Default)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current content.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The current value, as submission would see it.
    pub fn current(&self) -> &str {
        &self.text
    }

    /// Whether the buffer is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// =============================================================================
// Request lifecycle
// =============================================================================

/// Lifecycle of the outbound question/answer exchange.
///
/// At most one `Submitting` exchange exists at any time; new submissions
/// and dictation starts are rejected while one is outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// No exchange outstanding. Ready to submit.
    Idle,
    /// An exchange has been issued and has not yet settled.
    Submitting,
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Idle => write!(f, "Idle"),
            RequestState::Submitting => write!(f, "Submitting"),
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Severity of a user-facing notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Payload handed to the external alert-presentation service.
///
/// The core decides when and with what content to notify; rendering the
/// alert is the sink's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// An error notification with the fixed "Error" title.
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// Unix-millisecond timestamp attached to domain events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("What are your hours?");
        assert_eq!(user.text, "What are your hours?");
        assert!(!user.is_bot);

        let bot = Message::bot("9am-5pm");
        assert_eq!(bot.text, "9am-5pm");
        assert!(bot.is_bot);
    }

    #[test]
    fn test_message_log_append_order() {
        let mut log = MessageLog::new();
        assert!(log.is_empty());

        log.append(Message::bot("hello"));
        log.append(Message::user("hi"));
        log.append(Message::bot("how can I help?"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.messages()[0].text, "hello");
        assert_eq!(log.messages()[1].text, "hi");
        assert_eq!(log.last().unwrap().text, "how can I help?");
    }

    #[test]
    fn test_message_log_only_grows() {
        let mut log = MessageLog::new();
        let mut previous = log.len();
        for i in 0..20 {
            log.append(Message::user(format!("q{}", i)));
            assert!(log.len() > previous);
            previous = log.len();
        }
    }

    #[test]
    fn test_message_log_no_dedup() {
        let mut log = MessageLog::new();
        log.append(Message::user("same"));
        log.append(Message::user("same"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_input_buffer_set_clear() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.current(), "");
        assert!(buf.is_blank());

        buf.set("hello world");
        assert_eq!(buf.current(), "hello world");
        assert!(!buf.is_blank());

        buf.clear();
        assert_eq!(buf.current(), "");
        assert!(buf.is_blank());
    }

    #[test]
    fn test_input_buffer_set_replaces() {
        let mut buf = InputBuffer::new();
        buf.set("first hypothesis");
        buf.set("second");
        assert_eq!(buf.current(), "second");
    }

    #[test]
    fn test_input_buffer_blank_after_trim() {
        let mut buf = InputBuffer::new();
        buf.set("   \t\n ");
        assert!(buf.is_blank());

        buf.set("  x  ");
        assert!(!buf.is_blank());
    }

    #[test]
    fn test_request_state_display() {
        assert_eq!(RequestState::Idle.to_string(), "Idle");
        assert_eq!(RequestState::Submitting.to_string(), "Submitting");
    }

    #[test]
    fn test_notification_error_shape() {
        let n = Notification::error("network failure");
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.title, "Error");
        assert_eq!(n.description, "network failure");
    }

    #[test]
    fn test_notification_severity_serialization() {
        let n = Notification::error("boom");
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
        assert!(json.contains("\"title\":\"Error\""));
    }

    #[test]
    fn test_message_serialization_field_names() {
        let m = Message::bot("**bold**");
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"text\":\"**bold**\""));
        assert!(json.contains("\"is_bot\":true"));
    }

    #[test]
    fn test_timestamp_ordering() {
        let a = Timestamp(1700000000000);
        let b = Timestamp(1700000000001);
        assert!(a < b);
        assert!(Timestamp::now().0 > 0);
    }
}
