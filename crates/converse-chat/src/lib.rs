//! Conversation controller for Converse.
//!
//! Composes the message log, input buffer, dictation controller, and
//! request pipeline into one orchestrator, and defines the
//! notification-sink boundary used for failure alerting.

pub mod controller;
pub mod notify;
pub mod pipeline;

pub use controller::ConversationController;
pub use notify::{NotificationSink, RecordingNotificationSink, TracingNotificationSink};
pub use pipeline::{RequestPipeline, SubmitOutcome, APOLOGY};
